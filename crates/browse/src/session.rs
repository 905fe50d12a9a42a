//! # Browsing Session
//!
//! This module coordinates the pieces of the widget for one user:
//! 1. Seed the catalog store
//! 2. Apply filter, page, and page-size changes
//! 3. Project records into render-ready cards (posters, approval)
//! 4. Record votes and removals
//! 5. Reach out to the search gateway and import the hits
//!
//! The session owns its store outright. Nothing here is shared or
//! reactive; a frontend calls a method, then re-reads the views it
//! cares about.

use anyhow::{Context, Result};
use tracing::{debug, info};

use catalog::{CatalogStore, MovieRecord, PageSize, PosterIndex, Vote, seed_records};
use omdb_client::{MovieSummary, SearchClient};

/// Category assigned to imported records when the caller supplies none.
const FALLBACK_CATEGORY: &str = "Uncategorized";

/// Everything the widget needs to render one movie tile.
///
/// A pure projection of store state: the poster is already resolved
/// through the [`PosterIndex`] and the approval percentage is already
/// guarded against the zero-votes case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    pub id: String,
    pub title: String,
    pub year: String,
    pub category: String,
    pub poster: String,
    pub likes: u32,
    pub dislikes: u32,
    /// Share of likes among all votes, 0 to 100; 0 when nobody voted.
    pub approval_pct: u8,
}

/// Coordinates the store, the poster lookup, and the search gateway for
/// one browsing session.
pub struct BrowseSession {
    store: CatalogStore,
    posters: PosterIndex,
    search: Option<SearchClient>,
}

impl BrowseSession {
    /// Session over the built-in seed records and poster mapping, with
    /// no search gateway attached.
    pub fn new() -> Self {
        Self::with_store(
            CatalogStore::with_records(seed_records()),
            PosterIndex::default(),
        )
    }

    /// Session over an explicit store and poster mapping.
    ///
    /// # Arguments
    /// * `store` - The record collection to browse
    /// * `posters` - Title-to-artwork mapping used when building cards
    pub fn with_store(store: CatalogStore, posters: PosterIndex) -> Self {
        Self {
            store,
            posters,
            search: None,
        }
    }

    /// Attach a search gateway.
    pub fn with_search_client(mut self, client: SearchClient) -> Self {
        self.search = Some(client);
        self
    }

    // =========================================================================
    // Read views
    // =========================================================================

    /// Read access to the underlying store.
    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Distinct categories to offer in the filter control, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.store.categories().iter().cloned().collect()
    }

    /// Cards for the current page of the filtered view.
    pub fn visible_page(&self) -> Vec<MovieCard> {
        self.store
            .current_page()
            .into_iter()
            .map(|record| self.card_for(record))
            .collect()
    }

    /// Cards for an explicit page and page-size combination, leaving the
    /// stored selection state untouched.
    pub fn page(&self, page: usize, per_page: usize) -> Vec<MovieCard> {
        self.store
            .paginate(page, per_page)
            .into_iter()
            .map(|record| self.card_for(record))
            .collect()
    }

    fn card_for(&self, record: &MovieRecord) -> MovieCard {
        MovieCard {
            id: record.id.clone(),
            title: record.title.clone(),
            year: record.year.clone(),
            category: record.category.clone(),
            poster: self.posters.resolve(&record.title).to_string(),
            likes: record.likes,
            dislikes: record.dislikes,
            approval_pct: (record.like_ratio() * 100.0).round() as u8,
        }
    }

    // =========================================================================
    // User actions
    // =========================================================================

    /// Toggle one category filter.
    pub fn toggle_category(&mut self, category: &str) {
        debug!("Toggling category filter {:?}", category);
        self.store.toggle_category(category);
    }

    /// Replace the active filter set wholesale.
    pub fn set_selected_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.store.set_selected_categories(categories);
    }

    /// Cast a vote on a record. Unknown ids are ignored.
    pub fn vote(&mut self, id: &str, vote: Vote) -> bool {
        let counted = self.store.vote(id, vote);
        debug!("Vote {:?} on {:?}: counted={}", vote, id, counted);
        counted
    }

    /// Delete a record from the catalog. Unknown ids are ignored.
    pub fn remove_movie(&mut self, id: &str) -> bool {
        let removed = self.store.remove(id).is_some();
        debug!("Removing {:?}: removed={}", id, removed);
        removed
    }

    /// Jump to a page (1-based, unclamped).
    pub fn set_page(&mut self, page: usize) {
        self.store.set_page(page);
    }

    /// Change the page size.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.store.set_page_size(size);
    }

    /// Advance one page.
    pub fn next_page(&mut self) {
        self.store.next_page();
    }

    /// Step back one page, stopping at page 1.
    pub fn prev_page(&mut self) {
        self.store.prev_page();
    }

    // =========================================================================
    // Search gateway
    // =========================================================================

    /// Whether a search gateway is attached.
    pub fn has_search(&self) -> bool {
        self.search.is_some()
    }

    /// Query the remote search API without touching the catalog.
    ///
    /// # Returns
    /// Raw summaries in the order the remote ranked them
    pub async fn search(&self, term: &str) -> Result<Vec<MovieSummary>> {
        let client = self
            .search
            .as_ref()
            .context("No search gateway configured for this session")?;
        client
            .search(term)
            .await
            .context("Remote movie search failed")
    }

    /// Fetch summaries matching `term` and add them to the catalog under
    /// `category`, skipping ids already present.
    ///
    /// Goes through the gateway's fail-soft path: a failing search
    /// imports nothing rather than erroring, matching the widget's
    /// lenient semantics. An empty `category` falls back to
    /// "Uncategorized" so imported records stay groupable.
    ///
    /// # Returns
    /// The number of records actually added
    pub async fn import_matching(&mut self, term: &str, category: &str) -> Result<usize> {
        let client = self
            .search
            .as_ref()
            .context("No search gateway configured for this session")?;
        let hits = client.search_or_empty(term).await;

        let category = if category.is_empty() {
            FALLBACK_CATEGORY
        } else {
            category
        };

        let mut added = 0;
        for hit in hits {
            if self.store.insert(record_from_summary(hit, category)) {
                added += 1;
            }
        }
        info!("Imported {} new records for search {:?}", added, term);
        Ok(added)
    }
}

impl Default for BrowseSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert one raw search hit into a catalog record.
///
/// Vote counters start at zero. The caller picks the category because
/// the search API does not classify its hits.
fn record_from_summary(summary: MovieSummary, category: &str) -> MovieRecord {
    MovieRecord::new(
        summary.imdb_id,
        summary.title,
        summary.poster,
        summary.year,
        category,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use omdb_client::OmdbConfig;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    const POSTER: &str = "https://via.placeholder.com/200";

    fn build_test_session() -> BrowseSession {
        let store = CatalogStore::with_records([
            MovieRecord::new("1", "Titanic", POSTER, "2022", "Action"),
            MovieRecord::new("2", "Deadpool", POSTER, "2021", "Drama"),
            MovieRecord::new("3", "Film 3", POSTER, "2020", "Comedy"),
        ]);
        let posters = PosterIndex::with_entries(
            [("Titanic", "/img/titanic.jpg"), ("Deadpool", "/img/deadpool.jpg")],
            POSTER,
        );
        BrowseSession::with_store(store, posters)
    }

    /// Serve one canned JSON response on an ephemeral port and hand back
    /// the base URL to point the gateway at.
    async fn start_mock_search_service(body: String) -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock search service");
        let addr = listener.local_addr().expect("Failed to read mock address");

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("Mock accept failed");

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.expect("Mock read failed");
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("Mock write failed");
            socket.shutdown().await.ok();
        });

        (format!("http://{}/", addr), handle)
    }

    fn attach_gateway(session: BrowseSession, base_url: String) -> BrowseSession {
        let client = SearchClient::new(OmdbConfig::new("test-key").with_base_url(base_url))
            .expect("Failed to build search client");
        session.with_search_client(client)
    }

    // ============================================================================
    // Unit Tests: views
    // ============================================================================

    #[test]
    fn test_visible_page_resolves_posters() {
        let session = build_test_session();

        let cards = session.visible_page();

        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].poster, "/img/titanic.jpg");
        assert_eq!(cards[1].poster, "/img/deadpool.jpg");
        assert_eq!(cards[2].poster, POSTER, "Unmapped titles fall back to the placeholder");
    }

    #[test]
    fn test_card_approval_percentage() {
        let mut session = build_test_session();

        assert_eq!(
            session.visible_page()[0].approval_pct,
            0,
            "An unvoted record shows zero approval, not NaN"
        );

        session.vote("1", Vote::Like);
        session.vote("1", Vote::Like);
        session.vote("1", Vote::Like);
        session.vote("1", Vote::Dislike);

        let card = &session.visible_page()[0];
        assert_eq!(card.likes, 3);
        assert_eq!(card.dislikes, 1);
        assert_eq!(card.approval_pct, 75);
    }

    #[test]
    fn test_toggle_narrows_visible_page() {
        let mut session = build_test_session();

        session.toggle_category("Drama");
        let cards = session.visible_page();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Deadpool");

        session.toggle_category("Drama");
        assert_eq!(session.visible_page().len(), 3);
    }

    #[test]
    fn test_explicit_page_view_ignores_selection_state() {
        let mut session = build_test_session();
        session.set_page(99);

        assert!(session.visible_page().is_empty());
        assert_eq!(session.page(1, 2).len(), 2, "Explicit paging bypasses the stored page");
        assert_eq!(session.store().page(), 99);
    }

    // ============================================================================
    // Unit Tests: actions
    // ============================================================================

    #[test]
    fn test_remove_movie_updates_categories() {
        let mut session = build_test_session();

        assert!(session.remove_movie("3"));
        assert!(!session.remove_movie("3"), "Second removal finds nothing");

        assert_eq!(session.categories(), ["Action", "Drama"]);
        assert_eq!(session.visible_page().len(), 2);
    }

    #[test]
    fn test_vote_on_unknown_id_is_ignored() {
        let mut session = build_test_session();

        assert!(!session.vote("99", Vote::Like));

        let total: u32 = session
            .visible_page()
            .iter()
            .map(|card| card.likes + card.dislikes)
            .sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn test_page_navigation_round_trip() {
        let mut session = build_test_session();
        session.set_page_size(PageSize::Four);

        session.next_page();
        assert_eq!(session.store().page(), 2);
        assert!(session.visible_page().is_empty(), "3 records fit on page 1");

        session.prev_page();
        session.prev_page();
        assert_eq!(session.store().page(), 1, "prev_page stops at page 1");
        assert_eq!(session.visible_page().len(), 3);
    }

    // ============================================================================
    // Unit Tests: search gateway
    // ============================================================================

    #[tokio::test]
    async fn test_import_matching_adds_new_records() {
        let body = serde_json::json!({
            "Search": [
                // Collides with a seeded id and must be skipped.
                {"Title": "Impostor", "Year": "1999", "imdbID": "1", "Type": "movie", "Poster": "N/A"},
                {"Title": "Batman", "Year": "1989", "imdbID": "tt0096895", "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "2",
            "Response": "True"
        })
        .to_string();
        let (base_url, handle) = start_mock_search_service(body).await;
        let mut session = attach_gateway(build_test_session(), base_url);

        let added = session
            .import_matching("batman", "Imported")
            .await
            .expect("Import should succeed");

        assert_eq!(added, 1, "The colliding id must not count as added");
        assert_eq!(session.store().len(), 4);
        assert_eq!(
            session.store().get("1").map(|r| r.title.as_str()),
            Some("Titanic"),
            "The existing record wins the id collision"
        );
        assert!(session.categories().contains(&"Imported".to_string()));
        handle.await.expect("Mock task panicked");
    }

    #[tokio::test]
    async fn test_import_with_empty_category_uses_fallback() {
        let body = serde_json::json!({
            "Search": [
                {"Title": "Batman", "Year": "1989", "imdbID": "tt0096895", "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "1",
            "Response": "True"
        })
        .to_string();
        let (base_url, handle) = start_mock_search_service(body).await;
        let mut session = attach_gateway(build_test_session(), base_url);

        let added = session
            .import_matching("batman", "")
            .await
            .expect("Import should succeed");

        assert_eq!(added, 1);
        assert_eq!(
            session.store().get("tt0096895").map(|r| r.category.as_str()),
            Some(FALLBACK_CATEGORY)
        );
        handle.await.expect("Mock task panicked");
    }

    #[tokio::test]
    async fn test_import_survives_unreachable_gateway() {
        // A port with nothing listening behind it.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to read address");
        drop(listener);

        let mut session = attach_gateway(build_test_session(), format!("http://{}/", addr));

        let added = session
            .import_matching("batman", "Imported")
            .await
            .expect("A dead gateway must not error the import");

        assert_eq!(added, 0);
        assert_eq!(session.store().len(), 3, "The catalog is left untouched");
    }

    #[tokio::test]
    async fn test_search_without_gateway_errors() {
        let session = build_test_session();

        assert!(!session.has_search());
        assert!(session.search("batman").await.is_err());
    }
}
