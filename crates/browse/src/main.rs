//! Scripted walk through a browsing session.
//!
//! This binary exercises the widget end to end against the seeded
//! catalog: filter toggles, votes, a removal, pagination, and (when
//! OMDB_API_KEY is set) a live search through the gateway.

use anyhow::Result;
use tracing::info;

use browse::BrowseSession;
use catalog::{PageSize, Vote};
use omdb_client::{OmdbConfig, SearchClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,browse=debug,catalog=debug,omdb_client=debug")
        .init();

    info!("Starting browsing session harness");

    let mut session = BrowseSession::new();
    if let Ok(api_key) = std::env::var("OMDB_API_KEY") {
        session = session.with_search_client(SearchClient::new(OmdbConfig::new(api_key))?);
        info!("Search gateway attached");
    }

    info!("Categories on offer: {}", session.categories().join(", "));

    // Narrow to one category, then widen again
    session.toggle_category("Action");
    info!(
        "After selecting Action: {} record(s) visible",
        session.visible_page().len()
    );
    session.toggle_category("Action");

    // Cast some votes and drop one record
    session.vote("1", Vote::Like);
    session.vote("1", Vote::Like);
    session.vote("1", Vote::Dislike);
    session.remove_movie("2");
    info!(
        "Categories after removing Deadpool: {}",
        session.categories().join(", ")
    );

    // Render the first page
    session.set_page_size(PageSize::Four);
    session.set_page(1);
    info!(
        "Page {} of {}:",
        session.store().page(),
        session.store().page_count()
    );
    for card in session.visible_page() {
        info!(
            "  {} ({}) [{}] - {}% approval, poster {}",
            card.title, card.year, card.category, card.approval_pct, card.poster
        );
    }

    // Optional live leg against the real search API
    if session.has_search() {
        let hits = session.search("batman").await?;
        info!("Remote search returned {} hit(s)", hits.len());

        let added = session.import_matching("batman", "Imported").await?;
        info!(
            "Imported {} record(s); catalog now holds {}",
            added,
            session.store().len()
        );
    } else {
        info!("OMDB_API_KEY not set; skipping the live gateway leg");
    }

    info!("Session harness finished");
    Ok(())
}
