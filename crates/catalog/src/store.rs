//! In-memory catalog store.
//!
//! `CatalogStore` owns the authoritative record list plus the selection
//! state the widget renders from: which categories are active, the
//! current page, and the page size. Derived data (the category set) is
//! recomputed inside every mutating operation rather than cached lazily,
//! so reads never observe a stale view.
//!
//! ## Ordering
//!
//! Records keep their insertion order everywhere. Filtering and
//! pagination are pure projections over that order; no operation sorts
//! or reshuffles the collection.

use std::collections::{BTreeSet, HashSet};

use crate::types::{MovieRecord, PageSize, Vote};

/// Authoritative in-memory movie list with derived, filterable views.
///
/// The collection is owned exclusively by the store and mutated only
/// through its methods; every mutation that can change the set of
/// categories rebuilds the derived category set before returning.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    /// Records in insertion order; display order everywhere follows it.
    records: Vec<MovieRecord>,
    /// Distinct non-empty categories present across `records`.
    categories: BTreeSet<String>,
    /// Active filter set; empty means "no filter applied".
    selected: HashSet<String>,
    /// Current 1-based page.
    page: usize,
    /// Current page size.
    page_size: PageSize,
}

impl CatalogStore {
    /// Create an empty store: no records, no active filters, page 1,
    /// default page size.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            categories: BTreeSet::new(),
            selected: HashSet::new(),
            page: 1,
            page_size: PageSize::default(),
        }
    }

    /// Create a store seeded with `records`.
    ///
    /// Duplicate ids keep the first occurrence. The derived category set
    /// is built once after the whole batch is absorbed.
    ///
    /// # Arguments
    /// * `records` - Initial records, in display order
    pub fn with_records(records: impl IntoIterator<Item = MovieRecord>) -> Self {
        let mut store = Self::new();
        let mut seen = HashSet::new();
        for record in records {
            if seen.insert(record.id.clone()) {
                store.records.push(record);
            }
        }
        store.rebuild_categories();
        store
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// Number of records held, ignoring filters.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record in insertion order, ignoring filters.
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Look up one record by id.
    pub fn get(&self, id: &str) -> Option<&MovieRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Distinct categories currently present across the collection.
    ///
    /// Sorted for stable display. Recomputed on every collection change:
    /// removing the last record of a category removes the category here
    /// as well.
    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// The categories the active filter selects.
    pub fn selected_categories(&self) -> &HashSet<String> {
        &self.selected
    }

    /// Current 1-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Current page size.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Replace the active filter set wholesale.
    ///
    /// Nothing is validated against [`categories`](Self::categories):
    /// selecting a category no record carries simply matches nothing.
    pub fn set_selected_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = categories.into_iter().map(Into::into).collect();
    }

    /// Toggle one category in the active filter set: select it when
    /// absent, deselect it when present.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.selected.remove(category) {
            self.selected.insert(category.to_string());
        }
    }

    /// Records passing the active filter, in insertion order.
    ///
    /// An empty filter set means "no filter applied" and yields every
    /// record, not none.
    pub fn filtered_records(&self) -> Vec<&MovieRecord> {
        self.records
            .iter()
            .filter(|record| self.selected.is_empty() || self.selected.contains(&record.category))
            .collect()
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// One page of the filtered view.
    ///
    /// `page` is 1-based. The slice is clamped to the available records:
    /// a page past the end, page 0, or a zero `per_page` all yield an
    /// empty view rather than an error.
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    /// * `per_page` - Records per full page
    pub fn paginate(&self, page: usize, per_page: usize) -> Vec<&MovieRecord> {
        if page == 0 || per_page == 0 {
            return Vec::new();
        }
        self.filtered_records()
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .collect()
    }

    /// The page addressed by the stored page and page-size state.
    pub fn current_page(&self) -> Vec<&MovieRecord> {
        self.paginate(self.page, self.page_size.per_page())
    }

    /// Number of pages the filtered view spans at the stored page size.
    pub fn page_count(&self) -> usize {
        self.filtered_records().len().div_ceil(self.page_size.per_page())
    }

    /// Whether a further page exists past the stored current page.
    ///
    /// Lets a frontend disable its "next" control;
    /// [`next_page`](Self::next_page) itself never clamps.
    pub fn has_next_page(&self) -> bool {
        self.page.saturating_mul(self.page_size.per_page()) < self.filtered_records().len()
    }

    /// Set the current page without clamping. Out-of-range pages are
    /// legal and simply paginate to an empty view.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Set the page size. The current page is left untouched, so the
    /// visible window may shift to different records.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.page_size = size;
    }

    /// Advance to the next page.
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Step back one page, stopping at page 1.
    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append a record, rejecting duplicate ids (the existing record
    /// wins). Returns whether the record was added.
    pub fn insert(&mut self, record: MovieRecord) -> bool {
        if self.get(&record.id).is_some() {
            return false;
        }
        self.records.push(record);
        self.rebuild_categories();
        true
    }

    /// Remove the record with the matching id, preserving the order of
    /// the remaining records.
    ///
    /// Unknown ids are a no-op returning `None`. Removal rebuilds the
    /// category set, so a category whose sole record disappears drops
    /// out of [`categories`](Self::categories).
    pub fn remove(&mut self, id: &str) -> Option<MovieRecord> {
        let position = self.records.iter().position(|record| record.id == id)?;
        let removed = self.records.remove(position);
        self.rebuild_categories();
        Some(removed)
    }

    /// Cast one vote on the matching record, incrementing exactly one
    /// counter by one. Counters only ever grow; there is no un-vote.
    ///
    /// Unknown ids are a no-op returning `false`.
    pub fn vote(&mut self, id: &str, vote: Vote) -> bool {
        match self.records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                match vote {
                    Vote::Like => record.likes += 1,
                    Vote::Dislike => record.dislikes += 1,
                }
                true
            }
            None => false,
        }
    }

    /// Rebuild the derived category set from the current records.
    ///
    /// Empty-string categories never enter the set.
    fn rebuild_categories(&mut self) {
        self.categories = self
            .records
            .iter()
            .filter(|record| !record.category.is_empty())
            .map(|record| record.category.clone())
            .collect();
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
