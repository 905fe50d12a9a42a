//! Core domain types for the movie catalog.
//!
//! Everything the widget renders derives from these types: the record
//! collection itself, the vote counters carried on each record, and the
//! enumerated page sizes the pagination controls offer.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

// =============================================================================
// Movie records
// =============================================================================

/// One movie entry held by the catalog.
///
/// `id` is an opaque identifier (seeded records use small numerals,
/// imported ones carry IMDb-style ids) and stays stable for the record's
/// lifetime. `year` is free-form text because upstream sources emit
/// ranges like "2012-2014" alongside plain years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    pub poster_url: String,
    pub year: String,
    pub category: String,
    pub likes: u32,
    pub dislikes: u32,
}

impl MovieRecord {
    /// Create a fresh record with zeroed vote counters.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        poster_url: impl Into<String>,
        year: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            poster_url: poster_url.into(),
            year: year.into(),
            category: category.into(),
            likes: 0,
            dislikes: 0,
        }
    }

    /// Total number of votes cast on this record.
    pub fn total_votes(&self) -> u32 {
        self.likes + self.dislikes
    }

    /// Share of likes among all votes, in `[0.0, 1.0]`.
    ///
    /// A record nobody has voted on reports 0.0 rather than NaN, so the
    /// approval gauge renders empty instead of propagating an undefined
    /// value.
    pub fn like_ratio(&self) -> f32 {
        let total = self.total_votes();
        if total > 0 {
            self.likes as f32 / total as f32
        } else {
            0.0
        }
    }
}

// =============================================================================
// Votes
// =============================================================================

/// The two vote kinds a viewer can cast on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vote {
    Like,
    Dislike,
}

// =============================================================================
// Page sizes
// =============================================================================

/// Allowed page sizes for the paginated list.
///
/// The widget offers a fixed set of sizes rather than a free-form count;
/// [`PageSize::try_from`] validates user input against that set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageSize {
    Four,
    Eight,
    Twelve,
}

impl PageSize {
    /// Every selectable size, in the order the controls list them.
    pub const ALL: [PageSize; 3] = [PageSize::Four, PageSize::Eight, PageSize::Twelve];

    /// Number of records on a full page.
    pub fn per_page(self) -> usize {
        match self {
            PageSize::Four => 4,
            PageSize::Eight => 8,
            PageSize::Twelve => 12,
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Four
    }
}

impl TryFrom<usize> for PageSize {
    type Error = CatalogError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(PageSize::Four),
            8 => Ok(PageSize::Eight),
            12 => Ok(PageSize::Twelve),
            _ => Err(CatalogError::InvalidPageSize { value }),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
