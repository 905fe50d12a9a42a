//! Title-to-artwork lookup.
//!
//! Poster art lives outside the record collection: records from the seed
//! set carry a generic placeholder URL, and the widget substitutes local
//! artwork by title at render time. The mapping is injectable so a
//! frontend (or a test) can supply its own.

use std::collections::HashMap;

/// Fallback artwork used for titles without a curated entry.
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/200";

/// Maps movie titles to artwork paths, with a defined fallback for
/// everything unmapped.
#[derive(Debug, Clone)]
pub struct PosterIndex {
    by_title: HashMap<String, String>,
    fallback: String,
}

impl PosterIndex {
    /// Create an empty index with the given fallback artwork.
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            by_title: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Create an index from `(title, path)` pairs.
    pub fn with_entries<I, T, P>(entries: I, fallback: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (T, P)>,
        T: Into<String>,
        P: Into<String>,
    {
        let mut index = Self::new(fallback);
        for (title, path) in entries {
            index.insert(title, path);
        }
        index
    }

    /// Add or replace the artwork for one title.
    pub fn insert(&mut self, title: impl Into<String>, path: impl Into<String>) {
        self.by_title.insert(title.into(), path.into());
    }

    /// Resolve the artwork for a title, falling back when no entry
    /// exists. Lookup is exact; titles are compared verbatim.
    pub fn resolve(&self, title: &str) -> &str {
        self.by_title.get(title).map(String::as_str).unwrap_or(&self.fallback)
    }

    /// The artwork returned for unmapped titles.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

impl Default for PosterIndex {
    /// The curated mapping the widget ships with.
    fn default() -> Self {
        Self::with_entries(
            [
                ("Titanic", "/img/titanic.jpg"),
                ("Deadpool", "/img/deadpool.jpg"),
                ("Film 3", "/img/film3.jpg"),
            ],
            PLACEHOLDER_POSTER,
        )
    }
}
