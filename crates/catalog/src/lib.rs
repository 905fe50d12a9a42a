//! # Catalog Crate
//!
//! In-memory movie catalog for the browsing widget: the authoritative
//! record collection plus every derived view the frontend renders.
//!
//! ## Main Components
//!
//! - **Types** (`types`): movie records, votes, and the enumerated page
//!   sizes
//! - **Store** (`store`): the collection with category filtering,
//!   1-based pagination, voting, and removal
//! - **Posters** (`posters`): injectable title-to-artwork lookup
//! - **Seed** (`seed`): the fixed records a fresh session starts from
//! - **Error** (`error`): configuration errors (store operations
//!   themselves are infallible)
//!
//! ## Example Usage
//!
//! ```
//! use catalog::{CatalogStore, Vote, seed_records};
//!
//! let mut store = CatalogStore::with_records(seed_records());
//!
//! // Narrow the view to one category, then widen it again.
//! store.toggle_category("Action");
//! assert_eq!(store.filtered_records().len(), 1);
//! store.toggle_category("Action");
//! assert_eq!(store.filtered_records().len(), 3);
//!
//! // Votes accumulate on the records themselves.
//! store.vote("1", Vote::Like);
//! assert_eq!(store.get("1").map(|r| r.likes), Some(1));
//! ```

pub mod error;
pub mod posters;
pub mod seed;
pub mod store;
pub mod types;

// Re-export main types for convenience
pub use error::CatalogError;
pub use posters::{PLACEHOLDER_POSTER, PosterIndex};
pub use seed::seed_records;
pub use store::CatalogStore;
pub use types::{MovieRecord, PageSize, Vote};
