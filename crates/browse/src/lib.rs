//! Session layer for the movie browsing widget.
//!
//! This crate ties the catalog store, the poster lookup, and the search
//! gateway together behind the `BrowseSession` facade a presentation
//! layer drives.

pub mod session;

pub use session::{BrowseSession, MovieCard};
