//! Error types for catalog configuration.

use thiserror::Error;

/// Errors that can occur while configuring the catalog.
///
/// Store operations themselves never fail: unknown ids and out-of-range
/// pages degrade to no-ops or empty views instead of surfacing errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Requested page size is not one of the sizes the controls offer.
    #[error("Unsupported page size {value} (allowed: 4, 8, 12)")]
    InvalidPageSize { value: usize },
}
