//! Bag store error types

use thiserror::Error;
use uuid::Uuid;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the bag store.
///
/// `Display` carries the human-readable message the API returns verbatim;
/// callers pattern-match on the variant, the dashboard only shows the text.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field is missing or an immutable field would change
    #[error("validation failed: {0}")]
    Validation(String),

    /// The tag number is already assigned to another bag
    #[error("duplicate tag number: {0}")]
    DuplicateTag(String),

    /// No bag exists with the given identifier
    #[error("no bag with id {0}")]
    NotFound(Uuid),

    /// Persistence failure unrelated to the request
    #[error("storage failure: {0}")]
    Storage(String),
}
