use thiserror::Error;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the finance tracker core
#[derive(Error, Debug)]
pub enum Error {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cannot delete default {entity} with id {id}")]
    Protected { entity: &'static str, id: i64 },

    #[error("Record store operation failed: {0}")]
    Store(#[from] StoreError),
}

impl Error {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Error::NotFound { entity, id }
    }

    pub fn protected(entity: &'static str, id: i64) -> Self {
        Error::Protected { entity, id }
    }
}

/// Rejected input, named per field so the caller can surface inline
/// correction hints. Checked before any mutation is applied.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing")]
    MissingField(&'static str),

    #[error("Field '{0}' must be greater than zero")]
    NonPositiveAmount(&'static str),

    #[error("Field '{0}' must not be negative")]
    NegativeAmount(&'static str),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid month key '{0}', expected YYYY-MM")]
    InvalidMonthKey(String),

    #[error("A budget for category {category_id} already exists for {month}")]
    DuplicateBudget { category_id: i64, month: String },

    #[error("A category named '{name}' already exists for {kind} entries")]
    DuplicateCategory { name: String, kind: String },
}

/// Failures of the underlying record-store collaborator. Surfaced as a
/// generic retryable failure; read paths degrade to empty result sets.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record store unreachable: {0}")]
    Unavailable(String),

    #[error("Record store request failed: {0}")]
    Api(String),

    #[error("Failed to decode record store response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Unavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Store(StoreError::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Store(StoreError::from(err))
    }
}
