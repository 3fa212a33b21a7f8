use thiserror::Error;

use crate::recipe::InvalidField;

/// Failure reported by a [`crate::store::RecipeStore`] implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unreachable: {0}")]
    Unavailable(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Store rejected request: {status} - {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed store response: {0}")]
    Malformed(String),
}

/// Errors surfaced by [`crate::repository::RecipeRepository`].
///
/// Reads fail with `StoreUnavailable`, writes with `StoreWriteFailed`. A
/// missing id on update is always `NotFound`, whatever the store reports.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Recipe store unavailable: {0}")]
    StoreUnavailable(StoreError),

    #[error("Failed to write to recipe store: {0}")]
    StoreWriteFailed(StoreError),

    #[error("Recipe not found: {0}")]
    NotFound(String),

    #[error("Invalid recipe: {0}")]
    ValidationFailed(InvalidField),
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Sign-in rejected: {0}")]
    AuthFailed(String),

    #[error("Identity service unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid server URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
}
