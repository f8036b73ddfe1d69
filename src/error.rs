//! Error types for pathkey

use thiserror::Error;

/// Result type alias for pathkey operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pathkey operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Non-hashable element: {0}")]
    NonHashableElement(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}
