//! Error types for registry access.

use thiserror::Error;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised by a component registry backend.
///
/// These are infrastructure faults. A lookup that matches nothing or an
/// attribute a component simply does not expose is not an error.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("pattern lookup failed for {pattern}: {reason}")]
    Lookup { pattern: String, reason: String },

    #[error("failed to read {attribute} on {handle}: {reason}")]
    Read {
        handle: String,
        attribute: String,
        reason: String,
    },

    #[error("unknown component handle: {0}")]
    UnknownHandle(String),
}
