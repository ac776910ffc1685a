//! Error types for the role cache.

use thiserror::Error;

/// The main error type for role cache operations.
///
/// Lookup misses are deliberately not represented here: asking for an unknown
/// role returns `None` or an empty collection, never an error.
#[derive(Error, Debug)]
pub enum Error {
    /// The cache was queried or mutated before `initialize()` completed.
    #[error("Role cache has not been initialized")]
    NotInitialized,

    /// A mutation targeted a role name with no entry in the directory.
    #[error("Role '{0}' not found")]
    RoleNotFound(String),

    /// A privilege URI pattern could not be compiled into a matcher.
    #[error("Invalid URI pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern text.
        pattern: String,
        /// Why compilation rejected it.
        reason: String,
    },

    /// The external role store failed while the cache was loading from it.
    #[error("Role store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Result type alias for role cache operations.
pub type Result<T> = std::result::Result<T, Error>;
