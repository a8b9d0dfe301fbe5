//! Error types for the duty dashboard.

/// Top-level error type for the scheduling engine.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Local input rejected before anything was sent (blank required field,
    /// malformed time, empty employee name).
    #[error("validation error: {0}")]
    Validation(String),

    /// Network or server failure while talking to the persistence API.
    ///
    /// The roster cache is never modified when this is returned.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Returns `true` when a user-initiated retry of the same request may
    /// succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, DashboardError>;
