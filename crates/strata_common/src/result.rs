//! Common result and error types for the Strata caches.

/// Result type for fallible work performed by external collaborators.
///
/// The analysis engine returns `Err` when it cannot produce a session or a
/// facade at all. The caches never recover from it; the error is handed back
/// to whoever asked for the value.
pub type StrataResult<T> = Result<T, InternalError>;

/// An error raised inside a collaborator (the analysis engine or project model).
///
/// These errors indicate a bug or a broken environment, not a cache miss.
/// A miss is always a normal outcome and is never reported through this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("internal analysis error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
