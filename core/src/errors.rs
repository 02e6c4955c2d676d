/// Error types for the tree-menu engine.
use thiserror::Error;

/// Core error type for menu operations.
#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Menu fetch failed: {0}")]
    Fetch(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Menu document parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session store error: {0}")]
    Store(String),

    #[error("Node not found in tree")]
    NodeNotFound,

    #[error("Node is not a folder: {0}")]
    NotAFolder(String),
}

/// Result type for menu operations.
pub type MenuResult<T> = Result<T, MenuError>;

/// Outcome of a user-facing prompt.
///
/// Cancellation is an expected result, not an error: callers match on it and
/// simply skip the mutation. Genuine failures travel through `MenuError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompted<T> {
    /// The user confirmed the prompt with a value.
    Value(T),
    /// The user dismissed the prompt, or a newer prompt displaced it.
    Cancelled,
}

impl<T> Prompted<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Prompted::Cancelled)
    }

    /// The confirmed value, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Prompted::Value(v) => Some(v),
            Prompted::Cancelled => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Prompted<U> {
        match self {
            Prompted::Value(v) => Prompted::Value(f(v)),
            Prompted::Cancelled => Prompted::Cancelled,
        }
    }
}
