//! Errors surfaced by a tally session.

/// Errors from writing text to the system clipboard.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard not available: {0}")]
    Unavailable(String),

    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Errors from session operations. None of them leave the session unusable.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No input provided")]
    EmptyInput,

    #[error("No column at position {position} ({count} columns)")]
    UnknownColumn { position: usize, count: usize },

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}
