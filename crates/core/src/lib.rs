//! Core logic for summarizing tab-separated data column by column.
//!
//! Pasted text is split into rows and fields, a header row names the
//! columns, a configurable number of leading columns is ignored, and the
//! remaining cells are normalized and counted per column. The resulting
//! [`Tally`] can be rendered as plain text for the clipboard.
//!
//! The pipeline functions are pure. [`Session`] holds the state an
//! interactive front end edits, and reaches the outside world only through
//! the [`Clipboard`] and [`Notifier`] traits.

use std::fmt;

/// Writes text to the system clipboard.
///
/// Front ends provide the implementation: a subprocess-backed tool chain
/// for the CLI, or a browser clipboard on the JavaScript side.
pub trait Clipboard {
    fn copy_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Receives user-facing notifications from a [`Session`].
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

// Blanket implementations for references
impl<T: Clipboard + ?Sized> Clipboard for &T {
    fn copy_text(&self, text: &str) -> Result<(), ClipboardError> {
        (*self).copy_text(text)
    }
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, notification: &Notification) {
        (*self).notify(notification)
    }
}

/// A user-facing outcome of a session operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A summary was requested with no input text.
    NoInput,
    /// The summary was written to the clipboard.
    CopySucceeded,
    /// Writing to the clipboard failed.
    CopyFailed { reason: String },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::NoInput => write!(f, "No input provided"),
            Notification::CopySucceeded => write!(f, "Summary copied to clipboard!"),
            Notification::CopyFailed { reason } => {
                write!(f, "Could not copy summary to clipboard: {}", reason)
            }
        }
    }
}

/// Notifier that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _notification: &Notification) {}
}

mod columns;
mod error;
mod export;
mod normalize;
pub mod session;
mod table;
mod tally;

pub use columns::{
    clamp_excluded_columns, fallback_name, resolve_columns, unnamed_columns, ColumnSpec,
};
pub use error::{ClipboardError, SessionError};
pub use export::{count_line, export};
pub use normalize::{is_blank_or_null, normalize, title_case};
pub use session::{CopyOutcome, Session, SessionConfig};
pub use table::{header_row, split_fields, tokenize, RawTable};
pub use tally::{aggregate, exclude_prefix, Tally};

/// Separator between fields on a line.
pub const FIELD_DELIMITER: char = '\t';

/// Default number of leading columns ignored (id, timestamp, user, address).
pub const DEFAULT_EXCLUDED_COLUMNS: usize = 4;

/// Prefix of the synthetic name given to unnamed columns.
pub const OTHER_COLUMN_PREFIX: &str = "Other";

/// Cell text treated as an absent value, compared case-insensitively.
pub const NULL_LITERAL: &str = "null";
