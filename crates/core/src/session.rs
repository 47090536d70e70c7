//! Interactive session state: input text, column configuration, last summary.

use tracing::{debug, info, warn};

use crate::columns::{clamp_excluded_columns, resolve_columns, unnamed_columns, ColumnSpec};
use crate::error::SessionError;
use crate::export::export;
use crate::table::{header_row, tokenize};
use crate::tally::{aggregate, exclude_prefix, Tally};
use crate::{Clipboard, Notification, Notifier, DEFAULT_EXCLUDED_COLUMNS};

/// Configuration for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Exclusion count used for new input and after a reset.
    pub default_excluded_columns: usize,
    /// Treat the first row as a header. Without one every row is data and
    /// every column gets a synthetic name.
    pub has_header: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_excluded_columns: DEFAULT_EXCLUDED_COLUMNS,
            has_header: true,
        }
    }
}

/// Result of a copy request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// There was no summary, or it rendered to nothing. The clipboard was
    /// not touched.
    NothingToCopy,
}

/// State owned by one interactive front end.
///
/// Columns are derived from the header row and the exclusion count, and are
/// rebuilt from scratch whenever either changes. Rebuilding discards any
/// names the user edited.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    input: String,
    header: Vec<String>,
    excluded_columns: usize,
    columns: Vec<ColumnSpec>,
    summary: Option<Tally>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let excluded_columns = config.default_excluded_columns;
        Self {
            config,
            input: String::new(),
            header: Vec::new(),
            excluded_columns,
            columns: Vec::new(),
            summary: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the input text and re-derive the columns.
    ///
    /// The exclusion count is kept but clamped to the new header width.
    /// The last summary stays until the next [`Session::generate_summary`].
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.header = header_row(&self.input);
        if !self.header.is_empty() {
            self.excluded_columns = clamp_excluded_columns(
                self.excluded_columns as i64,
                self.header.len(),
            );
        }
        self.redetect_columns();
    }

    /// The first row of the input, split into cells.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn excluded_columns(&self) -> usize {
        self.excluded_columns
    }

    /// Set the exclusion count directly, clamped to the header width.
    pub fn set_excluded_columns(&mut self, requested: i64) -> usize {
        self.excluded_columns = clamp_excluded_columns(requested, self.header.len());
        debug!(requested, excluded_columns = self.excluded_columns, "set excluded columns");
        self.redetect_columns();
        self.excluded_columns
    }

    /// Move the exclusion count by `delta`, clamped to the header width.
    pub fn step_excluded_columns(&mut self, delta: i64) -> usize {
        let requested = (self.excluded_columns as i64).saturating_add(delta);
        self.set_excluded_columns(requested)
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Rename the column at `position`.
    pub fn rename_column(
        &mut self,
        position: usize,
        name: impl Into<String>,
    ) -> Result<&ColumnSpec, SessionError> {
        let count = self.columns.len();
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.position == position)
            .ok_or(SessionError::UnknownColumn { position, count })?;
        column.name = name.into();
        Ok(&*column)
    }

    /// Rebuild the columns from the header and exclusion count, dropping
    /// any edited names.
    pub fn redetect_columns(&mut self) -> &[ColumnSpec] {
        self.columns = if self.config.has_header {
            resolve_columns(&self.header, self.excluded_columns)
        } else {
            unnamed_columns(self.header.len(), self.excluded_columns)
        };
        debug!(
            header_len = self.header.len(),
            excluded_columns = self.excluded_columns,
            columns = self.columns.len(),
            "detected columns"
        );
        &self.columns
    }

    /// Whether there is anything to configure: the header needs more than
    /// one cell for the exclusion count to mean anything.
    pub fn is_configurable(&self) -> bool {
        self.header.len() > 1
    }

    /// Tally the current input with the current columns.
    ///
    /// Blank input notifies [`Notification::NoInput`] and leaves the previous
    /// summary in place.
    pub fn generate_summary<N: Notifier>(&mut self, notifier: &N) -> Result<&Tally, SessionError> {
        if self.input.trim().is_empty() {
            warn!("summary requested without input");
            notifier.notify(&Notification::NoInput);
            return Err(SessionError::EmptyInput);
        }

        let table = tokenize(&self.input);
        let data_rows = if self.config.has_header {
            table.data_rows()
        } else {
            table.rows.as_slice()
        };
        let rows = exclude_prefix(data_rows, self.excluded_columns);
        let tally = aggregate(&rows, &self.columns);
        info!(
            rows = rows.len(),
            columns = tally.len(),
            "generated summary"
        );
        Ok(self.summary.insert(tally))
    }

    /// The last generated summary.
    pub fn summary(&self) -> Option<&Tally> {
        self.summary.as_ref()
    }

    /// The last summary as clipboard text, empty when there is none.
    pub fn export_summary(&self) -> String {
        self.summary.as_ref().map(export).unwrap_or_default()
    }

    /// Copy the last summary to the clipboard.
    ///
    /// Does nothing when there is nothing to copy. Both success and failure
    /// are reported to `notifier`; session state is unchanged either way.
    pub fn copy_summary<C: Clipboard, N: Notifier>(
        &self,
        clipboard: &C,
        notifier: &N,
    ) -> Result<CopyOutcome, SessionError> {
        let text = self.export_summary();
        if text.is_empty() {
            debug!("nothing to copy");
            return Ok(CopyOutcome::NothingToCopy);
        }

        match clipboard.copy_text(&text) {
            Ok(()) => {
                notifier.notify(&Notification::CopySucceeded);
                Ok(CopyOutcome::Copied)
            }
            Err(e) => {
                warn!(error = %e, "clipboard write failed");
                notifier.notify(&Notification::CopyFailed {
                    reason: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    /// Empty the input and drop the summary. The exclusion count is kept;
    /// header and columns are re-derived from the empty input.
    pub fn clear(&mut self) {
        self.input.clear();
        self.header.clear();
        self.summary = None;
        self.redetect_columns();
    }

    /// Clear, then restore the default exclusion count.
    pub fn reset(&mut self) {
        self.clear();
        self.excluded_columns = self.config.default_excluded_columns;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClipboardError, SilentNotifier};
    use std::cell::RefCell;

    const INPUT: &str = "id\tts\tuser\tip\tSize\tColor\n\
                         1\t09:00\tann\t10.0.0.1\tm\tred\n\
                         2\t09:05\tbob\t10.0.0.2\tM\tRED\n\
                         3\t09:10\tcid\t10.0.0.3\tnull\tblue\n";

    #[derive(Default)]
    struct RecordingNotifier {
        seen: RefCell<Vec<Notification>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: &Notification) {
            self.seen.borrow_mut().push(notification.clone());
        }
    }

    #[derive(Default)]
    struct MemoryClipboard {
        contents: RefCell<Option<String>>,
    }

    impl Clipboard for MemoryClipboard {
        fn copy_text(&self, text: &str) -> Result<(), ClipboardError> {
            *self.contents.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn copy_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::WriteFailed("permission denied".to_string()))
        }
    }

    fn loaded() -> Session {
        let mut session = Session::default();
        session.set_input(INPUT);
        session
    }

    fn names(session: &Session) -> Vec<&str> {
        session.columns().iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_default_exclusion_detects_columns() {
        let session = loaded();
        assert_eq!(session.excluded_columns(), 4);
        assert_eq!(
            session.columns(),
            [ColumnSpec::new(0, "Size"), ColumnSpec::new(1, "Color")]
        );
        assert!(session.is_configurable());
    }

    #[test]
    fn test_generate_summary() {
        let mut session = loaded();
        let notifier = RecordingNotifier::default();
        let tally = session.generate_summary(&notifier).unwrap();
        assert_eq!(tally.count("Size", "M"), Some(2));
        assert_eq!(tally.count("Color", "Red"), Some(2));
        assert_eq!(
            session.export_summary(),
            "Size:\n2 x M\n\nColor:\n2 x Red\n1 x Blue"
        );
        assert!(notifier.seen.borrow().is_empty());
    }

    #[test]
    fn test_header_is_not_tallied() {
        let mut session = Session::default();
        session.set_input("Size\tColor\nm\tred");
        session.set_excluded_columns(0);
        let tally = session.generate_summary(&RecordingNotifier::default()).unwrap();
        assert_eq!(tally.count("Size", "Size"), None);
        assert_eq!(tally.count("Size", "M"), Some(1));
    }

    #[test]
    fn test_empty_input_notifies() {
        let mut session = Session::default();
        session.set_input("   \n  ");
        let notifier = RecordingNotifier::default();
        let err = session.generate_summary(&notifier).unwrap_err();
        assert!(matches!(err, SessionError::EmptyInput));
        assert_eq!(*notifier.seen.borrow(), [Notification::NoInput]);
        assert!(session.summary().is_none());
    }

    #[test]
    fn test_empty_input_keeps_previous_summary() {
        let mut session = loaded();
        session.generate_summary(&RecordingNotifier::default()).unwrap();
        session.set_input("");
        assert!(session.generate_summary(&RecordingNotifier::default()).is_err());
        assert!(session.summary().is_some());
    }

    #[test]
    fn test_exclusion_is_clamped() {
        let mut session = loaded();
        assert_eq!(session.set_excluded_columns(99), 5);
        assert_eq!(names(&session), ["Color"]);
        assert_eq!(session.set_excluded_columns(-3), 0);
        assert_eq!(session.columns().len(), 6);
        assert_eq!(session.step_excluded_columns(-1), 0);
        assert_eq!(session.step_excluded_columns(1), 1);
    }

    #[test]
    fn test_changing_exclusion_discards_renames() {
        let mut session = loaded();
        session.rename_column(0, "Shirt Size").unwrap();
        assert_eq!(names(&session), ["Shirt Size", "Color"]);

        session.step_excluded_columns(-1);
        session.step_excluded_columns(1);
        assert_eq!(names(&session), ["Size", "Color"]);
    }

    #[test]
    fn test_redetect_discards_renames() {
        let mut session = loaded();
        session.rename_column(1, "Colour").unwrap();
        session.redetect_columns();
        assert_eq!(names(&session), ["Size", "Color"]);
    }

    #[test]
    fn test_renamed_column_used_in_summary() {
        let mut session = loaded();
        session.rename_column(1, "Colour").unwrap();
        let tally = session.generate_summary(&SilentNotifier).unwrap();
        assert_eq!(tally.count("Colour", "Blue"), Some(1));
        assert_eq!(tally.count("Color", "Blue"), None);
    }

    #[test]
    fn test_rename_unknown_column() {
        let mut session = loaded();
        let err = session.rename_column(7, "Nope").unwrap_err();
        assert!(matches!(
            err,
            SessionError::UnknownColumn { position: 7, count: 2 }
        ));
    }

    #[test]
    fn test_single_cell_header_not_configurable() {
        let mut session = Session::default();
        session.set_input("Size\nm\nl");
        assert!(!session.is_configurable());
        assert_eq!(session.excluded_columns(), 0);
        assert_eq!(names(&session), ["Size"]);
    }

    #[test]
    fn test_without_header() {
        let config = SessionConfig {
            default_excluded_columns: 1,
            has_header: false,
        };
        let mut session = Session::new(config);
        session.set_input("1\tm\tred\n2\tl\tred");
        assert_eq!(names(&session), ["Other1", "Other2"]);
        let tally = session.generate_summary(&RecordingNotifier::default()).unwrap();
        assert_eq!(tally.count("Other1", "M"), Some(1));
        assert_eq!(tally.count("Other2", "Red"), Some(2));
    }

    #[test]
    fn test_copy_summary() {
        let mut session = loaded();
        let notifier = RecordingNotifier::default();
        let clipboard = MemoryClipboard::default();

        let outcome = session.copy_summary(&clipboard, &notifier).unwrap();
        assert_eq!(outcome, CopyOutcome::NothingToCopy);
        assert!(clipboard.contents.borrow().is_none());

        session.generate_summary(&notifier).unwrap();
        let outcome = session.copy_summary(&clipboard, &notifier).unwrap();
        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(
            clipboard.contents.borrow().as_deref(),
            Some("Size:\n2 x M\n\nColor:\n2 x Red\n1 x Blue")
        );
        assert_eq!(*notifier.seen.borrow(), [Notification::CopySucceeded]);
    }

    #[test]
    fn test_copy_failure_is_reported() {
        let mut session = loaded();
        let notifier = RecordingNotifier::default();
        session.generate_summary(&notifier).unwrap();

        let err = session.copy_summary(&BrokenClipboard, &notifier).unwrap_err();
        assert!(matches!(err, SessionError::Clipboard(_)));
        assert_eq!(
            *notifier.seen.borrow(),
            [Notification::CopyFailed {
                reason: "Clipboard write failed: permission denied".to_string()
            }]
        );
        assert!(session.summary().is_some());
    }

    #[test]
    fn test_clear_and_reset() {
        let mut session = loaded();
        session.set_excluded_columns(2);
        session.generate_summary(&RecordingNotifier::default()).unwrap();

        session.clear();
        assert!(session.input().is_empty());
        assert!(session.summary().is_none());
        assert_eq!(session.excluded_columns(), 2);

        session.reset();
        assert_eq!(session.excluded_columns(), 4);
        assert!(session.columns().is_empty());
        assert!(session.header().is_empty());
    }

    #[test]
    fn test_clear_drops_header_and_columns() {
        let mut session = Session::default();
        session.set_input("id\tts\tuser\tip\tSize\tColor\n1\t2\t3\t4\tm\tred");
        assert!(session.is_configurable());

        session.clear();
        assert!(session.header().is_empty());
        assert!(!session.is_configurable());
        assert!(session.columns().is_empty());
        assert_eq!(session.excluded_columns(), 4);

        // Clamped against the empty header, not the old one
        assert_eq!(session.set_excluded_columns(3), 0);
        assert!(session.columns().is_empty());
    }
}
