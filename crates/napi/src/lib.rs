//! Node.js bindings for the column tally pipeline.
//!
//! A browser or Electron front end keeps one `TallySession` per form and
//! calls into it whenever the pasted text or the column configuration
//! changes. Clipboard access stays on the JavaScript side: the front end
//! copies the string returned by `exportSummary()`.

use napi::bindgen_prelude::*;
use napi_derive::napi;
use std::sync::Mutex;

use column_tally_core::{
    ColumnSpec as CoreColumn, Session as CoreSession, SessionConfig, SessionError, SilentNotifier,
    Tally as CoreTally,
};

/// A tallied column.
#[napi(object)]
pub struct ColumnSpec {
    /// Offset after the excluded columns (0-based).
    pub position: u32,
    pub name: String,
}

/// Narrow a count or index for JavaScript, failing instead of truncating.
fn to_u32(n: usize) -> Result<u32> {
    u32::try_from(n).map_err(|_| Error::from_reason(format!("{} does not fit in u32", n)))
}

impl TryFrom<&CoreColumn> for ColumnSpec {
    type Error = Error;

    fn try_from(column: &CoreColumn) -> Result<Self> {
        Ok(Self {
            position: to_u32(column.position)?,
            name: column.name.clone(),
        })
    }
}

fn column_specs(columns: &[CoreColumn]) -> Result<Vec<ColumnSpec>> {
    columns.iter().map(ColumnSpec::try_from).collect()
}

/// One normalized value and how often it occurred.
#[napi(object)]
pub struct ValueCount {
    pub value: String,
    pub count: u32,
}

/// Counted values of one column, in first-occurrence order.
#[napi(object)]
pub struct ColumnSummary {
    pub column: String,
    pub values: Vec<ValueCount>,
}

fn summaries(tally: &CoreTally) -> Result<Vec<ColumnSummary>> {
    tally
        .iter()
        .map(|(column, values)| {
            let values = values
                .iter()
                .map(|(value, count)| {
                    Ok(ValueCount {
                        value: value.clone(),
                        count: to_u32(*count)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(ColumnSummary {
                column: column.to_string(),
                values,
            })
        })
        .collect()
}

/// Options for a new TallySession. Unspecified values use core defaults.
#[napi(object)]
pub struct TallySessionOptions {
    /// Leading columns ignored for new input and after a reset.
    pub default_excluded_columns: Option<u32>,
    /// Whether the first row names the columns.
    pub has_header: Option<bool>,
}

fn session_error(err: SessionError) -> Error {
    let status = match err {
        SessionError::EmptyInput | SessionError::UnknownColumn { .. } => Status::InvalidArg,
        SessionError::Clipboard(_) => Status::GenericFailure,
    };
    Error::new(status, err.to_string())
}

/// Session state for one data entry form.
#[napi]
pub struct TallySession {
    inner: Mutex<CoreSession>,
}

impl TallySession {
    fn with_session<R>(&self, f: impl FnOnce(&mut CoreSession) -> Result<R>) -> Result<R> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| Error::from_reason("Lock poisoned"))?;
        f(&mut *inner)
    }
}

#[napi]
impl TallySession {
    /// Create a new session.
    ///
    /// @param options - Optional configuration options.
    #[napi(constructor)]
    pub fn new(options: Option<TallySessionOptions>) -> Result<Self> {
        let defaults = SessionConfig::default();
        let config = match options {
            Some(opts) => SessionConfig {
                default_excluded_columns: opts
                    .default_excluded_columns
                    .map(|v| v as usize)
                    .unwrap_or(defaults.default_excluded_columns),
                has_header: opts.has_header.unwrap_or(defaults.has_header),
            },
            None => defaults,
        };

        Ok(Self {
            inner: Mutex::new(CoreSession::new(config)),
        })
    }

    /// Replace the pasted text and re-detect the columns.
    #[napi]
    pub fn set_input(&self, text: String) -> Result<Vec<ColumnSpec>> {
        self.with_session(|session| {
            session.set_input(text);
            column_specs(session.columns())
        })
    }

    /// The first row of the input, split into cells.
    #[napi]
    pub fn header(&self) -> Result<Vec<String>> {
        self.with_session(|session| Ok(session.header().to_vec()))
    }

    #[napi]
    pub fn excluded_columns(&self) -> Result<u32> {
        self.with_session(|session| to_u32(session.excluded_columns()))
    }

    /// Set the number of ignored leading columns. Returns the clamped value.
    #[napi]
    pub fn set_excluded_columns(&self, requested: i64) -> Result<u32> {
        self.with_session(|session| to_u32(session.set_excluded_columns(requested)))
    }

    /// Move the number of ignored leading columns by `delta`. Returns the clamped value.
    #[napi]
    pub fn step_excluded_columns(&self, delta: i64) -> Result<u32> {
        self.with_session(|session| to_u32(session.step_excluded_columns(delta)))
    }

    #[napi]
    pub fn columns(&self) -> Result<Vec<ColumnSpec>> {
        self.with_session(|session| column_specs(session.columns()))
    }

    /// Rename the column at `position` (0-based, after exclusion).
    #[napi]
    pub fn rename_column(&self, position: u32, name: String) -> Result<ColumnSpec> {
        self.with_session(|session| {
            let column = session
                .rename_column(position as usize, name)
                .map_err(session_error)?;
            ColumnSpec::try_from(column)
        })
    }

    /// Rebuild the columns from the header, dropping edited names.
    #[napi]
    pub fn redetect_columns(&self) -> Result<Vec<ColumnSpec>> {
        self.with_session(|session| column_specs(session.redetect_columns()))
    }

    /// False when the header has at most one cell.
    #[napi]
    pub fn is_configurable(&self) -> Result<bool> {
        self.with_session(|session| Ok(session.is_configurable()))
    }

    /// Tally the input. Throws "No input provided" when the input is blank.
    #[napi]
    pub fn generate_summary(&self) -> Result<Vec<ColumnSummary>> {
        self.with_session(|session| {
            let tally = session
                .generate_summary(&SilentNotifier)
                .map_err(session_error)?;
            summaries(tally)
        })
    }

    /// The last summary, or null when none has been generated.
    #[napi]
    pub fn summary(&self) -> Result<Option<Vec<ColumnSummary>>> {
        self.with_session(|session| session.summary().map(summaries).transpose())
    }

    /// The last summary as plain text for the clipboard; empty when there is none.
    #[napi]
    pub fn export_summary(&self) -> Result<String> {
        self.with_session(|session| Ok(session.export_summary()))
    }

    /// The last summary as a JSON object string; "{}" when there is none.
    #[napi]
    pub fn summary_json(&self) -> Result<String> {
        self.with_session(|session| {
            let empty = CoreTally::new();
            let tally = session.summary().unwrap_or(&empty);
            serde_json::to_string(tally).map_err(|e| Error::from_reason(e.to_string()))
        })
    }

    /// Empty the input and drop the summary.
    #[napi]
    pub fn clear(&self) -> Result<()> {
        self.with_session(|session| {
            session.clear();
            Ok(())
        })
    }

    /// Clear and restore the default column configuration.
    #[napi]
    pub fn reset(&self) -> Result<()> {
        self.with_session(|session| {
            session.reset();
            Ok(())
        })
    }
}

/// Helper function: split text into rows of tab-separated fields.
#[napi]
pub fn tokenize(text: String) -> Vec<Vec<String>> {
    column_tally_core::tokenize(&text).rows
}

/// Helper function: resolve columns from a header row.
#[napi]
pub fn resolve_columns(header: Vec<String>, excluded_columns: u32) -> Result<Vec<ColumnSpec>> {
    column_specs(&column_tally_core::resolve_columns(&header, excluded_columns as usize))
}

/// Helper function: normalize a cell value; null when it would be skipped.
#[napi]
pub fn normalize_value(value: Option<String>) -> Option<String> {
    column_tally_core::normalize(value.as_deref())
}
