//! Deriving the tallied columns from a header row.

use serde::Serialize;

use crate::OTHER_COLUMN_PREFIX;

/// A tallied column.
///
/// `position` is the offset into a row after the excluded prefix has been
/// dropped, so the first tallied column always has position 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub position: usize,
    pub name: String,
}

impl ColumnSpec {
    pub fn new(position: usize, name: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
        }
    }
}

/// Synthetic name for an unnamed column at 0-based `index`.
pub fn fallback_name(index: usize) -> String {
    format!("{}{}", OTHER_COLUMN_PREFIX, index + 1)
}

/// Resolve the columns to tally from `header` after skipping its first
/// `excluded_columns` cells.
///
/// Empty header cells are named `Other<n>` (1-based). Header cells are used
/// as-is, without trimming.
pub fn resolve_columns<S: AsRef<str>>(header: &[S], excluded_columns: usize) -> Vec<ColumnSpec> {
    if header.len() <= excluded_columns {
        return Vec::new();
    }

    header[excluded_columns..]
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let cell = cell.as_ref();
            let name = if cell.is_empty() {
                fallback_name(index)
            } else {
                cell.to_string()
            };
            ColumnSpec::new(index, name)
        })
        .collect()
}

/// Columns for input without a header row: every cell past the excluded
/// prefix of a row `width` fields wide gets a synthetic name.
pub fn unnamed_columns(width: usize, excluded_columns: usize) -> Vec<ColumnSpec> {
    (0..width.saturating_sub(excluded_columns))
        .map(|index| ColumnSpec::new(index, fallback_name(index)))
        .collect()
}

/// Clamp a requested exclusion count to `[0, header_len - 1]`.
///
/// An empty header clamps everything to 0.
pub fn clamp_excluded_columns(requested: i64, header_len: usize) -> usize {
    let max = header_len.saturating_sub(1);
    if requested <= 0 {
        0
    } else {
        usize::try_from(requested).map_or(max, |n| n.min(max))
    }
}
