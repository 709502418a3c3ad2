//! Tabular preview model.
//!
//! A [`TabularPreview`] holds the materialized slice of a CSV file that the
//! viewer actually displays: the header row plus at most
//! [`PREVIEW_ROW_LIMIT`] data rows, alongside the true data-row count so
//! the caller can say "showing N of M rows".

/// Maximum number of data rows materialized for a preview, regardless of
/// how many rows the underlying file contains.
pub const PREVIEW_ROW_LIMIT: usize = 50;

/// Materialized preview of tabular data.
///
/// Built fresh per view request; never cached or persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularPreview {
    /// Column names from the first non-empty line.
    pub headers: Vec<String>,
    /// Up to [`PREVIEW_ROW_LIMIT`] data rows, in file order.
    pub rows: Vec<Vec<String>>,
    /// Count of all data lines in the file, independent of how many rows
    /// were materialized.
    pub total_row_count: usize,
}

impl TabularPreview {
    /// Whether the preview shows fewer rows than the file contains.
    #[inline]
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.rows.len() < self.total_row_count
    }

    /// Number of columns, taken from the header row.
    #[inline]
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Human-readable "showing N of M rows" summary line.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "showing {} of {} rows",
            self.rows.len(),
            self.total_row_count
        )
    }
}
