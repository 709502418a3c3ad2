//! Naive CSV previewer.
//!
//! Mirrors the upload form's reading of CSV files: newline split, one
//! trailing empty line dropped, comma-split fields with a single layer of
//! surrounding double quotes stripped. Embedded commas and escaped quotes
//! inside quoted fields are NOT supported; that limitation is deliberate
//! and kept for behavioral fidelity with the viewer this previewer feeds
//! (see DESIGN.md). Only the header plus the first
//! [`PREVIEW_ROW_LIMIT`] data rows are materialized.

use quantview_core::{Result, TabularPreview, ViewerError, PREVIEW_ROW_LIMIT};

/// Build a [`TabularPreview`] from raw CSV text.
///
/// The first non-empty line is the header; every later line counts as a
/// data line. At most [`PREVIEW_ROW_LIMIT`] data rows are materialized;
/// `total_row_count` reports the true count so the caller can say
/// "showing N of M rows".
///
/// # Errors
///
/// Returns [`ViewerError::Parse`] for empty input. A preview with zero
/// columns is never produced.
#[must_use = "this function returns a preview that should be displayed"]
pub fn parse_csv_preview(content: &str) -> Result<TabularPreview> {
    let mut lines: Vec<&str> = content.split('\n').map(str::trim).collect();

    if lines.last() == Some(&"") {
        lines.pop();
    }

    // Leading blank lines before the header carry no data.
    let header_index = lines.iter().position(|line| !line.is_empty());
    let Some(header_index) = header_index else {
        return Err(ViewerError::Parse("CSV file is empty".to_string()));
    };

    let headers = split_fields(lines[header_index]);
    let data_lines = &lines[header_index + 1..];

    let total_row_count = data_lines.len();
    let rows = data_lines
        .iter()
        .take(PREVIEW_ROW_LIMIT)
        .map(|line| split_fields(line))
        .collect();

    log::debug!(
        "CSV preview: {} columns, {total_row_count} data rows",
        headers.len()
    );

    Ok(TabularPreview {
        headers,
        rows,
        total_row_count,
    })
}

/// Comma-split a line and strip one layer of surrounding double quotes
/// per field. No escaping support.
fn split_fields(line: &str) -> Vec<String> {
    line.split(',')
        .map(|field| strip_outer_quotes(field.trim()).to_string())
        .collect()
}

fn strip_outer_quotes(field: &str) -> &str {
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        &field[1..field.len() - 1]
    } else {
        field
    }
}
