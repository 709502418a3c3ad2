use crate::error::{NotebookError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Mime types the viewer knows how to render, in selection order.
///
/// For a display-data output carrying several representations, the first
/// entry present in the bundle wins and the rest are ignored.
pub const RENDER_PRIORITY: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/svg+xml",
    "text/html",
    "text/plain",
];

/// Parsed Jupyter notebook
///
/// Cells appear in insertion order; order is significant for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotebookDocument {
    /// Notebook-level metadata
    pub metadata: NotebookMetadata,
    /// Cells in display order
    pub cells: Vec<Cell>,
}

/// Notebook-level metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotebookMetadata {
    /// Kernel display name (e.g., "Python 3")
    pub kernel_display_name: Option<String>,
    /// Programming language name (e.g., "python")
    pub language: Option<String>,
}

/// One notebook cell
///
/// A tagged variant so every consumer handles all cell kinds exhaustively
/// instead of probing optional fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Narrative markdown
    Markdown {
        /// Markdown source, normalized to a single string
        source: String,
    },
    /// Executable code with its recorded outputs
    Code {
        /// Code source, normalized to a single string
        source: String,
        /// Execution count, if the cell was run
        execution_count: Option<i64>,
        /// Outputs in original order
        outputs: Vec<Output>,
    },
    /// Raw text (no formatting)
    Raw {
        /// Raw source, normalized to a single string
        source: String,
    },
}

impl Cell {
    /// The cell's source text, regardless of kind.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Markdown { source } | Self::Code { source, .. } | Self::Raw { source } => source,
        }
    }
}

/// Which stream a text output was written to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StreamName {
    /// Standard output
    #[default]
    Stdout,
    /// Standard error (rendered visually distinguished)
    Stderr,
}

/// One output attached to a code cell
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Rich display data keyed by mime type
    ///
    /// `execute_result` outputs are folded into this variant at parse time;
    /// they carry the same mime-bundle shape.
    DisplayData {
        /// Mime type → representation text (base64 for raster images)
        bundle: MimeBundle,
    },
    /// Stream text (stdout/stderr)
    Stream {
        /// Stream the text was written to
        name: StreamName,
        /// Stream text, normalized to a single string
        text: String,
    },
    /// Error traceback
    Error {
        /// Traceback lines, may contain ANSI escape sequences
        traceback: Vec<String>,
    },
}

/// Mime type → representation mapping for a display-data output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MimeBundle {
    entries: HashMap<String, String>,
}

impl MimeBundle {
    /// Build a bundle from mime-type/representation pairs.
    #[must_use]
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Look up a representation by exact mime type.
    #[inline]
    #[must_use]
    pub fn get(&self, mime: &str) -> Option<&str> {
        self.entries.get(mime).map(String::as_str)
    }

    /// The single representation to render, per [`RENDER_PRIORITY`].
    ///
    /// Returns the mime type and its content; `None` if the bundle holds
    /// no renderable type.
    #[must_use]
    pub fn best(&self) -> Option<(&'static str, &str)> {
        RENDER_PRIORITY
            .iter()
            .find_map(|mime| self.get(mime).map(|content| (*mime, content)))
    }

    /// Whether the bundle has no entries at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ==================== Wire format ====================
//
// The on-disk notebook schema is loosely typed: `source` and `text` are a
// string or an array of line fragments, cell/output kinds are free-form
// strings, and the pre-v4 schema nests cells under `worksheets[0]`. These
// private structs absorb all of that so the public model above stays
// strict.

/// A string or an array of line fragments; notebooks use both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SourceText {
    Single(String),
    Fragments(Vec<String>),
}

impl SourceText {
    /// Concatenate fragments into one string. Fragments already carry
    /// their own trailing newlines, so this is a plain join.
    fn into_string(self) -> String {
        match self {
            Self::Single(s) => s,
            Self::Fragments(parts) => parts.concat(),
        }
    }
}

impl Default for SourceText {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

#[derive(Debug, Deserialize)]
struct WireNotebook {
    #[serde(default)]
    metadata: WireMetadata,
    cells: Option<Vec<WireCell>>,
    worksheets: Option<Vec<WireWorksheet>>,
}

#[derive(Debug, Deserialize)]
struct WireWorksheet {
    #[serde(default)]
    cells: Vec<WireCell>,
}

#[derive(Debug, Default, Deserialize)]
struct WireMetadata {
    kernelspec: Option<WireKernelspec>,
    language_info: Option<WireLanguageInfo>,
}

#[derive(Debug, Deserialize)]
struct WireKernelspec {
    display_name: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireLanguageInfo {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireCell {
    cell_type: String,
    #[serde(default)]
    source: SourceText,
    execution_count: Option<i64>,
    #[serde(default)]
    outputs: Vec<WireOutput>,
}

#[derive(Debug, Deserialize)]
struct WireOutput {
    output_type: String,
    name: Option<String>,
    text: Option<SourceText>,
    data: Option<HashMap<String, Value>>,
    traceback: Option<Vec<String>>,
}

/// Parse a Jupyter notebook from a file path
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The notebook JSON is malformed or not a notebook
#[must_use = "this function returns a parsed notebook that should be processed"]
pub fn parse_notebook<P: AsRef<Path>>(path: P) -> Result<NotebookDocument> {
    let content = fs::read_to_string(path)?;
    parse_notebook_from_str(&content)
}

/// Parse a Jupyter notebook from a string
///
/// Accepts the modern schema (top-level `cells`) and the older
/// `worksheets[0].cells` layout; the first present wins.
///
/// # Errors
///
/// Returns [`NotebookError::JsonError`] for malformed JSON and
/// [`NotebookError::InvalidFormat`] when the JSON has neither a `cells`
/// array nor a `worksheets` array.
#[must_use = "this function returns a parsed notebook that should be processed"]
pub fn parse_notebook_from_str(content: &str) -> Result<NotebookDocument> {
    let wire: WireNotebook = serde_json::from_str(content)?;

    let metadata = extract_metadata(&wire.metadata);

    let wire_cells = match (wire.cells, wire.worksheets) {
        (Some(cells), _) => cells,
        (None, Some(mut worksheets)) if !worksheets.is_empty() => {
            std::mem::take(&mut worksheets[0].cells)
        }
        _ => {
            return Err(NotebookError::InvalidFormat(
                "notebook has neither 'cells' nor 'worksheets'".to_string(),
            ))
        }
    };

    let cells = wire_cells.into_iter().map(convert_cell).collect();

    Ok(NotebookDocument { metadata, cells })
}

fn extract_metadata(wire: &WireMetadata) -> NotebookMetadata {
    let kernel_display_name = wire
        .kernelspec
        .as_ref()
        .and_then(|ks| ks.display_name.clone().or_else(|| ks.name.clone()));

    let language = wire.language_info.as_ref().and_then(|li| li.name.clone());

    NotebookMetadata {
        kernel_display_name,
        language,
    }
}

fn convert_cell(wire: WireCell) -> Cell {
    let source = wire.source.into_string();

    match wire.cell_type.as_str() {
        "markdown" | "md" => Cell::Markdown { source },
        "code" => {
            let outputs = wire.outputs.into_iter().filter_map(convert_output).collect();
            Cell::Code {
                source,
                execution_count: wire.execution_count,
                outputs,
            }
        }
        "raw" => Cell::Raw { source },
        other => {
            // Unknown cell kinds degrade to raw text rather than failing
            // the whole notebook.
            log::debug!("Treating unknown cell type {other:?} as raw");
            Cell::Raw { source }
        }
    }
}

fn convert_output(wire: WireOutput) -> Option<Output> {
    match wire.output_type.as_str() {
        "stream" => {
            let name = match wire.name.as_deref() {
                Some("stderr") => StreamName::Stderr,
                _ => StreamName::Stdout,
            };
            let text = wire.text.map(SourceText::into_string).unwrap_or_default();
            Some(Output::Stream { name, text })
        }
        // execute_result carries the same mime-bundle shape as
        // display_data; the distinction does not matter for rendering.
        "display_data" | "execute_result" => {
            let bundle = wire.data.map(normalize_bundle).unwrap_or_default();
            Some(Output::DisplayData { bundle })
        }
        // "pyerr" is the pre-v4 spelling used by the worksheets schema.
        "error" | "pyerr" => Some(Output::Error {
            traceback: wire.traceback.unwrap_or_default(),
        }),
        other => {
            log::warn!("Skipping unknown output type {other:?}");
            None
        }
    }
}

/// Flatten mime-bundle values to strings: fragments are joined, strings
/// pass through, anything else (e.g., application/json payloads) is kept
/// as its JSON text.
fn normalize_bundle(data: HashMap<String, Value>) -> MimeBundle {
    MimeBundle::from_entries(data.into_iter().map(|(mime, value)| {
        let text = match value {
            Value::String(s) => s,
            Value::Array(parts) => parts
                .into_iter()
                .map(|part| match part {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
            other => other.to_string(),
        };
        (mime, text)
    }))
}
