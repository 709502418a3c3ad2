//! Viewer orchestration.
//!
//! [`FileViewer`] ties the pipeline together: fetch raw bytes from an
//! [`ObjectStore`], dispatch on the file-name extension, parse, and hand
//! back either an inline preview or a packaged standalone document.
//!
//! Every operation performs its own one-shot fetch and owns its parse
//! exclusively. Nothing is cached or shared, so concurrent views are
//! independent by construction; there is no in-flight de-duplication and
//! no automatic retry. A failed fetch surfaces as a [`ViewerError`] for
//! the caller to present.

use crate::csv::parse_csv_preview;
use crate::package::{package_guide, package_notebook, package_tabular, render_notebook_body};
use quantview_core::{
    FileKind, FileRecord, GuideRecord, ObjectStore, Result, TabularPreview, ViewerError,
};
use quantview_notebook::{parse_notebook_from_str, NotebookDocument};
use std::path::Path;

/// Inline preview of a stored file.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Rendered notebook cells as an HTML fragment.
    Notebook(String),
    /// Materialized tabular slice; display is up to the caller.
    Tabular(TabularPreview),
}

/// The viewer pipeline over an object store.
///
/// Generic over the store so tests and the CLI can run against the
/// filesystem while production wires in a remote store.
#[derive(Debug, Clone)]
pub struct FileViewer<S: ObjectStore> {
    store: S,
}

impl<S: ObjectStore> FileViewer<S> {
    /// Create a viewer over the given store.
    #[inline]
    #[must_use = "creates a viewer that should be used for rendering"]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Build an inline preview for a stored file.
    ///
    /// # Errors
    ///
    /// - [`ViewerError::UnsupportedFormat`] for unrecognized extensions
    ///   and for recognized download-only kinds (`.xlsx`, `.parquet`)
    /// - fetch errors from the store
    /// - [`ViewerError::Parse`] for malformed content
    pub fn preview(&self, record: &FileRecord) -> Result<Preview> {
        let kind = previewable_kind(&record.name)?;
        let content = self.fetch_text(record)?;

        match kind {
            FileKind::Notebook => {
                let doc = parse_notebook(&content)?;
                Ok(Preview::Notebook(render_notebook_body(&doc)))
            }
            FileKind::Csv => Ok(Preview::Tabular(parse_csv_preview(&content)?)),
            // previewable_kind already refused download-only kinds.
            FileKind::Xlsx | FileKind::Parquet => {
                Err(ViewerError::UnsupportedFormat(record.name.clone()))
            }
        }
    }

    /// Render a stored file as a standalone HTML document.
    ///
    /// # Errors
    ///
    /// Same conditions as [`FileViewer::preview`].
    pub fn export(&self, record: &FileRecord) -> Result<String> {
        let kind = previewable_kind(&record.name)?;
        let content = self.fetch_text(record)?;
        package_content(kind, &content, &record.name)
    }

    /// Package a guide document for standalone viewing.
    ///
    /// Dual mode per the packaging contract: complete documents pass
    /// through byte-identical, fragments are wrapped. Guide HTML embeds
    /// raw by policy (admin-authored).
    #[must_use = "returns the packaged document"]
    pub fn package_guide(&self, guide: &GuideRecord) -> String {
        package_guide(&guide.html_content, &guide.title)
    }

    fn fetch_text(&self, record: &FileRecord) -> Result<String> {
        let bytes = self.store.fetch(&record.bucket, &record.storage_path)?;
        decode_utf8(bytes, &record.name)
    }
}

/// Render a local file as a standalone HTML document.
///
/// CLI entry point; same dispatch as [`FileViewer::export`] without the
/// object-store indirection.
///
/// # Errors
///
/// Same conditions as [`FileViewer::export`], with I/O errors from the
/// local read.
pub fn export_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let name = display_name(path);
    let kind = previewable_kind(&name)?;
    let content = decode_utf8(std::fs::read(path)?, &name)?;
    package_content(kind, &content, &name)
}

/// Build an inline preview for a local file.
///
/// # Errors
///
/// Same conditions as [`FileViewer::preview`], with I/O errors from the
/// local read.
pub fn preview_file<P: AsRef<Path>>(path: P) -> Result<Preview> {
    let path = path.as_ref();
    let name = display_name(path);
    let kind = previewable_kind(&name)?;
    let content = decode_utf8(std::fs::read(path)?, &name)?;

    match kind {
        FileKind::Notebook => {
            let doc = parse_notebook(&content)?;
            Ok(Preview::Notebook(render_notebook_body(&doc)))
        }
        FileKind::Csv => Ok(Preview::Tabular(parse_csv_preview(&content)?)),
        FileKind::Xlsx | FileKind::Parquet => Err(ViewerError::UnsupportedFormat(name)),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or_else(|| path.display().to_string(), str::to_string)
}

/// Extension dispatch: recognized and previewable, or an error the view
/// boundary can present.
fn previewable_kind(name: &str) -> Result<FileKind> {
    let Some(kind) = FileKind::from_path(name) else {
        return Err(ViewerError::UnsupportedFormat(format!(
            "{name}: unrecognized file extension"
        )));
    };
    if !kind.supports_inline_preview() {
        return Err(ViewerError::UnsupportedFormat(format!(
            "{name}: {kind} files are download-only"
        )));
    }
    log::debug!("Dispatching {name} as {kind}");
    Ok(kind)
}

fn package_content(kind: FileKind, content: &str, name: &str) -> Result<String> {
    match kind {
        FileKind::Notebook => Ok(package_notebook(&parse_notebook(content)?, name)),
        FileKind::Csv => Ok(package_tabular(&parse_csv_preview(content)?, name)),
        FileKind::Xlsx | FileKind::Parquet => {
            Err(ViewerError::UnsupportedFormat(name.to_string()))
        }
    }
}

fn parse_notebook(content: &str) -> Result<NotebookDocument> {
    parse_notebook_from_str(content).map_err(|e| ViewerError::Parse(e.to_string()))
}

fn decode_utf8(bytes: Vec<u8>, name: &str) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| ViewerError::Parse(format!("{name} is not valid UTF-8: {e}")))
}
