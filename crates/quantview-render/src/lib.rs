//! # Quantview Render: notebook/CSV rendering and export
//!
//! The rendering half of the viewer pipeline: markdown cells to HTML,
//! code-cell outputs to HTML fragments, CSV text to a capped tabular
//! preview, and whole documents to self-contained standalone HTML. The
//! [`FileViewer`] orchestrator wires these to an object store behind
//! extension dispatch.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quantview_render::export_file;
//!
//! fn main() -> quantview_core::Result<()> {
//!     let html = export_file("analysis.ipynb")?;
//!     std::fs::write("analysis.html", html)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`markdown`] - Markdown subset to HTML, plus HTML escaping
//! - [`output`] - Code-cell output fragments, ANSI stripping
//! - [`csv`] - Naive CSV previewer (capped at 50 rows)
//! - [`package`] - Standalone document packaging, guide dual-mode
//! - [`viewer`] - [`FileViewer`] orchestrator and local-file entry points

pub mod csv;
pub mod markdown;
pub mod output;
pub mod package;
pub mod viewer;

pub use csv::parse_csv_preview;
pub use markdown::{escape_html, render_markdown};
pub use output::{render_outputs, strip_ansi};
pub use package::{
    package_guide, package_notebook, package_tabular, render_notebook_body, render_tabular_body,
};
pub use viewer::{export_file, preview_file, FileViewer, Preview};
