//! # Quantview Core: viewer pipeline types
//!
//! Core types shared across the quantview rendering pipeline: the error
//! taxonomy, file-kind detection, the tabular preview model, metadata
//! records, and the object-storage seam.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! // Note: the rendering entry points live in the quantview-render crate
//! use quantview_core::Result;
//! use quantview_render::export_file;
//!
//! fn main() -> Result<()> {
//!     let html = export_file("analysis.ipynb")?;
//!     std::fs::write("analysis.html", html)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`error`] - Error types and the `Result` alias
//! - [`mod@format`] - File-kind detection from extensions
//! - [`tabular`] - Tabular preview model and row limit
//! - [`metadata`] - File/guide records, ratings, metadata store seam
//! - [`storage`] - Object-storage seam and filesystem implementation
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`Result<T, ViewerError>`](error::ViewerError).
//! All errors are recoverable at the view boundary; nothing here is fatal
//! to the process.

pub mod error;
pub mod format;
pub mod metadata;
pub mod storage;
pub mod tabular;

// Re-exports for convenience
pub use error::*;
pub use format::*;
pub use metadata::*;
pub use storage::*;
pub use tabular::*;
