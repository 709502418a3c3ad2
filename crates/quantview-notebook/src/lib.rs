//! # Quantview Notebook: Jupyter notebook parsing
//!
//! Parses `.ipynb` JSON into a strict cell model the renderer can consume
//! without re-probing optional fields. The on-disk schema's loose spots
//! (string-or-array sources, the pre-v4 `worksheets` layout, free-form
//! output kinds) are absorbed here.
//!
//! ## Quick Start
//!
//! ```rust
//! use quantview_notebook::{parse_notebook_from_str, Cell};
//!
//! let doc = parse_notebook_from_str(
//!     r##"{"cells":[{"cell_type":"markdown","source":"# Hi"}]}"##,
//! ).unwrap();
//!
//! assert!(matches!(doc.cells[0], Cell::Markdown { .. }));
//! ```

pub mod error;
pub mod ipynb;

pub use error::{NotebookError, Result};
pub use ipynb::{
    parse_notebook, parse_notebook_from_str, Cell, MimeBundle, NotebookDocument,
    NotebookMetadata, Output, StreamName, RENDER_PRIORITY,
};
