//! File-kind detection from file names.
//!
//! The upload convention is the one "wire format" this pipeline owns: the
//! file extension alone decides how a stored object is interpreted.
//! `.ipynb` goes to the notebook parser, `.csv` to the tabular previewer,
//! and `.xlsx`/`.parquet` are recognized tabular formats that are offered
//! for download but never parsed client-side.

use std::path::Path;

/// Recognized file kinds for the viewer.
///
/// Matches the upload form's accepted extensions. Anything outside this
/// enum is unknown and cannot be previewed or classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Jupyter notebook (`.ipynb`)
    Notebook,
    /// Comma-separated values (`.csv`)
    Csv,
    /// Excel workbook (`.xlsx`), download only
    Xlsx,
    /// Apache Parquet (`.parquet`), download only
    Parquet,
}

impl FileKind {
    /// Detect the file kind from an extension (without the leading dot).
    ///
    /// Case-insensitive. Returns `None` for unrecognized extensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use quantview_core::FileKind;
    ///
    /// assert_eq!(FileKind::from_extension("ipynb"), Some(FileKind::Notebook));
    /// assert_eq!(FileKind::from_extension("CSV"), Some(FileKind::Csv));
    /// assert_eq!(FileKind::from_extension("pdf"), None);
    /// ```
    #[must_use = "returns the detected file kind"]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "ipynb" => Some(Self::Notebook),
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            "parquet" => Some(Self::Parquet),
            _ => None,
        }
    }

    /// Detect the file kind from a path or bare file name.
    ///
    /// # Examples
    ///
    /// ```
    /// use quantview_core::FileKind;
    ///
    /// assert_eq!(FileKind::from_path("data/returns.csv"), Some(FileKind::Csv));
    /// assert_eq!(FileKind::from_path("no_extension"), None);
    /// ```
    #[must_use = "returns the detected file kind"]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether this kind can be rendered inline by the viewer.
    ///
    /// `.xlsx` and `.parquet` are classified but download-only.
    #[inline]
    #[must_use]
    pub const fn supports_inline_preview(self) -> bool {
        matches!(self, Self::Notebook | Self::Csv)
    }

    /// The canonical extension for this kind (without the dot).
    #[inline]
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Notebook => "ipynb",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Parquet => "parquet",
        }
    }
}

impl std::fmt::Display for FileKind {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Notebook => "notebook",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Parquet => "parquet",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "notebook" | "ipynb" => Ok(Self::Notebook),
            "csv" => Ok(Self::Csv),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "parquet" => Ok(Self::Parquet),
            _ => Err(format!(
                "Unknown file kind '{s}'. Expected: notebook, csv, xlsx, parquet"
            )),
        }
    }
}
