//! Metadata records served by the external store.
//!
//! The viewer never owns persistence: file records, guide documents, and
//! ratings live in a backend-as-a-service store and are consumed here as
//! plain records. [`MetadataStore`] is the seam; [`JsonMetadataStore`] is a
//! file-backed implementation used by the CLI and tests.

use crate::error::{Result, ViewerError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A stored file attached to a model: notebook, dataset, or other upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Display file name (extension drives format dispatch).
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type hint recorded at upload time; advisory only.
    pub mime_type_hint: Option<String>,
    /// Uploader-provided description.
    #[serde(default)]
    pub description: String,
    /// Display name of the uploading user.
    pub uploader_display_name: String,
    /// Upload timestamp.
    pub created_at: DateTime<Utc>,
    /// Object-storage bucket holding the raw bytes.
    pub bucket: String,
    /// Object-storage path within the bucket.
    pub storage_path: String,
}

/// An admin-authored guide document.
///
/// `html_content` is trusted raw HTML by policy: guides are authored by
/// admins, unlike notebook outputs which are always escaped. Preserve this
/// asymmetry; it is a deliberate trust boundary, not an oversight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideRecord {
    /// Guide title.
    pub title: String,
    /// Short description shown in listings.
    #[serde(default)]
    pub description: String,
    /// Authored HTML: either a fragment or a complete document.
    pub html_content: String,
    /// Display name of the author.
    pub author_display_name: String,
    /// Inactive guides are hidden from listings but remain fetchable.
    pub is_active: bool,
    /// Authoring timestamp.
    pub created_at: DateTime<Utc>,
}

/// Aggregate view of a model's ratings.
///
/// The arithmetic mean is the only aggregation performed anywhere in the
/// system.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Mean score, `None` when there are no ratings yet.
    pub average: Option<f64>,
    /// Number of ratings contributing to the mean.
    pub count: usize,
}

impl RatingSummary {
    /// Compute the summary from raw scores.
    ///
    /// # Examples
    ///
    /// ```
    /// use quantview_core::RatingSummary;
    ///
    /// let summary = RatingSummary::from_scores(&[4.0, 5.0, 3.0]);
    /// assert_eq!(summary.average, Some(4.0));
    /// assert_eq!(summary.count, 3);
    ///
    /// let empty = RatingSummary::from_scores(&[]);
    /// assert_eq!(empty.average, None);
    /// ```
    #[must_use = "computes a rating summary from scores"]
    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self::default();
        }
        let sum: f64 = scores.iter().sum();
        Self {
            average: Some(sum / scores.len() as f64),
            count: scores.len(),
        }
    }
}

/// Read access to the metadata store.
///
/// Implementations query by model or guide identifier; the viewer performs
/// only simple filtered reads.
pub trait MetadataStore {
    /// File records attached to a model, in store order.
    ///
    /// An unknown model yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be reached.
    fn files_for_model(&self, model_id: &str) -> Result<Vec<FileRecord>>;

    /// Fetch a guide document by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be reached.
    fn guide(&self, guide_id: &str) -> Result<Option<GuideRecord>>;

    /// Raw rating scores for a model.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be reached.
    fn ratings_for_model(&self, model_id: &str) -> Result<Vec<f64>>;
}

/// Wire shape of the JSON metadata file.
#[derive(Debug, Default, Deserialize)]
struct MetadataFile {
    #[serde(default)]
    files: HashMap<String, Vec<FileRecord>>,
    #[serde(default)]
    guides: HashMap<String, GuideRecord>,
    #[serde(default)]
    ratings: HashMap<String, Vec<f64>>,
}

/// Metadata store backed by a single JSON file.
///
/// Loaded eagerly; every query reads the in-memory snapshot. Good enough
/// for the CLI and tests; the production store is an external service.
#[derive(Debug)]
pub struct JsonMetadataStore {
    data: MetadataFile,
}

impl JsonMetadataStore {
    /// Load the store from a JSON file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] if the file cannot be read and
    /// [`ViewerError::Parse`] if it is not valid metadata JSON.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Build the store from raw JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Parse`] if the text is not valid metadata
    /// JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        let data: MetadataFile = serde_json::from_str(content)
            .map_err(|e| ViewerError::Parse(format!("invalid metadata JSON: {e}")))?;
        Ok(Self { data })
    }
}

impl MetadataStore for JsonMetadataStore {
    fn files_for_model(&self, model_id: &str) -> Result<Vec<FileRecord>> {
        Ok(self.data.files.get(model_id).cloned().unwrap_or_default())
    }

    fn guide(&self, guide_id: &str) -> Result<Option<GuideRecord>> {
        Ok(self.data.guides.get(guide_id).cloned())
    }

    fn ratings_for_model(&self, model_id: &str) -> Result<Vec<f64>> {
        Ok(self.data.ratings.get(model_id).cloned().unwrap_or_default())
    }
}
