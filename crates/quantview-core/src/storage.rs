//! Object-storage access.
//!
//! Raw uploaded bytes live in an external object store, addressed by
//! bucket and path. [`ObjectStore`] is the seam the renderer consumes;
//! [`FsObjectStore`] maps buckets onto subdirectories of a local root so
//! the CLI and tests can run against plain files.
//!
//! Fetches are one-shot and uncoordinated: every view action performs its
//! own fetch, results are never cached, and two concurrent views of the
//! same file simply fetch twice.

use crate::error::{Result, ViewerError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Read access to object storage.
pub trait ObjectStore {
    /// Fetch the raw bytes stored at `bucket`/`path`.
    ///
    /// # Errors
    ///
    /// - [`ViewerError::NotFound`] if the object does not exist
    /// - [`ViewerError::PermissionDenied`] if access is refused
    /// - [`ViewerError::Fetch`] for any other storage failure
    fn fetch(&self, bucket: &str, path: &str) -> Result<Vec<u8>>;
}

/// Object store backed by the local filesystem.
///
/// Buckets are subdirectories of a fixed root; paths resolve within the
/// bucket directory.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Create a store rooted at `root`.
    #[must_use = "creates a store that should be used for fetching"]
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ObjectStore for FsObjectStore {
    fn fetch(&self, bucket: &str, path: &str) -> Result<Vec<u8>> {
        let full_path = self.root.join(bucket).join(path);
        log::debug!("Fetching object {bucket}/{path}");

        std::fs::read(&full_path).map_err(|e| {
            let location = format!("{bucket}/{path}");
            match e.kind() {
                ErrorKind::NotFound => ViewerError::NotFound(location),
                ErrorKind::PermissionDenied => ViewerError::PermissionDenied(location),
                _ => ViewerError::Fetch(format!("{location}: {e}")),
            }
        })
    }
}
