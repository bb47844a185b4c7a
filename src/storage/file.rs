//! Local filesystem content store.

use std::io;
use std::path::{Path, PathBuf};

use super::{ContentRef, ContentStore, StorageError};

const FILE_SCHEME: &str = "file://";

/// Resolves references to files on the local filesystem.
///
/// Accepted forms:
/// - absolute or relative paths, resolved against the optional base directory
/// - `file://` URIs
/// - paths starting with `~/`, expanded to the user's home directory
///
/// # Example
///
/// ```no_run
/// use n8n_webhook::storage::{ContentRef, ContentStore, FileContentStore};
///
/// let store = FileContentStore::new();
/// let bytes = store.read(&ContentRef::new("/data/files/input.csv"))?;
/// # Ok::<(), n8n_webhook::storage::StorageError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileContentStore {
    base_dir: Option<PathBuf>,
}

impl FileContentStore {
    /// Creates a store resolving relative paths against the working directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_dir: None }
    }

    /// Creates a store resolving relative paths against `base_dir`.
    #[must_use]
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    /// Maps a reference to the path it designates.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::UnsupportedReference`] for non-file URI schemes
    /// or a `~/` path when no home directory is known.
    pub fn resolve(&self, reference: &ContentRef) -> Result<PathBuf, StorageError> {
        let raw = reference.as_str();

        let path = if let Some(rest) = raw.strip_prefix(FILE_SCHEME) {
            PathBuf::from(rest)
        } else if raw.contains("://") {
            return Err(StorageError::UnsupportedReference(reference.clone()));
        } else if let Some(rest) = raw.strip_prefix("~/") {
            let home = dirs::home_dir()
                .ok_or_else(|| StorageError::UnsupportedReference(reference.clone()))?;
            home.join(rest)
        } else {
            PathBuf::from(raw)
        };

        Ok(self.anchor(path))
    }

    fn anchor(&self, path: PathBuf) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }
}

impl ContentStore for FileContentStore {
    fn read(&self, reference: &ContentRef) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(reference)?;
        read_file(&path, reference)
    }
}

fn read_file(path: &Path, reference: &ContentRef) -> Result<Vec<u8>, StorageError> {
    std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StorageError::NotFound(reference.clone()),
        _ => StorageError::Read {
            reference: reference.clone(),
            source: e,
        },
    })
}
