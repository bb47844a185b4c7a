//! Storage collaborator for file-backed request bodies.
//!
//! The request assembler does not know where content lives. It hands a
//! [`ContentRef`] to a [`ContentStore`] and receives the full byte sequence.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileContentStore;

use std::fmt;
use std::io;

use thiserror::Error;

/// Opaque handle to content held by a [`ContentStore`].
///
/// The interpretation of the handle belongs to the store; for
/// [`FileContentStore`] it is a path or a `file://` URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentRef(String);

impl ContentRef {
    /// Wraps a raw reference.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Returns the raw reference.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentRef {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

impl From<String> for ContentRef {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

/// Errors raised while resolving a [`ContentRef`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// Nothing is stored under the reference.
    #[error("Content not found: {0}")]
    NotFound(ContentRef),

    /// The reference uses a scheme this store cannot resolve.
    #[error("Unsupported content reference '{0}'")]
    UnsupportedReference(ContentRef),

    /// Reading the content failed.
    #[error("Failed to read '{reference}': {source}")]
    Read {
        /// The reference being read
        reference: ContentRef,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Byte-stream provider for external content references.
///
/// A read is a single blocking read-to-completion; no partial or streamed
/// consumption is needed for webhook payload sizes.
pub trait ContentStore: Send + Sync {
    /// Reads the full content behind `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the reference cannot be resolved or read.
    fn read(&self, reference: &ContentRef) -> Result<Vec<u8>, StorageError>;
}

impl<T: ContentStore + ?Sized> ContentStore for &T {
    fn read(&self, reference: &ContentRef) -> Result<Vec<u8>, StorageError> {
        (**self).read(reference)
    }
}
