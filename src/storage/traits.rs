//! Page store trait and error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during page store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Page file not found: {path}")]
    PageNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for page store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for page storage backends
///
/// The fetcher and the merger only meet through this interface: the fetcher
/// writes one numbered page per request, and the merger reads the pages back
/// in the same order and writes the consolidated document. Pages are
/// immutable once saved.
pub trait PageStore {
    /// Path of the page file for a 1-based sequence number
    fn page_path(&self, seq: u32) -> PathBuf;

    /// Persists raw page bytes, unmodified
    fn save_page(&self, seq: u32, bytes: &[u8]) -> StoreResult<()>;

    /// Reads a previously saved page back
    fn load_page(&self, seq: u32) -> StoreResult<Vec<u8>>;

    /// Path of the merged output document
    fn merged_path(&self) -> PathBuf;

    /// Persists the merged document
    fn save_merged(&self, bytes: &[u8]) -> StoreResult<()>;
}
