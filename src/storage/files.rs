//! Flat-file page store implementation

use crate::storage::traits::{PageStore, StoreError, StoreResult};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Flat-file page store
///
/// Page files are named `<prefix><SEQ>.xml` where SEQ is the sequence number
/// in uppercase hexadecimal without padding; the merged document goes to
/// `<prefix>_all.xml`. All files live directly in one directory.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    dir: PathBuf,
    prefix: String,
}

impl FlatFileStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }
}

impl PageStore for FlatFileStore {
    fn page_path(&self, seq: u32) -> PathBuf {
        self.dir.join(format!("{}{:X}.xml", self.prefix, seq))
    }

    fn save_page(&self, seq: u32, bytes: &[u8]) -> StoreResult<()> {
        let path = self.page_path(seq);
        fs::write(&path, bytes).map_err(|source| StoreError::Io { path, source })
    }

    fn load_page(&self, seq: u32) -> StoreResult<Vec<u8>> {
        let path = self.page_path(seq);
        fs::read(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                StoreError::PageNotFound { path, source }
            } else {
                StoreError::Io { path, source }
            }
        })
    }

    fn merged_path(&self) -> PathBuf {
        self.dir.join(format!("{}_all.xml", self.prefix))
    }

    fn save_merged(&self, bytes: &[u8]) -> StoreResult<()> {
        let path = self.merged_path();
        fs::write(&path, bytes).map_err(|source| StoreError::Io { path, source })
    }
}
