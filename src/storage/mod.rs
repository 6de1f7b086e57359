//! Page storage for fetched feed pages
//!
//! The fetcher produces numbered page files; the merger consumes them in
//! page order and emits one consolidated document. This module is the only
//! state the two components share.

mod files;
mod traits;

pub use files::FlatFileStore;
pub use traits::{PageStore, StoreError, StoreResult};
