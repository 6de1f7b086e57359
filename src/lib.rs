//! jroller-backup: atom feed backup for JRoller.com blogs
//!
//! This crate downloads the paginated atom feed of a blog (entries plus
//! comments) page by page, following the date cursor embedded in each page,
//! and merges all pages into a single de-duplicated backup document.

pub mod config;
pub mod feed;
pub mod fetch;
pub mod merge;
pub mod storage;

use thiserror::Error;

/// Main error type for backup operations
///
/// Every failure is fatal to the run; errors propagate up to `main`, which
/// maps the failure class to a process exit status via [`BackupError::exit_code`].
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Malformed feed URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Storage error: {0}")]
    Store(#[from] storage::StoreError),

    #[error("Feed error: {0}")]
    Feed(#[from] feed::FeedError),

    #[error("Serialization error: {0}")]
    Serialize(#[source] feed::FeedError),
}

impl BackupError {
    /// Process exit status for this failure class
    ///
    /// The class determines the code, not the individual error: all network
    /// failures share one status, all parse failures another, and so on.
    pub fn exit_code(&self) -> i32 {
        match self {
            BackupError::Config(_) => 2,
            BackupError::InvalidUrl { .. } => 3,
            BackupError::Client(_) | BackupError::Http { .. } | BackupError::HttpStatus { .. } => 4,
            BackupError::Store(_) => 5,
            BackupError::Feed(_) => 6,
            BackupError::Serialize(_) => 7,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for backup operations
pub type Result<T> = std::result::Result<T, BackupError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use feed::FeedPage;
pub use fetch::{build_http_client, fetch_all_pages};
pub use merge::merge_pages;
pub use storage::{FlatFileStore, PageStore};
