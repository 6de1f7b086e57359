//! Configuration module for jroller-backup
//!
//! The tool runs without any configuration file; the optional TOML file only
//! tunes ambient knobs (HTTP client identity and timeouts, output directory).
//!
//! # Example
//!
//! ```no_run
//! use jroller_backup::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("backup.toml")).unwrap();
//! println!("Requests identify as: {}", config.http.user_agent);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
