//! Feed page model
//!
//! Parses one fetched page into an owned XML event stream plus an index of
//! its `/feed/entry` elements. The event stream keeps every element
//! byte-faithful, so an entry can later be spliced into another document
//! exactly as it appeared on its page; the index carries just enough
//! structure for cursor extraction and dedup (entry id, created timestamp,
//! comment marker, comment parent id).

mod cursor;
mod parser;

pub use cursor::truncate_date;
pub use parser::{EntryNode, FeedPage};

use thiserror::Error;

/// Errors from parsing a feed page or deriving its cursor
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Feed document has no closing root tag")]
    UnclosedRoot,

    #[error("Entry timestamp too short for a cursor: {0:?}")]
    TruncatedTimestamp(String),
}

/// Result type for feed operations
pub type FeedResult<T> = Result<T, FeedError>;
