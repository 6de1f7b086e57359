//! Cursor derivation from entry timestamps

use crate::feed::{FeedError, FeedResult};

/// Collapses an ISO-8601-like `YYYY-MM-DD...` timestamp into the 8-digit
/// `YYYYMMDD` token appended to the base address to request the next older
/// page.
///
/// Offsets are fixed: characters 0-3, 5-6 and 8-9. Separators are not
/// validated, so a timestamp with odd separators yields a garbage cursor
/// rather than an error; only timestamps too short to slice are rejected.
pub fn truncate_date(timestamp: &str) -> FeedResult<String> {
    let chars: Vec<char> = timestamp.chars().take(10).collect();
    if chars.len() < 10 {
        return Err(FeedError::TruncatedTimestamp(timestamp.to_string()));
    }

    let mut cursor = String::with_capacity(8);
    cursor.extend(&chars[0..4]);
    cursor.extend(&chars[5..7]);
    cursor.extend(&chars[8..10]);
    Ok(cursor)
}
