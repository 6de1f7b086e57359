//! Merger: multi-page dedup and document assembly
//!
//! Pages are requested in reverse-chronological "continue before this date"
//! order, so consecutive pages can overlap at the boundary: an entry may
//! legitimately reappear on the page right after the one that introduced
//! it. One page of lookback is enough to drop that overlap while still
//! capturing comments on entries introduced by the previous page. The
//! window is deliberately one page deep; do not widen it.

mod writer;

pub use writer::write_document;

use crate::feed::FeedPage;
use crate::storage::PageStore;
use crate::{BackupError, Result};
use quick_xml::events::Event;
use std::collections::HashSet;

/// Merges `page_count` saved pages into one serialized document
///
/// Page 1 seeds the output unfiltered. Every later page contributes the
/// entries whose id was not seen on the page before it, plus the comments
/// whose parent entry was not yet known as of that previous page. Entries
/// are imported as deep copies of their original elements, appended at the
/// end of the base document's root.
pub fn merge_pages<S: PageStore>(store: &S, page_count: u32) -> Result<Vec<u8>> {
    tracing::info!("Loading {}", store.page_path(1).display());
    let base_bytes = store.load_page(1)?;
    let base = FeedPage::parse(&base_bytes)?;

    let mut previous_ids: HashSet<String> = base.posts().map(|e| e.id.clone()).collect();
    let mut current_ids: HashSet<String> = HashSet::new();
    let mut appended: Vec<Event<'static>> = Vec::new();

    for seq in 2..=page_count {
        tracing::info!("Merging {}", store.page_path(seq).display());
        let bytes = store.load_page(seq)?;
        let page = FeedPage::parse(&bytes)?;

        for post in page.posts() {
            current_ids.insert(post.id.clone());
            if previous_ids.contains(&post.id) {
                tracing::debug!("dropping entry {}", post.id);
            } else {
                appended.extend_from_slice(page.entry_events(post));
            }
        }

        for comment in page.comments() {
            if previous_ids.contains(comment.parent_id()) {
                tracing::debug!("dropping comment for {}", comment.parent_id());
            } else {
                appended.extend_from_slice(page.entry_events(comment));
            }
        }

        previous_ids = std::mem::take(&mut current_ids);
    }

    write_document(&base, &appended).map_err(BackupError::Serialize)
}
