//! Pagination loop
//!
//! Each page's URL depends on the cursor extracted from the previous page's
//! content, so fetches are strictly sequential.

use crate::feed::FeedPage;
use crate::fetch::client::fetch_page;
use crate::storage::PageStore;
use crate::{BackupError, Result};
use reqwest::Client;
use url::Url;

/// Downloads every page of the feed, persisting each one through the store
///
/// Returns the number of pages fetched. Together with the store's filename
/// prefix, that count is everything the merge step needs; fetcher and merger
/// otherwise share no state.
///
/// The loop always runs at least once and stops when a page yields no
/// cursor, or when the cursor stops advancing. The second condition catches
/// feeds that keep serving the same tail page for every older date: without
/// it the loop would never terminate.
pub async fn fetch_all_pages<S: PageStore>(
    client: &Client,
    base_url: &str,
    store: &S,
) -> Result<u32> {
    let mut page_url = base_url.to_string();
    let mut cursor = String::new();
    let mut count = 0u32;

    loop {
        count += 1;
        let url = Url::parse(&page_url).map_err(|source| BackupError::InvalidUrl {
            url: page_url.clone(),
            source,
        })?;

        tracing::info!(
            "Downloading {} as {}",
            url,
            store.page_path(count).display()
        );
        let body = fetch_page(client, &url).await?;
        store.save_page(count, &body)?;

        let page = FeedPage::parse(&body)?;
        let previous_cursor = std::mem::take(&mut cursor);
        match page.next_cursor()? {
            None => break,
            Some(next) if next == previous_cursor => break,
            Some(next) => {
                page_url = format!("{}/{}", base_url, next);
                cursor = next;
            }
        }
    }

    Ok(count)
}
