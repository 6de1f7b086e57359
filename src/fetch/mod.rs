//! Fetcher: sequential page download driven by the feed's date cursor
//!
//! This module contains the download half of the backup:
//! - HTTP client construction with proper user agent and timeouts
//! - Single-page GET with strict status checking
//! - The pagination loop and its termination conditions

mod client;
mod pager;

pub use client::{build_http_client, fetch_page};
pub use pager::fetch_all_pages;
