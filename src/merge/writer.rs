//! Serialization of the merged document

use crate::feed::{FeedError, FeedPage, FeedResult};
use quick_xml::events::{BytesDecl, Event};
use quick_xml::Writer;

/// Serializes the merged document
///
/// The base page's events are replayed verbatim, with the appended entry
/// elements spliced in right before the root's closing tag. Output carries
/// a fresh XML declaration (version 1.0, UTF-8, standalone) in place of
/// whatever the base page declared, and no indentation is added.
pub fn write_document(base: &FeedPage, appended: &[Event<'static>]) -> FeedResult<Vec<u8>> {
    let root_end = base.root_end().ok_or(FeedError::UnclosedRoot)?;
    let events = base.events();

    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    for event in &events[..root_end] {
        if matches!(event, Event::Decl(_)) {
            continue;
        }
        writer.write_event(event.clone())?;
    }

    for event in appended {
        writer.write_event(event.clone())?;
    }

    for event in &events[root_end..] {
        writer.write_event(event.clone())?;
    }

    Ok(writer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_is_emitted() {
        let base = FeedPage::parse(b"<feed><title>t</title></feed>").unwrap();
        let out = write_document(&base, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(text.ends_with("</feed>"));
    }

    #[test]
    fn test_appended_events_go_before_root_end() {
        let base = FeedPage::parse(b"<feed><title>t</title></feed>").unwrap();
        let extra = FeedPage::parse(b"<feed><entry><id>x</id></entry></feed>").unwrap();
        let span = extra.entry_events(&extra.entries()[0]).to_vec();

        let out = write_document(&base, &span).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("<title>t</title><entry><id>x</id></entry></feed>"));
    }

    #[test]
    fn test_escaped_text_round_trips_unchanged() {
        let base =
            FeedPage::parse(b"<feed><entry><id>a&amp;b</id></entry></feed>").unwrap();
        let out = write_document(&base, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("<id>a&amp;b</id>"));
    }

    #[test]
    fn test_attributes_round_trip_unchanged() {
        let base = FeedPage::parse(
            br#"<feed><entry><annotate type="comment" rel="parent">a</annotate></entry></feed>"#,
        )
        .unwrap();
        let out = write_document(&base, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(r#"<annotate type="comment" rel="parent">a</annotate>"#));
    }
}
