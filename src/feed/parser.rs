//! Feed page parsing
//!
//! One pass over the document builds two things at once: the owned event
//! stream (replayed verbatim when the page is merged or re-serialized) and
//! the index of `/feed/entry` elements. Elements are matched by XML local
//! name so namespaced feeds work unchanged.

use crate::feed::cursor::truncate_date;
use crate::feed::{FeedError, FeedResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::ops::Range;

/// One `/feed/entry` element of a page
///
/// An entry counts as a post only when it carries a `created` child with
/// text content; entries without one exist in the stream (and are replayed
/// on serialization if they belong to the base page) but play no part in
/// pagination or dedup. An entry is a comment when it carries an `annotate`
/// child with `type="comment"`; the same element can be both.
#[derive(Debug, Clone)]
pub struct EntryNode {
    /// Event span of the whole element within the page's event stream
    span: Range<usize>,
    /// Text of the first `id` child, empty when the entry has none
    pub id: String,
    /// Text of the first `created` child that has text content
    pub created: Option<String>,
    /// Whether the entry carries an `annotate` child with `type="comment"`
    pub is_comment: bool,
    /// Text of the first `annotate` child with `type="comment"` and
    /// `rel="parent"`: the id of the entry this comment belongs to
    pub comment_parent: Option<String>,
}

impl EntryNode {
    /// Entries only count for pagination and dedup when they carry a
    /// creation timestamp
    pub fn is_post(&self) -> bool {
        self.created.is_some()
    }

    /// Parent entry id used as the comment dedup key, empty when absent
    pub fn parent_id(&self) -> &str {
        self.comment_parent.as_deref().unwrap_or("")
    }
}

/// One fetched page, parsed into an owned event stream
#[derive(Debug)]
pub struct FeedPage {
    events: Vec<Event<'static>>,
    root_end: Option<usize>,
    entries: Vec<EntryNode>,
}

impl FeedPage {
    /// Parses a page from its raw bytes
    pub fn parse(bytes: &[u8]) -> FeedResult<Self> {
        let mut reader = Reader::from_reader(bytes);
        let mut buf = Vec::new();

        let mut events: Vec<Event<'static>> = Vec::new();
        let mut entries = Vec::new();
        let mut root_end = None;
        let mut root_is_feed = false;
        let mut depth = 0usize;
        let mut current: Option<PartialEntry> = None;

        loop {
            let event = reader.read_event_into(&mut buf)?;
            if matches!(event, Event::Eof) {
                break;
            }

            let idx = events.len();
            match &event {
                Event::Start(e) => {
                    depth += 1;
                    match depth {
                        1 => root_is_feed = e.local_name().as_ref() == b"feed",
                        2 if root_is_feed && e.local_name().as_ref() == b"entry" => {
                            current = Some(PartialEntry::new(idx));
                        }
                        3 => {
                            if let Some(entry) = current.as_mut() {
                                entry.enter_child(e)?;
                            }
                        }
                        _ => {}
                    }
                }
                Event::Empty(e) => {
                    // an empty child yields no text, but an empty annotate
                    // still carries its attributes
                    if depth == 2 {
                        if let Some(entry) = current.as_mut() {
                            entry.enter_child(e)?;
                            entry.leave_child();
                        }
                    }
                }
                Event::End(_) => {
                    depth -= 1;
                    match depth {
                        0 => root_end = Some(idx),
                        1 => {
                            if let Some(partial) = current.take() {
                                entries.push(partial.finish(idx));
                            }
                        }
                        2 => {
                            if let Some(entry) = current.as_mut() {
                                entry.leave_child();
                            }
                        }
                        _ => {}
                    }
                }
                Event::Text(t) => {
                    if depth == 3 {
                        if let Some(entry) = current.as_mut() {
                            entry.push_text(&t.unescape()?);
                        }
                    }
                }
                Event::CData(t) => {
                    if depth == 3 {
                        if let Some(entry) = current.as_mut() {
                            entry.push_text(&String::from_utf8_lossy(t));
                        }
                    }
                }
                _ => {}
            }

            events.push(event.into_owned());
            buf.clear();
        }

        Ok(FeedPage {
            events,
            root_end,
            entries,
        })
    }

    /// All `/feed/entry` elements in document order
    pub fn entries(&self) -> &[EntryNode] {
        &self.entries
    }

    /// Entries carrying a creation timestamp (the feed's posts)
    pub fn posts(&self) -> impl Iterator<Item = &EntryNode> {
        self.entries.iter().filter(|e| e.is_post())
    }

    /// Entries marked as comments
    pub fn comments(&self) -> impl Iterator<Item = &EntryNode> {
        self.entries.iter().filter(|e| e.is_comment)
    }

    /// Event span of one entry element, suitable for replay into a writer
    pub fn entry_events(&self, entry: &EntryNode) -> &[Event<'static>] {
        &self.events[entry.span.clone()]
    }

    pub(crate) fn events(&self) -> &[Event<'static>] {
        &self.events
    }

    pub(crate) fn root_end(&self) -> Option<usize> {
        self.root_end
    }

    /// Pagination cursor for this page
    ///
    /// The cursor is the truncated date of the last post in document order.
    /// `Ok(None)` means the page cannot advance pagination and the fetch
    /// loop stops.
    pub fn next_cursor(&self) -> FeedResult<Option<String>> {
        match self.posts().last().and_then(|e| e.created.as_deref()) {
            None => Ok(None),
            Some(timestamp) => truncate_date(timestamp).map(Some),
        }
    }
}

/// Kind of entry child currently being read
#[derive(Debug, Clone, Copy, PartialEq)]
enum ChildKind {
    Id,
    Created,
    AnnotateParent,
    Other,
}

/// Accumulator for the entry element the parser is inside of
struct PartialEntry {
    start: usize,
    id: Option<String>,
    created: Option<String>,
    is_comment: bool,
    comment_parent: Option<String>,
    child: Option<(ChildKind, String)>,
}

impl PartialEntry {
    fn new(start: usize) -> Self {
        Self {
            start,
            id: None,
            created: None,
            is_comment: false,
            comment_parent: None,
            child: None,
        }
    }

    fn enter_child(&mut self, element: &BytesStart) -> FeedResult<()> {
        let kind = match element.local_name().as_ref() {
            b"id" => ChildKind::Id,
            b"created" => ChildKind::Created,
            b"annotate" => {
                let mut is_comment = false;
                let mut is_parent = false;
                for attr in element.attributes() {
                    let attr = attr.map_err(quick_xml::Error::InvalidAttr)?;
                    match attr.key.local_name().as_ref() {
                        b"type" if attr.value.as_ref() == b"comment" => is_comment = true,
                        b"rel" if attr.value.as_ref() == b"parent" => is_parent = true,
                        _ => {}
                    }
                }
                if is_comment {
                    self.is_comment = true;
                }
                if is_comment && is_parent {
                    ChildKind::AnnotateParent
                } else {
                    ChildKind::Other
                }
            }
            _ => ChildKind::Other,
        };
        self.child = Some((kind, String::new()));
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if let Some((_, acc)) = self.child.as_mut() {
            acc.push_str(text);
        }
    }

    fn leave_child(&mut self) {
        let Some((kind, text)) = self.child.take() else {
            return;
        };
        match kind {
            ChildKind::Id => {
                if self.id.is_none() {
                    self.id = Some(text);
                }
            }
            ChildKind::Created => {
                // the first created child with actual text wins; a bare
                // <created/> does not make the entry a post
                if self.created.is_none() && !text.is_empty() {
                    self.created = Some(text);
                }
            }
            ChildKind::AnnotateParent => {
                if self.comment_parent.is_none() {
                    self.comment_parent = Some(text);
                }
            }
            ChildKind::Other => {}
        }
    }

    fn finish(self, end: usize) -> EntryNode {
        EntryNode {
            span: self.start..end + 1,
            id: self.id.unwrap_or_default(),
            created: self.created,
            is_comment: self.is_comment,
            comment_parent: self.comment_parent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(entries: &str) -> Vec<u8> {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><feed xmlns="http://purl.org/atom/ns#">{}</feed>"#,
            entries
        )
        .into_bytes()
    }

    #[test]
    fn test_posts_and_ids() {
        let page = FeedPage::parse(&page(concat!(
            "<entry><id>tag:a</id><created>2006-05-04T10:00:00Z</created><title>A</title></entry>",
            "<entry><id>tag:b</id><created>2006-05-03T09:00:00Z</created><title>B</title></entry>",
        )))
        .unwrap();

        let ids: Vec<&str> = page.posts().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["tag:a", "tag:b"]);
    }

    #[test]
    fn test_entry_without_created_is_not_a_post() {
        let page = FeedPage::parse(&page(
            "<entry><id>tag:a</id><title>no timestamp</title></entry>",
        ))
        .unwrap();

        assert_eq!(page.entries().len(), 1);
        assert_eq!(page.posts().count(), 0);
    }

    #[test]
    fn test_empty_created_element_is_not_a_post() {
        let page = FeedPage::parse(&page("<entry><id>tag:a</id><created/></entry>")).unwrap();
        assert_eq!(page.posts().count(), 0);
    }

    #[test]
    fn test_missing_id_becomes_empty_string() {
        let page =
            FeedPage::parse(&page("<entry><created>2006-05-04T10:00:00Z</created></entry>"))
                .unwrap();

        let post = page.posts().next().unwrap();
        assert_eq!(post.id, "");
    }

    #[test]
    fn test_comment_detection() {
        let page = FeedPage::parse(&page(concat!(
            r#"<entry><id>c1</id><annotate type="comment" rel="parent">tag:a</annotate>"#,
            "<content>nice post</content></entry>",
        )))
        .unwrap();

        let comment = page.comments().next().unwrap();
        assert!(comment.is_comment);
        assert_eq!(comment.parent_id(), "tag:a");
    }

    #[test]
    fn test_annotate_of_other_type_is_not_a_comment() {
        let page = FeedPage::parse(&page(
            r#"<entry><id>t1</id><annotate type="trackback" rel="parent">tag:a</annotate></entry>"#,
        ))
        .unwrap();

        assert_eq!(page.comments().count(), 0);
    }

    #[test]
    fn test_comment_with_created_is_also_a_post() {
        let page = FeedPage::parse(&page(concat!(
            r#"<entry><id>c1</id><created>2006-05-04T11:00:00Z</created>"#,
            r#"<annotate type="comment" rel="parent">tag:a</annotate></entry>"#,
        )))
        .unwrap();

        assert_eq!(page.posts().count(), 1);
        assert_eq!(page.comments().count(), 1);
    }

    #[test]
    fn test_next_cursor_comes_from_last_post() {
        let page = FeedPage::parse(&page(concat!(
            "<entry><id>a</id><created>2006-05-04T10:00:00Z</created></entry>",
            "<entry><id>b</id><created>2006-05-03T09:00:00Z</created></entry>",
            "<entry><id>x</id><title>no created, ignored</title></entry>",
        )))
        .unwrap();

        assert_eq!(page.next_cursor().unwrap(), Some("20060503".to_string()));
    }

    #[test]
    fn test_next_cursor_absent_without_posts() {
        let page = FeedPage::parse(&page("<entry><id>a</id></entry>")).unwrap();
        assert_eq!(page.next_cursor().unwrap(), None);
    }

    #[test]
    fn test_next_cursor_rejects_short_timestamp() {
        let page = FeedPage::parse(&page("<entry><id>a</id><created>2006</created></entry>"))
            .unwrap();

        assert!(matches!(
            page.next_cursor().unwrap_err(),
            FeedError::TruncatedTimestamp(_)
        ));
    }

    #[test]
    fn test_cdata_id_text() {
        let page = FeedPage::parse(&page(
            "<entry><id><![CDATA[tag:a]]></id><created>2006-05-04T10:00:00Z</created></entry>",
        ))
        .unwrap();

        assert_eq!(page.posts().next().unwrap().id, "tag:a");
    }

    #[test]
    fn test_escaped_id_text_is_unescaped() {
        let page = FeedPage::parse(&page(
            "<entry><id>a&amp;b</id><created>2006-05-04T10:00:00Z</created></entry>",
        ))
        .unwrap();

        assert_eq!(page.posts().next().unwrap().id, "a&b");
    }

    #[test]
    fn test_prefixed_elements_match_by_local_name() {
        let xml = concat!(
            r#"<a:feed xmlns:a="http://purl.org/atom/ns#">"#,
            "<a:entry><a:id>tag:a</a:id><a:created>2006-05-04T10:00:00Z</a:created></a:entry>",
            "</a:feed>",
        );
        let page = FeedPage::parse(xml.as_bytes()).unwrap();

        assert_eq!(page.posts().next().unwrap().id, "tag:a");
        assert_eq!(page.next_cursor().unwrap(), Some("20060504".to_string()));
    }

    #[test]
    fn test_nested_entries_are_not_indexed() {
        // only direct children of the feed root are entries
        let page = FeedPage::parse(&page(
            "<entry><id>a</id><created>2006-05-04T10:00:00Z</created>\
             <content><entry><id>inner</id></entry></content></entry>",
        ))
        .unwrap();

        assert_eq!(page.entries().len(), 1);
        assert_eq!(page.entries()[0].id, "a");
    }

    #[test]
    fn test_non_feed_root_has_no_entries() {
        let page = FeedPage::parse(b"<rss><entry><id>a</id></entry></rss>").unwrap();
        assert_eq!(page.entries().len(), 0);
        assert_eq!(page.next_cursor().unwrap(), None);
    }

    #[test]
    fn test_entry_events_span_the_whole_element() {
        let page = FeedPage::parse(&page(
            "<entry><id>a</id><created>2006-05-04T10:00:00Z</created></entry>",
        ))
        .unwrap();

        let entry = &page.entries()[0];
        let events = page.entry_events(entry);
        assert!(matches!(events.first(), Some(Event::Start(_))));
        assert!(matches!(events.last(), Some(Event::End(_))));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(FeedPage::parse(b"<feed><entry></feed>").is_err());
    }
}
