// src/services/feed.rs

//! RSS incident history parsing and lookback filtering.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{AppError, Result};
use crate::models::FeedEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
    Link,
    Published,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"title" => Some(Self::Title),
            b"description" => Some(Self::Description),
            b"link" => Some(Self::Link),
            b"pubDate" => Some(Self::Published),
            _ => None,
        }
    }

    fn slot(self, entry: &mut FeedEntry) -> &mut String {
        match self {
            Self::Title => &mut entry.title,
            Self::Description => &mut entry.description,
            Self::Link => &mut entry.link,
            Self::Published => &mut entry.published,
        }
    }
}

/// Parse the `<item>` elements of an RSS 2.0 document, in document order.
///
/// Element text is XML-unescaped; CDATA is taken verbatim. Descriptions
/// still carry their HTML and need [`clean_html`](super::sanitize::clean_html).
pub fn parse_rss(xml: &str) -> Result<Vec<FeedEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<FeedEntry> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"item" => current = Some(FeedEntry::default()),
                tag => field = current.as_ref().and(Field::from_tag(tag)),
            },
            Event::Text(text) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                    let raw = String::from_utf8_lossy(text.as_ref());
                    field
                        .slot(entry)
                        .push_str(&html_escape::decode_html_entities(&raw));
                }
            }
            Event::CData(data) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                    field
                        .slot(entry)
                        .push_str(&String::from_utf8_lossy(data.as_ref()));
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"item" {
                    entries.extend(current.take());
                }
                field = None;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if current.is_some() {
        return Err(AppError::feed("document ended inside an <item>"));
    }
    Ok(entries)
}

/// Entries published at most `days` whole days before `now` (UTC).
///
/// The day count is checked against `range` again here, independent of
/// any check the caller made. Entries with an unparsable `pubDate` are
/// skipped.
pub fn recent_entries<'a>(
    entries: &'a [FeedEntry],
    days: i64,
    range: &RangeInclusive<i64>,
    now: DateTime<Utc>,
) -> Result<Vec<&'a FeedEntry>> {
    if !range.contains(&days) {
        return Err(AppError::validation(format!(
            "day count {days} outside {}..={}",
            range.start(),
            range.end()
        )));
    }

    Ok(entries
        .iter()
        .filter(|entry| match DateTime::parse_from_rfc2822(entry.published.trim()) {
            Ok(published) => (now - published.with_timezone(&Utc)).num_days() <= days,
            Err(e) => {
                log::warn!(
                    "Skipping feed entry '{}' with bad date '{}': {}",
                    entry.title,
                    entry.published,
                    e
                );
                false
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>OpenAI Status - Incident History</title>
    <link>https://status.openai.com</link>
    <item>
      <title>Elevated error rates on ChatGPT</title>
      <description>&lt;p&gt;&lt;strong&gt;Resolved&lt;/strong&gt; - Fixed &amp;amp; monitoring&lt;/p&gt;</description>
      <pubDate>Tue, 09 Jan 2024 18:00:00 +0000</pubDate>
      <link>https://status.openai.com/incidents/abc</link>
    </item>
    <item>
      <title><![CDATA[API latency & timeouts]]></title>
      <description><![CDATA[<p>Investigating</p>]]></description>
      <pubDate>Fri, 05 Jan 2024 10:00:00 +0000</pubDate>
      <link>https://status.openai.com/incidents/def</link>
    </item>
  </channel>
</rss>"#;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_rss_items_in_order() {
        let entries = parse_rss(SAMPLE).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Elevated error rates on ChatGPT");
        assert_eq!(
            entries[0].description,
            "<p><strong>Resolved</strong> - Fixed &amp; monitoring</p>"
        );
        assert_eq!(entries[0].link, "https://status.openai.com/incidents/abc");
        assert_eq!(entries[0].published, "Tue, 09 Jan 2024 18:00:00 +0000");
        assert_eq!(entries[1].title, "API latency & timeouts");
        assert_eq!(entries[1].description, "<p>Investigating</p>");
    }

    #[test]
    fn test_parse_rss_without_items() {
        let entries = parse_rss("<rss><channel><title>x</title></channel></rss>").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_parse_rss_truncated_item() {
        assert!(parse_rss("<rss><channel><item><title>x</title>").is_err());
    }

    #[test]
    fn test_recent_entries_window() {
        let entries = parse_rss(SAMPLE).unwrap();
        let range = 1..=90;

        let recent = recent_entries(&entries, 1, &range, now()).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].link, "https://status.openai.com/incidents/abc");

        let recent = recent_entries(&entries, 5, &range, now()).unwrap();
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn test_recent_entries_revalidates_range() {
        let entries = parse_rss(SAMPLE).unwrap();
        let err = recent_entries(&entries, 91, &(1..=90), now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_recent_entries_skips_bad_dates() {
        let entries = vec![FeedEntry {
            title: "x".into(),
            published: "sometime".into(),
            ..FeedEntry::default()
        }];
        assert!(recent_entries(&entries, 90, &(1..=90), now()).unwrap().is_empty());
    }
}
