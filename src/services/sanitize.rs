// src/services/sanitize.rs

//! Best-effort cleanup of feed-sourced HTML.
//!
//! This is a lossy text transform, not a markup parser: entities are
//! decoded first, then anything between `<` and the nearest `>` on the
//! same line is dropped. Unclosed tags are left in place.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").expect("valid tag regex"));

/// Decode HTML entities and strip tags.
pub fn clean_html(raw_html: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw_html);
    TAG_RE.replace_all(&decoded, "").into_owned()
}
