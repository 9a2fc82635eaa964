use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use std::borrow::Cow;

const SPECIAL: [&str; 5] = ["&", "<", ">", "\"", "'"];
const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(SPECIAL)
        .expect("Failed to build XML escaper")
});

// LeftmostLongest so `&amp;lt;` decodes to `&lt;` and not `<`.
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(ENTITIES)
        .expect("Failed to build XML unescaper")
});

/// Escape the five XML special characters for use in element text or
/// attribute values.
///
/// Borrows the input when nothing needs escaping, which is the common case
/// for slide text.
///
/// # Examples
///
/// ```
/// use attendance_deck::common::xml::escape_xml;
/// assert_eq!(escape_xml("Auth & RBAC"), "Auth &amp; RBAC");
/// assert_eq!(escape_xml("plain"), "plain");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if XML_ESCAPER.is_match(s) {
        Cow::Owned(XML_ESCAPER.replace_all(s, &ENTITIES))
    } else {
        Cow::Borrowed(s)
    }
}

/// Unescape the five predefined XML entities.
///
/// Unknown or malformed entities are left unchanged.
///
/// ```
/// use attendance_deck::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("Results &amp; Conclusions"), "Results & Conclusions");
/// assert_eq!(unescape_xml("&nbsp;"), "&nbsp;");
/// ```
#[inline]
pub fn unescape_xml(s: &str) -> Cow<'_, str> {
    if s.contains('&') {
        Cow::Owned(XML_UNESCAPER.replace_all(s, &SPECIAL))
    } else {
        Cow::Borrowed(s)
    }
}
