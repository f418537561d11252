//! Markup helpers shared by every page.

use quick_xml::escape::escape;
use regex::Regex;
use serde::Serialize;
use std::{borrow::Cow, sync::LazyLock};

/// Characters that are not allowed in a `tel:` target. ASCII classes only,
/// the regex build has no Unicode tables.
static TEL_STRIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9+]").unwrap());

/// Escape text or attribute content.
#[inline]
pub fn esc(text: &str) -> Cow<'_, str> {
    escape(text)
}

/// `tel:` href with everything except digits and `+` removed.
pub fn tel_href(phone: &str) -> String {
    format!("tel:{}", TEL_STRIP.replace_all(phone, ""))
}

/// JSON value escaped for a double-quoted attribute.
pub fn json_attr<T: Serialize>(value: &T) -> String {
    esc(&serde_json::to_string(value).unwrap_or_default()).into_owned()
}

/// Link that opens in a new tab without handing over `window.opener`.
pub fn external_link(href: &str, class: &str, inner: &str) -> String {
    format!(
        r#"<a href="{}" class="{class}" target="_blank" rel="noopener noreferrer">{inner}</a>"#,
        esc(href)
    )
}

/// `<ul>` of escaped items, or nothing when empty.
pub fn list(items: &[String], class: &str) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut out = format!(r#"<ul class="{class}">"#);
    for item in items {
        out.push_str(&format!("<li>{}</li>", esc(item)));
    }
    out.push_str("</ul>");
    out
}

/// Pill badges, e.g. technologies or skills.
pub fn tags(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut out = String::from(r#"<div class="tags">"#);
    for item in items {
        out.push_str(&format!(r#"<span class="tag">{}</span>"#, esc(item)));
    }
    out.push_str("</div>");
    out
}

/// "start – end" date range.
pub fn period(start: &str, end: &str) -> String {
    format!("{} – {}", esc(start), esc(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(esc("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert!(matches!(esc("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_tel_href() {
        assert_eq!(tel_href("(555) 010-2030"), "tel:5550102030");
        assert_eq!(tel_href("+1 716-555-0100"), "tel:+17165550100");
        assert_eq!(tel_href(""), "tel:");
    }

    #[test]
    fn test_tel_strip_compiles_and_drops_non_ascii_digits() {
        // Full-width digits are not dialable
        assert_eq!(tel_href("+1 ５５５ 0100"), "tel:+10100");
    }

    #[test]
    fn test_json_attr() {
        let attr = json_attr(&std::collections::BTreeMap::from([("a\"b", vec![1, 2])]));
        assert_eq!(attr, "{&quot;a\\&quot;b&quot;:[1,2]}");
    }

    #[test]
    fn test_external_link() {
        let html = external_link("https://x.com/?a=1&b=2", "btn", "X");
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
        assert!(html.contains("a=1&amp;b=2"));
    }

    #[test]
    fn test_list_empty() {
        assert_eq!(list(&[], "x"), "");
        assert_eq!(list(&["<b>".into()], "x"), r#"<ul class="x"><li>&lt;b&gt;</li></ul>"#);
    }
}
