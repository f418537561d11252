//! Output minification for generated HTML and XML.

use std::borrow::Cow;

/// Kind of generated document.
#[derive(Debug, Clone, Copy)]
pub enum Markup {
    Html,
    Xml,
}

/// Minify `bytes` when `enabled`, otherwise hand them back untouched.
pub fn minify(markup: Markup, bytes: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    if !enabled {
        return Cow::Borrowed(bytes);
    }
    match markup {
        Markup::Html => Cow::Owned(minify_html::minify(bytes, &html_cfg())),
        Markup::Xml => Cow::Owned(collapse_lines(bytes)),
    }
}

fn html_cfg() -> minify_html::Cfg {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_closing_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg
}

/// Drop indentation and blank lines.
fn collapse_lines(xml: &[u8]) -> Vec<u8> {
    String::from_utf8_lossy(xml)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<String>()
        .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_is_borrowed() {
        let html = b"<p>\n  hi\n</p>";
        assert!(matches!(minify(Markup::Html, html, false), Cow::Borrowed(_)));
    }

    #[test]
    fn test_html_shrinks_and_keeps_text() {
        let html = b"<html>\n  <head>\n  </head>\n  <body>\n    <p>Hello World</p>\n  </body>\n</html>";
        let out = minify(Markup::Html, html, true);
        let out = String::from_utf8_lossy(&out);

        assert!(out.len() < html.len());
        assert!(out.contains("Hello World"));
        assert!(out.contains("<html>"));
    }

    #[test]
    fn test_xml_sitemap() {
        let xml = b"<?xml version=\"1.0\"?>\n<urlset>\n\n  <url>\n    <loc>https://a.com/</loc>\n  </url>\n</urlset>\n";
        let out = minify(Markup::Xml, xml, true);
        assert_eq!(
            &*out,
            b"<?xml version=\"1.0\"?><urlset><url><loc>https://a.com/</loc></url></urlset>"
        );
    }
}
