//! Sitemap generation.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig,
    log,
    render::{Page, html::esc},
    utils::minify::{Markup, minify},
};
use anyhow::{Context, Result};
use std::fs;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Write the sitemap when enabled. Every indexable page is listed with the
/// build date as `lastmod`.
pub fn build_sitemap(config: &SiteConfig, pages: &[Page]) -> Result<()> {
    if !config.build.sitemap.enable {
        return Ok(());
    }

    let lastmod = chrono::Local::now().format("%Y-%m-%d").to_string();
    let locs = pages
        .iter()
        .filter(|page| page.is_indexable())
        .filter_map(|page| config.absolute_url(&page.route));
    let xml = into_xml(locs, &lastmod);
    let xml = minify(Markup::Xml, xml.as_bytes(), config.build.minify);

    let path = &config.build.sitemap.path;
    fs::write(path, &*xml)
        .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

    log!("sitemap"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
    Ok(())
}

fn into_xml(locs: impl Iterator<Item = String>, lastmod: &str) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');

    for loc in locs {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", esc(&loc)));
        xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn page(route: &str) -> Page {
        Page { route: route.into(), html: String::new() }
    }

    #[test]
    fn test_xml_structure() {
        let xml = into_xml(std::iter::empty(), "2025-01-01");
        let lines: Vec<&str> = xml.lines().collect();

        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert_eq!(lines.last().map(|l| l.trim()), Some("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_escapes_loc() {
        let xml = into_xml(std::iter::once("https://a.com/?q=a&b".to_string()), "2025-01-01");
        assert!(xml.contains("<loc>https://a.com/?q=a&amp;b</loc>"));
        assert!(xml.contains("<lastmod>2025-01-01</lastmod>"));
    }

    #[test]
    fn test_build_lists_every_route_but_404() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.site.url = Some("https://ada.example.com/".into());
        config.build.sitemap.enable = true;
        config.build.sitemap.path = dir.path().join("sitemap.xml");
        config.build.minify = false;

        let pages = [page("/"), page("/projects/"), page("/projects/rover/"), page("/404.html")];
        build_sitemap(&config, &pages).unwrap();

        let xml = fs::read_to_string(dir.path().join("sitemap.xml")).unwrap();
        assert!(xml.contains("<loc>https://ada.example.com/</loc>"));
        assert!(xml.contains("<loc>https://ada.example.com/projects/rover/</loc>"));
        assert!(!xml.contains("404"));
        assert_eq!(xml.matches("<url>").count(), 3);
    }

    #[test]
    fn test_disabled_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.build.sitemap.path = dir.path().join("sitemap.xml");

        build_sitemap(&config, &[page("/")]).unwrap();
        assert!(!config.build.sitemap.path.exists());
    }
}
