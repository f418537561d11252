//! Document shell: head, navbar, theme toggle, footer.

use super::html::{esc, external_link, json_attr};
use crate::{
    config::SiteInfo,
    interact::{SectionTracker, THEME_STORAGE_KEY, Theme},
};
use chrono::Datelike;

/// Navbar entries: label and home-page section id.
pub const NAV_ITEMS: [(&str, &str); 7] = [
    ("Home", "hero"),
    ("About", "about"),
    ("Skills", "skills"),
    ("Experience", "experience"),
    ("Projects", "projects"),
    ("Education", "education"),
    ("Contact", "contact"),
];

pub const STYLESHEET: &str = "/site.css";
pub const SCRIPT: &str = "/site.js";

/// Wrap a page body in the full document.
///
/// `title` of `None` uses the site default title.
pub fn document(site: &SiteInfo, title: Option<&str>, body: &str) -> String {
    let title = match title {
        Some(page) => site.page_title(page),
        None => site.default_title(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<link rel="stylesheet" href="{STYLESHEET}">
<script>{theme_script}</script>
<script src="{SCRIPT}" defer></script>
</head>
<body>
<div class="shell">
{navbar}
<main class="content">
{body}
</main>
{footer}
</div>
</body>
</html>
"#,
        lang = esc(&site.language),
        title = esc(&title),
        description = esc(&site.description),
        theme_script = theme_script(),
        navbar = navbar(site),
        footer = footer(site),
    )
}

/// Applies a stored theme before first paint. With nothing stored the page
/// follows the system preference through CSS.
fn theme_script() -> String {
    format!(
        "(function(){{try{{var t=localStorage.getItem('{THEME_STORAGE_KEY}');\
         if(t==='{light}'||t==='{dark}'){{document.documentElement.dataset.theme=t}}}}\
         catch(e){{}}}})();",
        light = Theme::Light,
        dark = Theme::Dark,
    )
}

fn navbar(site: &SiteInfo) -> String {
    let tracker = SectionTracker::new(NAV_ITEMS.map(|(_, id)| id));

    let mut links = String::new();
    for (label, id) in NAV_ITEMS {
        let current = if tracker.is_active(id) { r#" aria-current="true""# } else { "" };
        links.push_str(&format!(
            r#"<a href="/#{id}" class="nav-link" data-section="{id}"{current}>{label}</a>"#
        ));
    }

    format!(
        r#"<nav class="navbar" data-threshold="{threshold}" data-fragments="{fragments}">
<a href="/" class="brand">{brand}</a>
<div class="nav-links">{links}</div>
{toggle}
</nav>"#,
        threshold = SectionTracker::THRESHOLD,
        fragments = json_attr(&tracker.fragment_table()),
        brand = esc(&site.brand()),
        toggle = theme_toggle(),
    )
}

/// Every button starts unpressed; the script marks the stored choice.
fn theme_toggle() -> String {
    let mut out = format!(
        r#"<div class="theme-toggle" role="group" aria-label="Theme" data-theme-key="{THEME_STORAGE_KEY}">"#
    );
    for theme in Theme::ALL {
        out.push_str(&format!(
            r#"<button type="button" data-theme-choice="{theme}" aria-label="{label}" aria-pressed="false">{icon}</button>"#,
            label = theme.label(),
            icon = theme_icon(theme),
        ));
    }
    out.push_str("</div>");
    out
}

const fn theme_icon(theme: Theme) -> &'static str {
    match theme {
        Theme::System => "◐",
        Theme::Light => "☀",
        Theme::Dark => "☾",
    }
}

fn footer(site: &SiteInfo) -> String {
    let year = chrono::Local::now().year();
    let mut social = String::new();
    if let Some(github) = &site.github {
        social.push_str(&external_link(github, "footer-link", "GitHub"));
    }
    if let Some(linkedin) = &site.linkedin {
        social.push_str(&external_link(linkedin, "footer-link", "LinkedIn"));
    }
    social.push_str(&format!(
        r#"<a href="{}" class="footer-link">Email</a>"#,
        esc(&site.mailto())
    ));

    format!(
        r#"<footer class="footer">
<p>© {year} {name}</p>
<div class="footer-links"><a href="/photography/" class="footer-link">Photography</a><a href="/resumes/" class="footer-link">Resumes</a>{social}</div>
</footer>"#,
        name = esc(&site.name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteInfo {
        SiteInfo {
            name: "Ada Lovelace".into(),
            tagline: "Engines & Notes".into(),
            github: Some("https://github.com/ada".into()),
            ..SiteInfo::default()
        }
    }

    #[test]
    fn test_default_title() {
        let html = document(&site(), None, "");
        assert!(html.contains("<title>Ada Lovelace - Engines &amp; Notes</title>"));
    }

    #[test]
    fn test_page_title_template() {
        let html = document(&site(), Some("Photography"), "");
        assert!(html.contains("<title>Photography | Ada Lovelace</title>"));
    }

    #[test]
    fn test_no_theme_asserted_in_markup() {
        let html = document(&site(), None, "<p>body</p>");
        assert!(html.contains(r#"<html lang="en">"#));
        assert!(!html.contains(r#"aria-pressed="true""#));
        assert!(html.contains("localStorage.getItem('theme')"));
        assert!(html.contains(r#"data-theme-key="theme""#));
    }

    #[test]
    fn test_navbar_first_section_active() {
        let html = navbar(&site());
        assert!(html.contains(r#"data-section="hero" aria-current="true""#));
        assert_eq!(html.matches("aria-current").count(), 1);
        for (_, id) in NAV_ITEMS {
            assert!(html.contains(&format!(r##"href="/#{id}""##)));
        }
    }

    #[test]
    fn test_navbar_fragment_table() {
        let html = navbar(&site());
        assert!(html.contains(r#"data-fragments="{&quot;&quot;:&quot;hero&quot;,"#));
        assert!(html.contains("&quot;contact&quot;:&quot;contact&quot;"));
    }

    #[test]
    fn test_footer_skips_missing_social() {
        let html = footer(&site());
        assert!(html.contains("GitHub"));
        assert!(!html.contains("LinkedIn"));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
    }
}
