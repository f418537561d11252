//! `[site]` section configuration.
//!
//! Identity and contact details of the site owner. Read-only once loaded.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in folio.toml.
///
/// # Example
/// ```toml
/// [site]
/// name = "Ada Lovelace"
/// short_name = "AL"
/// tagline = "Analytical Engines"
/// email = "ada@example.com"
/// phone = "(555) 010-2030"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteInfo {
    /// Full name shown in the hero and page titles.
    #[serde(default = "defaults::site::name")]
    #[educe(Default = defaults::site::name())]
    pub name: String,

    /// Navbar brand. Falls back to initials of `name` when empty.
    #[serde(default)]
    pub short_name: String,

    #[serde(default)]
    pub tagline: String,

    /// Used for the hero paragraph and the `<meta name="description">`.
    #[serde(default)]
    pub description: String,

    #[serde(default = "defaults::site::email")]
    #[educe(Default = defaults::site::email())]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub github: Option<String>,

    #[serde(default)]
    pub linkedin: Option<String>,

    #[serde(default = "defaults::site::headshot_url")]
    #[educe(Default = defaults::site::headshot_url())]
    pub headshot_url: String,

    /// Hero download button target. Defaults to the résumé picker page.
    #[serde(default)]
    pub resume_url: Option<String>,

    /// Absolute base URL, e.g. "https://example.com". Needed for the sitemap.
    #[serde(default)]
    pub url: Option<String>,

    /// `<html lang>` value.
    #[serde(default = "defaults::site::language")]
    #[educe(Default = defaults::site::language())]
    pub language: String,
}

impl SiteInfo {
    /// Navbar brand text.
    pub fn brand(&self) -> String {
        if !self.short_name.trim().is_empty() {
            return self.short_name.clone();
        }
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Default `<title>`: "name - tagline".
    pub fn default_title(&self) -> String {
        if self.tagline.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, self.tagline)
        }
    }

    /// Per-page `<title>`: "page | name".
    pub fn page_title(&self, page: &str) -> String {
        format!("{page} | {}", self.name)
    }

    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }

    pub fn resume_href(&self) -> &str {
        self.resume_url.as_deref().unwrap_or("/resumes/")
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_site_config_full() {
        let config: SiteConfig = toml::from_str(
            r#"
            [site]
            name = "Amey Vilas Gavale"
            short_name = "AVG"
            tagline = "Autonomy & Robotics Engineer"
            email = "amey@example.com"
            phone = "(708) 621-8981"
            location = "Champaign, IL"
            github = "https://github.com/example"
            url = "https://example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.site.brand(), "AVG");
        assert_eq!(config.site.default_title(), "Amey Vilas Gavale - Autonomy & Robotics Engineer");
        assert_eq!(config.site.page_title("Projects"), "Projects | Amey Vilas Gavale");
        assert_eq!(config.site.mailto(), "mailto:amey@example.com");
        assert_eq!(config.site.github.as_deref(), Some("https://github.com/example"));
        assert_eq!(config.site.linkedin, None);
    }

    #[test]
    fn test_site_config_defaults() {
        let config: SiteConfig = toml::from_str("[site]\nname = \"Ada King Lovelace\"").unwrap();

        assert_eq!(config.site.brand(), "AKL");
        assert_eq!(config.site.email, "user@noreply.folio");
        assert_eq!(config.site.headshot_url, "/images/photo.jpg");
        assert_eq!(config.site.resume_href(), "/resumes/");
        assert_eq!(config.site.default_title(), "Ada King Lovelace");
    }

    #[test]
    fn test_unknown_field_rejection() {
        let result: Result<SiteConfig, _> = toml::from_str("[site]\nnickname = \"x\"");
        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }
}
