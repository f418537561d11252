//! `[build]` section configuration.
//!
//! Paths, output options and the photo gallery backing source.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Photography images, under the public directory.
pub const GALLERY_DIR: &str = "photography";
/// Résumé PDFs, under the public directory.
pub const RESUMES_DIR: &str = "resumes";

/// Where the photography page gets its items from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GallerySource {
    /// List image files under `<public>/photography` (default)
    #[default]
    Directory,
    /// Use the `[[photos]]` table from the content file
    Table,
}

/// `[build]` section in folio.toml.
///
/// # Example
/// ```toml
/// [build]
/// content = "content.toml"
/// public = "public"
/// output = "dist"
/// minify = true
///
/// [build.gallery]
/// source = "table"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Root directory path
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content file holding projects, experience, education, skills and photos.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Static files (images, photography, resumes, videos) copied verbatim.
    #[serde(default = "defaults::build::public")]
    #[educe(Default = defaults::build::public())]
    pub public: PathBuf,

    /// Output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Minify HTML output.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Remove the output directory before building.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    #[serde(default)]
    pub sitemap: SitemapConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,
}

impl BuildConfig {
    pub fn gallery_dir(&self) -> PathBuf {
        self.public.join(GALLERY_DIR)
    }

    pub fn resumes_dir(&self) -> PathBuf {
        self.public.join(RESUMES_DIR)
    }
}

/// `[build.sitemap]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub enable: bool,

    /// Output path, relative to the output directory until normalized.
    #[serde(default = "defaults::build::sitemap::path")]
    #[educe(Default = defaults::build::sitemap::path())]
    pub path: PathBuf,
}

/// `[build.gallery]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct GalleryConfig {
    #[serde(default = "defaults::build::gallery::source")]
    #[educe(Default = defaults::build::gallery::source())]
    pub source: GallerySource,

    /// Image extensions picked up in directory mode (case-insensitive).
    #[serde(default = "defaults::build::gallery::extensions")]
    #[educe(Default = defaults::build::gallery::extensions())]
    pub extensions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str("[site]\nname = \"Test\"").unwrap();

        assert_eq!(config.build.content, PathBuf::from("content.toml"));
        assert_eq!(config.build.public, PathBuf::from("public"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.minify);
        assert!(!config.build.clean);
        assert!(!config.build.sitemap.enable);
        assert_eq!(config.build.gallery.source, GallerySource::Directory);
        assert!(config.build.gallery.extensions.contains(&"jpg".to_string()));
    }

    #[test]
    fn test_build_gallery_table() {
        let config: SiteConfig = toml::from_str(
            r#"
            [build.gallery]
            source = "table"
            extensions = ["png"]
            "#,
        )
        .unwrap();

        assert_eq!(config.build.gallery.source, GallerySource::Table);
        assert_eq!(config.build.gallery.extensions, vec!["png".to_string()]);
    }

    #[test]
    fn test_build_sitemap_config() {
        let config: SiteConfig = toml::from_str(
            r#"
            [build.sitemap]
            enable = true
            path = "map.xml"
            "#,
        )
        .unwrap();

        assert!(config.build.sitemap.enable);
        assert_eq!(config.build.sitemap.path, PathBuf::from("map.xml"));
    }

    #[test]
    fn test_unknown_field_rejection() {
        let result: Result<SiteConfig, _> = toml::from_str("[build]\ntailwind = true");
        assert!(result.is_err());
    }
}
