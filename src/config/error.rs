//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Why `folio.toml` could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed folio.toml")]
    Toml(#[from] toml::de::Error),

    #[error("`{0}` not found, run `folio init` to create a site")]
    Missing(PathBuf),

    #[error("[site.url] `{0}` must start with http:// or https://")]
    SiteUrl(String),

    #[error("[site.url] is required when [build.sitemap] is enabled")]
    SitemapWithoutUrl,

    #[error("[build.content] `{0}` not found")]
    ContentMissing(PathBuf),

    #[error("[build.gallery.extensions] must list at least one extension")]
    NoGalleryExtensions,

    #[error("[build.output] `{0}` must differ from [build.public]")]
    OutputIsPublic(PathBuf),
}
