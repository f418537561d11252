//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[site]`    | Owner identity and contact details               |
//! | `[build]`   | Content file, public/output dirs, sitemap, etc.  |
//! | `[serve]`   | Development server (port, interface, watch)      |
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "Ada Lovelace"
//! tagline = "Analytical Engines"
//! url = "https://ada.example.com"
//!
//! [build]
//! content = "content.toml"
//! output = "dist"
//!
//! [serve]
//! port = 5277
//! ```

mod build;
pub mod defaults;
mod error;
mod handle;
mod serve;
mod site;

pub use build::GallerySource;
pub use error::ConfigError;
pub use handle::{cfg, init_config, reload_config};
pub use site::SiteInfo;

use build::BuildConfig;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub site: SiteInfo,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load from the location the CLI points at, falling back to defaults
    /// when the file does not exist yet (`folio init`).
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        Ok(config)
    }

    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Absolute URL for a site route, when `[site].url` is known.
    pub fn absolute_url(&self, route: &str) -> Option<String> {
        let base = self.site.url.as_deref()?.trim_end_matches('/');
        Some(format!("{base}{route}"))
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let base = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };
        self.update_path_with_root(cli, &root);

        if let Some(args) = cli.build_args() {
            self.build.clean |= args.clean;
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
            if args.base_url.is_some() {
                self.site.url = args.base_url.clone();
            }
        }

        if let Commands::Serve {
            build_args,
            interface,
            port,
            watch,
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
            if build_args.base_url.is_none() {
                self.site.url = Some(format!(
                    "http://{}:{}",
                    self.serve.interface, self.serve.port
                ));
            }
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve every path against the root and make it absolute
    fn update_path_with_root(&mut self, cli: &Cli, root: &Path) {
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.public, cli.public.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.public = Self::normalize_path(&root.join(&self.build.public));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.sitemap.path = self.build.output.join(&self.build.sitemap.path);
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before building or serving
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!(ConfigError::Missing(self.config_path.clone()));
        }

        if let Some(url) = &self.site.url
            && !url.starts_with("http")
        {
            bail!(ConfigError::SiteUrl(url.clone()));
        }

        if self.build.sitemap.enable && self.site.url.is_none() {
            bail!(ConfigError::SitemapWithoutUrl);
        }

        if !self.build.content.is_file() {
            bail!(ConfigError::ContentMissing(self.build.content.clone()));
        }

        if self.build.gallery.source == GallerySource::Directory
            && self.build.gallery.extensions.is_empty()
        {
            bail!(ConfigError::NoGalleryExtensions);
        }

        if self.build.output == self.build.public {
            bail!(ConfigError::OutputIsPublic(self.build.output.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn leak_cli(args: &[&str]) -> &'static Cli {
        Box::leak(Box::new(Cli::parse_from(args)))
    }

    fn site_dir(config: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("folio.toml"), config).unwrap();
        fs::write(dir.path().join("content.toml"), "").unwrap();
        dir
    }

    #[test]
    fn test_load_resolves_paths_against_root() {
        let dir = site_dir("[site]\nname = \"Test\"");
        let root = dir.path().to_str().unwrap();
        let config = SiteConfig::load(leak_cli(&["folio", "-r", root, "build"])).unwrap();

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.get_root(), root);
        assert_eq!(config.config_path, root.join("folio.toml"));
        assert_eq!(config.build.content, root.join("content.toml"));
        assert_eq!(config.build.output, root.join("dist"));
        assert_eq!(config.build.sitemap.path, root.join("dist").join("sitemap.xml"));
        config.validate().unwrap();
    }

    #[test]
    fn test_cli_overrides_build_options() {
        let dir = site_dir("[build]\nminify = true");
        let root = dir.path().to_str().unwrap();
        let cli = leak_cli(&[
            "folio", "-r", root, "-o", "out", "build", "--minify=false", "--sitemap",
            "--base-url", "https://ci.example.com",
        ]);
        let config = SiteConfig::load(cli).unwrap();

        assert!(!config.build.minify);
        assert!(config.build.sitemap.enable);
        assert_eq!(config.site.url.as_deref(), Some("https://ci.example.com"));
        assert!(config.build.output.ends_with("out"));
    }

    #[test]
    fn test_serve_sets_local_url() {
        let dir = site_dir("");
        let root = dir.path().to_str().unwrap();
        let config = SiteConfig::load(leak_cli(&["folio", "-r", root, "serve", "--port", "9000"])).unwrap();

        assert_eq!(config.serve.port, 9000);
        assert_eq!(config.site.url.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(config.absolute_url("/projects/").as_deref(), Some("http://127.0.0.1:9000/projects/"));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let dir = site_dir("[site]\nurl = \"example.com\"");
        let root = dir.path().to_str().unwrap();
        let config = SiteConfig::load(leak_cli(&["folio", "-r", root, "build"])).unwrap();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[site.url]"));
    }

    #[test]
    fn test_validate_requires_content_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("folio.toml"), "").unwrap();
        let root = dir.path().to_str().unwrap();
        let config = SiteConfig::load(leak_cli(&["folio", "-r", root, "build"])).unwrap();

        assert!(config.validate().unwrap_err().to_string().contains("[build.content]"));
    }

    #[test]
    fn test_sitemap_requires_url() {
        let dir = site_dir("[build.sitemap]\nenable = true");
        let root = dir.path().to_str().unwrap();
        let config = SiteConfig::load(leak_cli(&["folio", "-r", root, "build"])).unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error_is_config_error() {
        let err = SiteConfig::from_str("[site\nname=").unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }
}
