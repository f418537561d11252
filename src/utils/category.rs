//! File category classification for watch mode.
//!
//! | Category | Rebuild strategy                      | Example files                     |
//! |----------|---------------------------------------|-----------------------------------|
//! | Config   | Reload config, full rebuild           | `folio.toml`                      |
//! | Content  | Re-render every page                  | `content.toml`                    |
//! | Listing  | Full rebuild (listing pages change)   | `public/photography/*`, résumés   |
//! | Public   | Copy the single file                  | `public/images/*`                 |
//! | Unknown  | Ignored                               | files outside watched paths       |

use crate::config::SiteConfig;
use std::{
    env,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileCategory {
    Unknown,
    Public,
    Listing,
    Content,
    Config,
}

impl FileCategory {
    /// Short name used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Content => "content",
            Self::Listing => "listing",
            Self::Public => "public",
            Self::Unknown => "unknown",
        }
    }

    /// Whether pages must be rendered again.
    pub const fn needs_render(self) -> bool {
        matches!(self, Self::Config | Self::Content | Self::Listing)
    }
}

/// Categorize a changed path against the configured locations.
pub fn categorize_path(path: &Path, config: &SiteConfig) -> FileCategory {
    let path = normalize_path(path);
    let build = &config.build;

    if path == config.config_path {
        FileCategory::Config
    } else if path == build.content {
        FileCategory::Content
    } else if path.starts_with(build.gallery_dir()) || path.starts_with(build.resumes_dir()) {
        FileCategory::Listing
    } else if path.starts_with(&build.public) {
        FileCategory::Public
    } else {
        FileCategory::Unknown
    }
}

/// Absolute form of `path` for comparison with config paths.
///
/// Removed files cannot be canonicalized, so they are joined onto the
/// current directory instead.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("public/photography")).unwrap();
        fs::create_dir_all(root.join("public/images")).unwrap();

        let mut config = SiteConfig::default();
        config.config_path = root.join("folio.toml");
        config.build.content = root.join("content.toml");
        config.build.public = root.join("public");
        (dir, config)
    }

    #[test]
    fn test_categorize() {
        let (dir, config) = setup();
        let root = dir.path().canonicalize().unwrap();

        assert_eq!(categorize_path(&root.join("folio.toml"), &config), FileCategory::Config);
        assert_eq!(categorize_path(&root.join("content.toml"), &config), FileCategory::Content);
        assert_eq!(
            categorize_path(&root.join("public/photography/a.jpg"), &config),
            FileCategory::Listing
        );
        assert_eq!(
            categorize_path(&root.join("public/resumes/cv.pdf"), &config),
            FileCategory::Listing
        );
        assert_eq!(
            categorize_path(&root.join("public/images/me.jpg"), &config),
            FileCategory::Public
        );
        assert_eq!(categorize_path(&root.join("notes.md"), &config), FileCategory::Unknown);
    }

    #[test]
    fn test_needs_render() {
        assert!(FileCategory::Config.needs_render());
        assert!(FileCategory::Listing.needs_render());
        assert!(!FileCategory::Public.needs_render());
        assert!(!FileCategory::Unknown.needs_render());
    }

    #[test]
    fn test_ordering_picks_strongest() {
        let strongest = [FileCategory::Public, FileCategory::Config, FileCategory::Content]
            .into_iter()
            .max();
        assert_eq!(strongest, Some(FileCategory::Config));
    }
}
