//! Site building orchestration.
//!
//! ```text
//! build_site()
//!     │
//!     ├── Registry::load()          content file → validated registry
//!     ├── Renderer::render_all()    registry + listings → pages
//!     ├── remove_stale_projects()   detail pages of removed slugs
//!     ├── rayon::join
//!     │     ├── write pages         minified, skipped when unchanged
//!     │     └── copy public/        verbatim
//!     ├── embedded site.css / site.js
//!     ├── data/site.json
//!     └── build_sitemap()
//! ```

use crate::{
    config::SiteConfig,
    content::Registry,
    generator::sitemap::build_sitemap,
    log,
    render::{Page, Renderer, layout},
    utils::{
        hash,
        log::Progress,
        minify::{Markup, minify},
    },
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};
use walkdir::WalkDir;

const SITE_CSS: &str = include_str!("embed/site.css");
const SITE_JS: &str = include_str!("embed/site.js");

/// Machine-readable copy of the site data for client scripts.
const DATA_FILE: &str = "data/site.json";

#[derive(Serialize)]
struct SiteData<'a> {
    site: &'a crate::config::SiteInfo,
    #[serde(flatten)]
    registry: &'a Registry,
}

/// Build the entire site. Returns the rendered pages.
///
/// If `config.build.clean` is true, clears the output directory first.
pub fn build_site(config: &SiteConfig) -> Result<Vec<Page>> {
    let output = &config.build.output;
    ensure_output(output, config.build.clean)?;

    let registry = Registry::load(&config.build.content)
        .with_context(|| format!("Failed to load {}", config.build.content.display()))?;
    log!(
        "content";
        "{} projects, {} roles, {} photos",
        registry.projects.len(),
        registry.experience.len(),
        registry.photos.len()
    );

    let pages = Renderer::new(config, &registry)
        .render_all()
        .context("Failed to render pages")?;
    remove_stale_projects(output, &pages)?;
    let public_files = collect_files(&config.build.public);

    let progress = Progress::new("build", pages.len() + public_files.len());
    let has_error = AtomicBool::new(false);

    let (pages_result, public_result) = rayon::join(
        || {
            pages.par_iter().try_for_each(|page| {
                if has_error.load(Ordering::Relaxed) {
                    return Err(anyhow!("Aborted"));
                }
                if let Err(e) = write_page(page, config) {
                    if !has_error.swap(true, Ordering::Relaxed) {
                        log!("error"; "{}: {:#}", page.route, e);
                    }
                    return Err(anyhow!("Build failed"));
                }
                progress.inc();
                Ok(())
            })
        },
        || {
            public_files.par_iter().try_for_each(|path| {
                if has_error.load(Ordering::Relaxed) {
                    return Err(anyhow!("Aborted"));
                }
                if let Err(e) = copy_public_file(path, config) {
                    if !has_error.swap(true, Ordering::Relaxed) {
                        log!("error"; "{}: {:#}", path.display(), e);
                    }
                    return Err(anyhow!("Build failed"));
                }
                progress.inc();
                Ok(())
            })
        },
    );

    progress.finish();
    pages_result?;
    public_result?;

    write_embedded(output)?;
    write_data(output, config, &registry)?;
    build_sitemap(config, &pages)?;

    log!("build"; "{} pages, {} static files", pages.len(), public_files.len());
    Ok(pages)
}

/// Create the output directory, removing it first when `clean` is set.
fn ensure_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Delete `projects/<slug>/index.html` files that no rendered page owns.
/// Directories left empty go too.
fn remove_stale_projects(output: &Path, pages: &[Page]) -> Result<usize> {
    let projects = output.join("projects");
    let Ok(entries) = fs::read_dir(&projects) else {
        return Ok(0);
    };
    let owned: FxHashSet<PathBuf> = pages.iter().map(|p| p.output_path(output)).collect();

    let mut removed = 0;
    for entry in entries.filter_map(Result::ok) {
        let dir = entry.path();
        let index = dir.join("index.html");
        if !dir.is_dir() || !index.is_file() || owned.contains(&index) {
            continue;
        }
        fs::remove_file(&index)
            .with_context(|| format!("Failed to remove {}", index.display()))?;
        if fs::read_dir(&dir).is_ok_and(|mut rest| rest.next().is_none()) {
            fs::remove_dir(&dir)
                .with_context(|| format!("Failed to remove {}", dir.display()))?;
        }
        log!("build"; "removed stale {}", index.strip_prefix(output).unwrap_or(&index).display());
        removed += 1;
    }
    Ok(removed)
}

fn write_page(page: &Page, config: &SiteConfig) -> Result<()> {
    let html = minify(Markup::Html, page.html.as_bytes(), config.build.minify);
    write_if_changed(&page.output_path(&config.build.output), &html)?;
    Ok(())
}

/// Copy one file from the public directory to the same relative location
/// under the output directory.
pub fn copy_public_file(path: &Path, config: &SiteConfig) -> Result<()> {
    let relative = path
        .strip_prefix(&config.build.public)
        .with_context(|| format!("{} is outside the public directory", path.display()))?;
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    write_if_changed(&config.build.output.join(relative), &bytes)?;
    Ok(())
}

/// Write `bytes` unless `path` already holds them. Returns whether it wrote.
pub fn write_if_changed(path: &Path, bytes: &[u8]) -> Result<bool> {
    if hash::is_unchanged(path, bytes) {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

fn write_embedded(output: &Path) -> Result<()> {
    let root = |asset: &str| output.join(asset.trim_start_matches('/'));
    write_if_changed(&root(layout::STYLESHEET), SITE_CSS.as_bytes())?;
    write_if_changed(&root(layout::SCRIPT), SITE_JS.as_bytes())?;
    Ok(())
}

fn write_data(output: &Path, config: &SiteConfig, registry: &Registry) -> Result<()> {
    let data = SiteData { site: &config.site, registry };
    let json = serde_json::to_vec_pretty(&data).context("Failed to serialize site data")?;
    write_if_changed(&output.join(DATA_FILE), &json)?;
    Ok(())
}

/// Regular files under `dir`, recursively. A missing directory has none.
fn collect_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}
