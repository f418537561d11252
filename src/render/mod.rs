//! Page renderer.
//!
//! Turns the registry and the listing sources into complete HTML documents.
//! Rendering is pure: nothing here writes to disk.
//!
//! # Routes
//!
//! | Route               | Source                                  |
//! |---------------------|-----------------------------------------|
//! | `/`                 | registry (all home-page sections)       |
//! | `/projects/`        | registry projects                       |
//! | `/projects/<slug>/` | one project, `NotFound` when unknown    |
//! | `/photography/`     | gallery [`ItemSource`]                  |
//! | `/resumes/`         | résumé directory listing                |
//! | `/404.html`         | static                                  |

mod gallery;
mod home;
pub mod html;
pub mod layout;
mod projects;
mod resumes;

use crate::{
    config::{GallerySource, SiteConfig},
    content::Registry,
    listing::{self, ItemSource, ListingError, PhotoDir, StaticPhotos},
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no project with slug `{0}`")]
    NotFound(String),

    #[error(transparent)]
    Listing(#[from] ListingError),
}

/// One rendered document.
#[derive(Debug, Clone)]
pub struct Page {
    /// Site route, e.g. `/projects/rover/`.
    pub route: String,
    pub html: String,
}

impl Page {
    /// Where the page lands under `output`: directory routes get `index.html`.
    pub fn output_path(&self, output: &Path) -> PathBuf {
        let relative = self.route.trim_start_matches('/');
        if relative.is_empty() || relative.ends_with('/') {
            output.join(relative).join("index.html")
        } else {
            output.join(relative)
        }
    }

    /// Whether the page belongs in the sitemap.
    pub fn is_indexable(&self) -> bool {
        self.route != NOT_FOUND_ROUTE
    }
}

pub const NOT_FOUND_ROUTE: &str = "/404.html";

pub struct Renderer<'a> {
    config: &'a SiteConfig,
    registry: &'a Registry,
}

impl<'a> Renderer<'a> {
    pub const fn new(config: &'a SiteConfig, registry: &'a Registry) -> Self {
        Self { config, registry }
    }

    fn page(&self, route: impl Into<String>, title: Option<&str>, body: &str) -> Page {
        Page {
            route: route.into(),
            html: layout::document(&self.config.site, title, body),
        }
    }

    pub fn home(&self) -> Page {
        self.page("/", None, &home::page(&self.config.site, self.registry))
    }

    pub fn projects(&self) -> Page {
        self.page("/projects/", Some("Projects"), &projects::archive(&self.registry.projects))
    }

    /// Detail page for `slug`.
    pub fn project(&self, slug: &str) -> Result<Page, RenderError> {
        let project = self
            .registry
            .project(slug)
            .ok_or_else(|| RenderError::NotFound(slug.to_owned()))?;
        let title = format!("{} | Projects", project.record.title);
        Ok(self.page(project.href(), Some(&title), &projects::detail(project)))
    }

    /// The configured gallery backing source.
    fn gallery_source(&self) -> Box<dyn ItemSource + 'a> {
        let build = &self.config.build;
        match build.gallery.source {
            GallerySource::Directory => Box::new(PhotoDir {
                dir: build.gallery_dir(),
                extensions: &build.gallery.extensions,
            }),
            GallerySource::Table => Box::new(StaticPhotos(&self.registry.photos)),
        }
    }

    pub fn photography(&self) -> Result<Page, RenderError> {
        let body = gallery::page(self.gallery_source().as_ref())?;
        Ok(self.page("/photography/", Some("Photography"), &body))
    }

    pub fn resumes(&self) -> Result<Page, RenderError> {
        let variants = listing::resume_variants(&self.config.build.resumes_dir())?;
        Ok(self.page("/resumes/", Some("Resumes"), &resumes::page(&self.config.site, &variants)))
    }

    pub fn not_found(&self) -> Page {
        let body = r#"<section class="page not-found">
<h1>Page not found</h1>
<p>The page you are looking for does not exist or has moved.</p>
<a href="/" class="button">Back to portfolio</a> <a href="/projects/" class="button outline">Browse projects</a>
</section>"#;
        self.page(NOT_FOUND_ROUTE, Some("Not found"), body)
    }

    /// Every page of the site. Project pages render in parallel.
    pub fn render_all(&self) -> Result<Vec<Page>, RenderError> {
        let mut pages = vec![self.home(), self.projects(), self.photography()?, self.resumes()?];

        let details: Vec<Page> = self
            .registry
            .projects
            .par_iter()
            .map(|project| self.project(&project.record.slug))
            .collect::<Result<_, _>>()?;
        pages.extend(details);

        pages.push(self.not_found());
        Ok(pages)
    }
}
