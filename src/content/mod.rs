//! Content registry: the portfolio's data tables.
//!
//! Loaded once from the content file, validated, media resolved, then shared
//! read-only for the whole build.
//!
//! ```toml
//! [about]
//! paragraphs = ["I build robots."]
//!
//! [[skills]]
//! category = "Programming"
//! items = ["Rust", "C++"]
//!
//! [[projects]]
//! id = 1
//! slug = "rover"
//! title = "Rover"
//! description = "Autonomous rover."
//! category = "Field Robotics"
//! media = { kind = "youtube", url = "https://youtu.be/abc123" }
//! ```

mod types;

pub use types::{
    About, EducationRecord, ExperienceRecord, MediaSpec, PhotoRecord, ProjectRecord, SectionText,
    SkillGroup,
};

use crate::media::Media;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("content file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("duplicate {kind} slug `{slug}`")]
    DuplicateSlug { kind: &'static str, slug: String },

    #[error("duplicate project id `{0}`")]
    DuplicateId(String),

    #[error("invalid slug `{0}`: use lowercase letters, digits and `-`")]
    InvalidSlug(String),
}

/// Content file layout, as authored.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ContentFile {
    about: About,
    sections: SectionText,
    skills: Vec<SkillGroup>,
    experience: Vec<ExperienceRecord>,
    education: Vec<EducationRecord>,
    projects: Vec<ProjectRecord>,
    photos: Vec<PhotoRecord>,
}

/// A project with its media decided.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    #[serde(flatten)]
    pub record: ProjectRecord,
    pub media: Media,
}

impl Project {
    pub fn new(record: ProjectRecord) -> Self {
        let media = Media::resolve(record.media.as_ref(), &record.video_links);
        Self { record, media }
    }

    /// Route of the detail page.
    pub fn href(&self) -> String {
        format!("/projects/{}/", self.record.slug)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Registry {
    pub about: About,
    pub sections: SectionText,
    pub skills: Vec<SkillGroup>,
    pub experience: Vec<ExperienceRecord>,
    pub education: Vec<EducationRecord>,
    pub projects: Vec<Project>,
    pub photos: Vec<PhotoRecord>,
}

impl Registry {
    pub fn from_str(content: &str) -> Result<Self, ContentError> {
        let file: ContentFile = toml::from_str(content)?;
        let registry = Self {
            about: file.about,
            sections: file.sections,
            skills: file.skills,
            experience: file.experience,
            education: file.education,
            projects: file.projects.into_iter().map(Project::new).collect(),
            photos: file.photos,
        };
        registry.validate()?;
        Ok(registry)
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let content =
            fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Slugs are URL-safe and unique per table. Project ids are unique by
    /// their displayed form, so `1` and `"1"` collide.
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut slugs = FxHashSet::default();
        let mut ids = FxHashSet::default();
        for project in &self.projects {
            let record = &project.record;
            check_slug(&record.slug)?;
            if !slugs.insert(record.slug.as_str()) {
                return Err(ContentError::DuplicateSlug {
                    kind: "project",
                    slug: record.slug.clone(),
                });
            }
            if !ids.insert(record.id.to_string()) {
                return Err(ContentError::DuplicateId(record.id.to_string()));
            }
        }

        let mut photo_slugs = FxHashSet::default();
        for photo in &self.photos {
            check_slug(&photo.slug)?;
            if !photo_slugs.insert(photo.slug.as_str()) {
                return Err(ContentError::DuplicateSlug {
                    kind: "photo",
                    slug: photo.slug.clone(),
                });
            }
        }

        Ok(())
    }

    /// Detail-page lookup. `None` means not found.
    pub fn project(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.record.slug == slug)
    }

    /// Distinct project categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.projects
            .iter()
            .map(|p| p.record.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

fn check_slug(slug: &str) -> Result<(), ContentError> {
    let valid = !slug.is_empty()
        && !slug.starts_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ContentError::InvalidSlug(slug.to_owned()))
    }
}
