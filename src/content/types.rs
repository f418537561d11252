//! Record types deserialized from the content file.

use educe::Educe;
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, num::NonZeroU32};

/// Project identifier. The content file may use integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Video descriptor as authored, before resolution.
///
/// ```toml
/// media = { kind = "local", sources = ["/videos/run.mp4"], poster = "/images/run.jpg" }
/// media = { kind = "youtube", url = "https://youtu.be/abc123" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaSpec {
    Local {
        #[serde(default, alias = "source", deserialize_with = "one_or_many")]
        sources: Vec<String>,
        #[serde(default, deserialize_with = "non_empty")]
        poster: Option<String>,
    },
    Youtube {
        url: String,
    },
}

/// One portfolio project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectRecord {
    pub id: ProjectId,
    /// Unique, URL-safe. The detail page route.
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub github: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub demo: Option<String>,
    /// Static thumbnail; `None` renders the placeholder.
    #[serde(default, deserialize_with = "non_empty")]
    pub image: Option<String>,
    #[serde(default, skip_serializing)]
    pub media: Option<MediaSpec>,
    /// Legacy list of raw video URLs, used when `media` is absent.
    #[serde(default, skip_serializing)]
    pub video_links: Vec<String>,
}

/// Entry of the static-table photo gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhotoRecord {
    pub slug: String,
    pub title: String,
    pub src: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperienceRecord {
    pub company: String,
    pub role: String,
    /// Free text, e.g. "Jan 2025". Never parsed.
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub location: String,
    /// Presentation order.
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EducationRecord {
    pub school: String,
    pub degree: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub major: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillGroup {
    pub category: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// `[about]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct About {
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

/// `[sections]` table: intro lines under each home-page heading.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct SectionText {
    #[educe(Default = defaults::skills())]
    pub skills: String,
    #[educe(Default = defaults::experience())]
    pub experience: String,
    #[educe(Default = defaults::projects())]
    pub projects: String,
    #[educe(Default = defaults::education())]
    pub education: String,
    #[educe(Default = defaults::contact_heading())]
    pub contact_heading: String,
    pub contact_body: String,
}

mod defaults {
    pub fn skills() -> String {
        "Tools and techniques I reach for.".into()
    }
    pub fn experience() -> String {
        "Where I have worked and what I delivered.".into()
    }
    pub fn projects() -> String {
        "Selected systems I have designed and built.".into()
    }
    pub fn education() -> String {
        "Academic background.".into()
    }
    pub fn contact_heading() -> String {
        "Let's work together.".into()
    }
}

// ============================================================================
// Field Helpers
// ============================================================================

/// Treat `""` (and whitespace) as an absent optional string.
fn non_empty<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(de)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    Ok(match OneOrMany::deserialize(de)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrap {
        project: ProjectRecord,
    }

    fn project(toml_src: &str) -> ProjectRecord {
        toml::from_str::<Wrap>(toml_src).unwrap().project
    }

    #[test]
    fn test_project_empty_links_are_absent() {
        let p = project(
            r#"
            [project]
            id = 1
            slug = "rover"
            title = "Rover"
            description = "Drives"
            github = ""
            demo = "  "
            image = "/images/rover.jpg"
            "#,
        );
        assert_eq!(p.id, ProjectId::Number(1));
        assert_eq!(p.github, None);
        assert_eq!(p.demo, None);
        assert_eq!(p.image.as_deref(), Some("/images/rover.jpg"));
        assert!(p.media.is_none());
        assert!(p.video_links.is_empty());
    }

    #[test]
    fn test_project_string_id() {
        let p = project("[project]\nid = \"uav\"\nslug = \"uav\"\ntitle = \"t\"\ndescription = \"d\"");
        assert_eq!(p.id.to_string(), "uav");
    }

    #[test]
    fn test_media_local_single_source() {
        let p = project(
            r#"
            [project]
            id = 2
            slug = "arm"
            title = "Arm"
            description = "Sorts"
            media = { kind = "local", source = "/videos/arm.mp4" }
            "#,
        );
        assert_eq!(
            p.media,
            Some(MediaSpec::Local { sources: vec!["/videos/arm.mp4".into()], poster: None })
        );
    }

    #[test]
    fn test_media_youtube() {
        let p = project(
            r#"
            [project]
            id = 3
            slug = "boat"
            title = "Boat"
            description = "Docks"
            media = { kind = "youtube", url = "https://youtu.be/abc123" }
            "#,
        );
        assert_eq!(p.media, Some(MediaSpec::Youtube { url: "https://youtu.be/abc123".into() }));
    }

    #[test]
    fn test_photo_rejects_zero_dimension() {
        #[derive(Deserialize)]
        struct W {
            #[allow(dead_code)]
            photo: PhotoRecord,
        }
        let res = toml::from_str::<W>(
            "[photo]\nslug = \"a\"\ntitle = \"A\"\nsrc = \"/a.jpg\"\nwidth = 0\nheight = 10",
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_unknown_project_field_rejected() {
        let res = toml::from_str::<Wrap>(
            "[project]\nid = 1\nslug = \"a\"\ntitle = \"t\"\ndescription = \"d\"\nvideo = \"x\"",
        );
        assert!(res.is_err());
    }
}
