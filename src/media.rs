//! Project media resolution.
//!
//! Decides, once per project at load time, what fills the video slot of the
//! detail page, and normalizes external video links into embeddable form.
//!
//! # Link normalization
//!
//! | Input                                   | Result                      |
//! |-----------------------------------------|-----------------------------|
//! | `https://youtu.be/<id>`                 | `.../embed/<id>`            |
//! | `https://www.youtube.com/watch?v=<id>`  | `.../embed/<id>`            |
//! | `https://www.youtube.com/embed/<id>`    | unchanged                   |
//! | `https://www.youtube.com/shorts/<id>`   | `.../embed/<id>`            |
//! | anything else, or unparseable           | `None` (render plain link)  |

use crate::content::MediaSpec;
use serde::Serialize;
use url::Url;

/// Canonical embed prefix; the identifier is appended.
pub const EMBED_PREFIX: &str = "https://www.youtube.com/embed/";

const SHORT_HOST: &str = "youtu.be";
const MAIN_HOST: &str = "youtube.com";

/// Normalize a video link into an embeddable URL.
///
/// Never fails loudly: anything that cannot be embedded yields `None` and
/// the caller falls back to an outbound link.
pub fn embed_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let parsed = Url::parse(raw).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let host = host.strip_prefix("m.").unwrap_or(host);

    let id = match host {
        SHORT_HOST => parsed.path().strip_prefix('/').unwrap_or_default().to_owned(),
        MAIN_HOST => match parsed.path() {
            "/watch" => parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())?,
            path if path.starts_with("/embed/") => return Some(raw.to_owned()),
            path if path.starts_with("/shorts/") => path.rsplit('/').next()?.to_owned(),
            _ => return None,
        },
        _ => return None,
    };

    (!id.is_empty()).then(|| format!("{EMBED_PREFIX}{id}"))
}

// ============================================================================
// Resolved Media
// ============================================================================

/// What the project video slot shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Media {
    /// Nothing configured: "coming soon" placeholder.
    None,
    /// Self-hosted files, played in order.
    Local { videos: Vec<LocalVideo> },
    /// External links, each embedded or linked independently.
    Remote { videos: Vec<RemoteVideo> },
    /// A descriptor exists but names nothing playable.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalVideo {
    pub src: String,
    pub poster: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RemoteVideo {
    Embed { source: String, embed: String },
    Unresolved { source: String },
}

impl RemoteVideo {
    pub fn from_link(source: &str) -> Self {
        let source = source.trim().to_owned();
        match embed_url(&source) {
            Some(embed) => Self::Embed { source, embed },
            None => Self::Unresolved { source },
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Embed { source, .. } | Self::Unresolved { source } => source,
        }
    }
}

/// Outbound link text: "Video" when alone, "Video N" (1-based) otherwise.
pub fn link_label(index: usize, total: usize) -> String {
    if total > 1 {
        format!("Video {}", index + 1)
    } else {
        "Video".into()
    }
}

impl Media {
    /// `spec` wins over the legacy `video_links` list.
    pub fn resolve(spec: Option<&MediaSpec>, legacy: &[String]) -> Self {
        match spec {
            Some(MediaSpec::Local { sources, poster }) => {
                let videos: Vec<_> = sources
                    .iter()
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(|src| LocalVideo {
                        src: src.to_owned(),
                        poster: poster.clone(),
                    })
                    .collect();
                if videos.is_empty() {
                    Self::Unavailable
                } else {
                    Self::Local { videos }
                }
            }
            Some(MediaSpec::Youtube { url }) if url.trim().is_empty() => Self::Unavailable,
            Some(MediaSpec::Youtube { url }) => Self::Remote {
                videos: vec![RemoteVideo::from_link(url)],
            },
            None => {
                let videos: Vec<_> = legacy
                    .iter()
                    .filter(|link| !link.trim().is_empty())
                    .map(|link| RemoteVideo::from_link(link))
                    .collect();
                if videos.is_empty() {
                    Self::None
                } else {
                    Self::Remote { videos }
                }
            }
        }
    }

    /// Whether a card should advertise playable video.
    pub const fn has_video(&self) -> bool {
        matches!(self, Self::Local { .. } | Self::Remote { .. })
    }
}
