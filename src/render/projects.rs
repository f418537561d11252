//! Project cards, the archive page and per-project detail pages.

use super::html::{esc, external_link, tags};
use crate::{
    content::Project,
    media::{LocalVideo, Media, RemoteVideo, link_label},
};

/// Fallback text when a project has no thumbnail.
pub const VISUAL_PLACEHOLDER: &str = "Visual coming soon";
/// Video section text when nothing is configured.
pub const VIDEOS_PLACEHOLDER: &str = "Visuals coming soon.";
/// Video section text when the descriptor names nothing playable.
pub const VIDEOS_UNAVAILABLE: &str = "Unable to load project video.";

const IFRAME_ALLOW: &str = "accelerometer; autoplay; clipboard-write; encrypted-media; \
                            gyroscope; picture-in-picture; web-share";

fn visual(project: &Project, class: &str) -> String {
    match &project.record.image {
        Some(src) => format!(
            r#"<div class="{class}"><img src="{}" alt="{}" loading="lazy"></div>"#,
            esc(src),
            esc(&project.record.title)
        ),
        None => format!(
            r#"<div class="{class} placeholder"><span>{VISUAL_PLACEHOLDER}</span></div>"#
        ),
    }
}

/// Grid card. `data-category` is what the client filter matches on.
pub fn card(project: &Project) -> String {
    let record = &project.record;
    let title = esc(&record.title);
    let href = project.href();

    let overlay = if project.media.has_video() {
        r#"<span class="play" aria-hidden="true">▶</span>"#
    } else {
        r#"<span class="overlay-label">View project</span>"#
    };

    let mut links = String::new();
    if let Some(github) = &record.github {
        links.push_str(&external_link(github, "card-link", "Code"));
    }
    if let Some(demo) = &record.demo {
        links.push_str(&external_link(demo, "card-link", "Demo"));
    }

    format!(
        r#"<article class="project-card" data-category="{category}">
<div class="card-media">{visual}<a href="{href}" class="card-overlay" aria-label="Open project {title}">{overlay}</a><span class="badge">{category}</span></div>
<div class="card-body">
<h3>{title}</h3>
<p>{description}</p>
{tags}
<div class="card-links">{links}</div>
<a href="{href}" class="card-details">View project details</a>
</div>
</article>"#,
        category = esc(&record.category),
        visual = visual(project, "card-visual"),
        description = esc(&record.description),
        tags = tags(&record.technologies),
    )
}

/// `/projects/`
pub fn archive(projects: &[Project]) -> String {
    let mut grid = String::new();
    for project in projects {
        grid.push_str(&card(project));
    }
    format!(
        r#"<section class="page archive">
<header class="page-header">
<h1>Projects</h1>
<p>A collection of the systems I have designed, built and shipped.</p>
</header>
<div class="project-grid">{grid}</div>
</section>"#
    )
}

/// `/projects/<slug>/`
pub fn detail(project: &Project) -> String {
    let record = &project.record;

    let mut links = String::new();
    if let Some(github) = &record.github {
        links.push_str(&external_link(github, "button outline", "View code"));
    }
    if let Some(demo) = &record.demo {
        links.push_str(&external_link(demo, "button outline", "External demo"));
    }

    let stack = if record.technologies.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="stack"><h2>Stack</h2>{}</div>"#, tags(&record.technologies))
    };

    format!(
        r#"<section class="page project-detail">
<a href="/projects/" class="back-link">← Back to projects</a>
<div class="detail-card">
<div class="detail-text">
<span class="badge">{category}</span>
<h1>{title}</h1>
<p class="lead">{description}</p>
{stack}
<div class="detail-links">{links}</div>
</div>
{visual}
</div>
<div class="detail-card videos">
<h2>Project Videos</h2>
{videos}
</div>
</section>"#,
        category = esc(&record.category),
        title = esc(&record.title),
        description = esc(&record.description),
        visual = visual(project, "detail-visual"),
        videos = videos(&record.title, &project.media),
    )
}

/// The video slot, one branch per resolved media state.
pub fn videos(title: &str, media: &Media) -> String {
    match media {
        Media::None => format!(r#"<p class="muted">{VIDEOS_PLACEHOLDER}</p>"#),
        Media::Unavailable => format!(r#"<p class="muted">{VIDEOS_UNAVAILABLE}</p>"#),
        Media::Local { videos } => {
            let mut out = String::from(r#"<div class="video-grid">"#);
            for (index, video) in videos.iter().enumerate() {
                out.push_str(&local_video(title, index, video));
            }
            out.push_str("</div>");
            out
        }
        Media::Remote { videos } => {
            let mut out = String::from(r#"<div class="video-grid">"#);
            for (index, video) in videos.iter().enumerate() {
                out.push_str(&remote_video(title, index, videos.len(), video));
            }
            out.push_str("</div>");
            out
        }
    }
}

fn local_video(title: &str, index: usize, video: &LocalVideo) -> String {
    let poster = video
        .poster
        .as_deref()
        .map(|p| format!(r#" poster="{}""#, esc(p)))
        .unwrap_or_default();
    format!(
        r#"<div class="video"><video src="{src}" controls preload="metadata" playsinline{poster} aria-label="{label}"></video></div>"#,
        src = esc(&video.src),
        label = esc(&format!("{title} video {}", index + 1)),
    )
}

fn remote_video(title: &str, index: usize, total: usize, video: &RemoteVideo) -> String {
    match video {
        RemoteVideo::Embed { embed, .. } => format!(
            r#"<div class="video"><iframe src="{src}" title="{label}" loading="lazy" allow="{IFRAME_ALLOW}" allowfullscreen></iframe></div>"#,
            src = esc(embed),
            label = esc(&format!("{title} video {}", index + 1)),
        ),
        RemoteVideo::Unresolved { .. } => format!(
            r#"<div class="video">{}</div>"#,
            external_link(video.source(), "button outline", &link_label(index, total))
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Registry;

    fn project(extra: &str) -> Project {
        let src = format!(
            "[[projects]]\nid = 1\nslug = \"rover\"\ntitle = \"Rover <X>\"\n\
             description = \"Drives.\"\ncategory = \"Field\"\n\
             technologies = [\"ROS 2\"]\n{extra}"
        );
        Registry::from_str(&src).unwrap().projects.remove(0)
    }

    #[test]
    fn test_card_without_image_shows_placeholder() {
        let html = card(&project(""));
        assert!(html.contains(VISUAL_PLACEHOLDER));
        assert!(!html.contains("<img"));
        assert!(html.contains("View project</span>"));
    }

    #[test]
    fn test_card_with_image() {
        let html = card(&project("image = \"/images/rover.jpg\""));
        assert!(html.contains(r#"<img src="/images/rover.jpg" alt="Rover &lt;X&gt;""#));
        assert!(!html.contains(VISUAL_PLACEHOLDER));
    }

    #[test]
    fn test_card_play_icon_when_video() {
        let html = card(&project("media = { kind = \"youtube\", url = \"https://youtu.be/a\" }"));
        assert!(html.contains(r#"class="play""#));
    }

    #[test]
    fn test_card_links_are_external() {
        let html = card(&project("github = \"https://github.com/x/rover\"\ndemo = \"\""));
        assert!(html.contains("Code</a>"));
        assert!(!html.contains("Demo</a>"));
        assert!(html.contains(r#"target="_blank" rel="noopener noreferrer""#));
        assert!(html.contains(r#"data-category="Field""#));
    }

    #[test]
    fn test_detail_without_media() {
        let html = detail(&project(""));
        assert!(html.contains("Project Videos"));
        assert!(html.contains(VIDEOS_PLACEHOLDER));
        assert!(html.contains(VISUAL_PLACEHOLDER));
        assert!(html.contains(r#"href="/projects/""#));
    }

    #[test]
    fn test_detail_unavailable_media() {
        let html = detail(&project("media = { kind = \"local\", sources = [] }"));
        assert!(html.contains(VIDEOS_UNAVAILABLE));
    }

    #[test]
    fn test_detail_local_videos_in_order() {
        let html = detail(&project(
            "media = { kind = \"local\", sources = [\"/videos/b.mp4\", \"/videos/a.mp4\"], poster = \"/images/p.jpg\" }",
        ));
        let b = html.find("/videos/b.mp4").unwrap();
        let a = html.find("/videos/a.mp4").unwrap();
        assert!(b < a);
        assert_eq!(html.matches(r#"poster="/images/p.jpg""#).count(), 2);
    }

    #[test]
    fn test_detail_remote_mixed() {
        let html = detail(&project(
            "video_links = [\"https://www.youtube.com/watch?v=abc&t=5\", \"https://example.com/clip\"]",
        ));
        assert!(html.contains(r#"<iframe src="https://www.youtube.com/embed/abc""#));
        assert!(html.contains(r#"title="Rover &lt;X&gt; video 1""#));
        assert!(html.contains(r#"href="https://example.com/clip""#));
        assert!(html.contains(">Video 2</a>"));
    }

    #[test]
    fn test_single_unresolved_link_label() {
        let html = videos("T", &Media::Remote {
            videos: vec![RemoteVideo::from_link("https://example.com/clip")],
        });
        assert!(html.contains(">Video</a>"));
    }

    #[test]
    fn test_archive_lists_every_project() {
        let registry = Registry::from_str(
            "[[projects]]\nid = 1\nslug = \"a\"\ntitle = \"A\"\ndescription = \"a\"\n\
             [[projects]]\nid = 2\nslug = \"b\"\ntitle = \"B\"\ndescription = \"b\"",
        )
        .unwrap();
        let html = archive(&registry.projects);
        assert_eq!(html.matches("project-card").count(), 2);
    }
}
