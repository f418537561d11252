//! `/`: the single scrolling page.
//!
//! Section ids match [`super::layout::NAV_ITEMS`] so the navbar anchors and
//! the section tracker line up.

use super::{
    html::{esc, external_link, json_attr, list, period, tel_href},
    projects,
};
use crate::{
    config::SiteInfo,
    content::{ExperienceRecord, Registry},
    interact::{CategoryFilter, ExperienceTabs},
};

pub fn page(site: &SiteInfo, registry: &Registry) -> String {
    [
        hero(site),
        about(registry),
        skills(site, registry),
        experience(registry),
        projects_section(registry),
        education(registry),
        contact(site, registry),
    ]
    .concat()
}

fn section_header(title: &str, intro: &str) -> String {
    let intro = if intro.is_empty() {
        String::new()
    } else {
        format!("<p>{}</p>", esc(intro))
    };
    format!(r#"<div class="section-header"><h2>{title}</h2>{intro}</div>"#)
}

fn hero(site: &SiteInfo) -> String {
    let mut social = String::new();
    if !site.location.is_empty() {
        social.push_str(&format!(r#"<span class="location">{}</span>"#, esc(&site.location)));
    }
    if let Some(github) = &site.github {
        social.push_str(&external_link(github, "social", "GitHub"));
    }
    if let Some(linkedin) = &site.linkedin {
        social.push_str(&external_link(linkedin, "social", "LinkedIn"));
    }

    let tagline = if site.tagline.is_empty() {
        String::new()
    } else {
        format!(r#"<span class="pill">{}</span>"#, esc(&site.tagline))
    };

    format!(
        r#"<section id="hero" class="hero">
<div class="portrait"><img src="{headshot}" alt="Portrait of {name}"></div>
<div class="hero-text">
{tagline}
<h1>{name}</h1>
<p class="lead">{description}</p>
<div class="actions"><a href="{resume}" class="button">Download Resume</a><a href="{mailto}" class="button outline">Let's Collaborate</a></div>
<div class="social">{social}</div>
</div>
</section>"#,
        headshot = esc(&site.headshot_url),
        name = esc(&site.name),
        description = esc(&site.description),
        resume = esc(site.resume_href()),
        mailto = esc(&site.mailto()),
    )
}

fn about(registry: &Registry) -> String {
    let mut body = String::new();
    for paragraph in &registry.about.paragraphs {
        body.push_str(&format!("<p>{}</p>", esc(paragraph)));
    }
    format!(r#"<section id="about" class="section narrow"><h2>About</h2>{body}</section>"#)
}

fn skills(site: &SiteInfo, registry: &Registry) -> String {
    let mut groups = String::new();
    for group in &registry.skills {
        groups.push_str(&format!(
            r#"<div class="skill-group"><h3>{}</h3>{}</div>"#,
            esc(&group.category),
            list(&group.items, "chips")
        ));
    }
    let endorsements = site
        .linkedin
        .as_deref()
        .map(|url| external_link(url, "link", "View endorsements →"))
        .unwrap_or_default();

    format!(
        r#"<section id="skills" class="section tinted">{header}{endorsements}<div class="skill-grid">{groups}</div></section>"#,
        header = section_header("Technical Toolkit", &registry.sections.skills),
    )
}

fn experience(registry: &Registry) -> String {
    let roles = &registry.experience;
    let tabs = ExperienceTabs::new(roles.len());

    let mut buttons = String::new();
    let mut panels = String::new();
    for (index, role) in roles.iter().enumerate() {
        let selected = Some(index) == tabs.active();
        buttons.push_str(&format!(
            r#"<button type="button" role="tab" id="role-tab-{index}" aria-controls="role-{index}" aria-selected="{selected}" data-tab="{index}"><span class="dates">{dates}</span><span class="role">{role_name}</span><span class="company">{company}</span></button>"#,
            dates = period(&role.start_date, &role.end_date),
            role_name = esc(&role.role),
            company = esc(&role.company),
        ));
        panels.push_str(&role_panel(index, role, selected));
    }

    format!(
        r#"<section id="experience" class="section">{header}<div class="tabs" data-tabs><div class="tab-list" role="tablist" aria-label="Roles">{buttons}</div>{panels}</div></section>"#,
        header = section_header("Experience", &registry.sections.experience),
    )
}

fn role_panel(index: usize, role: &ExperienceRecord, selected: bool) -> String {
    let hidden = if selected { "" } else { " hidden" };
    let location = if role.location.is_empty() {
        String::new()
    } else {
        format!(r#"<span class="location">{}</span>"#, esc(&role.location))
    };
    format!(
        r#"<article class="tab-panel" role="tabpanel" id="role-{index}" aria-labelledby="role-tab-{index}" data-panel="{index}"{hidden}><h3>{role_name} · {company}</h3><p class="meta"><span>{dates}</span>{location}</p>{achievements}</article>"#,
        role_name = esc(&role.role),
        company = esc(&role.company),
        dates = period(&role.start_date, &role.end_date),
        achievements = list(&role.achievements, "bullets"),
    )
}

fn projects_section(registry: &Registry) -> String {
    let filter = CategoryFilter::new(registry.categories());

    let mut buttons = String::new();
    for option in filter.options() {
        buttons.push_str(&format!(
            r#"<button type="button" class="filter" data-filter="{label}" aria-pressed="{pressed}">{label}</button>"#,
            label = esc(option),
            pressed = filter.is_selected(option),
        ));
    }

    let mut grid = String::new();
    for project in filter.apply(&registry.projects) {
        grid.push_str(&projects::card(project));
    }

    format!(
        r#"<section id="projects" class="section tinted">{header}<a href="/projects/" class="button outline">Explore project archive →</a><div class="filters" role="group" aria-label="Filter by category">{buttons}</div><div class="project-grid" data-filter-grid data-filter-table="{table}">{grid}</div></section>"#,
        header = section_header("Featured Projects", &registry.sections.projects),
        table = json_attr(&filter.visibility(&registry.projects)),
    )
}

fn education(registry: &Registry) -> String {
    let mut cards = String::new();
    for entry in &registry.education {
        let degree = match &entry.major {
            Some(major) => format!("{}, {}", esc(&entry.degree), esc(major)),
            None => esc(&entry.degree).into_owned(),
        };
        cards.push_str(&format!(
            r#"<div class="edu-card"><p class="dates">{dates}</p><h3>{degree}</h3><p>{school}</p>{details}</div>"#,
            dates = period(&entry.start_date, &entry.end_date),
            school = esc(&entry.school),
            details = list(&entry.details, "bullets"),
        ));
    }
    format!(
        r#"<section id="education" class="section">{header}<div class="edu-grid">{cards}</div></section>"#,
        header = section_header("Education", &registry.sections.education),
    )
}

fn contact(site: &SiteInfo, registry: &Registry) -> String {
    let text = &registry.sections;
    let mailto = esc(&site.mailto()).into_owned();

    let linkedin = site
        .linkedin
        .as_deref()
        .map(|url| external_link(url, "button outline", "Connect on LinkedIn"))
        .unwrap_or_default();

    let mut details = format!(
        r#"<div class="row"><span>Primary email</span><a href="{mailto}">{}</a></div>"#,
        esc(&site.email)
    );
    if !site.phone.is_empty() {
        details.push_str(&format!(
            r#"<div class="row"><span>Phone</span><a href="{}">{}</a></div>"#,
            esc(&tel_href(&site.phone)),
            esc(&site.phone)
        ));
    }
    if !site.location.is_empty() {
        details.push_str(&format!(
            r#"<div class="row"><span>Location</span><span>{}</span></div>"#,
            esc(&site.location)
        ));
    }

    let body = if text.contact_body.is_empty() {
        String::new()
    } else {
        format!("<p>{}</p>", esc(&text.contact_body))
    };

    format!(
        r#"<section id="contact" class="section"><div class="contact-card"><div class="contact-text"><h2>{heading}</h2>{body}<div class="actions"><a href="{mailto}" class="button">Email Me</a>{linkedin}</div></div><div class="contact-details">{details}</div></div></section>"#,
        heading = esc(&text.contact_heading),
    )
}
