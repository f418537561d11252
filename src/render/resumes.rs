//! `/resumes/`: one download card per PDF.

use super::html::esc;
use crate::{config::SiteInfo, listing::ResumeVariant};

pub fn page(site: &SiteInfo, variants: &[ResumeVariant]) -> String {
    let body = if variants.is_empty() {
        r#"<div class="empty">No PDF resumes found yet. Drop your files into <code>public/resumes</code> and rebuild.</div>"#
            .to_owned()
    } else {
        let mut grid = String::from(r#"<div class="resume-grid">"#);
        for variant in variants {
            grid.push_str(&card(variant));
        }
        grid.push_str("</div>");
        grid
    };

    format!(
        r#"<section class="page resumes">
<div class="resumes-top"><a href="/" class="back-link">← Back to portfolio</a><span class="muted">{email}</span></div>
<header class="page-header">
<h1>Choose the resume you need</h1>
<p>Pick the PDF that matches what you need. Each file name below comes straight from <code>public/resumes</code> so you always know which version you are sharing.</p>
</header>
{body}
</section>"#,
        email = esc(&site.email),
    )
}

fn card(variant: &ResumeVariant) -> String {
    format!(
        r#"<article class="resume-card">
<h2>{title}</h2>
<p class="muted">Saved in <code>public/resumes</code> as <strong>{file_name}</strong>.</p>
<a href="{href}" class="button" download>Download PDF</a>
<p class="path">{display_path}</p>
</article>"#,
        title = esc(&variant.title),
        file_name = esc(&variant.file_name),
        href = esc(&variant.href),
        display_path = esc(&variant.display_path),
    )
}
