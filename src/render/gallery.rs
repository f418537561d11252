//! `/photography/`: photo grid plus lightbox markup.

use super::html::{esc, json_attr};
use crate::{
    interact::{LOCKED_OVERFLOW, lightbox_transitions},
    listing::{GalleryItem, ItemSource, ListingError},
};

pub fn page(source: &dyn ItemSource) -> Result<String, ListingError> {
    let items = source.items()?;

    let grid = if items.is_empty() {
        r#"<p class="empty">No photos yet.</p>"#.to_owned()
    } else {
        let mut grid = String::from(r#"<div class="photo-grid">"#);
        for item in &items {
            grid.push_str(&figure(item));
        }
        grid.push_str("</div>");
        grid
    };

    Ok(format!(
        r#"<section class="page gallery">
<header class="page-header">
<h1>Photography</h1>
<p>A small selection of shots. All images are local for fast loads.</p>
</header>
{grid}
{lightbox}
</section>"#,
        lightbox = lightbox()
    ))
}

/// Closed until a photo is selected. The script steps through the
/// transition table instead of keeping its own rules.
fn lightbox() -> String {
    format!(
        r#"<div class="lightbox" role="dialog" aria-modal="true" data-lightbox-lock="{LOCKED_OVERFLOW}" data-lightbox-transitions="{transitions}" data-lightbox hidden>
<div class="lightbox-frame" data-lightbox-frame>
<button type="button" class="lightbox-close" data-lightbox-close>Close</button>
<img src="" alt="Full size preview" data-lightbox-image>
</div>
</div>"#,
        transitions = json_attr(&lightbox_transitions()),
    )
}

fn figure(item: &GalleryItem) -> String {
    let src = esc(&item.src);
    let alt = item.title.as_deref().map(esc).unwrap_or_default();
    let size = item
        .size
        .map(|(w, h)| format!(r#" width="{w}" height="{h}""#))
        .unwrap_or_default();

    let caption = match &item.title {
        Some(title) => {
            let tags = item.tags.iter().map(|t| esc(t)).collect::<Vec<_>>().join(" · ");
            format!(
                r#"<figcaption><span class="caption-title">{}</span><span class="caption-tags">{tags}</span></figcaption>"#,
                esc(title)
            )
        }
        None => String::new(),
    };

    format!(
        r#"<figure class="photo"><img src="{src}" alt="{alt}"{size} loading="lazy"><button type="button" class="preview" data-lightbox-src="{src}" aria-label="Preview photo">Preview</button>{caption}</figure>"#
    )
}
