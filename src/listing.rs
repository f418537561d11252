//! Directory listings for the photo gallery and résumé picker.
//!
//! Both pages consume an ordered list of items. Where those items come from
//! (a directory scan or the content file's photo table) sits behind
//! [`ItemSource`], so the gallery renderer never knows which one it got.

use crate::content::PhotoRecord;
use std::{
    io,
    num::NonZeroU32,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// URL prefix of the résumé directory under the public root.
pub const RESUMES_URL: &str = "/resumes";
/// URL prefix of the photography directory under the public root.
pub const PHOTOGRAPHY_URL: &str = "/photography";

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("failed to read directory `{0}`")]
    Read(PathBuf, #[source] io::Error),
}

/// What to do when the directory does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingDir {
    /// Treat as an empty listing.
    Empty,
    /// Report the read error.
    Fail,
}

/// One matching file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listed {
    /// Raw file name, for display.
    pub file_name: String,
    /// `url_prefix/<percent-encoded name>`.
    pub href: String,
}

/// List regular files in `dir` whose extension is in `allow`
/// (case-insensitive), sorted by file name.
pub fn list_dir<S: AsRef<str>>(
    dir: &Path,
    allow: &[S],
    url_prefix: &str,
    on_missing: MissingDir,
) -> Result<Vec<Listed>, ListingError> {
    if on_missing == MissingDir::Empty && !dir.exists() {
        return Ok(Vec::new());
    }

    let read_err = |err| ListingError::Read(dir.to_path_buf(), err);
    let mut names = Vec::new();
    for entry in dir.read_dir().map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if !path.is_file() || !has_allowed_extension(&path, allow) {
            continue;
        }
        // Non-UTF-8 names cannot be turned into stable URLs
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_owned());
        }
    }
    names.sort_unstable();

    let prefix = url_prefix.trim_end_matches('/');
    Ok(names
        .into_iter()
        .map(|file_name| Listed {
            href: format!("{prefix}/{}", urlencoding::encode(&file_name)),
            file_name,
        })
        .collect())
}

fn has_allowed_extension<S: AsRef<str>>(path: &Path, allow: &[S]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| allow.iter().any(|a| a.as_ref().eq_ignore_ascii_case(ext)))
}

// ============================================================================
// Gallery Items
// ============================================================================

/// A displayable gallery image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub src: String,
    /// Caption; directory items have none.
    pub title: Option<String>,
    pub tags: Vec<String>,
    /// Intrinsic size, when known.
    pub size: Option<(NonZeroU32, NonZeroU32)>,
}

/// Produces the ordered items of a listing page.
pub trait ItemSource {
    fn items(&self) -> Result<Vec<GalleryItem>, ListingError>;
}

/// Hand-maintained photo table from the content file.
pub struct StaticPhotos<'a>(pub &'a [PhotoRecord]);

impl ItemSource for StaticPhotos<'_> {
    fn items(&self) -> Result<Vec<GalleryItem>, ListingError> {
        Ok(self
            .0
            .iter()
            .map(|photo| GalleryItem {
                src: photo.src.clone(),
                title: Some(photo.title.clone()),
                tags: photo.tags.clone(),
                size: Some((photo.width, photo.height)),
            })
            .collect())
    }
}

/// Images found in a directory. The directory must exist.
pub struct PhotoDir<'a> {
    pub dir: PathBuf,
    pub extensions: &'a [String],
}

impl ItemSource for PhotoDir<'_> {
    fn items(&self) -> Result<Vec<GalleryItem>, ListingError> {
        let listed = list_dir(&self.dir, self.extensions, PHOTOGRAPHY_URL, MissingDir::Fail)?;
        Ok(listed
            .into_iter()
            .map(|item| GalleryItem {
                src: item.href,
                title: None,
                tags: Vec::new(),
                size: None,
            })
            .collect())
    }
}

// ============================================================================
// Résumés
// ============================================================================

/// A downloadable résumé PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeVariant {
    /// File name without the `.pdf` extension.
    pub title: String,
    /// Encoded download URL.
    pub href: String,
    pub file_name: String,
    /// Unencoded path shown to the reader.
    pub display_path: String,
}

/// PDFs in `dir`, sorted by name. A missing directory yields no variants.
pub fn resume_variants(dir: &Path) -> Result<Vec<ResumeVariant>, ListingError> {
    let listed = list_dir(dir, &["pdf"], RESUMES_URL, MissingDir::Empty)?;
    Ok(listed
        .into_iter()
        .map(|item| ResumeVariant {
            title: strip_pdf(&item.file_name).to_owned(),
            display_path: format!("{RESUMES_URL}/{}", item.file_name),
            href: item.href,
            file_name: item.file_name,
        })
        .collect())
}

fn strip_pdf(name: &str) -> &str {
    match name.len().checked_sub(4) {
        Some(cut) if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(".pdf") => {
            &name[..cut]
        }
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dir_with(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for f in files {
            fs::write(dir.path().join(f), b"x").unwrap();
        }
        dir
    }

    #[test]
    fn test_filter_and_sort() {
        let dir = dir_with(&["b.png", "a.jpg", "c.txt"]);
        let listed = list_dir(dir.path(), &["jpg", "png"], "/photography", MissingDir::Fail).unwrap();

        let names: Vec<_> = listed.iter().map(|l| l.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
        assert_eq!(listed[0].href, "/photography/a.jpg");
    }

    #[test]
    fn test_extension_case_insensitive() {
        let dir = dir_with(&["Sunset.JPG", "night.Png"]);
        let listed = list_dir(dir.path(), &["jpg", "png"], "/p", MissingDir::Fail).unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[test]
    fn test_skips_directories() {
        let dir = dir_with(&["a.jpg"]);
        fs::create_dir(dir.path().join("nested.jpg")).unwrap();
        let listed = list_dir(dir.path(), &["jpg"], "/p", MissingDir::Fail).unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[test]
    fn test_href_is_percent_encoded() {
        let dir = dir_with(&["My Resume #2.pdf"]);
        let listed = list_dir(dir.path(), &["pdf"], "/resumes/", MissingDir::Fail).unwrap();
        assert_eq!(listed[0].href, "/resumes/My%20Resume%20%232.pdf");
        assert_eq!(listed[0].file_name, "My Resume #2.pdf");
    }

    #[test]
    fn test_missing_dir_policies() {
        let missing = Path::new("/nonexistent/folio/photos");
        assert!(list_dir(missing, &["jpg"], "/p", MissingDir::Empty).unwrap().is_empty());
        assert!(matches!(
            list_dir(missing, &["jpg"], "/p", MissingDir::Fail),
            Err(ListingError::Read(..))
        ));
    }

    #[test]
    fn test_resume_variants() {
        let dir = dir_with(&["Software.pdf", "Robotics Resume.PDF", "notes.md"]);
        let variants = resume_variants(dir.path()).unwrap();

        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].title, "Robotics Resume");
        assert_eq!(variants[0].href, "/resumes/Robotics%20Resume.PDF");
        assert_eq!(variants[0].display_path, "/resumes/Robotics Resume.PDF");
        assert_eq!(variants[1].title, "Software");
    }

    #[test]
    fn test_resume_dir_missing_is_empty() {
        let variants = resume_variants(Path::new("/nonexistent/folio/resumes")).unwrap();
        assert!(variants.is_empty());
    }

    #[test]
    fn test_strip_pdf() {
        assert_eq!(strip_pdf("cv.pdf"), "cv");
        assert_eq!(strip_pdf("cv.PdF"), "cv");
        assert_eq!(strip_pdf("pdf"), "pdf");
        assert_eq!(strip_pdf("履歴書.pdf"), "履歴書");
    }

    #[test]
    fn test_photo_dir_source() {
        let dir = dir_with(&["b.webp", "a.jpg", "readme.txt"]);
        let extensions = vec!["jpg".to_string(), "webp".to_string()];
        let items = PhotoDir { dir: dir.path().to_path_buf(), extensions: &extensions }.items().unwrap();

        let srcs: Vec<_> = items.iter().map(|i| i.src.as_str()).collect();
        assert_eq!(srcs, vec!["/photography/a.jpg", "/photography/b.webp"]);
        assert!(items.iter().all(|i| i.title.is_none() && i.size.is_none()));
    }

    #[test]
    fn test_photo_dir_missing_fails() {
        let extensions = vec!["jpg".to_string()];
        let source = PhotoDir { dir: "/nonexistent/folio".into(), extensions: &extensions };
        assert!(source.items().is_err());
    }

    #[test]
    fn test_static_photos_keep_table_order() {
        let photos = vec![
            PhotoRecord {
                slug: "z".into(),
                title: "Zebra".into(),
                src: "/photography/z.jpg".into(),
                tags: vec!["wildlife".into()],
                width: NonZeroU32::new(4).unwrap(),
                height: NonZeroU32::new(3).unwrap(),
            },
            PhotoRecord {
                slug: "a".into(),
                title: "Aurora".into(),
                src: "/photography/a.jpg".into(),
                tags: vec![],
                width: NonZeroU32::new(16).unwrap(),
                height: NonZeroU32::new(9).unwrap(),
            },
        ];
        let items = StaticPhotos(&photos).items().unwrap();

        assert_eq!(items[0].title.as_deref(), Some("Zebra"));
        assert_eq!(items[1].src, "/photography/a.jpg");
        assert_eq!(items[1].size.map(|(w, h)| (w.get(), h.get())), Some((16, 9)));
    }
}
