//! Site initialization module.
//!
//! Creates a new portfolio with a default `folio.toml`, a sample content
//! file and the public directory layout.

use crate::config::{SiteConfig, defaults};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

const IGNORE_FILE: &str = ".gitignore";

/// Default public directory structure
const PUBLIC_DIRS: &[&str] = &["images", "photography", "resumes", "videos"];

const SAMPLE_CONTENT: &str = r#"[about]
paragraphs = [
    "Write a few sentences about yourself here.",
]

[sections]
contact_body = "Open to new roles and collaborations."

[[skills]]
category = "Programming"
items = ["Rust", "Python"]

[[experience]]
company = "Example Co."
role = "Engineer"
start_date = "Jan 2024"
end_date = "Present"
location = "Remote"
achievements = ["Shipped the first release."]

[[education]]
school = "Example University"
degree = "B.S."
major = "Computer Science"
start_date = "2018"
end_date = "2022"

[[projects]]
id = 1
slug = "first-project"
title = "First Project"
description = "What it does and why it matters."
category = "Software"
technologies = ["Rust"]
"#;

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Without a name the current directory is the site and must be empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `folio init <SITE_NAME>` to create in a subdirectory."
        );
    }
    if has_name && root.exists() && !is_dir_empty(root)? {
        bail!("Path `{}` already exists and is not empty.", root.display());
    }

    init_site_structure(&config.build.public)?;
    init_default_config(&config.config_path)?;
    init_content(&config.build.content)?;
    init_ignored_files(root)?;

    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())
        .context("Failed to serialize default config")?;
    write_new(path, &content)
}

fn init_content(path: &Path) -> Result<()> {
    write_new(path, SAMPLE_CONTENT)
}

/// Create public directory structure
fn init_site_structure(public: &Path) -> Result<()> {
    for dir in PUBLIC_DIRS {
        let path = public.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Ignore the output directory in version control
fn init_ignored_files(root: &Path) -> Result<()> {
    let path = root.join(IGNORE_FILE);
    if path.exists() {
        return Ok(());
    }
    let output = defaults::build::output();
    write_new(&path, &format!("/{}/\n", output.display()))
}

fn write_new(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
