//! File system watcher for live rebuild.
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌──────────────────────────────┐
//! │ notify   │───▶│ Debouncer │───▶│ handle_changes()             │
//! │ events   │    │ (300ms)   │    │   config  → reload + rebuild │
//! └──────────┘    └───────────┘    │   content → rebuild          │
//!                                  │   listing → rebuild          │
//!                                  │   public  → copy file        │
//!                                  └──────────────────────────────┘
//! ```

use crate::{
    build::{build_site, copy_public_file},
    config::{SiteConfig, cfg, reload_config},
    log,
    utils::category::{FileCategory, categorize_path},
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::mpsc::{self, RecvTimeoutError},
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

/// Editor swap and backup files.
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        for path in paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

fn try_full_rebuild(config: &SiteConfig, reason: &str) -> bool {
    log!("watch"; "{reason}");
    match build_site(config) {
        Ok(_) => true,
        Err(e) => {
            log!("watch"; "rebuild failed");
            log!("error"; "{e:#}");
            false
        }
    }
}

/// Mirror one public file into the output, or drop it when removed.
fn sync_public_file(path: &Path, config: &SiteConfig) -> Result<()> {
    if path.is_file() {
        return copy_public_file(path, config);
    }
    if let Ok(relative) = path.strip_prefix(&config.build.public) {
        let target = config.build.output.join(relative);
        if target.is_file() {
            fs::remove_file(&target)
                .with_context(|| format!("Failed to remove {}", target.display()))?;
        }
    }
    Ok(())
}

/// Apply a batch of changes. Returns true if a full rebuild ran.
fn handle_changes(paths: &[PathBuf]) -> bool {
    let config = cfg();
    let categorized: Vec<_> = paths.iter().map(|p| (p, categorize_path(p, &config))).collect();
    let Some(strongest) = categorized.iter().map(|(_, c)| *c).max() else {
        return false;
    };

    match strongest {
        FileCategory::Config => match reload_config() {
            Ok(true) => try_full_rebuild(&cfg(), "config changed, rebuilding..."),
            Ok(false) => false,
            Err(e) => {
                log!("error"; "config reload failed, keeping previous: {e:#}");
                false
            }
        },
        FileCategory::Content | FileCategory::Listing => {
            let changed: Vec<_> = categorized
                .iter()
                .filter(|(_, c)| c.needs_render())
                .map(|(p, _)| rel_path(p, config.get_root()))
                .collect();
            let reason = format!("{} changed: {}, rebuilding...", strongest.name(), changed.join(", "));
            try_full_rebuild(&config, &reason)
        }
        FileCategory::Public => {
            for (path, category) in &categorized {
                if *category != FileCategory::Public {
                    continue;
                }
                match sync_public_file(path, &config) {
                    Ok(()) => log!("watch"; "{}", rel_path(path, config.get_root())),
                    Err(e) => log!("error"; "{e:#}"),
                }
            }
            false
        }
        FileCategory::Unknown => false,
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

/// Watch the site root (config and content file) plus the public directory.
fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let targets = [
        (config.get_root().to_path_buf(), RecursiveMode::NonRecursive),
        (config.build.public.clone(), RecursiveMode::Recursive),
    ];
    for (path, mode) in targets {
        if path.exists() {
            watcher
                .watch(&path, mode)
                .with_context(|| format!("Failed to watch {}", path.display()))?;
        }
    }

    let root = config.get_root();
    log!(
        "watch";
        "{}, {}, {}/",
        rel_path(&config.config_path, root),
        rel_path(&config.build.content, root),
        rel_path(&config.build.public, root)
    );
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

/// Start blocking file watcher with debouncing and live rebuild.
pub fn watch_for_changes_blocking() -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, &cfg())?;

    let mut debouncer = Debouncer::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event.paths);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take()) {
                    debouncer.mark_rebuild();
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}
