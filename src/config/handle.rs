//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement, so
//! the watcher can swap in an edited `folio.toml` while the server keeps
//! answering requests with whichever snapshot it already holds.
//!
//! ```ignore
//! let c = cfg();
//! build_site(&c)?;  // Arc auto-derefs to &SiteConfig
//! ```

use super::SiteConfig;
use crate::utils::hash;
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use std::{
    fs,
    sync::{
        Arc, LazyLock,
        atomic::{AtomicU64, Ordering},
    },
};

/// Initialized with the default config, replaced with the loaded one in main.
pub static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Hash of the config file content behind the current snapshot.
static CONFIG_HASH: AtomicU64 = AtomicU64::new(0);

/// Current config snapshot. Wait-free.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Initialize global config (called once at startup).
pub fn init_config(config: SiteConfig) {
    if let Ok(content) = fs::read(&config.config_path) {
        CONFIG_HASH.store(hash::compute(&content), Ordering::Relaxed);
    }
    CONFIG.store(Arc::new(config));
}

/// Re-read `folio.toml` and swap it in.
///
/// Returns `false` when the file content is identical to the last load.
/// Readers that already hold the old snapshot keep using it.
pub fn reload_config() -> Result<bool> {
    let current = cfg();
    let cli = current
        .cli
        .context("config was not initialized from the command line")?;

    let content = fs::read(&current.config_path)
        .with_context(|| format!("Failed to read {}", current.config_path.display()))?;
    let new_hash = hash::compute(&content);
    if new_hash == CONFIG_HASH.load(Ordering::Relaxed) {
        return Ok(false);
    }

    let new_config = SiteConfig::load(cli)?;
    new_config.validate()?;

    CONFIG.store(Arc::new(new_config));
    CONFIG_HASH.store(new_hash, Ordering::Relaxed);
    Ok(true)
}
