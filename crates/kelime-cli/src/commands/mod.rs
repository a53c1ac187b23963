//! Command implementations.

pub mod init;
pub mod learn;
pub mod progress;
pub mod recent;
pub mod study;
pub mod unlearn;
pub mod validate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use kelime_core::catalog::Catalog;
use kelime_core::error::EngineError;
use kelime_core::session::Session;
use kelime_store::config::{create_store, load_config_from, KelimeConfig};

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub guest: bool,
    pub user: Option<String>,
}

/// Load the config file and apply CLI overrides.
pub fn resolve_config(overrides: &Overrides) -> Result<KelimeConfig> {
    let mut config = load_config_from(overrides.config.as_deref())?;
    if let Some(catalog) = &overrides.catalog {
        config.catalog = catalog.clone();
    }
    if overrides.guest {
        // --guest forces the local backend even when an identity is
        // configured.
        config.guest = true;
        config.user_id = None;
    }
    if let Some(user) = &overrides.user {
        config.user_id = Some(user.clone());
    }
    tracing::debug!(catalog = %config.catalog.display(), guest = config.guest, "config resolved");
    Ok(config)
}

/// Load the catalog and hydrate a session per the resolved config.
pub async fn open_session(overrides: &Overrides) -> Result<(KelimeConfig, Session)> {
    let config = resolve_config(overrides)?;
    let catalog = Catalog::load(&config.catalog, config.group_size)
        .with_context(|| format!("failed to load catalog: {}", config.catalog.display()))?;
    let mode = config.session_mode()?;
    let store = create_store(&mode, &config)?;
    let session = Session::hydrate(catalog, Arc::from(store)).await?;
    Ok((config, session))
}

/// Print the standard warning for a degraded (persist-failed) operation.
pub fn warn_degraded(err: &EngineError) {
    eprintln!("Warning: progress was not saved ({err}); continuing with in-memory state.");
}
