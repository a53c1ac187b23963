//! Store configuration and factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use kelime_core::model::DEFAULT_GROUP_SIZE;
use kelime_core::store::{ProgressStore, SessionMode};

use crate::local::LocalStore;
use crate::remote::RemoteStore;

/// Remote backend settings.
///
/// Note: Custom Debug impl masks the API token to prevent accidental
/// exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the document store API.
    pub base_url: String,
    /// Bearer token; supports `${VAR_NAME}` references.
    #[serde(default)]
    pub api_token: String,
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"***")
            .finish()
    }
}

/// Local backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Directory holding the progress blob.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Top-level kelime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KelimeConfig {
    /// Path to the catalog JSON file.
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,
    /// Words per group.
    #[serde(default = "default_group_size")]
    pub group_size: usize,
    /// Identity for remote-backed sessions.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Use the local backend without an identity.
    #[serde(default)]
    pub guest: bool,
    /// Remote backend settings (required for authenticated sessions).
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
    /// Local backend settings.
    #[serde(default)]
    pub local: LocalConfig,
}

fn default_catalog() -> PathBuf {
    PathBuf::from("words.json")
}

fn default_group_size() -> usize {
    DEFAULT_GROUP_SIZE
}

fn default_data_dir() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("kelime"),
        Err(_) => PathBuf::from("./kelime-data"),
    }
}

impl Default for KelimeConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            group_size: default_group_size(),
            user_id: None,
            guest: false,
            remote: None,
            local: LocalConfig::default(),
        }
    }
}

impl KelimeConfig {
    /// Resolve the session mode from the identity and guest flag.
    ///
    /// An identity always selects the remote backend; the guest flag
    /// selects the local one. Neither set is a blocked state that never
    /// reaches the engine.
    pub fn session_mode(&self) -> Result<SessionMode> {
        match (&self.user_id, self.guest) {
            (Some(id), _) if !id.trim().is_empty() => Ok(SessionMode::Authenticated {
                user_id: id.clone(),
            }),
            (_, true) => Ok(SessionMode::Guest),
            _ => anyhow::bail!(
                "not signed in: set `user_id` for remote progress or `guest = true` for local-only progress"
            ),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `kelime.toml` in the current directory
/// 2. `~/.config/kelime/config.toml`
///
/// Environment variable override: `KELIME_API_TOKEN`.
pub fn load_config() -> Result<KelimeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<KelimeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("kelime.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<KelimeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => KelimeConfig::default(),
    };

    // Apply the env var override, then resolve ${VAR} references.
    if let Ok(token) = std::env::var("KELIME_API_TOKEN") {
        if let Some(remote) = config.remote.as_mut() {
            remote.api_token = token;
        }
    }
    if let Some(remote) = config.remote.as_mut() {
        remote.api_token = resolve_env_vars(&remote.api_token);
        remote.base_url = resolve_env_vars(&remote.base_url);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("kelime"))
}

/// Create the progress store for a session mode.
pub fn create_store(mode: &SessionMode, config: &KelimeConfig) -> Result<Box<dyn ProgressStore>> {
    match mode {
        SessionMode::Authenticated { user_id } => {
            let remote = config
                .remote
                .as_ref()
                .context("authenticated session requires a [remote] section in kelime.toml")?;
            anyhow::ensure!(
                !remote.api_token.is_empty(),
                "remote api_token is empty; set it in kelime.toml or KELIME_API_TOKEN"
            );
            Ok(Box::new(RemoteStore::new(
                &remote.base_url,
                &remote.api_token,
                user_id,
            )))
        }
        SessionMode::Guest => Ok(Box::new(LocalStore::new(&config.local.data_dir))),
    }
}
