//! Store configuration and factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use readiness_core::traits::RecordStore;

use crate::cms::CmsStore;
use crate::pack::PackStore;

/// Configuration for a single record store.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// A local TOML content pack.
    Pack { path: PathBuf },
    /// A CMS reachable over HTTP.
    Cms {
        base_url: String,
        #[serde(default)]
        api_key: Option<String>,
    },
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreConfig::Pack { path } => f.debug_struct("Pack").field("path", path).finish(),
            StoreConfig::Cms {
                base_url,
                api_key,
            } => f
                .debug_struct("Cms")
                .field("base_url", base_url)
                .field("api_key", &api_key.as_ref().map(|_| "***"))
                .finish(),
        }
    }
}

/// Top-level readiness configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessConfig {
    /// Store configurations keyed by name.
    #[serde(default = "default_stores")]
    pub stores: HashMap<String, StoreConfig>,
    /// Store used when none is named.
    #[serde(default = "default_store")]
    pub default_store: String,
    /// Where completed session outcomes are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_store() -> String {
    "local".to_string()
}
fn default_stores() -> HashMap<String, StoreConfig> {
    HashMap::from([(
        default_store(),
        StoreConfig::Pack {
            path: PathBuf::from("content/assessment.toml"),
        },
    )])
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./readiness-results")
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            stores: default_stores(),
            default_store: default_store(),
            output_dir: default_output_dir(),
        }
    }
}

impl ReadinessConfig {
    /// Look up a store by name, or the default store.
    pub fn store_config(&self, name: Option<&str>) -> Result<&StoreConfig> {
        let name = name.unwrap_or(&self.default_store);
        self.stores.get(name).with_context(|| {
            let mut available: Vec<&String> = self.stores.keys().collect();
            available.sort();
            format!("store '{name}' not found in config. Available: {available:?}")
        })
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Resolve env vars in a store config.
fn resolve_store_config(config: &StoreConfig) -> StoreConfig {
    match config {
        StoreConfig::Pack { path } => StoreConfig::Pack {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
        StoreConfig::Cms { base_url, api_key } => StoreConfig::Cms {
            base_url: resolve_env_vars(base_url),
            api_key: api_key.as_ref().map(|k| resolve_env_vars(k)),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `readiness.toml` in the current directory
/// 2. `~/.config/readiness/config.toml`
///
/// Environment variable override: `READINESS_CMS_KEY` sets the API key of
/// every CMS store.
pub fn load_config() -> Result<ReadinessConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ReadinessConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("readiness.toml");
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

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ReadinessConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ReadinessConfig::default(),
    };

    // Resolve env vars in all store configs
    config.stores = config
        .stores
        .iter()
        .map(|(k, v)| (k.clone(), resolve_store_config(v)))
        .collect();

    // Relative pack paths are relative to the config file, not the cwd.
    if let Some(base) = config_path.as_deref().and_then(Path::parent) {
        for store in config.stores.values_mut() {
            if let StoreConfig::Pack { path } = store {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
    }

    if let Ok(key) = std::env::var("READINESS_CMS_KEY") {
        for store in config.stores.values_mut() {
            if let StoreConfig::Cms { api_key, .. } = store {
                *api_key = Some(key.clone());
            }
        }
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("readiness"))
}

/// Create a store instance from its configuration.
pub fn create_store(config: &StoreConfig) -> Result<Box<dyn RecordStore>> {
    match config {
        StoreConfig::Pack { path } => Ok(Box::new(PackStore::from_path(path)?)),
        StoreConfig::Cms { base_url, api_key } => {
            Ok(Box::new(CmsStore::new(base_url, api_key.clone())?))
        }
    }
}
