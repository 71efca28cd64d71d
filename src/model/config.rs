use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub advisor: AdvisorConfig,
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_url")]
    pub url: String,
    /// Applies to both fetch and push
    #[serde(default = "default_remote_timeout")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            url: default_remote_url(),
            timeout_secs: default_remote_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Relative paths resolve against the working directory
    #[serde(default = "default_cache_path")]
    pub path: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            path: default_cache_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default = "default_advisor_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_advisor_model")]
    pub model: String,
    #[serde(default = "default_advisor_timeout")]
    pub timeout_secs: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            endpoint: default_advisor_endpoint(),
            model: default_advisor_model(),
            timeout_secs: default_advisor_timeout(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Collapse duplicate local names to their first occurrence when merging
    #[serde(default)]
    pub dedupe_local: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot (e.g. `background = "#1E1E1E"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

/// Default: see src/templates/config.toml
fn default_remote_url() -> String {
    "http://127.0.0.1:5000/api/data".to_string()
}

/// Default: see src/templates/config.toml
fn default_remote_timeout() -> u64 {
    3
}

/// Default: see src/templates/config.toml
fn default_cache_path() -> String {
    "projects_offline.json".to_string()
}

/// Default: see src/templates/config.toml
fn default_advisor_endpoint() -> String {
    "http://localhost:11434".to_string()
}

/// Default: see src/templates/config.toml
fn default_advisor_model() -> String {
    "gemma3:4b".to_string()
}

/// Default: see src/templates/config.toml
fn default_advisor_timeout() -> u64 {
    120
}
