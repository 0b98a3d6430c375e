//! Configuration schema definitions.
//!
//! All sections default, so an empty file (or no file at all) is a valid
//! configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::site::{SiteRecord, Snippet};

/// Root configuration for the site manager.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Where Caddy configuration lives on disk.
    pub paths: PathsConfig,

    /// Values used when creating new sites.
    pub defaults: DefaultsConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Sites directory watching.
    pub watch: WatchConfig,
}

/// Filesystem layout.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Caddy configuration root (e.g., "/caddy-config").
    pub config_dir: PathBuf,

    /// Site files directory; `<config_dir>/sites` when unset.
    pub sites_dir: Option<PathBuf>,
}

impl PathsConfig {
    /// Effective sites directory.
    pub fn sites_dir(&self) -> PathBuf {
        self.sites_dir
            .clone()
            .unwrap_or_else(|| self.config_dir.join("sites"))
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("/caddy-config"),
            sites_dir: None,
        }
    }
}

/// Defaults for new sites.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Backend host offered for new sites.
    pub target_host: String,

    /// Snippets preselected for new sites.
    pub snippets: Vec<Snippet>,
}

impl DefaultsConfig {
    /// A new record on the default host with the preselected snippets.
    pub fn new_site(&self, domains: Vec<String>, target_port: impl Into<String>) -> SiteRecord {
        let mut site = SiteRecord::new(domains, self.target_host.clone(), target_port);
        if !self.snippets.is_empty() {
            site.snippets = self.snippets.clone();
        }
        site.is_internal = site.has_snippet(Snippet::InternalOnly);
        site
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            target_host: "192.168.1.1".to_string(),
            snippets: vec![Snippet::DEFAULT],
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON lines instead of human-readable logs.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Watcher configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WatchConfig {
    /// Poll interval for backends without native events, in seconds.
    pub poll_interval_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 2,
        }
    }
}
