//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Command-line values, applied after the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub sites_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.sites_dir {
            config.paths.sites_dir = Some(dir.clone());
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}

/// Load, override from the environment, and validate.
///
/// Without a path the built-in defaults are the starting point.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_config_with(path, &ConfigOverrides::default())
}

/// Like [`load_config`], with command-line overrides applied before
/// validation.
pub fn load_config_with(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content)?
        }
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(
        sites_dir = %config.paths.sites_dir().display(),
        log_level = %config.observability.log_level,
        "Configuration loaded"
    );
    Ok(config)
}

/// Apply `CADDY_CONFIG_PATH`, `SITES_DIR`, `DEFAULT_IP` and `LOG_LEVEL`.
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(dir) = get("CADDY_CONFIG_PATH") {
        config.paths.config_dir = PathBuf::from(dir);
    }
    if let Some(dir) = get("SITES_DIR") {
        config.paths.sites_dir = Some(PathBuf::from(dir));
    }
    if let Some(host) = get("DEFAULT_IP") {
        config.defaults.target_host = host;
    }
    if let Some(level) = get("LOG_LEVEL") {
        config.observability.log_level = level;
    }
}
