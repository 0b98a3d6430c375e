//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (poll interval > 0, known log level)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use crate::config::schema::AppConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("paths.config_dir must not be empty")]
    EmptyConfigDir,

    #[error("paths.sites_dir must not be empty when set")]
    EmptySitesDir,

    #[error("defaults.target_host must not be empty")]
    EmptyDefaultHost,

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),

    #[error("watch.poll_interval_secs must be greater than zero")]
    ZeroPollInterval,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.paths.config_dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyConfigDir);
    }
    if matches!(&config.paths.sites_dir, Some(dir) if dir.as_os_str().is_empty()) {
        errors.push(ValidationError::EmptySitesDir);
    }
    if config.defaults.target_host.trim().is_empty() {
        errors.push(ValidationError::EmptyDefaultHost);
    }
    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }
    if config.watch.poll_interval_secs == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
