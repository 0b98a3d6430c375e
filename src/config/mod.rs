//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, or defaults)
//!     → environment overrides (CADDY_CONFIG_PATH, SITES_DIR, DEFAULT_IP, LOG_LEVEL)
//!     → command-line overrides (--sites-dir, --log-level)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Environment wins over the file, matching container deployments
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with, ConfigError, ConfigOverrides};
pub use schema::AppConfig;
pub use validation::ValidationError;
