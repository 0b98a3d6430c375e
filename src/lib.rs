//! Caddy site block codec and site management library.
//!
//! A site block is parsed into a [`SiteRecord`] with [`parse`] and rendered
//! back with [`generate`]. Configuration the record does not model survives
//! the trip as `extra_config`.
//!
//! ```
//! use caddy_sites::{generate, parse};
//!
//! let site = parse("app.lan {\n    encode gzip\n    reverse_proxy 10.0.0.5:8080\n}\n", "app");
//! assert_eq!(site.target_port, "8080");
//! assert_eq!(site.extra_config, "encode gzip");
//! assert!(generate(&site).contains("reverse_proxy 10.0.0.5:8080"));
//! ```

pub mod codec;
pub mod config;
pub mod observability;
pub mod site;
pub mod store;

pub use codec::{generate, parse};
pub use config::AppConfig;
pub use site::{SiteRecord, Snippet, TlsMode};
pub use store::SiteStore;
