//! Site data model.
//!
//! # Responsibilities
//! - Define the structured record a site block is parsed into
//! - Hold the closed registry of known snippets
//! - Derive views used by listings (access level, backend URLs)
//! - Provide service templates for new sites
//!
//! # Design Decisions
//! - Snippets are an enum, so unknown names cannot enter a record
//! - TLS mode serializes as the same string the `# @tls:` comment carries
//! - `raw_content` is kept for display only, never fed back into generation

pub mod record;
pub mod snippet;
pub mod template;
pub mod tls;

pub use record::{clean_domains, filter_sites, sanitize_filename, Access, SiteRecord};
pub use snippet::Snippet;
pub use template::Template;
pub use tls::TlsMode;
