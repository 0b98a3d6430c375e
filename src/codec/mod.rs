//! Site block codec.
//!
//! # Data Flow
//! ```text
//! block text ──┬─▶ metadata.rs   (tags, tls mode)
//!              ├─▶ domains.rs    (header domains)
//!              ├─▶ snippets.rs   (registry imports)
//!              ├─▶ proxy.rs      (backends, lb, health, timeout, websocket)
//!              ├─▶ basic_auth.rs (inline users)
//!              └─▶ residual.rs   (everything else)
//!                     │
//!                     ▼
//!                 SiteRecord ──▶ generator.rs ──▶ canonical block text
//! ```
//!
//! # Design Decisions
//! - Extractors are independent pure functions over the same text
//! - Parsing is total: misses produce defaults, never errors
//! - The line vocabulary lives in one place (`directive.rs`)
//! - Compiled patterns are process-wide and read-only

pub mod basic_auth;
pub mod directive;
pub mod domains;
pub mod generator;
pub mod metadata;
pub mod parser;
pub mod proxy;
pub mod residual;
pub mod snippets;

pub use directive::Directive;
pub use generator::generate;
pub use parser::parse;
