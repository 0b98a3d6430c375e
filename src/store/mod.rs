//! Site storage.
//!
//! # Data Flow
//! ```text
//! <sites_dir>/**/*.caddy
//!     → sites.rs (read file → codec::parse → SiteRecord + path + mtime)
//!     → listings, tags, stats
//!
//! SiteRecord edited by the caller
//!     → sites.rs (codec::generate → write, moving between layouts)
//!
//! On file change:
//!     watcher.rs detects create/modify/remove
//!     → reparse the file
//!     → SiteEvent over an mpsc channel
//! ```
//!
//! # Design Decisions
//! - The codec stays pure; all I/O happens here
//! - A broken file never hides the rest of the listing
//! - Placement follows the TLS mode: wildcard sites live apart

pub mod sites;
pub mod watcher;

pub use sites::{collect_tags, SiteStats, SiteStore, StoreError};
pub use watcher::{SiteEvent, SiteWatcher};
