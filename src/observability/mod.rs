//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! codec, store, watcher, CLI
//!     → tracing events with structured fields
//!     → logging.rs (EnvFilter + fmt/JSON layer on stderr)
//! ```
//!
//! # Design Decisions
//! - The pure codec only logs at debug/trace level
//! - Store and watcher log every file they write, move or fail to read

pub mod logging;

pub use logging::init_logging;
