//! Residual ("extra") configuration.
//!
//! # States
//! ```text
//! BeforeBlock ──(line ending in `{`)──▶ InBlock ──(top-level `}`)──▶ done
//!                                         │  ▲
//!        recognized directive opens `{`   ▼  │ depth back at entry level
//!                                       Skipping
//! ```
//!
//! # Design Decisions
//! - Lines are classified on their trimmed text by `Directive::classify`
//! - A block opened by a recognized directive (`reverse_proxy`,
//!   `transport http`, `basic_auth`, or any other vocabulary line ending in
//!   `{`) is skipped whole, closing line included
//! - Residual nested blocks keep their closing braces so the block stays
//!   balanced when regenerated
//! - Anything after the block's closing brace is ignored

use crate::codec::directive::Directive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeBlock,
    InBlock,
    /// Inside a directive block entered at the given depth.
    Skipping { entry_depth: usize },
}

/// Lines of the block no other extractor accounts for, trimmed and joined
/// with `\n`.
pub fn parse_extra_config(content: &str) -> String {
    let mut state = State::BeforeBlock;
    let mut depth: usize = 0;
    let mut extra: Vec<&str> = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        let opens = trimmed.matches('{').count();
        let closes = trimmed.matches('}').count();

        match state {
            State::BeforeBlock => {
                if trimmed.ends_with('{') {
                    state = State::InBlock;
                }
            }
            State::Skipping { entry_depth } => {
                depth = (depth + opens).saturating_sub(closes);
                if depth <= entry_depth {
                    depth = entry_depth;
                    state = State::InBlock;
                }
            }
            State::InBlock => {
                if depth == 0 && trimmed.starts_with('}') {
                    break;
                }
                match Directive::classify(trimmed) {
                    Some(directive) => {
                        let next = (depth + opens).saturating_sub(closes);
                        if next > depth {
                            tracing::trace!(?directive, depth, "Skipping directive block");
                            state = State::Skipping { entry_depth: depth };
                        }
                        depth = next;
                    }
                    None => {
                        depth = (depth + opens).saturating_sub(closes);
                        if !trimmed.is_empty() {
                            extra.push(trimmed);
                        }
                    }
                }
            }
        }
    }

    extra.join("\n")
}
