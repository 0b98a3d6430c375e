//! Inline `basic_auth` credentials.

use once_cell::sync::Lazy;
use regex::Regex;

static IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)import\s+basic_auth(?:\s|$)").expect("valid import regex"));
static BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"basic_auth[^{\n]*\{([^}]*)\}").expect("valid block regex"));
static USER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\S+)\s+(\$\S+)\s*$").expect("valid user regex"));

/// Inline basic-auth state of a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicAuth {
    pub enabled: bool,
    /// `"<user> <hash>"` pairs in block order.
    pub users: Vec<String>,
}

/// Credentials of the first inline `basic_auth { ... }` block.
///
/// Importing the shared `basic_auth` snippet means the site has no inline
/// users, so the result is empty. Lines that are not `<user> <$hash>` are
/// skipped.
pub fn parse_basic_auth(content: &str) -> BasicAuth {
    if IMPORT_RE.is_match(content) {
        return BasicAuth::default();
    }
    let Some(caps) = BLOCK_RE.captures(content) else {
        return BasicAuth::default();
    };

    let users: Vec<String> = caps[1]
        .lines()
        .filter_map(|line| USER_RE.captures(line))
        .map(|user| format!("{} {}", &user[1], &user[2]))
        .collect();

    BasicAuth {
        enabled: !users.is_empty(),
        users,
    }
}
