//! Tag and TLS-mode metadata.
//!
//! Both live in comments (`# @tags: a, b` and `# @tls: <mode>`) so Caddy
//! ignores them. The first matching comment wins, wherever it sits.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::site::TlsMode;

static TAGS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)#[ \t]*@tags:(.*)$").expect("valid tags regex"));
static TLS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)#[ \t]*@tls:[ \t]*(\S.*)$").expect("valid tls regex"));
static WILDCARD_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"import\s+(wildcard-tls-[A-Za-z0-9-]+)").expect("valid wildcard regex")
});

/// Comma-separated tags of the first `# @tags:` comment.
pub fn parse_tags(content: &str) -> Vec<String> {
    let Some(caps) = TAGS_RE.captures(content) else {
        return Vec::new();
    };
    caps[1]
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// TLS mode from the `# @tls:` comment, else from a wildcard import.
pub fn parse_tls_mode(content: &str) -> TlsMode {
    if let Some(caps) = TLS_RE.captures(content) {
        return TlsMode::from_comment(&caps[1]);
    }
    WILDCARD_IMPORT_RE
        .captures(content)
        .and_then(|caps| TlsMode::from_wildcard_snippet(&caps[1]))
        .unwrap_or_default()
}
