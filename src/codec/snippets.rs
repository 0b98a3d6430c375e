//! Snippet imports.
//!
//! `import` is matched anywhere in the text, nested blocks included. Names
//! outside the registry (custom snippets, wildcard TLS snippets) are dropped.
//! A name imported twice is kept once, at its first position.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::site::Snippet;

static IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"import\s+(\S+)").expect("valid import regex"));

/// Registry snippets imported by the block, defaulting to `[cloudflare_dns]`.
pub fn parse_snippets(content: &str) -> Vec<Snippet> {
    let mut snippets = Vec::new();
    for caps in IMPORT_RE.captures_iter(content) {
        match Snippet::from_name(&caps[1]) {
            Some(snippet) if !snippets.contains(&snippet) => snippets.push(snippet),
            Some(_) => {}
            None => tracing::trace!(name = &caps[1], "ignoring unknown snippet import"),
        }
    }

    if snippets.is_empty() {
        snippets.push(Snippet::DEFAULT);
    }
    snippets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_snippets_in_order() {
        let content = "example.com {\n    import security_headers\n    import cloudflare_dns\n}\n";
        assert_eq!(
            parse_snippets(content),
            vec![Snippet::SecurityHeaders, Snippet::CloudflareDns]
        );
    }

    #[test]
    fn test_unknown_import_dropped() {
        let content = "example.com {\n    import custom_snippet\n    import compression\n}\n";
        assert_eq!(parse_snippets(content), vec![Snippet::Compression]);
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let content = "x {\n import compression\n import rate_limit\n import compression\n}\n";
        assert_eq!(
            parse_snippets(content),
            vec![Snippet::Compression, Snippet::RateLimit]
        );
    }

    #[test]
    fn test_default_when_nothing_recognized() {
        assert_eq!(parse_snippets("x {\n import custom\n}\n"), vec![Snippet::CloudflareDns]);
        assert_eq!(parse_snippets(""), vec![Snippet::CloudflareDns]);
    }

    #[test]
    fn test_imports_inside_nested_blocks_count() {
        // Not scope-aware: an import inside a matcher block is still picked up.
        let content = "x {\n    handle /api {\n        import rate_limit\n    }\n}\n";
        assert_eq!(parse_snippets(content), vec![Snippet::RateLimit]);
    }
}
