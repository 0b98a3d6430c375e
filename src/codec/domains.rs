//! Domain list from the block header.

/// Domains written before the block's opening brace.
///
/// Comment and blank lines in the header are skipped; the rest is split on
/// commas and whitespace. Falls back to `[fallback]` when the header yields
/// nothing or there is no block at all.
pub fn parse_domains(content: &str, fallback: &str) -> Vec<String> {
    let header = match content.find('{') {
        Some(end) => &content[..end],
        None => return vec![fallback.to_string()],
    };

    let joined = header
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join(" ");

    let domains: Vec<String> = joined
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    if domains.is_empty() {
        vec![fallback.to_string()]
    } else {
        domains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_domain() {
        let content = "example.com {\n    reverse_proxy a:1\n}\n";
        assert_eq!(parse_domains(content, "fallback"), vec!["example.com"]);
    }

    #[test]
    fn test_multiple_domains_with_comments() {
        let content = "# @tags: prod\n# @tls: internal\na.example.com, b.example.com\n  c.example.com {\n}\n";
        assert_eq!(
            parse_domains(content, "fallback"),
            vec!["a.example.com", "b.example.com", "c.example.com"]
        );
    }

    #[test]
    fn test_does_not_read_past_header() {
        let content = "example.com {\n    @api host api.example.com {\n    }\n}\n";
        assert_eq!(parse_domains(content, "fallback"), vec!["example.com"]);
    }

    #[test]
    fn test_fallback_when_header_empty() {
        assert_eq!(parse_domains("{\n}\n", "site"), vec!["site"]);
        assert_eq!(parse_domains("# only a comment\n{\n}", "site"), vec!["site"]);
        assert_eq!(parse_domains("no block here", "site"), vec!["site"]);
        assert_eq!(parse_domains("", "site"), vec!["site"]);
    }
}
