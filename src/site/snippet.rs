//! Known snippet registry.
//!
//! Snippets are reusable blocks defined once in `snippets.caddy` and pulled
//! into a site with `import <name>`. Only the names below are understood;
//! anything else imported by a site is not represented in its record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A snippet from the fixed registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Snippet {
    /// Certificates via the Cloudflare DNS challenge.
    CloudflareDns,
    /// Restrict access to LAN networks.
    InternalOnly,
    /// HSTS, X-Frame-Options and friends.
    SecurityHeaders,
    /// Zstd and gzip response encoding.
    Compression,
    /// Request throttling.
    RateLimit,
    /// Shared basic-auth user list.
    BasicAuth,
}

impl Snippet {
    /// Every registry entry, in display order.
    pub const ALL: [Snippet; 6] = [
        Snippet::CloudflareDns,
        Snippet::InternalOnly,
        Snippet::SecurityHeaders,
        Snippet::Compression,
        Snippet::RateLimit,
        Snippet::BasicAuth,
    ];

    /// Snippet used when a site imports nothing recognizable.
    pub const DEFAULT: Snippet = Snippet::CloudflareDns;

    /// Name as written after `import`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Snippet::CloudflareDns => "cloudflare_dns",
            Snippet::InternalOnly => "internal_only",
            Snippet::SecurityHeaders => "security_headers",
            Snippet::Compression => "compression",
            Snippet::RateLimit => "rate_limit",
            Snippet::BasicAuth => "basic_auth",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Snippet::CloudflareDns => "Cloudflare DNS",
            Snippet::InternalOnly => "Internal Only",
            Snippet::SecurityHeaders => "Security Headers",
            Snippet::Compression => "Compression",
            Snippet::RateLimit => "Rate Limit",
            Snippet::BasicAuth => "Basic Auth",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Snippet::CloudflareDns => "Automatic SSL via DNS challenge",
            Snippet::InternalOnly => "Restrict to LAN networks",
            Snippet::SecurityHeaders => "HSTS, X-Frame-Options, etc.",
            Snippet::Compression => "Zstd and Gzip compression",
            Snippet::RateLimit => "Request throttling",
            Snippet::BasicAuth => "HTTP authentication",
        }
    }

    /// Look up a registry entry by its import name.
    pub fn from_name(name: &str) -> Option<Snippet> {
        Snippet::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a name is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown snippet: {0}")]
pub struct UnknownSnippet(pub String);

impl FromStr for Snippet {
    type Err = UnknownSnippet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snippet::from_name(s.trim()).ok_or_else(|| UnknownSnippet(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for snippet in Snippet::ALL {
            assert_eq!(snippet.as_str().parse::<Snippet>().unwrap(), snippet);
        }
    }

    #[test]
    fn test_unknown_name_rejected() {
        assert_eq!(Snippet::from_name("custom_snippet"), None);
        assert!("wildcard-tls-example-com".parse::<Snippet>().is_err());
    }

    #[test]
    fn test_every_snippet_described() {
        let labels: std::collections::HashSet<_> = Snippet::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels.len(), Snippet::ALL.len());
        assert!(Snippet::ALL.iter().all(|s| !s.description().is_empty()));
        assert_eq!(Snippet::InternalOnly.label(), "Internal Only");
    }

    #[test]
    fn test_serde_uses_import_names() {
        let json = serde_json::to_string(&Snippet::SecurityHeaders).unwrap();
        assert_eq!(json, "\"security_headers\"");
    }
}
