//! TLS certificate mode of a site.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix of the snippet names that carry a wildcard certificate.
pub const WILDCARD_SNIPPET_PREFIX: &str = "wildcard-tls-";

/// How the site obtains its certificate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TlsMode {
    /// Caddy's automatic HTTPS.
    #[default]
    Auto,
    /// Covered by the wildcard certificate of a base domain.
    Wildcard(String),
    /// Any other operator-supplied mode string.
    Explicit(String),
}

impl TlsMode {
    /// Parse the value of a `# @tls:` comment.
    pub fn from_comment(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == "auto" {
            return TlsMode::Auto;
        }
        match value.strip_prefix("wildcard:") {
            Some(base) if !base.trim().is_empty() => TlsMode::Wildcard(base.trim().to_string()),
            _ => TlsMode::Explicit(value.to_string()),
        }
    }

    /// Recover the base domain from a `wildcard-tls-<dashed>` snippet name.
    pub fn from_wildcard_snippet(name: &str) -> Option<Self> {
        let dashed = name.strip_prefix(WILDCARD_SNIPPET_PREFIX)?;
        if dashed.is_empty() {
            return None;
        }
        Some(TlsMode::Wildcard(dashed.replace('-', ".")))
    }

    /// The snippet name importing this mode's wildcard certificate, if any.
    pub fn wildcard_snippet(&self) -> Option<String> {
        match self {
            TlsMode::Wildcard(base) => {
                Some(format!("{}{}", WILDCARD_SNIPPET_PREFIX, base.replace('.', "-")))
            }
            _ => None,
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, TlsMode::Auto)
    }
}

impl fmt::Display for TlsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TlsMode::Auto => f.write_str("auto"),
            TlsMode::Wildcard(base) => write!(f, "wildcard:{}", base),
            TlsMode::Explicit(mode) => f.write_str(mode),
        }
    }
}

impl From<String> for TlsMode {
    fn from(value: String) -> Self {
        TlsMode::from_comment(&value)
    }
}

impl From<TlsMode> for String {
    fn from(mode: TlsMode) -> Self {
        mode.to_string()
    }
}
