//! The structured site record and its derived views.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::site::snippet::Snippet;
use crate::site::tls::TlsMode;

/// One proxied site, as parsed from or rendered to a site block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteRecord {
    /// File stem identifying the record in storage.
    pub filename: String,
    /// Where the record was loaded from, when it came from disk.
    pub filepath: Option<PathBuf>,

    /// Host patterns; the first one is the primary domain.
    pub domains: Vec<String>,
    pub tags: Vec<String>,
    pub tls_mode: TlsMode,
    pub snippets: Vec<Snippet>,
    /// Mirrors `internal_only` in `snippets` after parsing.
    pub is_internal: bool,

    pub target_host: String,
    pub target_port: String,
    pub is_https_backend: bool,
    /// Backend URLs beyond the primary one.
    pub additional_backends: Vec<String>,
    pub lb_policy: Option<String>,

    pub enable_websocket: bool,
    pub health_check_path: Option<String>,
    /// Dial and response-header timeout; zero means unset.
    pub timeout_seconds: u64,

    pub basic_auth_enabled: bool,
    /// `"<user> <hash>"` pairs.
    pub basic_auth_users: Vec<String>,

    /// Lines of the block nothing else understood, one per line.
    pub extra_config: String,
    /// The text the record was parsed from.
    pub raw_content: String,
    pub modified_at: Option<DateTime<Utc>>,
}

/// Who can reach a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Internal,
    /// Behind basic auth.
    Protected,
}

impl Access {
    pub fn icon(&self) -> &'static str {
        match self {
            Access::Public => "🌍",
            Access::Internal => "🔒",
            Access::Protected => "🔐",
        }
    }
}

impl SiteRecord {
    /// A fresh record for the given domains, with default snippets.
    pub fn new(domains: Vec<String>, target_host: impl Into<String>, target_port: impl Into<String>) -> Self {
        Self {
            domains,
            snippets: vec![Snippet::DEFAULT],
            target_host: target_host.into(),
            target_port: target_port.into(),
            ..Self::default()
        }
    }

    /// First domain, or the filename when there are none.
    pub fn primary_domain(&self) -> &str {
        self.domains
            .first()
            .map(String::as_str)
            .unwrap_or(&self.filename)
    }

    pub fn domains_string(&self) -> String {
        self.domains.join(", ")
    }

    fn scheme(&self) -> &'static str {
        if self.is_https_backend {
            "https"
        } else {
            "http"
        }
    }

    /// Primary backend as a URL.
    pub fn target_url(&self) -> String {
        format!("{}://{}:{}", self.scheme(), self.target_host, self.target_port)
    }

    /// Primary backend followed by the additional ones.
    ///
    /// Additional backends written without a scheme inherit the primary's.
    pub fn all_backends(&self) -> Vec<String> {
        let mut backends = vec![self.target_url()];
        for backend in &self.additional_backends {
            let backend = backend.trim();
            if backend.is_empty() {
                continue;
            }
            if backend.starts_with("http") {
                backends.push(backend.to_string());
            } else {
                backends.push(format!("{}://{}", self.scheme(), backend));
            }
        }
        backends
    }

    pub fn has_snippet(&self, snippet: Snippet) -> bool {
        self.snippets.contains(&snippet)
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.tls_mode, TlsMode::Wildcard(_))
    }

    pub fn access(&self) -> Access {
        if self.basic_auth_enabled {
            Access::Protected
        } else if self.is_internal {
            Access::Internal
        } else {
            Access::Public
        }
    }

    /// Case-insensitive search over domains, filename, host and port.
    pub fn matches_search(&self, search: &str) -> bool {
        let search = search.to_lowercase();
        self.domains.iter().any(|d| d.to_lowercase().contains(&search))
            || self.filename.to_lowercase().contains(&search)
            || self.target_host.contains(&search)
            || self.target_port.contains(&search)
    }
}

/// Split a form field of domains on commas and whitespace.
pub fn clean_domains(input: &str) -> Vec<String> {
    input
        .replace(',', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Derive a storage filename from a domain.
pub fn sanitize_filename(domain: &str) -> String {
    domain
        .strip_prefix("*.")
        .unwrap_or(domain)
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c => c,
        })
        .collect()
}

/// Keep the sites carrying `tag` (if given) that match `search` (if given).
pub fn filter_sites<'a>(
    sites: &'a [SiteRecord],
    search: Option<&str>,
    tag: Option<&str>,
) -> Vec<&'a SiteRecord> {
    sites
        .iter()
        .filter(|site| tag.map_or(true, |t| site.tags.iter().any(|own| own == t)))
        .filter(|site| search.map_or(true, |s| s.is_empty() || site.matches_search(s)))
        .collect()
}
