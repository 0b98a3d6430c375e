//! Site block text to record.

use crate::codec::basic_auth::parse_basic_auth;
use crate::codec::domains::parse_domains;
use crate::codec::metadata::{parse_tags, parse_tls_mode};
use crate::codec::proxy::{detect_websocket, parse_proxy};
use crate::codec::residual::parse_extra_config;
use crate::codec::snippets::parse_snippets;
use crate::site::{SiteRecord, Snippet};

/// Parse a site block.
///
/// Never fails: every field falls back to its default when its directive is
/// missing or malformed. `fallback_identity` names the record and stands in
/// for the domain list when the header has none.
pub fn parse(content: &str, fallback_identity: &str) -> SiteRecord {
    let snippets = parse_snippets(content);
    let proxy = parse_proxy(content);
    let auth = parse_basic_auth(content);

    let site = SiteRecord {
        filename: fallback_identity.to_string(),
        domains: parse_domains(content, fallback_identity),
        tags: parse_tags(content),
        tls_mode: parse_tls_mode(content),
        is_internal: snippets.contains(&Snippet::InternalOnly),
        snippets,
        target_host: proxy.target_host,
        target_port: proxy.target_port,
        is_https_backend: proxy.is_https_backend,
        additional_backends: proxy.additional_backends,
        lb_policy: proxy.lb_policy,
        enable_websocket: detect_websocket(content),
        health_check_path: proxy.health_check_path,
        timeout_seconds: proxy.timeout_seconds,
        basic_auth_enabled: auth.enabled,
        basic_auth_users: auth.users,
        extra_config: parse_extra_config(content),
        raw_content: content.to_string(),
        ..SiteRecord::default()
    };

    tracing::debug!(
        identity = fallback_identity,
        primary_domain = site.primary_domain(),
        snippets = site.snippets.len(),
        extra_lines = site.extra_config.lines().count(),
        "Parsed site block"
    );

    site
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::TlsMode;

    #[test]
    fn test_simple_site() {
        let site = parse(
            "example.com {\n    import cloudflare_dns\n    reverse_proxy 10.0.0.5:8080\n}\n",
            "example.com",
        );
        assert_eq!(site.domains, vec!["example.com"]);
        assert_eq!(site.snippets, vec![Snippet::CloudflareDns]);
        assert_eq!(site.target_host, "10.0.0.5");
        assert_eq!(site.target_port, "8080");
        assert!(!site.is_https_backend);
        assert!(!site.is_internal);
        assert_eq!(site.tls_mode, TlsMode::Auto);
        assert_eq!(site.extra_config, "");
        assert_eq!(site.filename, "example.com");
    }

    #[test]
    fn test_tags_and_internal() {
        let site = parse(
            "# @tags: prod, internal\napp.lan {\n    import internal_only\n    reverse_proxy a:1\n}\n",
            "app",
        );
        assert_eq!(site.tags, vec!["prod", "internal"]);
        assert!(site.is_internal);
    }

    #[test]
    fn test_raw_content_kept() {
        let text = "x {\n  weird   stuff\n}\n";
        let site = parse(text, "x");
        assert_eq!(site.raw_content, text);
        assert_eq!(site.extra_config, "weird   stuff");
    }

    #[test]
    fn test_garbage_input() {
        let site = parse("}}}{{{ \u{0} import", "fallback");
        assert_eq!(site.domains, vec!["}}}"]);
        assert_eq!(site.snippets, vec![Snippet::CloudflareDns]);

        let site = parse("", "fallback");
        assert_eq!(site.domains, vec!["fallback"]);
        assert_eq!(site.target_host, "");
    }
}
