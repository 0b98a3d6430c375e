//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use caddy_sites::{SiteRecord, Snippet, TlsMode};

pub const HASH: &str = "$2a$14$Zkx19XLiW6VYouLHR5NmfOFU0z2GTNmpkT/5qqR7hx4IjWJPDhjvG";

/// A hand-written block using most of the vocabulary plus custom directives.
pub const OPERATOR_BLOCK: &str = r#"# @tags: media, prod
# @tls: wildcard:home.lan
jellyfin.home.lan, media.home.lan {
    import cloudflare_dns
    import wildcard-tls-home-lan
    import security_headers
    import custom_snippet

    encode zstd gzip
    header {
        -Server
        X-Robots-Tag "noindex"
    }

    reverse_proxy https://192.168.1.50:8920 https://192.168.1.51:8920 {
        lb_policy least_conn
        health_uri /health
        health_interval 30s
        header_up Host {host}
        header_up X-Real-IP {remote_host}
        flush_interval -1
        transport http {
            tls_insecure_skip_verify
            dial_timeout 20s
            response_header_timeout 20s
        }
    }
}
"#;

/// A minimal record for `domain`.
pub fn simple_site(domain: &str) -> SiteRecord {
    SiteRecord::new(vec![domain.to_string()], "10.0.0.5", "8080")
}

/// A record exercising every field the generator emits.
pub fn full_site() -> SiteRecord {
    SiteRecord {
        domains: vec!["app.example.com".into(), "www.app.example.com".into()],
        tags: vec!["prod".into(), "api".into()],
        tls_mode: TlsMode::Explicit("internal".into()),
        snippets: vec![Snippet::CloudflareDns, Snippet::InternalOnly, Snippet::RateLimit],
        is_internal: true,
        target_host: "10.0.0.5".into(),
        target_port: "8443".into(),
        is_https_backend: true,
        additional_backends: vec!["https://10.0.0.6:8443".into()],
        lb_policy: Some("round_robin".into()),
        enable_websocket: true,
        health_check_path: Some("/healthz".into()),
        timeout_seconds: 45,
        basic_auth_enabled: true,
        basic_auth_users: vec![format!("alice {HASH}"), format!("bob {HASH}")],
        extra_config: "encode gzip\nhandle_path /static/* {\nroot * /srv\nfile_server\n}".into(),
        ..SiteRecord::default()
    }
}

/// Write `content` to `dir/relative`, creating parent directories.
pub fn write_file(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Fields the codec promises to carry through generate → parse.
pub fn assert_codec_fields_eq(actual: &SiteRecord, expected: &SiteRecord) {
    assert_eq!(actual.domains, expected.domains, "domains");
    assert_eq!(actual.tags, expected.tags, "tags");
    assert_eq!(actual.tls_mode, expected.tls_mode, "tls_mode");
    assert_eq!(actual.snippets, expected.snippets, "snippets");
    assert_eq!(actual.is_internal, expected.is_internal, "is_internal");
    assert_eq!(actual.target_host, expected.target_host, "target_host");
    assert_eq!(actual.target_port, expected.target_port, "target_port");
    assert_eq!(actual.is_https_backend, expected.is_https_backend, "is_https_backend");
    assert_eq!(actual.additional_backends, expected.additional_backends, "additional_backends");
    assert_eq!(actual.lb_policy, expected.lb_policy, "lb_policy");
    assert_eq!(actual.enable_websocket, expected.enable_websocket, "enable_websocket");
    assert_eq!(actual.health_check_path, expected.health_check_path, "health_check_path");
    assert_eq!(actual.timeout_seconds, expected.timeout_seconds, "timeout_seconds");
    assert_eq!(actual.basic_auth_enabled, expected.basic_auth_enabled, "basic_auth_enabled");
    assert_eq!(actual.basic_auth_users, expected.basic_auth_users, "basic_auth_users");
    assert_eq!(actual.extra_config, expected.extra_config, "extra_config");
}
