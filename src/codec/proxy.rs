//! Reverse-proxy clause and websocket detection.
//!
//! # Responsibilities
//! - Primary backend (scheme, host, port) of the first `reverse_proxy`
//! - Extra upstreams listed on that same clause line
//! - Tuning directives: `lb_policy`, `health_uri`, `dial_timeout`
//! - Websocket heuristic over `header_up` lines
//!
//! # Design Decisions
//! - Each value is an independent first-match over the whole text
//! - Tuning directives are not scoped to the clause: an `lb_policy` in an
//!   unrelated block is picked up as well
//! - Misses leave the zero value; nothing here can fail

use once_cell::sync::Lazy;
use regex::Regex;

static PRIMARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"reverse_proxy\s+(https?://)?([^:\s{]+):(\d+)").expect("valid backend regex")
});
static CLAUSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"reverse_proxy[ \t]+([^{\r\n]*)").expect("valid clause regex"));
static UPSTREAM_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^:\s]+:\d+").expect("valid upstream regex"));
static LB_POLICY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"lb_policy[ \t]+(\S+)").expect("valid lb_policy regex"));
static HEALTH_URI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"health_uri[ \t]+(\S+)").expect("valid health_uri regex"));
static DIAL_TIMEOUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"dial_timeout[ \t]+(\d+)s").expect("valid dial_timeout regex"));

/// Everything the record takes from the reverse-proxy directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyClause {
    pub target_host: String,
    pub target_port: String,
    pub is_https_backend: bool,
    pub additional_backends: Vec<String>,
    pub lb_policy: Option<String>,
    pub health_check_path: Option<String>,
    pub timeout_seconds: u64,
}

/// Extract the reverse-proxy settings of a block.
pub fn parse_proxy(content: &str) -> ProxyClause {
    let mut clause = ProxyClause::default();

    if let Some(caps) = PRIMARY_RE.captures(content) {
        clause.is_https_backend = caps
            .get(1)
            .map(|scheme| scheme.as_str().eq_ignore_ascii_case("https://"))
            .unwrap_or(false);
        clause.target_host = caps[2].to_string();
        clause.target_port = caps[3].to_string();
    }

    if let Some(caps) = CLAUSE_RE.captures(content) {
        let upstreams: Vec<&str> = UPSTREAM_URL_RE
            .find_iter(&caps[1])
            .map(|m| m.as_str())
            .collect();
        if upstreams.len() > 1 {
            clause.additional_backends = upstreams[1..].iter().map(|u| u.to_string()).collect();
        }
    }

    clause.lb_policy = first_capture(&LB_POLICY_RE, content);
    clause.health_check_path = first_capture(&HEALTH_URI_RE, content);
    clause.timeout_seconds = first_capture(&DIAL_TIMEOUT_RE, content)
        .and_then(|secs| secs.parse().ok())
        .unwrap_or(0);

    clause
}

/// Whether the block forwards websocket-style headers.
///
/// True when `header_up` and `X-Real-IP` both appear anywhere in the text,
/// not necessarily on the same line or inside the same clause.
pub fn detect_websocket(content: &str) -> bool {
    content.contains("header_up") && content.contains("X-Real-IP")
}

fn first_capture(re: &Regex, content: &str) -> Option<String> {
    re.captures(content).map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_backend() {
        let clause = parse_proxy("example.com {\n    reverse_proxy 10.0.0.5:8080\n}\n");
        assert_eq!(clause.target_host, "10.0.0.5");
        assert_eq!(clause.target_port, "8080");
        assert!(!clause.is_https_backend);
        assert!(clause.additional_backends.is_empty());
        assert_eq!(clause.lb_policy, None);
        assert_eq!(clause.timeout_seconds, 0);
    }

    #[test]
    fn test_https_backend() {
        let clause = parse_proxy("x {\n    reverse_proxy https://nas.lan:5001 {\n    }\n}\n");
        assert!(clause.is_https_backend);
        assert_eq!(clause.target_host, "nas.lan");
        assert_eq!(clause.target_port, "5001");
    }

    #[test]
    fn test_load_balanced_backends() {
        let content = "x {\n    reverse_proxy http://10.0.0.5:8080 http://10.0.0.6:8080 http://10.0.0.7:8080 {\n        lb_policy round_robin\n    }\n}\n";
        let clause = parse_proxy(content);
        assert_eq!(clause.target_host, "10.0.0.5");
        assert_eq!(
            clause.additional_backends,
            vec!["http://10.0.0.6:8080", "http://10.0.0.7:8080"]
        );
        assert_eq!(clause.lb_policy.as_deref(), Some("round_robin"));
    }

    #[test]
    fn test_upstreams_limited_to_clause_line() {
        let content = "x {\n    reverse_proxy http://10.0.0.5:8080\n    redir http://other.lan:80\n}\n";
        assert!(parse_proxy(content).additional_backends.is_empty());
    }

    #[test]
    fn test_health_and_timeout() {
        let content = "x {\n    reverse_proxy http://a:1 {\n        health_uri /healthz\n        transport http {\n            dial_timeout 15s\n        }\n    }\n}\n";
        let clause = parse_proxy(content);
        assert_eq!(clause.health_check_path.as_deref(), Some("/healthz"));
        assert_eq!(clause.timeout_seconds, 15);
    }

    #[test]
    fn test_overflowing_timeout_is_zero() {
        let clause = parse_proxy("dial_timeout 99999999999999999999999s");
        assert_eq!(clause.timeout_seconds, 0);
    }

    #[test]
    fn test_missing_clause_leaves_defaults() {
        assert_eq!(parse_proxy("example.com {\n    respond OK\n}\n"), ProxyClause::default());
    }

    #[test]
    fn test_lb_policy_not_clause_scoped() {
        // Known limitation: a policy in an unrelated block is still attributed
        // to the site.
        let content = "x {\n    reverse_proxy a:1\n    handle /other {\n        lb_policy first\n    }\n}\n";
        assert_eq!(parse_proxy(content).lb_policy.as_deref(), Some("first"));
    }

    #[test]
    fn test_websocket_heuristic() {
        assert!(detect_websocket(
            "reverse_proxy a:1 {\n header_up Host {host}\n header_up X-Real-IP {remote_host}\n}"
        ));
        assert!(!detect_websocket("reverse_proxy a:1 {\n header_up Host {host}\n}"));
        assert!(!detect_websocket("header X-Real-IP 1"));
    }

    #[test]
    fn test_websocket_heuristic_not_structural() {
        // Known limitation: the two markers need not belong together.
        let content = "x {\n    header_up Host {host}\n    @lan header X-Real-IP 10.*\n}\n";
        assert!(detect_websocket(content));
    }
}
