//! Directive vocabulary understood by the codec.
//!
//! Every line of a site block is either one of these directives (or a
//! metadata comment), or it is residual configuration the record keeps
//! verbatim.

/// A recognized line kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Import,
    ReverseProxy,
    LbPolicy,
    HealthUri,
    HealthInterval,
    HeaderUp,
    TransportHttp,
    TlsInsecureSkipVerify,
    DialTimeout,
    ResponseHeaderTimeout,
    BasicAuth,
    /// `# @tags:` comment.
    TagsComment,
    /// `# @tls:` comment.
    TlsComment,
}

/// Line prefixes, checked against the trimmed line in order.
const PREFIXES: &[(&str, Directive)] = &[
    ("import ", Directive::Import),
    ("reverse_proxy", Directive::ReverseProxy),
    ("lb_policy", Directive::LbPolicy),
    ("health_uri", Directive::HealthUri),
    ("health_interval", Directive::HealthInterval),
    ("header_up", Directive::HeaderUp),
    ("transport http", Directive::TransportHttp),
    ("tls_insecure_skip_verify", Directive::TlsInsecureSkipVerify),
    ("dial_timeout", Directive::DialTimeout),
    ("response_header_timeout", Directive::ResponseHeaderTimeout),
    ("basic_auth", Directive::BasicAuth),
];

impl Directive {
    /// Classify a trimmed line, or `None` for residual content.
    pub fn classify(line: &str) -> Option<Directive> {
        if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim_start();
            if comment.starts_with("@tags:") {
                return Some(Directive::TagsComment);
            }
            if comment.starts_with("@tls:") {
                return Some(Directive::TlsComment);
            }
            return None;
        }
        PREFIXES
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix))
            .map(|(_, directive)| *directive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_vocabulary() {
        assert_eq!(Directive::classify("import compression"), Some(Directive::Import));
        assert_eq!(
            Directive::classify("reverse_proxy 10.0.0.5:8080 {"),
            Some(Directive::ReverseProxy)
        );
        assert_eq!(
            Directive::classify("transport http {"),
            Some(Directive::TransportHttp)
        );
        assert_eq!(
            Directive::classify("response_header_timeout 30s"),
            Some(Directive::ResponseHeaderTimeout)
        );
    }

    #[test]
    fn test_classify_metadata_comments() {
        assert_eq!(Directive::classify("# @tags: a, b"), Some(Directive::TagsComment));
        assert_eq!(Directive::classify("#@tls: internal"), Some(Directive::TlsComment));
        assert_eq!(Directive::classify("# plain comment"), None);
    }

    #[test]
    fn test_residual_lines() {
        assert_eq!(Directive::classify("encode gzip"), None);
        assert_eq!(Directive::classify("header_down -Server"), None);
        // `import` needs an argument separator.
        assert_eq!(Directive::classify("imports"), None);
    }
}
