//! Canonical site block text from a record.
//!
//! # Emission Order
//! ```text
//! # @tags: ...            (if any tags)
//! # @tls: ...             (if not auto)
//! <domains> {
//!     import <snippet>    (registry snippets, then wildcard TLS, then legacy internal_only)
//!     basic_auth { ... }  (if enabled with users)
//!     <extra config>
//!     reverse_proxy ...   (single line or block form)
//! }
//! ```
//!
//! # Design Decisions
//! - Reads only structured fields; `raw_content` is never consulted
//! - Every brace the generator opens goes through `BlockWriter`, which closes
//!   whatever is still open when the output is finished
//! - Extra config lines lose any `}` that would close the site block early
//! - Lists are normalized the same way the parser normalizes them, so a
//!   second generate/parse pass is stable

use crate::site::{SiteRecord, Snippet};

const INDENT: &str = "    ";

/// Line buffer that tracks open blocks.
#[derive(Debug, Default)]
struct BlockWriter {
    lines: Vec<String>,
    depth: usize,
}

impl BlockWriter {
    fn line(&mut self, text: impl AsRef<str>) {
        self.lines
            .push(format!("{}{}", INDENT.repeat(self.depth), text.as_ref()));
    }

    fn open(&mut self, header: impl AsRef<str>) {
        let header = header.as_ref().trim();
        if header.is_empty() {
            self.line("{");
        } else {
            self.line(format!("{} {{", header));
        }
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    fn finish(mut self) -> String {
        while self.depth > 0 {
            self.close();
        }
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Render a record as a site block.
pub fn generate(site: &SiteRecord) -> String {
    let mut out = BlockWriter::default();

    let tags = non_blank(&site.tags);
    if !tags.is_empty() {
        out.line(format!("# @tags: {}", tags.join(", ")));
    }
    if !site.tls_mode.is_auto() {
        out.line(format!("# @tls: {}", site.tls_mode));
    }

    let domains = non_blank(&site.domains);
    if domains.is_empty() {
        out.open(site.primary_domain());
    } else {
        out.open(domains.join(", "));
    }

    let snippets = effective_snippets(&site.snippets);
    for snippet in &snippets {
        out.line(format!("import {}", snippet));
    }
    if let Some(wildcard) = site.tls_mode.wildcard_snippet() {
        out.line(format!("import {}", wildcard));
    }
    if site.is_internal && !snippets.contains(&Snippet::InternalOnly) {
        out.line(format!("import {}", Snippet::InternalOnly));
    }

    let users = non_blank(&site.basic_auth_users);
    if site.basic_auth_enabled && !users.is_empty() {
        out.open("basic_auth");
        for user in users {
            out.line(user);
        }
        out.close();
    }

    // Extra config is emitted flat. It may never close a brace it did not
    // open, and blocks it leaves open are closed here.
    let mut extra_depth: usize = 0;
    for line in site.extra_config.lines() {
        let line = drop_unmatched_closers(line, &mut extra_depth);
        if !line.is_empty() {
            out.line(line);
        }
    }
    for _ in 0..extra_depth {
        out.line("}");
    }

    write_reverse_proxy(&mut out, site);

    out.finish()
}

/// Snippets as the parser would report them: first occurrence only, and the
/// default when nothing is selected.
fn effective_snippets(snippets: &[Snippet]) -> Vec<Snippet> {
    let mut unique = Vec::with_capacity(snippets.len());
    for snippet in snippets {
        if !unique.contains(snippet) {
            unique.push(*snippet);
        }
    }
    if unique.is_empty() {
        unique.push(Snippet::DEFAULT);
    }
    unique
}

/// Trimmed `line` without the `}` that would close below `depth` zero.
/// `depth` is advanced past the line.
fn drop_unmatched_closers(line: &str, depth: &mut usize) -> String {
    let mut kept = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '{' => *depth += 1,
            '}' if *depth == 0 => continue,
            '}' => *depth -= 1,
            _ => {}
        }
        kept.push(c);
    }
    kept.trim().to_string()
}

fn non_blank(values: &[String]) -> Vec<&str> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect()
}

fn write_reverse_proxy(out: &mut BlockWriter, site: &SiteRecord) {
    let host = site.target_host.trim();
    let port = site.target_port.trim();
    if host.is_empty() && non_blank(&site.additional_backends).is_empty() {
        return;
    }

    let backends = site.all_backends();
    let health_path = site
        .health_check_path
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let simple = backends.len() == 1
        && !site.is_https_backend
        && !site.enable_websocket
        && health_path.is_none()
        && site.timeout_seconds == 0;

    if simple {
        out.line(format!("reverse_proxy {}:{}", host, port));
        return;
    }

    out.open(format!("reverse_proxy {}", backends.join(" ")));

    if backends.len() > 1 {
        if let Some(policy) = site.lb_policy.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            out.line(format!("lb_policy {}", policy));
        }
    }

    if let Some(path) = health_path {
        out.line(format!("health_uri {}", path));
        out.line("health_interval 30s");
    }

    if site.enable_websocket {
        out.line("header_up Host {host}");
        out.line("header_up X-Real-IP {remote_host}");
        out.line("header_up X-Forwarded-For {remote_host}");
        out.line("header_up X-Forwarded-Proto {scheme}");
    }

    if site.is_https_backend || site.timeout_seconds > 0 {
        out.open("transport http");
        if site.is_https_backend {
            out.line("tls_insecure_skip_verify");
        }
        if site.timeout_seconds > 0 {
            out.line(format!("dial_timeout {}s", site.timeout_seconds));
            out.line(format!("response_header_timeout {}s", site.timeout_seconds));
        }
        out.close();
    }

    out.close();
}
