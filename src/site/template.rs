//! Built-in presets for common self-hosted services.

use serde::Serialize;

use crate::site::record::SiteRecord;
use crate::site::snippet::Snippet;

/// Grouping shown when picking a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Web,
    Media,
    Docker,
    Dev,
    Monitoring,
    Home,
    Nas,
    Api,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Web => "Web Applications",
            Category::Media => "Media Servers",
            Category::Docker => "Docker & Containers",
            Category::Dev => "Development",
            Category::Monitoring => "Monitoring",
            Category::Home => "Home Automation",
            Category::Nas => "NAS & Storage",
            Category::Api => "API & Services",
        }
    }
}

/// A preset for a new site.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub target_port: &'static str,
    pub is_https_backend: bool,
    pub snippets: &'static [Snippet],
    pub enable_websocket: bool,
    pub health_check_path: Option<&'static str>,
    pub extra_config: &'static str,
}

const BASE: Template = Template {
    id: "",
    name: "",
    description: "",
    category: Category::Web,
    target_port: "80",
    is_https_backend: false,
    snippets: &[Snippet::CloudflareDns],
    enable_websocket: false,
    health_check_path: None,
    extra_config: "",
};

const INTERNAL: &[Snippet] = &[Snippet::CloudflareDns, Snippet::InternalOnly];

/// The template catalogue.
pub const TEMPLATES: &[Template] = &[
    Template {
        id: "generic_web",
        name: "Web Application",
        description: "Generic web application (HTTP backend)",
        snippets: &[Snippet::CloudflareDns, Snippet::SecurityHeaders, Snippet::Compression],
        ..BASE
    },
    Template {
        id: "nextcloud",
        name: "Nextcloud",
        description: "Nextcloud cloud storage",
        snippets: &[Snippet::CloudflareDns, Snippet::SecurityHeaders],
        extra_config: "header {\nStrict-Transport-Security \"max-age=31536000; includeSubDomains\"\n}\nrequest_body {\nmax_size 10GB\n}",
        ..BASE
    },
    Template {
        id: "jellyfin",
        name: "Jellyfin",
        description: "Jellyfin media server",
        category: Category::Media,
        target_port: "8096",
        enable_websocket: true,
        ..BASE
    },
    Template {
        id: "plex",
        name: "Plex",
        description: "Plex media server",
        category: Category::Media,
        target_port: "32400",
        enable_websocket: true,
        ..BASE
    },
    Template {
        id: "portainer",
        name: "Portainer",
        description: "Portainer Docker management",
        category: Category::Docker,
        target_port: "9000",
        snippets: INTERNAL,
        enable_websocket: true,
        ..BASE
    },
    Template {
        id: "gitea",
        name: "Gitea",
        description: "Gitea Git service",
        category: Category::Dev,
        target_port: "3000",
        snippets: &[Snippet::CloudflareDns, Snippet::SecurityHeaders],
        ..BASE
    },
    Template {
        id: "code_server",
        name: "Code Server",
        description: "VS Code in the browser",
        category: Category::Dev,
        target_port: "8443",
        snippets: INTERNAL,
        enable_websocket: true,
        ..BASE
    },
    Template {
        id: "grafana",
        name: "Grafana",
        description: "Grafana dashboards",
        category: Category::Monitoring,
        target_port: "3000",
        snippets: INTERNAL,
        ..BASE
    },
    Template {
        id: "prometheus",
        name: "Prometheus",
        description: "Prometheus metrics",
        category: Category::Monitoring,
        target_port: "9090",
        snippets: INTERNAL,
        ..BASE
    },
    Template {
        id: "home_assistant",
        name: "Home Assistant",
        description: "Home Assistant automation hub",
        category: Category::Home,
        target_port: "8123",
        enable_websocket: true,
        ..BASE
    },
    Template {
        id: "synology_dsm",
        name: "Synology DSM",
        description: "Synology DiskStation Manager",
        category: Category::Nas,
        target_port: "5001",
        is_https_backend: true,
        snippets: INTERNAL,
        ..BASE
    },
    Template {
        id: "api_service",
        name: "API Service",
        description: "REST API with health checks",
        category: Category::Api,
        target_port: "8080",
        snippets: &[
            Snippet::CloudflareDns,
            Snippet::SecurityHeaders,
            Snippet::Compression,
            Snippet::RateLimit,
        ],
        health_check_path: Some("/health"),
        ..BASE
    },
    Template {
        id: "websocket_service",
        name: "WebSocket Service",
        description: "WebSocket server",
        category: Category::Api,
        target_port: "8080",
        enable_websocket: true,
        ..BASE
    },
];

/// Look up a template by id.
pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

impl Template {
    /// Build a record for `domains` proxied to `target_host`.
    pub fn instantiate(&self, domains: Vec<String>, target_host: impl Into<String>) -> SiteRecord {
        let snippets = self.snippets.to_vec();
        SiteRecord {
            is_internal: snippets.contains(&Snippet::InternalOnly),
            snippets,
            is_https_backend: self.is_https_backend,
            enable_websocket: self.enable_websocket,
            health_check_path: self.health_check_path.map(str::to_string),
            extra_config: self.extra_config.to_string(),
            ..SiteRecord::new(domains, target_host, self.target_port)
        }
    }
}
