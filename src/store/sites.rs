//! Site files on disk.
//!
//! # Layout
//! ```text
//! <sites_dir>/
//!     wildcard/<name>.caddy   sites covered by a wildcard certificate
//!     standard/<name>.caddy   everything else
//!     <name>.caddy            legacy flat layout, still read
//!     fallback.caddy, snippets.caddy, _*.caddy   not sites, skipped
//! ```

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::codec::{generate, parse};
use crate::site::{sanitize_filename, SiteRecord};

const EXTENSION: &str = "caddy";
const WILDCARD_DIR: &str = "wildcard";
const STANDARD_DIR: &str = "standard";
const RESERVED_FILES: &[&str] = &["fallback.caddy", "snippets.caddy"];

/// Error type for site storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("site not found: {0}")]
    NotFound(String),

    #[error("site already exists: {0}")]
    AlreadyExists(String),
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

/// Counters shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteStats {
    pub total: usize,
    pub internal: usize,
    pub public: usize,
    pub with_auth: usize,
    pub tags: usize,
}

impl SiteStats {
    pub fn from_sites(sites: &[SiteRecord]) -> Self {
        let internal = sites.iter().filter(|s| s.is_internal).count();
        Self {
            total: sites.len(),
            internal,
            public: sites.len() - internal,
            with_auth: sites.iter().filter(|s| s.basic_auth_enabled).count(),
            tags: collect_tags(sites).len(),
        }
    }
}

/// Sorted, de-duplicated tags across sites.
pub fn collect_tags(sites: &[SiteRecord]) -> Vec<String> {
    sites
        .iter()
        .flat_map(|s| s.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Directory-backed collection of site files.
#[derive(Debug, Clone)]
pub struct SiteStore {
    sites_dir: PathBuf,
}

impl SiteStore {
    pub fn new(sites_dir: impl Into<PathBuf>) -> Self {
        Self {
            sites_dir: sites_dir.into(),
        }
    }

    pub fn sites_dir(&self) -> &Path {
        &self.sites_dir
    }

    fn search_dirs(&self) -> [PathBuf; 3] {
        [
            self.sites_dir.join(WILDCARD_DIR),
            self.sites_dir.join(STANDARD_DIR),
            self.sites_dir.clone(),
        ]
    }

    /// Whether a path names a site file rather than shared configuration.
    pub fn is_site_file(path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        path.extension().is_some_and(|ext| ext == EXTENSION)
            && !RESERVED_FILES.contains(&name)
            && !name.starts_with('_')
    }

    /// Read and parse one site file.
    pub fn load_file(path: &Path) -> Result<SiteRecord, StoreError> {
        let content = fs::read_to_string(path).map_err(io_err(path))?;
        let identity = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut site = parse(&content, &identity);
        site.filepath = Some(path.to_path_buf());
        site.modified_at = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .ok()
            .map(DateTime::<Utc>::from);
        Ok(site)
    }

    /// All sites, sorted by primary domain.
    ///
    /// Unreadable directories and files are logged and skipped.
    pub fn list(&self) -> Vec<SiteRecord> {
        let mut loaded = HashSet::new();
        let mut sites = Vec::new();

        for dir in self.search_dirs() {
            if !dir.is_dir() {
                continue;
            }
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "Could not read sites directory");
                    continue;
                }
            };

            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() || !Self::is_site_file(&path) || !loaded.insert(path.clone()) {
                    continue;
                }
                match Self::load_file(&path) {
                    Ok(site) => sites.push(site),
                    Err(e) => tracing::warn!(error = %e, "Could not load site"),
                }
            }
        }

        sites.sort_by(|a, b| a.primary_domain().cmp(b.primary_domain()));
        tracing::debug!(count = sites.len(), "Loaded sites");
        sites
    }

    /// Locate a site file by name, with or without extension.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        let filename = with_extension(name);
        self.search_dirs()
            .into_iter()
            .map(|dir| dir.join(&filename))
            .find(|path| path.is_file())
    }

    pub fn get(&self, name: &str) -> Result<SiteRecord, StoreError> {
        let path = self
            .find(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        Self::load_file(&path)
    }

    fn placement(&self, site: &SiteRecord) -> PathBuf {
        let dir = if site.is_wildcard() {
            WILDCARD_DIR
        } else {
            STANDARD_DIR
        };
        self.sites_dir.join(dir).join(with_extension(&site.filename))
    }

    fn write(path: &Path, site: &SiteRecord) -> Result<(), StoreError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err(dir))?;
        }
        fs::write(path, generate(site)).map_err(io_err(path))
    }

    /// Write a new site; the filename derives from the primary domain when
    /// unset.
    pub fn create(&self, site: &mut SiteRecord) -> Result<PathBuf, StoreError> {
        if site.filename.is_empty() {
            site.filename = sanitize_filename(site.primary_domain());
        }
        let path = self.placement(site);
        if path.exists() || self.find(&site.filename).is_some() {
            return Err(StoreError::AlreadyExists(site.filename.clone()));
        }

        Self::write(&path, site)?;
        site.filepath = Some(path.clone());
        tracing::info!(site = %site.filename, path = %path.display(), "Site created");
        Ok(path)
    }

    /// Rewrite a site, moving it when its placement changed.
    pub fn update(&self, site: &mut SiteRecord) -> Result<PathBuf, StoreError> {
        if site.filename.is_empty() {
            site.filename = sanitize_filename(site.primary_domain());
        }
        let path = self.placement(site);
        Self::write(&path, site)?;

        if let Some(old) = site.filepath.take() {
            if old != path && old.exists() {
                fs::remove_file(&old).map_err(io_err(&old))?;
                tracing::info!(from = %old.display(), to = %path.display(), "Site moved");
            }
        }
        site.filepath = Some(path.clone());
        tracing::info!(site = %site.filename, "Site updated");
        Ok(path)
    }

    /// Replace a site file with hand-written text.
    ///
    /// Writes over the existing file when there is one, else into the flat
    /// sites directory.
    pub fn update_raw(&self, name: &str, content: &str) -> Result<PathBuf, StoreError> {
        let path = self
            .find(name)
            .unwrap_or_else(|| self.sites_dir.join(with_extension(name)));
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_err(dir))?;
        }
        fs::write(&path, content).map_err(io_err(&path))?;
        tracing::info!(site = name, "Site replaced with raw content");
        Ok(path)
    }

    pub fn delete(&self, name: &str) -> Result<PathBuf, StoreError> {
        let path = self
            .find(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        fs::remove_file(&path).map_err(io_err(&path))?;
        tracing::info!(site = name, "Site deleted");
        Ok(path)
    }

    /// Copy a site's settings to new domains.
    pub fn duplicate(&self, source: &str, domains: Vec<String>) -> Result<SiteRecord, StoreError> {
        let source = self.get(source)?;
        let mut copy = SiteRecord {
            domains,
            filename: String::new(),
            filepath: None,
            raw_content: String::new(),
            modified_at: None,
            ..source
        };
        self.create(&mut copy)?;
        Ok(copy)
    }

    pub fn all_tags(&self) -> Vec<String> {
        collect_tags(&self.list())
    }

    /// Most recently modified sites first.
    pub fn recent_changes(&self, limit: usize) -> Vec<SiteRecord> {
        let mut sites = self.list();
        sites.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
        sites.truncate(limit);
        sites
    }

    pub fn stats(&self) -> SiteStats {
        SiteStats::from_sites(&self.list())
    }
}

fn with_extension(name: &str) -> String {
    if name.ends_with(".caddy") {
        name.to_string()
    } else {
        format!("{}.{}", name, EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::TlsMode;
    use tempfile::TempDir;

    fn record(domain: &str) -> SiteRecord {
        SiteRecord::new(vec![domain.to_string()], "10.0.0.5", "8080")
    }

    #[test]
    fn test_is_site_file() {
        assert!(SiteStore::is_site_file(Path::new("/x/app.caddy")));
        assert!(!SiteStore::is_site_file(Path::new("/x/fallback.caddy")));
        assert!(!SiteStore::is_site_file(Path::new("/x/snippets.caddy")));
        assert!(!SiteStore::is_site_file(Path::new("/x/_wildcard.caddy")));
        assert!(!SiteStore::is_site_file(Path::new("/x/app.conf")));
    }

    #[test]
    fn test_create_places_by_tls_mode() {
        let dir = TempDir::new().unwrap();
        let store = SiteStore::new(dir.path());

        let mut plain = record("*.app.example.com");
        let path = store.create(&mut plain).unwrap();
        assert_eq!(path, dir.path().join("standard/app.example.com.caddy"));

        let mut wildcard = record("media.home.lan");
        wildcard.tls_mode = TlsMode::Wildcard("home.lan".into());
        let path = store.create(&mut wildcard).unwrap();
        assert_eq!(path, dir.path().join("wildcard/media.home.lan.caddy"));
    }

    #[test]
    fn test_create_rejects_existing() {
        let dir = TempDir::new().unwrap();
        let store = SiteStore::new(dir.path());
        fs::write(dir.path().join("app.lan.caddy"), "app.lan {\n}\n").unwrap();

        let err = store.create(&mut record("app.lan")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(name) if name == "app.lan"));
    }

    #[test]
    fn test_update_moves_between_placements() {
        let dir = TempDir::new().unwrap();
        let store = SiteStore::new(dir.path());

        let mut site = record("media.home.lan");
        let old = store.create(&mut site).unwrap();
        site.tls_mode = TlsMode::Wildcard("home.lan".into());
        let new = store.update(&mut site).unwrap();

        assert!(!old.exists());
        assert!(new.exists());
        assert_eq!(store.get("media.home.lan").unwrap().tls_mode, site.tls_mode);
    }

    #[test]
    fn test_update_without_filename_stays_listed() {
        let dir = TempDir::new().unwrap();
        let store = SiteStore::new(dir.path());

        let mut site = record("*.media.lan");
        let path = store.update(&mut site).unwrap();

        assert_eq!(path, dir.path().join("standard/media.lan.caddy"));
        assert_eq!(site.filename, "media.lan");
        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].primary_domain(), "*.media.lan");
    }

    #[test]
    fn test_get_and_delete_missing() {
        let dir = TempDir::new().unwrap();
        let store = SiteStore::new(dir.path());
        assert!(matches!(store.get("nope"), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete("nope"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_stats_from_sites() {
        let mut internal = record("a.lan");
        internal.is_internal = true;
        internal.tags = vec!["home".into(), "media".into()];
        let mut protected = record("b.lan");
        protected.basic_auth_enabled = true;
        protected.tags = vec!["home".into()];

        let stats = SiteStats::from_sites(&[internal, protected, record("c.lan")]);
        assert_eq!(
            stats,
            SiteStats {
                total: 3,
                internal: 1,
                public: 2,
                with_auth: 1,
                tags: 2,
            }
        );
    }
}
