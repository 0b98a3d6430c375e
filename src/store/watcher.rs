//! Sites directory watcher.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::site::SiteRecord;
use crate::store::sites::SiteStore;

/// A change to a site file.
#[derive(Debug)]
pub enum SiteEvent {
    /// The file was created or modified and parsed into a record.
    Updated(Box<SiteRecord>),
    /// The file is gone.
    Removed(PathBuf),
}

/// A watcher that re-parses site files as they change.
pub struct SiteWatcher {
    dir: PathBuf,
    poll_interval: Duration,
    update_tx: mpsc::UnboundedSender<SiteEvent>,
}

impl SiteWatcher {
    /// Create a new SiteWatcher.
    ///
    /// Returns the watcher and a receiver for site events.
    pub fn new(dir: &Path, poll_interval: Duration) -> (Self, mpsc::UnboundedReceiver<SiteEvent>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                dir: dir.to_path_buf(),
                poll_interval,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the directory tree in a background thread.
    ///
    /// Events stop when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    for path in &event.paths {
                        if let Some(site_event) = site_event(&event.kind, path) {
                            let _ = tx.send(site_event);
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(self.poll_interval),
        )?;

        watcher.watch(&self.dir, RecursiveMode::Recursive)?;

        tracing::info!(path = ?self.dir, "Site watcher started");
        Ok(watcher)
    }
}

/// Translate a filesystem event on `path` into a site event.
fn site_event(kind: &EventKind, path: &Path) -> Option<SiteEvent> {
    if !SiteStore::is_site_file(path) {
        return None;
    }

    if kind.is_remove() {
        tracing::info!(path = ?path, "Site file removed");
        return Some(SiteEvent::Removed(path.to_path_buf()));
    }
    if !(kind.is_modify() || kind.is_create()) {
        return None;
    }

    match SiteStore::load_file(path) {
        Ok(site) => {
            tracing::info!(site = %site.primary_domain(), "Site file change detected, reparsed");
            Some(SiteEvent::Updated(Box::new(site)))
        }
        Err(e) => {
            tracing::error!("Failed to reload site: {}. Keeping previous state.", e);
            None
        }
    }
}
