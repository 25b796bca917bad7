//! Endpoint file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::SelectorConfig;

/// Monitors the endpoint file and publishes every valid new version.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<SelectorConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<SelectorConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching on notify's background thread.
    ///
    /// The parent directory is watched so that editors replacing the file
    /// (write to temp, rename over) are seen. Invalid files are logged and
    /// skipped; the receiver keeps its last good configuration.
    /// Dropping the returned watcher stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();
        let file_name = self.path.file_name().map(|n| n.to_os_string());

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let relevant = event.kind.is_modify() || event.kind.is_create();
                    let ours = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if !(relevant && ours) {
                        return;
                    }

                    tracing::info!(path = %path.display(), "Endpoint file changed, reloading");
                    match load_config(&path) {
                        Ok(config) => {
                            if tx.send(config).is_err() {
                                tracing::debug!("Config receiver dropped, ignoring update");
                            }
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to reload endpoints. Keeping current tree.");
                        }
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        let target = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher.watch(&target, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %self.path.display(), "Endpoint watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tokio::time::{sleep, timeout};

    use super::*;

    const QUIET: Duration = Duration::from_millis(500);
    const WAIT: Duration = Duration::from_secs(10);

    fn endpoints(name: &str) -> String {
        format!("[[endpoints]]\nname = \"{name}\"\nroute_values = {{ controller = \"Home\" }}\n")
    }

    /// Replace `path` atomically so a load never sees a half-written file.
    fn replace(path: &Path, content: &str) {
        let staging = path.with_extension("toml.tmp");
        fs::write(&staging, content).unwrap();
        fs::rename(&staging, path).unwrap();
    }

    async fn drain(rx: &mut mpsc::UnboundedReceiver<SelectorConfig>) {
        sleep(QUIET).await;
        while rx.try_recv().is_ok() {}
    }

    #[tokio::test]
    async fn test_watcher_reloads_valid_changes_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("endpoints.toml");
        fs::write(&path, endpoints("Initial")).unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(&path);
        let _handle = watcher.run().unwrap();

        // Other files in the directory are ignored.
        fs::write(dir.path().join("other.toml"), endpoints("Other")).unwrap();
        assert!(timeout(QUIET, rx.recv()).await.is_err());

        replace(&path, &endpoints("Replaced"));
        let config = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(config.endpoints[0].name, "Replaced");
        drain(&mut rx).await;

        // Invalid content is logged and never published.
        replace(&path, "[[endpoints]]\nname = \"\"\n");
        assert!(timeout(QUIET, rx.recv()).await.is_err());

        replace(&path, &endpoints("Recovered"));
        let config = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(config.endpoints[0].name, "Recovered");
    }
}
