use super::Catalog;
use crate::error::{Error, LoadError, Result};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

/// Holds the catalog in effect and swaps in a fresh one when the dataset changes
pub struct CatalogStore {
    source: Option<PathBuf>,
    state: RwLock<Loaded>,
}

struct Loaded {
    catalog: Arc<Catalog>,
    fingerprint: Option<String>,
    loaded_at: DateTime<Utc>,
}

fn fingerprint(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn read_source(path: &Path) -> std::result::Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::Missing(path.to_path_buf())
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Read the dataset and rebuild it unless its fingerprint equals `known`
fn load_if_changed(
    path: &Path,
    known: Option<&str>,
) -> std::result::Result<Option<(Catalog, String)>, LoadError> {
    let bytes = read_source(path)?;
    let current = fingerprint(&bytes);

    if known == Some(current.as_str()) {
        return Ok(None);
    }

    let catalog = Catalog::from_reader(bytes.as_slice())?;
    Ok(Some((catalog, current)))
}

impl CatalogStore {
    /// Load the dataset at `path`; failure here is fatal for the caller
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (catalog, fingerprint) = load_if_changed(path, None)?
            .ok_or_else(|| Error::Internal("Initial dataset load produced no catalog".to_string()))?;

        info!(
            "Catalog loaded: {} recipes from {} (sha256 {})",
            catalog.len(),
            path.display(),
            &fingerprint[..12]
        );

        Ok(Self {
            source: Some(path.to_path_buf()),
            state: RwLock::new(Loaded {
                catalog: Arc::new(catalog),
                fingerprint: Some(fingerprint),
                loaded_at: Utc::now(),
            }),
        })
    }

    /// Wrap an already-built catalog that has no backing file
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            source: None,
            state: RwLock::new(Loaded {
                catalog: Arc::new(catalog),
                fingerprint: None,
                loaded_at: Utc::now(),
            }),
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The catalog in effect; hold the `Arc` for the duration of one request
    pub async fn current(&self) -> Arc<Catalog> {
        self.state.read().await.catalog.clone()
    }

    pub async fn loaded_at(&self) -> DateTime<Utc> {
        self.state.read().await.loaded_at
    }

    pub async fn fingerprint(&self) -> Option<String> {
        self.state.read().await.fingerprint.clone()
    }

    /// Re-read the dataset and swap in a new catalog if its contents changed.
    ///
    /// Returns `Ok(true)` when a new catalog was installed. On error the
    /// previous catalog stays in effect.
    pub async fn reload_if_changed(&self) -> Result<bool> {
        let Some(path) = self.source.clone() else {
            return Ok(false);
        };

        let known = self.fingerprint().await;
        let loaded = tokio::task::spawn_blocking(move || load_if_changed(&path, known.as_deref()))
            .await
            .map_err(|e| Error::Internal(format!("Reload task failed: {e}")))??;

        let Some((catalog, fingerprint)) = loaded else {
            debug!("Dataset unchanged, keeping current catalog");
            return Ok(false);
        };

        let mut state = self.state.write().await;
        info!(
            "Catalog reloaded: {} -> {} recipes (sha256 {})",
            state.catalog.len(),
            catalog.len(),
            &fingerprint[..12]
        );
        *state = Loaded {
            catalog: Arc::new(catalog),
            fingerprint: Some(fingerprint),
            loaded_at: Utc::now(),
        };

        Ok(true)
    }
}

/// Background task that polls the dataset for changes
pub struct ReloadWatcher {
    store: Arc<CatalogStore>,
    interval_seconds: u64,
}

impl ReloadWatcher {
    pub fn new(store: Arc<CatalogStore>, interval_seconds: u64) -> Self {
        Self {
            store,
            interval_seconds,
        }
    }

    /// Start polling in the background; `None` when polling is disabled
    pub fn start(self) -> Option<tokio::task::JoinHandle<()>> {
        if self.interval_seconds == 0 || self.store.source().is_none() {
            info!("Dataset reload watcher disabled");
            return None;
        }

        Some(tokio::spawn(async move {
            info!(
                "Dataset reload watcher started with interval: {}s",
                self.interval_seconds
            );

            let mut ticker = interval(Duration::from_secs(self.interval_seconds));
            // First tick completes immediately; the catalog was just loaded
            ticker.tick().await;

            loop {
                ticker.tick().await;

                match self.store.reload_if_changed().await {
                    Ok(_) => {}
                    Err(Error::Load(e)) => {
                        warn!("Dataset reload failed, keeping previous catalog: {}", e)
                    }
                    Err(e) => error!("Dataset reload error: {}", e.log_safe()),
                }
            }
        }))
    }
}
