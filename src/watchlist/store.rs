//! Durable watchlist storage.

use super::Symbol;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads and saves the ordered list of watched symbols.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WatchlistStore: Send + Sync {
    /// Load the saved symbols.
    ///
    /// `Ok(None)` means nothing has been saved yet; a file that exists but
    /// cannot be parsed is an error.
    async fn load(&self) -> Result<Option<Vec<String>>>;

    /// Replace the saved symbols.
    async fn save(&self, symbols: &[Symbol]) -> Result<()>;
}

/// On-disk layout of the watchlist file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct WatchlistFile {
    #[serde(rename = "Symbols", alias = "symbols", default)]
    symbols: Vec<String>,
}

/// TOML file backed watchlist store.
#[derive(Debug, Clone)]
pub struct FileWatchlistStore {
    path: PathBuf,
}

impl FileWatchlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "watchlist".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()))
    }
}

#[async_trait]
impl WatchlistStore for FileWatchlistStore {
    async fn load(&self) -> Result<Option<Vec<String>>> {
        if !tokio::fs::try_exists(&self.path).await? {
            debug!("No watchlist at {}", self.path.display());
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let file: WatchlistFile = toml::from_str(&content)
            .map_err(|e| Error::watchlist(format!("{}: {}", self.path.display(), e)))?;

        Ok(Some(file.symbols))
    }

    async fn save(&self, symbols: &[Symbol]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let file = WatchlistFile {
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
        };
        let content =
            toml::to_string_pretty(&file).map_err(|e| Error::watchlist(e.to_string()))?;

        // Write beside the target and rename so a crash never leaves half a file.
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, content).await?;
        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!("Saved {} symbols to {}", symbols.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watchlist::Watchlist;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileWatchlistStore::new(temp_dir.path().join("watchlist.toml"));
        assert_eq!(assert_ok!(store.load().await), None);
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileWatchlistStore::new(temp_dir.path().join("nested/watchlist.toml"));
        let watchlist = Watchlist::from_names(["TSLA", "AAPL", "IBM"]);

        store.save(watchlist.symbols()).await.unwrap();

        assert_eq!(
            store.load().await.unwrap(),
            Some(vec!["TSLA".to_string(), "AAPL".to_string(), "IBM".to_string()])
        );
        let leftovers: Vec<_> = std::fs::read_dir(temp_dir.path().join("nested"))
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_load_accepts_either_field_case() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("conf");
        let store = FileWatchlistStore::new(&path);

        std::fs::write(&path, "Symbols = [\"ORCL\", \"AAPL\"]\n").unwrap();
        assert_eq!(
            store.load().await.unwrap(),
            Some(vec!["ORCL".to_string(), "AAPL".to_string()])
        );

        std::fs::write(&path, "symbols = [\"IBM\"]\n").unwrap();
        assert_eq!(store.load().await.unwrap(), Some(vec!["IBM".to_string()]));
    }

    #[tokio::test]
    async fn test_load_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("watchlist.toml");
        std::fs::write(&path, "Symbols = [\"ORCL\"").unwrap();

        let store = FileWatchlistStore::new(&path);
        let err = assert_err!(store.load().await);
        assert!(matches!(err, Error::Watchlist(_)));
    }

    #[tokio::test]
    async fn test_saved_file_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("watchlist.toml");
        let store = FileWatchlistStore::new(&path);

        assert_ok!(store.save(Watchlist::from_names(["ORCL"]).symbols()).await);

        let content = std::fs::read_to_string(&path).unwrap();
        let value: toml::Value = toml::from_str(&content).unwrap();
        assert_eq!(
            value.get("Symbols").and_then(|v| v.as_array()).map(|a| a.len()),
            Some(1)
        );
    }
}
