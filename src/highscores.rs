//! Best-score persistence
//!
//! Only one number survives between runs. Stores are best-effort: the game
//! treats any error as "no stored score" on load and logs failed saves.

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Where the best score lives
pub trait ScoreStore {
    /// Read the stored best score (0 when nothing has been stored yet)
    fn load_best(&mut self) -> anyhow::Result<u64>;
    /// Persist a new best score
    fn save_best(&mut self, score: u64) -> anyhow::Result<()>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load_best(&mut self) -> anyhow::Result<u64> {
        (**self).load_best()
    }

    fn save_best(&mut self, score: u64) -> anyhow::Result<()> {
        (**self).save_best(score)
    }
}

/// In-memory store (tests, or when no storage is available)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub best: u64,
    /// Number of successful saves
    pub saves: usize,
}

impl ScoreStore for MemoryStore {
    fn load_best(&mut self) -> anyhow::Result<u64> {
        Ok(self.best)
    }

    fn save_best(&mut self, score: u64) -> anyhow::Result<()> {
        self.best = score;
        self.saves += 1;
        Ok(())
    }
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct BestScoreRecord {
    best: u64,
}

/// JSON file store for native builds
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for FileStore {
    fn load_best(&mut self) -> anyhow::Result<u64> {
        if !self.path.exists() {
            log::info!("No best score at {}, starting fresh", self.path.display());
            return Ok(0);
        }
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let record: BestScoreRecord = serde_json::from_str(&json)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        log::info!("Loaded best score {}", record.best);
        Ok(record.best)
    }

    fn save_best(&mut self, score: u64) -> anyhow::Result<()> {
        let json = serde_json::to_string(&BestScoreRecord { best: score })?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("writing {}", self.path.display()))?;
        log::info!("Best score saved ({score})");
        Ok(())
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "asteroidSmashHighScore";

    fn storage() -> anyhow::Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| anyhow::anyhow!("LocalStorage unavailable"))
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load_best(&mut self) -> anyhow::Result<u64> {
        let storage = Self::storage()?;
        let saved = storage
            .get_item(Self::STORAGE_KEY)
            .map_err(|e| anyhow::anyhow!("reading high score: {e:?}"))?;
        Ok(saved.and_then(|s| s.trim().parse().ok()).unwrap_or(0))
    }

    fn save_best(&mut self, score: u64) -> anyhow::Result<()> {
        let storage = Self::storage()?;
        storage
            .set_item(Self::STORAGE_KEY, &score.to_string())
            .map_err(|e| anyhow::anyhow!("saving high score: {e:?}"))?;
        log::info!("High score saved ({score})");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load_best().expect("load"), 0);
        store.save_best(120).expect("save");
        assert_eq!(store.load_best().expect("load"), 120);
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_file_store_missing_file_is_zero() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path().join("best.json"));
        assert_eq!(store.load_best().expect("load"), 0);
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("best.json");
        FileStore::new(&path).save_best(345).expect("save");
        assert_eq!(FileStore::new(&path).load_best().expect("load"), 345);
    }

    #[test]
    fn test_file_store_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("best.json");
        std::fs::write(&path, "{broken").expect("write");
        assert!(FileStore::new(&path).load_best().is_err());
    }
}
