//! High score persistence
//!
//! A single named JSON file holds `{"high_score": N}`. Stores report
//! failures through `anyhow`; callers decide whether to swallow them.
//! Writes go to a sibling `.tmp` file first and are renamed into place so a
//! crash mid-write never leaves a truncated record behind.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// On-disk record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u64,
}

/// Somewhere a single high score can be kept between sessions
pub trait HighScoreStore {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> anyhow::Result<Option<u64>>;
    fn save(&mut self, score: u64) -> anyhow::Result<()>;
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> anyhow::Result<Option<u64>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("failed reading {}", self.path.display()))?;
        let record: HighScoreRecord = serde_json::from_str(&json)
            .with_context(|| format!("failed parsing {}", self.path.display()))?;
        Ok(Some(record.high_score))
    }

    fn save(&mut self, score: u64) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })
            .context("failed to serialize high score")?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json).with_context(|| format!("failed writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed moving {} into place", tmp.display()))?;
        Ok(())
    }
}

/// Volatile store for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: Option<u64>,
    /// Number of successful saves
    pub writes: usize,
}

impl MemoryStore {
    pub fn with_value(value: u64) -> Self {
        Self {
            value: Some(value),
            writes: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> anyhow::Result<Option<u64>> {
        Ok(self.value)
    }

    fn save(&mut self, score: u64) -> anyhow::Result<()> {
        self.value = Some(score);
        self.writes += 1;
        Ok(())
    }
}
