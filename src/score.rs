/// High-score persistence: a single decimal integer in a text file.
use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;

pub trait HighScoreStore {
    /// The stored score, or 0 when nothing usable is stored.
    fn load(&self) -> u32;
    fn save(&mut self, score: u32) -> anyhow::Result<()>;
}

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> u32 {
        let loaded = std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok());
        if loaded.is_none() {
            debug!(path = %self.path.display(), "no usable high score, starting at 0");
        }
        loaded.unwrap_or(0)
    }

    fn save(&mut self, score: u32) -> anyhow::Result<()> {
        std::fs::write(&self.path, score.to_string())
            .with_context(|| format!("write high score to {}", self.path.display()))
    }
}

/// Keeps the score in memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub value: Option<u32>,
    pub saves: u32,
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, score: u32) -> anyhow::Result<()> {
        self.value = Some(score);
        self.saves += 1;
        Ok(())
    }
}
