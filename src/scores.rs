//! Persisted high-score table
//!
//! Records are kept in insertion order and written to disk as a JSON array.
//! The store is loaded once at startup and written back whenever a
//! single-player session ends or the program exits.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::game::Difficulty;

/// One finished single-player game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u32,
    pub difficulty: Difficulty,
    /// Wall-clock length of the game in seconds
    pub elapsed_secs: f64,
}

impl ScoreRecord {
    pub fn new(score: u32, difficulty: Difficulty, elapsed_secs: f64) -> Self {
        Self {
            score,
            difficulty,
            elapsed_secs,
        }
    }

    /// Seconds rounded down, as shown on screen
    pub fn whole_secs(&self) -> u64 {
        self.elapsed_secs as u64
    }
}

/// In-memory score list bound to its backing file
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
    records: Vec<ScoreRecord>,
}

impl ScoreStore {
    /// Empty store that will be written to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Load the score file at `path`.
    ///
    /// A missing file yields an empty store. An unreadable or malformed file
    /// also yields an empty store, with a warning logged.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no score file yet, starting empty");
                return Self::new(path);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read score file, starting empty");
                return Self::new(path);
            }
        };

        match serde_json::from_str::<Vec<ScoreRecord>>(&contents) {
            Ok(records) => {
                tracing::info!(path = %path.display(), count = records.len(), "loaded scores");
                Self { path, records }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "malformed score file, starting empty");
                Self::new(path)
            }
        }
    }

    /// Write every record to the backing file, creating parent directories
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let json =
            serde_json::to_string_pretty(&self.records).context("Failed to serialize scores")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write scores to {:?}", self.path))?;

        tracing::info!(path = %self.path.display(), count = self.records.len(), "saved scores");
        Ok(())
    }

    pub fn push(&mut self, record: ScoreRecord) {
        self.records.push(record);
    }

    /// Drop all in-memory records. The file is untouched until the next save.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Best `limit` records by score, highest first; ties keep insertion order
    pub fn top(&self, limit: usize) -> Vec<&ScoreRecord> {
        let mut ranked: Vec<&ScoreRecord> = self.records.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(limit);
        ranked
    }
}
