//! Best-effort JSON persistence
//!
//! Low-level helpers return [`PersistError`]; the stores built on top swallow
//! it (with a log line) so gameplay never sees a failure.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default high-score file, relative to the working directory
pub const HIGH_SCORE_FILE: &str = "polycore_score.json";

/// Default settings file, relative to the working directory
pub const SETTINGS_FILE: &str = "polycore_settings.json";

#[derive(Debug)]
pub enum PersistError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "I/O error: {}", e),
            PersistError::Parse(e) => write!(f, "Malformed JSON: {}", e),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            PersistError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        PersistError::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Parse(e)
    }
}

impl PersistError {
    /// The file simply isn't there yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, PersistError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

/// Read and deserialize a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Serialize to a temp file, then rename over `path`
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Where the best survival time lives between runs
pub trait HighScoreStore {
    /// Stored best, or 0.0 when missing or unreadable
    fn load_high_score(&mut self) -> f64;
    /// Best-effort; failures are logged and dropped
    fn save_high_score(&mut self, score: f64);
}

/// On-disk record, `{"high_score": <seconds>}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: f64,
}

/// High score kept in a JSON file
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
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(HIGH_SCORE_FILE)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load_high_score(&mut self) -> f64 {
        match read_json::<HighScoreRecord>(&self.path) {
            Ok(record) if record.high_score.is_finite() && record.high_score >= 0.0 => {
                log::info!("Loaded high score {:.2}s", record.high_score);
                record.high_score
            }
            Ok(record) => {
                log::warn!("Ignoring invalid high score {}", record.high_score);
                0.0
            }
            Err(e) if e.is_not_found() => {
                log::info!("No high score found, starting fresh");
                0.0
            }
            Err(e) => {
                log::warn!("Failed to load high score from {}: {}", self.path.display(), e);
                0.0
            }
        }
    }

    fn save_high_score(&mut self, score: f64) {
        match write_json(&self.path, &HighScoreRecord { high_score: score }) {
            Ok(()) => log::info!("High score saved ({:.2}s)", score),
            Err(e) => log::warn!("Failed to save high score to {}: {}", self.path.display(), e),
        }
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryHighScoreStore {
    pub stored: Option<f64>,
    /// Every value passed to `save_high_score`, in order
    pub saves: Vec<f64>,
}

impl MemoryHighScoreStore {
    pub fn with_score(score: f64) -> Self {
        Self {
            stored: Some(score),
            saves: Vec::new(),
        }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_high_score(&mut self) -> f64 {
        self.stored.unwrap_or(0.0)
    }

    fn save_high_score(&mut self, score: f64) {
        self.stored = Some(score);
        self.saves.push(score);
    }
}
