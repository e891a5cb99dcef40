use crate::consts;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single finished game worth remembering
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct ScoreEntry {
    pub(crate) name: String,
    pub(crate) score: u32,
    pub(crate) date: DateTime<Utc>,
}

impl ScoreEntry {
    pub(crate) fn new(name: String, score: u32) -> ScoreEntry {
        ScoreEntry {
            name,
            score,
            date: Utc::now(),
        }
    }
}

/// The best [`consts::HIGH_SCORE_SLOTS`] scores, highest first.  Among equal
/// scores, the one recorded first is ranked higher.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "Vec<ScoreEntry>", into = "Vec<ScoreEntry>")]
pub(crate) struct HighScores(Vec<ScoreEntry>);

impl HighScores {
    /// Read high scores from the given file.  If the file does not exist, an
    /// empty table is returned.
    pub(crate) fn load(path: &Path) -> Result<HighScores, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HighScores::default()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(self).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }

    /// Add an entry to the table, dropping the lowest score if the table
    /// overflows.  Returns the 0-based rank of the new entry, or `None` if it
    /// didn't make the cut.
    pub(crate) fn insert(&mut self, entry: ScoreEntry) -> Option<usize> {
        let rank = self.0.partition_point(|e| e.score >= entry.score);
        if rank >= consts::HIGH_SCORE_SLOTS {
            return None;
        }
        self.0.insert(rank, entry);
        self.0.truncate(consts::HIGH_SCORE_SLOTS);
        Some(rank)
    }

    /// The highest score in the table, or 0 if it's empty
    pub(crate) fn best(&self) -> u32 {
        self.0.first().map_or(0, |e| e.score)
    }

    pub(crate) fn entries(&self) -> &[ScoreEntry] {
        &self.0
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<ScoreEntry>> for HighScores {
    fn from(mut entries: Vec<ScoreEntry>) -> HighScores {
        // Stable, so ties keep their recorded order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(consts::HIGH_SCORE_SLOTS);
        HighScores(entries)
    }
}

impl From<HighScores> for Vec<ScoreEntry> {
    fn from(value: HighScores) -> Vec<ScoreEntry> {
        value.0
    }
}

/// The local high score table along with where it's kept on disk
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct HighScoreStore {
    scores: HighScores,

    /// File to save to, or `None` if high scores should not be saved
    path: Option<PathBuf>,
}

impl HighScoreStore {
    /// Load the high scores saved at `path`.  If they can't be read, the
    /// problem is logged and the store starts out empty.
    pub(crate) fn open(path: Option<PathBuf>) -> HighScoreStore {
        let scores = match path.as_deref().map(HighScores::load) {
            Some(Ok(scores)) => scores,
            Some(Err(e)) => {
                log::warn!("{:#}", anyhow::Error::new(e));
                HighScores::default()
            }
            None => HighScores::default(),
        };
        HighScoreStore { scores, path }
    }

    /// Record a score and write the updated table to disk.  The score is kept
    /// in memory even if saving fails.
    pub(crate) fn submit(&mut self, entry: ScoreEntry) -> Result<Option<usize>, SaveError> {
        let rank = self.scores.insert(entry);
        if let Some(ref path) = self.path {
            self.scores.save(path)?;
        }
        Ok(rank)
    }

    pub(crate) fn scores(&self) -> &HighScores {
        &self.scores
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high scores to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high scores")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high scores to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high scores from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high scores")]
    Deserialize(#[source] serde_json::Error),
}
