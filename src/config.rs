use crate::options::Options;
use crate::util;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// Gameplay options in effect at startup
    #[serde(default)]
    pub(crate) game: Options,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    /// Connection details for the shared leaderboard.  If not set, the
    /// leaderboard is disabled.
    #[serde(default)]
    pub(crate) leaderboard: Option<LeaderboardConfig>,
}

impl Config {
    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which high scores should be stored: the file
    /// given in the configuration or, if that is not set, the default high
    /// scores path.  Returns `None` if high scores should not be saved or if
    /// no path could be determined.
    pub(crate) fn high_scores_file(&self) -> Option<PathBuf> {
        if !self.files.save_high_scores {
            return None;
        }
        self.files
            .high_scores_file
            .clone()
            .or_else(util::high_scores_file_path)
    }

    /// Return the filepath to which logs should be written
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.files.log_file.clone().or_else(util::log_file_path)
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which high scores should be stored
    pub(crate) high_scores_file: Option<PathBuf>,

    /// Whether to load & save high scores in a file
    pub(crate) save_high_scores: bool,

    /// Path to write logs to
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_scores_file: None,
            save_high_scores: true,
            log_file: None,
        }
    }
}

/// Where to find the shared leaderboard
#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct LeaderboardConfig {
    pub(crate) project_id: String,
    pub(crate) api_key: String,

    /// Name of the collection holding the score documents
    #[serde(default = "default_collection")]
    pub(crate) collection: String,

    /// Base URL of the Firestore REST API
    #[serde(default = "default_endpoint")]
    pub(crate) endpoint: String,
}

fn default_collection() -> String {
    String::from("snake_scores")
}

fn default_endpoint() -> String {
    String::from("https://firestore.googleapis.com/v1")
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
