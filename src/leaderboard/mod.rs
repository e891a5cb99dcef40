//! The optional global leaderboard.
//!
//! Which backend is used is decided once at startup: if the configuration
//! file has a `[leaderboard]` table, scores are shared via [`Firestore`];
//! otherwise every request fails with [`LeaderboardError::NotConfigured`].
mod firestore;
pub(crate) use self::firestore::{DecodeError, Firestore};
use crate::config::LeaderboardConfig;
use crate::consts;
use crate::highscores::ScoreEntry;
use enum_dispatch::enum_dispatch;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use thiserror::Error;

#[enum_dispatch]
pub(crate) trait RemoteStore {
    /// Fetch the `limit` highest scores, highest first
    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>, LeaderboardError>;

    /// Record a new score
    fn submit(&self, entry: &ScoreEntry) -> Result<(), LeaderboardError>;

    fn is_configured(&self) -> bool;
}

#[enum_dispatch(RemoteStore)]
#[derive(Clone, Debug)]
pub(crate) enum Leaderboard {
    Firestore,
    Disabled,
}

impl Leaderboard {
    pub(crate) fn from_config(config: Option<&LeaderboardConfig>) -> Leaderboard {
        match config {
            Some(cfg) => {
                log::info!(
                    "Global leaderboard enabled: project {:?}, collection {:?}",
                    cfg.project_id,
                    cfg.collection
                );
                Leaderboard::from(Firestore::new(cfg))
            }
            None => {
                log::info!("Global leaderboard not configured");
                Leaderboard::from(Disabled)
            }
        }
    }

    /// Fetch the top scores on a worker thread.  The result is delivered as a
    /// single [`Update`] on the returned channel.
    pub(crate) fn fetch_in_background(&self) -> Receiver<Update> {
        let board = self.clone();
        spawn_worker(move |tx| {
            let _ = tx.send(board.fetch_update());
        })
    }

    /// Submit a score on a worker thread and then fetch the updated top
    /// scores.  On success, [`Update::Submitted`] is sent followed by the
    /// result of the fetch.
    pub(crate) fn submit_in_background(&self, entry: ScoreEntry) -> Receiver<Update> {
        let board = self.clone();
        spawn_worker(move |tx| match board.submit(&entry) {
            Ok(()) => {
                log::info!("Submitted score of {} for {:?}", entry.score, entry.name);
                if tx.send(Update::Submitted).is_ok() {
                    let _ = tx.send(board.fetch_update());
                }
            }
            Err(e) => {
                log::error!("Failed to submit score: {:#}", anyhow::Error::new(e));
                let _ = tx.send(Update::SubmitFailed);
            }
        })
    }

    fn fetch_update(&self) -> Update {
        match self.top_scores(consts::HIGH_SCORE_SLOTS) {
            Ok(entries) => {
                log::info!("Fetched {} global high scores", entries.len());
                Update::Loaded(entries)
            }
            Err(e) => {
                log::error!("Failed to fetch global high scores: {:#}", anyhow::Error::new(e));
                Update::LoadFailed
            }
        }
    }
}

fn spawn_worker<F>(func: F) -> Receiver<Update>
where
    F: FnOnce(Sender<Update>) + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let _ = thread::spawn(move || func(tx));
    rx
}

/// The no-op backend used when no leaderboard is configured
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Disabled;

impl RemoteStore for Disabled {
    fn top_scores(&self, _limit: usize) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        Err(LeaderboardError::NotConfigured)
    }

    fn submit(&self, _entry: &ScoreEntry) -> Result<(), LeaderboardError> {
        Err(LeaderboardError::NotConfigured)
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// A message from a leaderboard worker thread
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Update {
    Submitted,
    SubmitFailed,
    Loaded(Vec<ScoreEntry>),
    LoadFailed,
}

#[derive(Debug, Error)]
pub(crate) enum LeaderboardError {
    #[error("global leaderboard is not configured")]
    NotConfigured,
    #[error("request to leaderboard service failed")]
    Transport(#[from] ureq::Error),
    #[error("unexpected data from leaderboard service")]
    Decode(#[from] DecodeError),
}
