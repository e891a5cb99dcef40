use crate::chime::{Chime, Tone};
use crate::consts;
use crate::highscores::{HighScoreStore, HighScores, SaveError, ScoreEntry};
use crate::leaderboard::Leaderboard;
use crate::options::{Options, Speed};

/// State that outlives any single game: the player's settings, the local high
/// score table, and the connection to the global leaderboard
#[derive(Clone, Debug)]
pub(crate) struct Session {
    speed: Speed,
    chime: Chime,
    high_scores: HighScoreStore,
    leaderboard: Leaderboard,

    /// The name most recently entered in the game-over dialog
    player_name: String,
}

impl Session {
    pub(crate) fn new(
        options: Options,
        high_scores: HighScoreStore,
        leaderboard: Leaderboard,
    ) -> Session {
        Session {
            speed: options.speed,
            chime: Chime::new(options.muted),
            high_scores,
            leaderboard,
            player_name: options.player_name.unwrap_or_default(),
        }
    }

    pub(crate) fn speed(&self) -> Speed {
        self.speed
    }

    pub(crate) fn set_speed(&mut self, speed: Speed) {
        log::debug!("Speed set to {speed}");
        self.speed = speed;
    }

    pub(crate) fn muted(&self) -> bool {
        self.chime.muted()
    }

    pub(crate) fn toggle_mute(&mut self) -> bool {
        let muted = self.chime.toggle_mute();
        log::debug!("Sound {}", if muted { "muted" } else { "unmuted" });
        muted
    }

    pub(crate) fn play(&self, tone: Tone) {
        self.chime.play(tone);
    }

    pub(crate) fn high_scores(&self) -> &HighScores {
        self.high_scores.scores()
    }

    pub(crate) fn best_score(&self) -> u32 {
        self.high_scores.scores().best()
    }

    pub(crate) fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub(crate) fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Build a score entry for `score` under the given name, which is trimmed
    /// and replaced with a default if blank.  The name is remembered for the
    /// next game.
    pub(crate) fn new_entry(&mut self, name: &str, score: u32) -> ScoreEntry {
        let name = name.trim();
        self.player_name = String::from(name);
        let name = if name.is_empty() {
            consts::DEFAULT_PLAYER_NAME
        } else {
            name
        };
        ScoreEntry::new(String::from(name), score)
    }

    /// Add an entry to the local high score table.  Returns the entry's
    /// 0-based rank, or `None` if it didn't make the table.
    pub(crate) fn record_local(&mut self, entry: ScoreEntry) -> Result<Option<usize>, SaveError> {
        let (name, score) = (entry.name.clone(), entry.score);
        let rank = self.high_scores.submit(entry)?;
        match rank {
            Some(r) => log::info!("Saved score of {score} for {name:?} at rank {}", r + 1),
            None => log::info!("Score of {score} for {name:?} did not make the high scores"),
        }
        Ok(rank)
    }
}
