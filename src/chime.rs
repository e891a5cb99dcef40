use std::io::{self, Write};

/// Sound cues played during a game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Tone {
    Eat,
    PowerUp,
    GameOver,
}

impl Tone {
    /// The pitch of the cue in hertz.  A terminal bell can't be tuned, so this
    /// is only used for logging.
    pub(crate) fn frequency(self) -> u32 {
        match self {
            Tone::Eat => 880,
            Tone::PowerUp => 440,
            Tone::GameOver => 120,
        }
    }
}

/// Plays sound cues by ringing the terminal bell
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Chime {
    muted: bool,
}

impl Chime {
    pub(crate) fn new(muted: bool) -> Chime {
        Chime { muted }
    }

    pub(crate) fn muted(self) -> bool {
        self.muted
    }

    /// Flip the mute setting and return the new value
    pub(crate) fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub(crate) fn play(self, tone: Tone) {
        if self.muted {
            return;
        }
        log::trace!("Chime: {tone:?} ({} Hz)", tone.frequency());
        let mut out = io::stdout().lock();
        let _ = out.write_all(b"\x07").and_then(|()| out.flush());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_mute() {
        let mut chime = Chime::new(false);
        assert!(!chime.muted());
        assert!(chime.toggle_mute());
        assert!(chime.muted());
        assert!(!chime.toggle_mute());
    }

    #[test]
    fn frequencies() {
        assert_eq!(Tone::Eat.frequency(), 880);
        assert_eq!(Tone::PowerUp.frequency(), 440);
        assert_eq!(Tone::GameOver.frequency(), 120);
    }
}
