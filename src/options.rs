use crate::util::EnumExt;
use enum_map::Enum;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Gameplay options, set in the configuration file or on the command line
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct Options {
    /// Starting speed of the snake
    pub(crate) speed: Speed,

    /// Whether to start with sound turned off
    pub(crate) muted: bool,

    /// Name to suggest when saving a high score
    pub(crate) player_name: Option<String>,
}

/// Preset tick intervals that the player can choose between
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Speed {
    Relaxed,
    #[default]
    Normal,
    Fast,
    Frantic,
}

impl Speed {
    pub(crate) const DISPLAY_WIDTH: u16 = 7;

    pub(crate) fn tick_interval(self) -> Duration {
        match self {
            Speed::Relaxed => Duration::from_millis(120),
            Speed::Normal => Duration::from_millis(75),
            Speed::Fast => Duration::from_millis(50),
            Speed::Frantic => Duration::from_millis(35),
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Speed::Relaxed => "relaxed",
            Speed::Normal => "normal",
            Speed::Fast => "fast",
            Speed::Frantic => "frantic",
        }
    }

    /// The next faster preset, wrapping around to the slowest
    pub(crate) fn faster(self) -> Speed {
        self.next().unwrap_or_else(Speed::min)
    }

    /// The next slower preset, wrapping around to the fastest
    pub(crate) fn slower(self) -> Speed {
        self.prev().unwrap_or_else(Speed::max)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Speed {
    type Err = ParseSpeedError;

    fn from_str(s: &str) -> Result<Speed, ParseSpeedError> {
        Speed::iter()
            .find(|sp| sp.as_str().eq_ignore_ascii_case(s))
            .ok_or(ParseSpeedError)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("invalid speed; expected one of \"relaxed\", \"normal\", \"fast\", or \"frantic\"")]
pub(crate) struct ParseSpeedError;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("relaxed", Ok(Speed::Relaxed))]
    #[case("normal", Ok(Speed::Normal))]
    #[case("Fast", Ok(Speed::Fast))]
    #[case("FRANTIC", Ok(Speed::Frantic))]
    #[case("ludicrous", Err(ParseSpeedError))]
    #[case("", Err(ParseSpeedError))]
    fn parse_speed(#[case] s: &str, #[case] r: Result<Speed, ParseSpeedError>) {
        assert_eq!(s.parse::<Speed>(), r);
    }

    #[test]
    fn cycle_speeds() {
        assert_eq!(Speed::Normal.faster(), Speed::Fast);
        assert_eq!(Speed::Frantic.faster(), Speed::Relaxed);
        assert_eq!(Speed::Normal.slower(), Speed::Relaxed);
        assert_eq!(Speed::Relaxed.slower(), Speed::Frantic);
    }

    #[test]
    fn faster_is_quicker() {
        let ticks = Speed::iter().map(Speed::tick_interval).collect::<Vec<_>>();
        assert!(ticks.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn display_width() {
        let actual_width = Speed::iter()
            .map(|sp| sp.as_str().len())
            .max()
            .unwrap_or_default();
        assert_eq!(actual_width, usize::from(Speed::DISPLAY_WIDTH));
    }

    #[test]
    fn fmt_width() {
        assert_eq!(format!("{:7}", Speed::Fast), "fast   ");
    }
}
