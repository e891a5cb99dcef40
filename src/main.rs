mod app;
mod chime;
mod command;
mod config;
mod consts;
mod engine;
mod game;
mod highscores;
mod leaderboard;
mod options;
mod scores;
mod session;
mod swipe;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::highscores::HighScoreStore;
use crate::leaderboard::Leaderboard;
use crate::options::Speed;
use crate::session::Session;
use anyhow::Context;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use simplelog::{LevelFilter, WriteLogger};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = concat!(
    "Usage: gridsnake [<options>]\n",
    "\n",
    "Play Snake in your terminal\n",
    "\n",
    "Options:\n",
    "  -c, --config <PATH>       Read configuration from the given file\n",
    "  -s, --speed <SPEED>       Starting speed: relaxed, normal, fast, or frantic\n",
    "      --mute                Start with sound turned off\n",
    "  -l, --log-level <LEVEL>   Log at the given level [default: info]\n",
    "  -h, --help                Display this help message and exit\n",
    "  -V, --version             Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run(Arguments),
    Help,
    Version,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('s') | Arg::Long("speed") => args.speed = Some(parser.value()?.parse()?),
                Arg::Long("mute") => args.mute = true,
                Arg::Short('l') | Arg::Long("log-level") => {
                    args.log_level = parser.value()?.parse()?;
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Cli::Run(args) => args.run(),
            Cli::Help => {
                io::stdout().lock().write_all(USAGE.as_bytes())?;
                Ok(())
            }
            Cli::Version => {
                writeln!(
                    io::stdout().lock(),
                    "{} {}",
                    env!("CARGO_PKG_NAME"),
                    env!("CARGO_PKG_VERSION")
                )?;
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    speed: Option<Speed>,
    mute: bool,
    log_level: LevelFilter,
}

impl Default for Arguments {
    fn default() -> Arguments {
        Arguments {
            config: None,
            speed: None,
            mute: false,
            log_level: LevelFilter::Info,
        }
    }
}

impl Arguments {
    fn run(self) -> anyhow::Result<()> {
        let config = match self.config {
            Some(ref path) => Config::load(path, false),
            None => util::config_file_path().map_or_else(
                || Ok(Config::default()),
                |path| Config::load(&path, true),
            ),
        }
        .context("Failed to load configuration")?;
        if let Some(path) = config.log_file() {
            init_logging(&path, self.log_level);
        }
        log::info!(
            "{} {} starting",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
        let mut options = config.game.clone();
        if let Some(speed) = self.speed {
            options.speed = speed;
        }
        if self.mute {
            options.muted = true;
        }
        let session = Session::new(
            options,
            HighScoreStore::open(config.high_scores_file()),
            Leaderboard::from_config(config.leaderboard.as_ref()),
        );
        let terminal = ratatui::init();
        let r = execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
            .and_then(|()| App::new(session).run(terminal));
        let _ = execute!(io::stdout(), DisableFocusChange, DisableMouseCapture);
        ratatui::restore();
        log::info!("Exiting");
        Ok(r?)
    }
}

/// Send log messages to the file at `path`.  If the file can't be created, a
/// warning is printed and logging stays disabled.
fn init_logging(path: &Path, level: LevelFilter) {
    if level == LevelFilter::Off {
        return;
    }
    let file = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or(Ok(()), fs_err::create_dir_all)
        .and_then(|()| fs_err::File::create(path));
    match file {
        Ok(fp) => {
            let _ = WriteLogger::init(level, simplelog::Config::default(), fp);
        }
        Err(e) => eprintln!("gridsnake: warning: logging disabled: {e}"),
    }
}

fn main() -> ExitCode {
    let r = Cli::from_parser(Parser::from_env())
        .map_err(anyhow::Error::new)
        .and_then(Cli::run);
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Cli, lexopt::Error> {
        Cli::from_parser(Parser::from_iter(
            std::iter::once("gridsnake").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn no_args() {
        assert_eq!(parse(&[]).ok(), Some(Cli::Run(Arguments::default())));
    }

    #[test]
    fn all_args() {
        assert_eq!(
            parse(&["-c", "/tmp/gs.toml", "--speed", "frantic", "--mute", "-l", "debug"]).ok(),
            Some(Cli::Run(Arguments {
                config: Some(PathBuf::from("/tmp/gs.toml")),
                speed: Some(Speed::Frantic),
                mute: true,
                log_level: LevelFilter::Debug,
            }))
        );
    }

    #[rstest]
    #[case(&["--help"], Cli::Help)]
    #[case(&["-h", "--speed", "bogus"], Cli::Help)]
    #[case(&["-V"], Cli::Version)]
    #[case(&["--mute", "--version"], Cli::Version)]
    fn info_flags(#[case] args: &[&str], #[case] cli: Cli) {
        assert_eq!(parse(args).ok(), Some(cli));
    }

    #[rstest]
    #[case(&["--speed", "ludicrous"])]
    #[case(&["--speed"])]
    #[case(&["--log-level", "loud"])]
    #[case(&["--wraparound"])]
    #[case(&["extra"])]
    fn bad_args(#[case] args: &[&str]) {
        assert!(parse(args).is_err());
    }
}
