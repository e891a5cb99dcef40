use crate::game::Game;
use crate::scores::ScoreBoard;
use crate::session::Session;
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;

#[derive(Debug)]
pub(crate) struct App<R = rand::rngs::ThreadRng> {
    /// The game in progress.  It lives as long as the app so that it can be
    /// picked back up after visiting the score board.
    game: Game<R>,
    screen: Screen,
}

impl App<rand::rngs::ThreadRng> {
    pub(crate) fn new(session: Session) -> App {
        App {
            game: Game::new(session),
            screen: Screen::Game,
        }
    }
}

impl<R: Rng> App<R> {
    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        log::info!("Starting new game at {} speed", self.game.session().speed());
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Game => {
                terminal.draw(|frame| self.game.draw(frame))?;
            }
            Screen::Scores(ref board) => {
                terminal.draw(|frame| board.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        let next = match self.screen {
            Screen::Game => self.game.process_input()?,
            Screen::Scores(ref mut board) => board.process_input()?,
            Screen::Quit => None,
        };
        if let Some(screen) = next {
            self.screen = screen;
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Debug)]
pub(crate) enum Screen {
    Game,
    Scores(ScoreBoard),
    Quit,
}
