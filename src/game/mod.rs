mod gameover;
mod paused;
use self::gameover::{GameOver, OverOpt};
use self::paused::{PauseOpt, Paused};
use crate::app::Screen;
use crate::chime::Tone;
use crate::command::Command;
use crate::consts;
use crate::engine::{Cell, Direction, Engine, PowerUpKind, Role, Step};
use crate::highscores::ScoreEntry;
use crate::options::Speed;
use crate::scores::ScoreBoard;
use crate::session::Session;
use crate::swipe::SwipeTracker;
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::Instant;

#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    engine: Engine<R>,
    session: Session,
    state: GameState,
    swipe: SwipeTracker,
    next_tick: Option<Instant>,

    /// Notice shown beneath the playing field
    message: Option<String>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(session: Session) -> Self {
        Game::new_with_rng(session, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(session: Session, rng: R) -> Game<R> {
        let engine = Engine::new_with_rng(session.speed().tick_interval(), rng);
        Game {
            engine,
            session,
            state: GameState::Running,
            swipe: SwipeTracker::new(),
            next_tick: None,
            message: None,
        }
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.running() {
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + self.engine.tick_interval());
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.advance();
                self.next_tick = None;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn advance(&mut self) {
        match self.engine.step() {
            Step::Moved(events) => {
                if let Some(kind) = events.power_up {
                    log::debug!("Picked up {kind} power-up");
                    self.session.play(Tone::PowerUp);
                } else if events.food.is_some() {
                    self.session.play(Tone::Eat);
                }
                if let Some(level) = events.level_up {
                    log::debug!(
                        "Reached level {level}; tick interval now {:?}",
                        self.engine.tick_interval()
                    );
                }
            }
            Step::Collided(collision) => {
                let score = self.engine.score();
                log::info!(
                    "Game over: hit {} with score {score} at level {}",
                    collision.as_str(),
                    self.engine.level()
                );
                self.session.play(Tone::GameOver);
                self.state = GameState::Over(GameOver::new(score, self.session.player_name()));
            }
            Step::Halted => (),
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match self.state {
            GameState::Running => match event {
                Event::FocusLost => self.pause(),
                Event::Mouse(ev) => {
                    if let Some(d) = self.swipe.handle_event(ev) {
                        let _ = self.engine.turn(d);
                    }
                }
                _ => match Command::from_key_event(event.as_key_press_event()?)? {
                    Command::Quit | Command::Q => return Some(Screen::Quit),
                    Command::Up => self.turn(Direction::North),
                    Command::Left => self.turn(Direction::West),
                    Command::Down => self.turn(Direction::South),
                    Command::Right => self.turn(Direction::East),
                    Command::Esc | Command::Space | Command::P => self.pause(),
                    Command::R => self.restart(),
                    Command::M => {
                        let _ = self.session.toggle_mute();
                    }
                    Command::Next => self.change_speed(self.session.speed().faster()),
                    Command::Prev => self.change_speed(self.session.speed().slower()),
                    Command::B => {
                        self.pause();
                        return Some(self.show_scores(None));
                    }
                    _ => (),
                },
            },
            GameState::Paused(ref mut paused) => match paused.handle_event(event)? {
                PauseOpt::Resume => self.state = GameState::Running,
                PauseOpt::Restart => self.restart(),
                PauseOpt::HighScores => return Some(self.show_scores(None)),
                PauseOpt::Quit => return Some(Screen::Quit),
            },
            GameState::Over(ref mut over) => match over.handle_event(event)? {
                OverOpt::Save => {
                    let name = over.name().to_owned();
                    self.save_and_restart(&name);
                }
                OverOpt::Submit => {
                    over.dismiss();
                    let (name, score) = (over.name().to_owned(), over.score());
                    let entry = self.session.new_entry(&name, score);
                    return Some(self.show_scores(Some(entry)));
                }
                OverOpt::Restart => self.restart(),
                OverOpt::HighScores => return Some(self.show_scores(None)),
                OverOpt::Quit => return Some(Screen::Quit),
            },
        }
        None
    }

    fn turn(&mut self, direction: Direction) {
        let _ = self.engine.turn(direction);
    }

    fn restart(&mut self) {
        self.engine.reset();
        self.state = GameState::Running;
        self.swipe = SwipeTracker::new();
        self.next_tick = None;
        self.message = None;
    }

    fn save_and_restart(&mut self, name: &str) {
        let entry = self.session.new_entry(name, self.engine.score());
        let message = match self.session.record_local(entry) {
            Ok(Some(rank)) => Some(format!("New high score! Ranked #{}.", rank + 1)),
            Ok(None) => None,
            Err(e) => {
                let e = anyhow::Error::new(e);
                log::error!("{e:#}");
                Some(e.to_string())
            }
        };
        self.restart();
        self.message = message;
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }

    fn pause(&mut self) {
        self.state = GameState::Paused(Paused::new());
        self.next_tick = None;
    }

    fn change_speed(&mut self, speed: Speed) {
        self.session.set_speed(speed);
        self.engine.set_base_tick(speed.tick_interval());
        self.next_tick = None;
    }

    fn show_scores(&self, submission: Option<ScoreEntry>) -> Screen {
        Screen::Scores(ScoreBoard::new(&self.session, submission))
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [hud_area, block_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        self.render_hud(hud_area, buf);

        let block_size = Size {
            width: GRID_WIDTH.saturating_add(2),
            height: GRID_HEIGHT.saturating_add(2),
        };
        let block_area = center_rect(block_area, block_size);
        Block::bordered().render(block_area, buf);
        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        let board = self.engine.board();
        for (cell, role) in board.iter() {
            match role {
                Role::Empty => (),
                Role::SnakeHead => {
                    if self.engine.is_over() {
                        canvas.draw_cell(cell, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
                    } else {
                        let sym = head_symbol(self.engine.snake().direction());
                        canvas.draw_cell(cell, sym, consts::SNAKE_STYLE);
                    }
                }
                Role::SnakeBody => {
                    canvas.draw_cell(cell, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
                }
                Role::Food => canvas.draw_cell(cell, consts::FOOD_SYMBOL, consts::FOOD_STYLE),
                Role::FoodSpecial => canvas.draw_cell(
                    cell,
                    consts::SPECIAL_FOOD_SYMBOL,
                    consts::SPECIAL_FOOD_STYLE,
                ),
                Role::Obstacle => {
                    canvas.draw_cell(cell, consts::OBSTACLE_SYMBOL, consts::OBSTACLE_STYLE);
                }
                Role::PowerUp(PowerUpKind::Grow) => {
                    canvas.draw_cell(cell, consts::GROW_SYMBOL, consts::POWER_UP_STYLE);
                }
                Role::PowerUp(PowerUpKind::Slow) => {
                    canvas.draw_cell(cell, consts::SLOW_SYMBOL, consts::POWER_UP_STYLE);
                }
            }
        }

        match self.state {
            GameState::Running => (),
            GameState::Paused(paused) => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: Paused::WIDTH,
                        height: Paused::HEIGHT,
                    },
                );
                paused.render(pause_area, buf);
            }
            GameState::Over(ref over) => {
                let over_area = center_rect(
                    display,
                    Size {
                        width: GameOver::WIDTH,
                        height: GameOver::HEIGHT,
                    },
                );
                over.render(over_area, buf);
                if over.dismissed() && self.message.is_none() {
                    Line::from_iter([
                        Span::raw(" GAME OVER — Restart ("),
                        Span::styled("r", consts::KEY_STYLE),
                        Span::raw(") — High Scores ("),
                        Span::styled("b", consts::KEY_STYLE),
                        Span::raw(") — Quit ("),
                        Span::styled("q", consts::KEY_STYLE),
                        Span::raw(")"),
                    ])
                    .render(msg_area, buf);
                }
            }
        }
        if let Some(ref msg) = self.message {
            Line::from(format!(" {msg}")).render(msg_area, buf);
        }
    }
}

impl<R> Game<R> {
    fn render_hud(&self, area: Rect, buf: &mut Buffer) {
        let hud = format!(
            " Score: {} │ Best: {} │ Level: {} │ Speed: {:width$} │ Sound: {}",
            self.engine.score(),
            self.session.best_score(),
            self.engine.level(),
            self.session.speed(),
            if self.session.muted() { "off" } else { "on" },
            width = usize::from(Speed::DISPLAY_WIDTH),
        );
        Line::styled(hud, consts::SCORE_BAR_STYLE).render(area, buf);
    }
}

/// Width of the playing field in terminal columns
const GRID_WIDTH: u16 = consts::GRID_SIZE.unsigned_abs() * consts::CELL_WIDTH;

/// Height of the playing field in terminal rows
const GRID_HEIGHT: u16 = consts::GRID_SIZE.unsigned_abs();

fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
        Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
        Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
        Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
    }
}

/// The playing field's area of the terminal, addressed in grid cells
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        let Some(pos) = cell.to_position() else {
            return;
        };
        let Some(x) = pos
            .x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    Paused(Paused),
    Over(GameOver),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScoreStore;
    use crate::leaderboard::{Disabled, Leaderboard};
    use crate::options::Options;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game() -> Game<ChaCha12Rng> {
        let session = Session::new(
            Options {
                muted: true,
                ..Options::default()
            },
            HighScoreStore::open(None),
            Leaderboard::from(Disabled),
        );
        Game::new_with_rng(session, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn render(game: &Game<ChaCha12Rng>) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        buffer
    }

    /// The row of an 80x24 screen on which the game-over dialog's top border
    /// is drawn
    fn game_over_top() -> u16 {
        let display = get_display_area(Rect::new(0, 0, 80, 24));
        center_rect(
            display,
            Size {
                width: GameOver::WIDTH,
                height: GameOver::HEIGHT,
            },
        )
        .y
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    /// Run the game until the snake crashes
    fn play_until_over(game: &mut Game<ChaCha12Rng>) {
        for _ in 0..100 {
            game.advance();
            if !game.running() {
                break;
            }
        }
        assert!(matches!(game.state, GameState::Over(_)));
    }

    #[test]
    fn new_game_render() {
        let game = new_game();
        let buffer = render(&game);
        assert_eq!(
            row_text(&buffer, 0).trim_end(),
            " Score: 0 │ Best: 0 │ Level: 1 │ Speed: normal  │ Sound: off"
        );
        assert_eq!(buffer[(19, 1)].symbol(), "┌");
        assert_eq!(buffer[(60, 1)].symbol(), "┐");
        assert_eq!(buffer[(19, 22)].symbol(), "└");
        assert_eq!(buffer[(60, 22)].symbol(), "┘");
        assert_eq!(buffer[(40, 12)].symbol(), "v");
        assert_eq!(row_text(&buffer, 23).trim(), "");
    }

    #[test]
    fn pausing_disarms_timer() {
        let mut game = new_game();
        game.next_tick = Some(Instant::now() + Duration::from_secs(1));
        assert!(game.handle_event(key(KeyCode::Esc)).is_none());
        assert!(matches!(game.state, GameState::Paused(_)));
        assert_eq!(game.next_tick, None);
        assert!(game.handle_event(key(KeyCode::Esc)).is_none());
        assert!(game.running());
        assert!(game.handle_event(key(KeyCode::Char(' '))).is_none());
        assert!(matches!(game.state, GameState::Paused(_)));
        assert!(game.handle_event(key(KeyCode::Char('p'))).is_none());
        assert!(game.running());
    }

    #[test]
    fn focus_lost_pauses() {
        let mut game = new_game();
        assert!(game.handle_event(Event::FocusLost).is_none());
        assert!(matches!(game.state, GameState::Paused(_)));
    }

    #[test]
    fn paused_render() {
        let mut game = new_game();
        assert!(game.handle_event(key(KeyCode::Esc)).is_none());
        let buffer = render(&game);
        assert!(row_text(&buffer, 9).contains("┌───── PAUSED ──────┐"));
        assert!(row_text(&buffer, 10).contains("│ » Resume (Esc)    │"));
    }

    #[test]
    fn change_speed() {
        let mut game = new_game();
        game.next_tick = Some(Instant::now());
        assert!(game.handle_event(key(KeyCode::Tab)).is_none());
        assert_eq!(game.session.speed(), Speed::Fast);
        assert_eq!(game.engine.tick_interval(), Duration::from_millis(50));
        assert_eq!(game.next_tick, None);
        assert!(game.handle_event(Event::Key(KeyEvent::new(
            KeyCode::BackTab,
            KeyModifiers::SHIFT
        )))
        .is_none());
        assert!(game.handle_event(key(KeyCode::BackTab)).is_none());
        assert_eq!(game.session.speed(), Speed::Relaxed);
        assert_eq!(game.engine.tick_interval(), Duration::from_millis(120));
    }

    #[test]
    fn toggle_mute() {
        let mut game = new_game();
        assert!(game.session.muted());
        assert!(game.handle_event(key(KeyCode::Char('m'))).is_none());
        assert!(!game.session.muted());
        assert!(row_text(&render(&game), 0).contains("Sound: on"));
        assert!(game.handle_event(key(KeyCode::Char('m'))).is_none());
        assert!(game.session.muted());
    }

    #[test]
    fn turn_with_keys() {
        let mut game = new_game();
        assert!(game.handle_event(key(KeyCode::Char('l'))).is_none());
        assert_eq!(game.engine.snake().heading(), Direction::East);
        assert!(game.handle_event(key(KeyCode::Left)).is_none());
        assert_eq!(game.engine.snake().heading(), Direction::West);
        // Reversing the last move is ignored
        assert!(game.handle_event(key(KeyCode::Down)).is_none());
        assert_eq!(game.engine.snake().heading(), Direction::West);
    }

    #[test]
    fn turn_with_swipe() {
        let mut game = new_game();
        let mouse = |kind, column, row| {
            Event::Mouse(MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert!(game
            .handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 40, 12))
            .is_none());
        assert!(game
            .handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 50, 13))
            .is_none());
        assert_eq!(game.engine.snake().heading(), Direction::East);
    }

    #[test]
    fn quit() {
        let mut game = new_game();
        assert!(matches!(
            game.handle_event(key(KeyCode::Char('q'))),
            Some(Screen::Quit)
        ));
        assert!(matches!(
            game.handle_event(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn show_scores_pauses() {
        let mut game = new_game();
        assert!(matches!(
            game.handle_event(key(KeyCode::Char('b'))),
            Some(Screen::Scores(_))
        ));
        assert!(matches!(game.state, GameState::Paused(_)));
        assert_eq!(game.next_tick, None);
    }

    #[test]
    fn collision_render() {
        let mut game = new_game();
        play_until_over(&mut game);
        assert!(row_text(&render(&game), game_over_top()).contains(" GAME OVER "));
        assert!(game.handle_event(key(KeyCode::Esc)).is_none());
        let head = game.engine.snake().head();
        let buffer = render(&game);
        let x = 20 + 2 * u16::try_from(head.x).unwrap_or_default();
        let y = 2 + u16::try_from(head.y).unwrap_or_default();
        assert_eq!(buffer[(x, y)].symbol(), "×");
    }

    #[test]
    fn game_over_save_restarts() {
        let mut game = new_game();
        play_until_over(&mut game);
        let score = game.engine.score();
        for c in "Zed".chars() {
            assert!(game.handle_event(key(KeyCode::Char(c))).is_none());
        }
        assert!(game.handle_event(key(KeyCode::Enter)).is_none());
        assert!(game.running());
        assert!(!game.engine.is_over());
        assert_eq!(game.engine.score(), 0);
        assert_eq!(game.next_tick, None);
        let entries = game.session.high_scores().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Zed");
        assert_eq!(entries[0].score, score);
        assert_eq!(game.session.player_name(), "Zed");
        assert_eq!(
            game.message.as_deref(),
            Some("New high score! Ranked #1.")
        );
        assert!(row_text(&render(&game), 23).starts_with(" New high score! Ranked #1."));
    }

    #[test]
    fn game_over_blank_name() {
        let mut game = new_game();
        play_until_over(&mut game);
        assert!(game.handle_event(key(KeyCode::Enter)).is_none());
        assert_eq!(game.session.high_scores().entries()[0].name, "Anonymous");
    }

    #[test]
    fn game_over_submit() {
        let mut game = new_game();
        play_until_over(&mut game);
        assert!(matches!(
            game.handle_event(key(KeyCode::Tab)),
            Some(Screen::Scores(_))
        ));
        let GameState::Over(ref over) = game.state else {
            panic!("Game should still be over");
        };
        assert!(over.dismissed());
        assert!(game.session.high_scores().is_empty());
    }

    #[test]
    fn game_over_dismissed() {
        let mut game = new_game();
        play_until_over(&mut game);
        let top = game_over_top();
        assert!(row_text(&render(&game), top).contains(" GAME OVER "));
        assert!(game.handle_event(key(KeyCode::Esc)).is_none());
        let buffer = render(&game);
        assert!(!row_text(&buffer, top).contains(" GAME OVER "));
        assert!(!row_text(&buffer, top + 1).contains("Final score"));
        assert_eq!(
            row_text(&buffer, 23).trim_end(),
            " GAME OVER — Restart (r) — High Scores (b) — Quit (q)"
        );
        assert!(game.handle_event(key(KeyCode::Char('r'))).is_none());
        assert!(game.running());
        assert_eq!(game.engine.score(), 0);
    }
}
