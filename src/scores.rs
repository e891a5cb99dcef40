use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::highscores::{HighScores, ScoreEntry};
use crate::leaderboard::{Leaderboard, RemoteStore, Update};
use crate::session::Session;
use crate::util::get_display_area;
use crossterm::event::{poll, read, Event};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};
use std::sync::mpsc::{Receiver, TryRecvError};

/// The screen listing the local & global high scores
#[derive(Debug)]
pub(crate) struct ScoreBoard {
    local: HighScores,
    global: Vec<ScoreEntry>,
    status: Option<Status>,
    leaderboard: Leaderboard,

    /// Channel from the leaderboard worker, if a request is in flight
    pending: Option<Receiver<Update>>,
}

impl ScoreBoard {
    /// Open the score board.  If `submission` is given, it is sent to the
    /// global leaderboard.
    pub(crate) fn new(session: &Session, submission: Option<ScoreEntry>) -> ScoreBoard {
        let mut board = ScoreBoard {
            local: session.high_scores().clone(),
            global: Vec::new(),
            status: None,
            leaderboard: session.leaderboard().clone(),
            pending: None,
        };
        if let Some(entry) = submission {
            board.submit(entry);
        }
        board
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.pending.is_some() {
            self.receive_updates();
            if !poll(consts::LEADERBOARD_POLL_PERIOD)? {
                return Ok(None);
            }
        }
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Enter | Command::Esc | Command::B => return Some(Screen::Game),
            Command::Q | Command::Quit => return Some(Screen::Quit),
            Command::G => self.fetch(),
            _ => (),
        }
        None
    }

    /// Start fetching the global scores, unless a request is already running
    fn fetch(&mut self) {
        if self.pending.is_some() {
            return;
        }
        if self.leaderboard.is_configured() {
            self.status = Some(Status::Loading);
            self.pending = Some(self.leaderboard.fetch_in_background());
        } else {
            self.status = Some(Status::NotConfigured);
        }
    }

    fn submit(&mut self, entry: ScoreEntry) {
        if self.leaderboard.is_configured() {
            self.status = Some(Status::Submitting);
            self.pending = Some(self.leaderboard.submit_in_background(entry));
        } else {
            self.status = Some(Status::NotConfigured);
        }
    }

    /// Apply any messages waiting on the worker channel
    fn receive_updates(&mut self) {
        while let Some(ref rx) = self.pending {
            match rx.try_recv() {
                Ok(update) => self.apply(update),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.pending = None,
            }
        }
    }

    fn apply(&mut self, update: Update) {
        self.status = Some(match update {
            Update::Submitted => Status::Submitted,
            Update::SubmitFailed => Status::SubmitFailed,
            Update::Loaded(entries) => {
                self.global = entries;
                Status::Loaded
            }
            Update::LoadFailed => Status::LoadFailed,
        });
    }
}

impl Widget for &ScoreBoard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [title_area, _, tables_area, _, status_area, keys_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(TABLE_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(" HIGH SCORES", consts::SCORE_BAR_STYLE).render(title_area, buf);
        let [local_area, global_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
                .spacing(2)
                .areas(tables_area);
        ScoreTable {
            title: " Local ",
            entries: self.local.entries(),
        }
        .render(local_area, buf);
        ScoreTable {
            title: " Global ",
            entries: &self.global,
        }
        .render(global_area, buf);
        if let Some(status) = self.status {
            Line::from(format!(" {}", status.as_str())).render(status_area, buf);
        }
        Line::from_iter([
            Span::raw(" Load global ("),
            Span::styled("g", consts::KEY_STYLE),
            Span::raw(") — Back ("),
            Span::styled("Enter", consts::KEY_STYLE),
            Span::raw(") — Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .render(keys_area, buf);
    }
}

/// Height of a score table: one row per slot plus borders
const TABLE_HEIGHT: u16 = 12;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ScoreTable<'a> {
    title: &'static str,
    entries: &'a [ScoreEntry],
}

impl Widget for ScoreTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(self.title)
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        if self.entries.is_empty() {
            Line::from("(no scores yet)").render(inner, buf);
            return;
        }
        for ((i, entry), row) in self.entries.iter().enumerate().zip(inner.rows()) {
            Line::from(format!("{:>2}. {} — {}", i + 1, entry.name, entry.score)).render(row, buf);
        }
    }
}

/// What the score board says about the global leaderboard
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Status {
    Loading,
    Submitting,
    Submitted,
    Loaded,
    NotConfigured,
    LoadFailed,
    SubmitFailed,
}

impl Status {
    fn as_str(self) -> &'static str {
        match self {
            Status::Loading => "Loading...",
            Status::Submitting => "Submitting...",
            Status::Submitted => "Score submitted. Refreshing...",
            Status::Loaded => "Latest scores loaded.",
            Status::NotConfigured => "Global leaderboard not configured.",
            Status::LoadFailed => "Error loading leaderboard.",
            Status::SubmitFailed => "Error submitting score.",
        }
    }
}
