use crate::command::Command;
use crate::consts;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The dialog shown when the snake crashes, asking for a name to record the
/// score under
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct GameOver {
    score: u32,
    name: NameField,

    /// Whether the player closed the dialog to look at the board
    dismissed: bool,
}

impl GameOver {
    pub(super) const HEIGHT: u16 = 9;
    pub(super) const WIDTH: u16 = 33;

    pub(super) fn new(score: u32, name: &str) -> GameOver {
        GameOver {
            score,
            name: NameField::new(name),
            dismissed: false,
        }
    }

    pub(super) fn name(&self) -> &str {
        self.name.as_str()
    }

    pub(super) fn score(&self) -> u32 {
        self.score
    }

    pub(super) fn dismissed(&self) -> bool {
        self.dismissed
    }

    pub(super) fn dismiss(&mut self) {
        self.dismissed = true;
    }

    /// Handle an input event.  Returns `Some` if the user made a choice.
    pub(super) fn handle_event(&mut self, event: Event) -> Option<OverOpt> {
        let ev = event.as_key_press_event()?;
        if self.dismissed {
            return match Command::from_key_event(ev)? {
                Command::R => Some(OverOpt::Restart),
                Command::B => Some(OverOpt::HighScores),
                Command::Q | Command::Quit => Some(OverOpt::Quit),
                _ => None,
            };
        }
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Some(OverOpt::Quit),
            (_, KeyCode::Enter) => return Some(OverOpt::Save),
            (_, KeyCode::Tab) => return Some(OverOpt::Submit),
            (_, KeyCode::Esc) => self.dismiss(),
            (_, KeyCode::Backspace) => self.name.backspace(),
            (m, KeyCode::Char(c)) if normal_modifiers.contains(m) => {
                let _ = self.name.push(c);
            }
            _ => (),
        }
        None
    }
}

/// The choices available once the game is over
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum OverOpt {
    /// Record the score in the local high score table and play again
    Save,

    /// Send the score to the global leaderboard
    Submit,

    Restart,
    HighScores,
    Quit,
}

impl Widget for &GameOver {
    /*
     * ┌────────── GAME OVER ──────────┐
     * │ Final score: 42               │
     * │                               │
     * │ Name: Alice                   │
     * │                               │
     * │ Save & play again (Enter)     │
     * │ Submit globally (Tab)         │
     * │ Close (Esc)                   │
     * └───────────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.dismissed {
            return;
        }
        let block = Block::bordered()
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        let lines = [
            Line::from(format!("Final score: {}", self.score)),
            Line::default(),
            Line::from_iter([
                Span::raw("Name: "),
                Span::styled(self.name.padded(), consts::INPUT_STYLE),
            ]),
            Line::default(),
            key_line("Save & play again (", "Enter"),
            key_line("Submit globally (", "Tab"),
            key_line("Close (", "Esc"),
        ];
        for (ln, row) in lines.into_iter().zip(inner.rows()) {
            ln.render(row, buf);
        }
    }
}

fn key_line(label: &'static str, key: &'static str) -> Line<'static> {
    Line::from_iter([
        Span::raw(label),
        Span::styled(key, consts::KEY_STYLE),
        Span::raw(")"),
    ])
}

/// A single-line text input holding at most [`consts::MAX_NAME_LENGTH`]
/// graphemes
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct NameField(String);

impl NameField {
    /// Create a field pre-filled with as much of `s` as is allowed
    pub(super) fn new(s: &str) -> NameField {
        let mut field = NameField::default();
        for c in s.chars() {
            if !field.push(c) {
                break;
            }
        }
        field
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a character to the field.  Control & other non-printing
    /// characters are rejected, as is anything that would start a grapheme
    /// past the maximum length.  Returns `true` if the character was added.
    pub(super) fn push(&mut self, c: char) -> bool {
        if c.general_category_group() == GeneralCategoryGroup::Other {
            return false;
        }
        self.0.push(c);
        if self.0.graphemes(true).count() > consts::MAX_NAME_LENGTH {
            let _ = self.0.pop();
            false
        } else {
            true
        }
    }

    /// Delete the last grapheme
    pub(super) fn backspace(&mut self) {
        if let Some((i, _)) = self.0.grapheme_indices(true).next_back() {
            self.0.truncate(i);
        }
    }

    /// The contents padded with spaces to the field's full width so that the
    /// input style shows where the field is
    fn padded(&self) -> String {
        let width = self.0.width();
        let mut s = self.0.clone();
        s.extend(std::iter::repeat_n(
            ' ',
            consts::MAX_NAME_LENGTH.saturating_sub(width),
        ));
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(over: &mut GameOver, s: &str) {
        for c in s.chars() {
            assert_eq!(over.handle_event(key(KeyCode::Char(c))), None);
        }
    }

    #[test]
    fn name_limit() {
        let mut field = NameField::default();
        for c in "Bartholomew!".chars() {
            assert!(field.push(c));
        }
        assert!(!field.push('?'));
        assert_eq!(field.as_str(), "Bartholomew!");
        field.backspace();
        assert!(field.push('?'));
        assert_eq!(field.as_str(), "Bartholomew?");
    }

    #[test]
    fn name_combining_characters() {
        let mut field = NameField::new("Zoe");
        assert!(field.push('\u{301}'));
        assert_eq!(field.as_str(), "Zoe\u{301}");
        field.backspace();
        assert_eq!(field.as_str(), "Zo");
    }

    #[test]
    fn name_rejects_control() {
        let mut field = NameField::default();
        assert!(!field.push('\n'));
        assert!(!field.push('\u{7}'));
        assert!(!field.push('\u{200B}'));
        assert!(field.push('é'));
        assert_eq!(field.as_str(), "é");
    }

    #[test]
    fn name_prefill_truncates() {
        let field = NameField::new("A very long player name");
        assert_eq!(field.as_str(), "A very long ");
    }

    #[test]
    fn backspace_empty() {
        let mut field = NameField::default();
        field.backspace();
        assert_eq!(field.as_str(), "");
    }

    #[test]
    fn typing_and_choices() {
        let mut over = GameOver::new(42, "");
        type_str(&mut over, "Quinn rocks");
        assert_eq!(over.handle_event(key(KeyCode::Backspace)), None);
        assert_eq!(over.name(), "Quinn rock");
        assert_eq!(
            over.handle_event(Event::Key(KeyEvent::new(
                KeyCode::Char('R'),
                KeyModifiers::SHIFT
            ))),
            None
        );
        assert_eq!(over.name(), "Quinn rockR");
        assert_eq!(over.handle_event(key(KeyCode::Enter)), Some(OverOpt::Save));
        assert_eq!(over.handle_event(key(KeyCode::Tab)), Some(OverOpt::Submit));
        assert_eq!(over.score(), 42);
    }

    #[test]
    fn dismissed_commands() {
        let mut over = GameOver::new(3, "Sam");
        assert_eq!(over.handle_event(key(KeyCode::Esc)), None);
        assert!(over.dismissed());
        assert_eq!(over.handle_event(key(KeyCode::Char('x'))), None);
        assert_eq!(over.name(), "Sam");
        assert_eq!(over.handle_event(key(KeyCode::Char('r'))), Some(OverOpt::Restart));
        assert_eq!(over.handle_event(key(KeyCode::Char('b'))), Some(OverOpt::HighScores));
        assert_eq!(over.handle_event(key(KeyCode::Char('q'))), Some(OverOpt::Quit));
    }

    #[test]
    fn ctrl_c_quits() {
        let mut over = GameOver::new(3, "");
        assert_eq!(
            over.handle_event(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Some(OverOpt::Quit)
        );
    }

    #[test]
    fn render() {
        let area = Rect::new(0, 0, GameOver::WIDTH, GameOver::HEIGHT);
        let mut buffer = Buffer::empty(area);
        GameOver::new(42, "Alice").render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "┌────────── GAME OVER ──────────┐",
            "│ Final score: 42               │",
            "│                               │",
            "│ Name: Alice                   │",
            "│                               │",
            "│ Save & play again (Enter)     │",
            "│ Submit globally (Tab)         │",
            "│ Close (Esc)                   │",
            "└───────────────────────────────┘",
        ]);
        expected.set_style(Rect::new(8, 3, 12, 1), consts::INPUT_STYLE);
        expected.set_style(Rect::new(21, 5, 5, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(19, 6, 3, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(9, 7, 3, 1), consts::KEY_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn render_dismissed() {
        let area = Rect::new(0, 0, GameOver::WIDTH, GameOver::HEIGHT);
        let mut buffer = Buffer::empty(area);
        let mut over = GameOver::new(42, "Alice");
        over.dismiss();
        over.render(area, &mut buffer);
        assert_eq!(buffer, Buffer::empty(area));
    }
}
