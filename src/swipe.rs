use crate::engine::Direction;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

/// Turns a mouse-button press followed by a release elsewhere into a
/// direction, the terminal's answer to a touchscreen swipe
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct SwipeTracker {
    start: Option<Position>,
}

impl SwipeTracker {
    pub(crate) fn new() -> SwipeTracker {
        SwipeTracker::default()
    }

    /// Feed a mouse event to the tracker.  Returns `Some` when the event
    /// completes a swipe.
    pub(crate) fn handle_event(&mut self, ev: MouseEvent) -> Option<Direction> {
        let pos = Position::new(ev.column, ev.row);
        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.start = Some(pos);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => swipe_direction(self.start.take()?, pos),
            _ => None,
        }
    }
}

/// Return the direction of a swipe from `start` to `end`, going by whichever
/// axis moved further.  Terminal rows are roughly twice as tall as columns
/// are wide, so vertical movement counts double.  Ties go to the vertical
/// axis.
fn swipe_direction(start: Position, end: Position) -> Option<Direction> {
    let dx = i32::from(end.x) - i32::from(start.x);
    let dy = (i32::from(end.y) - i32::from(start.y)) * 2;
    if dx == 0 && dy == 0 {
        None
    } else if dx.abs() > dy.abs() {
        Some(if dx > 0 {
            Direction::East
        } else {
            Direction::West
        })
    } else if dy > 0 {
        Some(Direction::South)
    } else {
        Some(Direction::North)
    }
}
