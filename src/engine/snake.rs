use super::cell::Cell;
use super::direction::Direction;
use std::collections::VecDeque;

/// The snake: where it is, where it is going, and any turn it has been asked
/// to make.
///
/// The snake is the sequence `head, body[0], body[1], ...`; `body[0]` is the
/// neck and the last element of `body` is the tail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    pub(super) head: Cell,

    /// The positions of the rest of the snake, nearest the head first
    pub(super) body: VecDeque<Cell>,

    /// The direction in which the snake last moved
    pub(super) direction: Direction,

    /// A turn requested since the last move, to be applied on the next one
    pub(super) pending: Option<Direction>,
}

impl Snake {
    /// Create a new one-cell snake at `head` facing in `direction`
    pub(super) fn new(head: Cell, direction: Direction) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
            direction,
            pending: None,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Cell {
        self.head
    }

    /// Return the positions of the cells behind the head
    pub(crate) fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    /// Iterate over all of the snake's cells, head first
    #[cfg(test)]
    pub(crate) fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.body.len() + 1
    }

    pub(crate) fn contains(&self, cell: Cell) -> bool {
        self.head == cell || self.body.contains(&cell)
    }

    /// The direction in which the snake last moved
    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// The direction in which the snake will move on the next tick
    #[cfg(test)]
    pub(crate) fn heading(&self) -> Direction {
        self.pending.unwrap_or(self.direction)
    }

    /// Request a change of direction for the next move.  Requests to reverse
    /// the last move are ignored; otherwise, the latest request wins.
    ///
    /// Returns `true` if the request was accepted.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.direction) {
            false
        } else {
            self.pending = Some(direction);
            true
        }
    }

    /// Commit any pending turn and return the cell the head would move into
    pub(super) fn next_head(&mut self) -> Cell {
        if let Some(d) = self.pending.take() {
            self.direction = d;
        }
        self.direction.advance(self.head)
    }

    /// Move the head to `cell`, leaving the old head as the new neck
    pub(super) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(self.head);
        self.head = cell;
    }

    /// Remove the last cell of the snake (unless it's just a head)
    pub(super) fn drop_tail(&mut self) {
        let _ = self.body.pop_back();
    }
}
