use crate::consts::GRID_SIZE;
use rand::Rng;
use ratatui::layout::Position;

/// A square on the playing field.  `(0, 0)` is the top-left corner.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Cell {
    pub(crate) x: i16,
    pub(crate) y: i16,
}

impl Cell {
    pub(crate) const fn new(x: i16, y: i16) -> Cell {
        Cell { x, y }
    }

    /// The cell in the middle of the grid, where every snake starts
    pub(crate) const fn center() -> Cell {
        Cell::new(GRID_SIZE / 2, GRID_SIZE / 2)
    }

    pub(crate) fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }

    /// Pick a cell uniformly at random from the grid
    pub(crate) fn random<R: Rng>(rng: &mut R) -> Cell {
        Cell::new(rng.random_range(0..GRID_SIZE), rng.random_range(0..GRID_SIZE))
    }

    /// Iterate over every cell in the grid in row-major order
    pub(crate) fn all() -> impl Iterator<Item = Cell> {
        (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| Cell::new(x, y)))
    }

    /// Convert to a terminal position relative to the top-left of the grid.
    /// Returns `None` for out-of-bounds cells.
    pub(crate) fn to_position(self) -> Option<Position> {
        if !self.in_bounds() {
            return None;
        }
        Some(Position {
            x: u16::try_from(self.x).ok()?,
            y: u16::try_from(self.y).ok()?,
        })
    }
}
