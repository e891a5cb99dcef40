use super::cell::Cell;
use super::items::PowerUpKind;
use crate::consts::GRID_SIZE;

/// What to draw in a given cell
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Role {
    #[default]
    Empty,
    SnakeHead,
    SnakeBody,
    Food,
    FoodSpecial,
    Obstacle,
    PowerUp(PowerUpKind),
}

/// A snapshot of the grid, one [`Role`] per cell
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Board(Vec<Role>);

impl Board {
    pub(super) fn new() -> Board {
        Board(Cell::all().map(|_| Role::Empty).collect())
    }

    /// Set the role of `cell`, replacing whatever was there before.
    /// Out-of-bounds cells are ignored.
    pub(super) fn paint(&mut self, cell: Cell, role: Role) {
        if let Some(slot) = index(cell).and_then(|i| self.0.get_mut(i)) {
            *slot = role;
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, cell: Cell) -> Role {
        index(cell)
            .and_then(|i| self.0.get(i))
            .copied()
            .unwrap_or_default()
    }

    /// Iterate over every cell of the grid in row-major order along with its
    /// role
    pub(crate) fn iter(&self) -> impl Iterator<Item = (Cell, Role)> + '_ {
        Cell::all().zip(self.0.iter().copied())
    }
}

fn index(cell: Cell) -> Option<usize> {
    if !cell.in_bounds() {
        return None;
    }
    let x = usize::try_from(cell.x).ok()?;
    let y = usize::try_from(cell.y).ok()?;
    let width = usize::try_from(GRID_SIZE).ok()?;
    Some(y * width + x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_and_get() {
        let mut board = Board::new();
        board.paint(Cell::new(19, 0), Role::Obstacle);
        board.paint(Cell::new(0, 19), Role::Food);
        board.paint(Cell::new(-1, 0), Role::SnakeHead);
        assert_eq!(board.get(Cell::new(19, 0)), Role::Obstacle);
        assert_eq!(board.get(Cell::new(0, 19)), Role::Food);
        assert_eq!(board.get(Cell::new(-1, 0)), Role::Empty);
        assert_eq!(board.get(Cell::new(0, 0)), Role::Empty);
        let painted = board
            .iter()
            .filter(|&(_, role)| role != Role::Empty)
            .collect::<Vec<_>>();
        assert_eq!(
            painted,
            [
                (Cell::new(19, 0), Role::Obstacle),
                (Cell::new(0, 19), Role::Food)
            ]
        );
    }
}
