use super::cell::Cell;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    #[default]
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Return the unit vector `(dx, dy)` for moving in this direction.  The
    /// y axis points down.
    pub(crate) fn delta(self) -> (i16, i16) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Return the cell one step from `cell` in this direction.  The result may
    /// lie outside the grid.
    pub(crate) fn advance(self, cell: Cell) -> Cell {
        let (dx, dy) = self.delta();
        Cell::new(cell.x + dx, cell.y + dy)
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    pub(crate) fn is_opposite(self, other: Direction) -> bool {
        self.reverse() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::North, Cell::new(2, 7), Cell::new(2, 6))]
    #[case(Direction::South, Cell::new(2, 7), Cell::new(2, 8))]
    #[case(Direction::East, Cell::new(2, 7), Cell::new(3, 7))]
    #[case(Direction::West, Cell::new(2, 7), Cell::new(1, 7))]
    #[case(Direction::North, Cell::new(2, 0), Cell::new(2, -1))]
    #[case(Direction::South, Cell::new(2, 19), Cell::new(2, 20))]
    #[case(Direction::East, Cell::new(19, 7), Cell::new(20, 7))]
    #[case(Direction::West, Cell::new(0, 7), Cell::new(-1, 7))]
    fn test_advance(#[case] d: Direction, #[case] cell: Cell, #[case] r: Cell) {
        assert_eq!(d.advance(cell), r);
    }

    #[rstest]
    #[case(Direction::North, Direction::South, true)]
    #[case(Direction::South, Direction::North, true)]
    #[case(Direction::East, Direction::West, true)]
    #[case(Direction::West, Direction::East, true)]
    #[case(Direction::North, Direction::North, false)]
    #[case(Direction::North, Direction::East, false)]
    #[case(Direction::West, Direction::South, false)]
    fn test_is_opposite(#[case] a: Direction, #[case] b: Direction, #[case] r: bool) {
        assert_eq!(a.is_opposite(b), r);
    }
}
