use super::cell::Cell;
use crate::consts;
use rand::Rng;
use std::fmt;

/// The single piece of food on the grid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    pub(crate) cell: Cell,
    pub(crate) kind: FoodKind,
}

impl Food {
    pub(crate) fn new(cell: Cell, kind: FoodKind) -> Food {
        Food { cell, kind }
    }

    pub(crate) fn points(self) -> u32 {
        self.kind.points()
    }

    pub(crate) fn is_special(self) -> bool {
        self.kind == FoodKind::Special
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum FoodKind {
    #[default]
    Regular,
    Special,
}

impl FoodKind {
    pub(crate) fn random<R: Rng>(rng: &mut R) -> FoodKind {
        if rng.random_bool(consts::SPECIAL_FOOD_PROBABILITY) {
            FoodKind::Special
        } else {
            FoodKind::Regular
        }
    }

    pub(crate) fn points(self) -> u32 {
        match self {
            FoodKind::Regular => consts::REGULAR_FOOD_POINTS,
            FoodKind::Special => consts::SPECIAL_FOOD_POINTS,
        }
    }
}

/// What a power-up does when the snake's head reaches it
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum PowerUpKind {
    /// Award [`consts::GROW_POINTS`] points
    Grow,

    /// Lengthen the tick interval by [`consts::SLOW_STEP`], up to
    /// [`consts::SLOWEST_TICK`]
    Slow,
}

impl PowerUpKind {
    pub(crate) fn random<R: Rng>(rng: &mut R) -> PowerUpKind {
        if rng.random_bool(consts::GROW_PROBABILITY) {
            PowerUpKind::Grow
        } else {
            PowerUpKind::Slow
        }
    }
}

impl fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PowerUpKind::Grow => "grow",
            PowerUpKind::Slow => "slow",
        };
        f.pad(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_points() {
        let regular = Food::new(Cell::new(1, 1), FoodKind::Regular);
        let special = Food::new(Cell::new(1, 1), FoodKind::Special);
        assert_eq!(regular.points(), 1);
        assert!(!regular.is_special());
        assert_eq!(special.points(), 3);
        assert!(special.is_special());
    }
}
