//! The game loop engine: the state of a single session of play and the
//! transition performed on each tick.
//!
//! Nothing in here knows about terminals or timers; the host calls
//! [`Engine::step()`] once per tick and [`Engine::turn()`] whenever the player
//! asks for a new direction.
mod board;
mod cell;
mod direction;
mod items;
mod snake;
pub(crate) use self::board::{Board, Role};
pub(crate) use self::cell::Cell;
pub(crate) use self::direction::Direction;
pub(crate) use self::items::{Food, FoodKind, PowerUpKind};
pub(crate) use self::snake::Snake;
use crate::consts;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

#[derive(Clone, Debug)]
pub(crate) struct Engine<R = rand::rngs::ThreadRng> {
    rng: R,
    snake: Snake,
    food: Food,
    obstacles: HashSet<Cell>,
    power_ups: HashMap<Cell, PowerUpKind>,
    score: u32,
    level: u32,

    /// Current time between ticks
    tick: Duration,

    /// Time between ticks at the start of a session, as chosen by the player
    base_tick: Duration,

    /// What the snake crashed into, if the session is over
    collision: Option<Collision>,
}

impl<R: Rng> Engine<R> {
    pub(crate) fn new_with_rng(base_tick: Duration, rng: R) -> Engine<R> {
        let mut engine = Engine {
            rng,
            snake: Snake::new(Cell::center(), Direction::North),
            food: Food::new(Cell::center(), FoodKind::Regular),
            obstacles: HashSet::new(),
            power_ups: HashMap::new(),
            score: 0,
            level: 1,
            tick: base_tick,
            base_tick,
            collision: None,
        };
        engine.food = engine.spawn_food();
        engine
    }

    /// Advance the session by one tick.
    ///
    /// Once the snake has collided with something, further calls do nothing
    /// and return [`Step::Halted`] until [`Engine::reset()`] is called.
    pub(crate) fn step(&mut self) -> Step {
        if self.collision.is_some() {
            return Step::Halted;
        }
        let head = self.snake.next_head();
        if let Some(collision) = self.collision_at(head) {
            self.collision = Some(collision);
            return Step::Collided(collision);
        }
        self.snake.push_head(head);
        let mut events = Events::default();
        if let Some(kind) = self.power_ups.remove(&head) {
            match kind {
                PowerUpKind::Grow => self.score += consts::GROW_POINTS,
                PowerUpKind::Slow => {
                    self.tick = (self.tick + consts::SLOW_STEP).min(consts::SLOWEST_TICK);
                }
            }
            events.power_up = Some(kind);
        }
        if head == self.food.cell {
            let eaten = self.food;
            self.score += eaten.points();
            if self.rng.random_bool(consts::POWER_UP_PROBABILITY) {
                self.spawn_power_up();
            }
            if self.rng.random_bool(consts::OBSTACLE_PROBABILITY) {
                self.spawn_obstacle();
            }
            self.food = self.spawn_food();
            let level = level_for_score(self.score);
            if level > self.level {
                self.level = level;
                self.tick = self
                    .tick
                    .saturating_sub(consts::LEVEL_STEP)
                    .max(consts::FASTEST_TICK);
                events.level_up = Some(level);
            }
            events.food = Some(eaten);
        } else {
            self.snake.drop_tail();
        }
        Step::Moved(events)
    }

    /// Start a fresh session: a one-cell snake in the center of the grid
    /// heading north, no score, no obstacles or power-ups, new food, and the
    /// tick interval restored to the base interval.
    pub(crate) fn reset(&mut self) {
        self.snake = Snake::new(Cell::center(), Direction::North);
        self.obstacles.clear();
        self.power_ups.clear();
        self.score = 0;
        self.level = 1;
        self.tick = self.base_tick;
        self.collision = None;
        self.food = self.spawn_food();
    }

    fn collision_at(&self, cell: Cell) -> Option<Collision> {
        if !cell.in_bounds() {
            Some(Collision::Wall)
        } else if self.snake.contains(cell) {
            Some(Collision::Snake)
        } else if self.obstacles.contains(&cell) {
            Some(Collision::Obstacle)
        } else {
            None
        }
    }

    /// Pick a cell for new food that isn't covered by the snake, an obstacle,
    /// or a power-up.  On a (nearly) full grid, this gives up after
    /// [`consts::SPAWN_ATTEMPTS`] tries and uses the last cell drawn
    /// regardless.
    fn spawn_food(&mut self) -> Food {
        let snake = &self.snake;
        let obstacles = &self.obstacles;
        let power_ups = &self.power_ups;
        let cell = sample_cell(&mut self.rng, |c| {
            !snake.contains(c) && !obstacles.contains(&c) && !power_ups.contains_key(&c)
        })
        .unwrap_or_else(|last| {
            log::warn!("No free cell found for food; placing it at {last:?} anyway");
            last
        });
        Food::new(cell, FoodKind::random(&mut self.rng))
    }

    fn spawn_power_up(&mut self) {
        if let Some(cell) = self.free_item_cell() {
            let kind = PowerUpKind::random(&mut self.rng);
            log::debug!("Spawned {kind} power-up at {cell:?}");
            self.power_ups.insert(cell, kind);
        }
    }

    fn spawn_obstacle(&mut self) {
        if let Some(cell) = self.free_item_cell() {
            log::debug!("Spawned obstacle at {cell:?}");
            self.obstacles.insert(cell);
        }
    }

    /// Pick a cell for a new obstacle or power-up that isn't covered by
    /// anything, or `None` if no such cell was found in time.
    fn free_item_cell(&mut self) -> Option<Cell> {
        let snake = &self.snake;
        let food = self.food.cell;
        let obstacles = &self.obstacles;
        let power_ups = &self.power_ups;
        sample_cell(&mut self.rng, |c| {
            c != food
                && !snake.contains(c)
                && !obstacles.contains(&c)
                && !power_ups.contains_key(&c)
        })
        .ok()
    }
}

impl<R> Engine<R> {
    /// Request that the snake turn to face `direction` on the next tick.
    /// Requests to reverse direction are ignored.  Returns `true` if the
    /// request was accepted.
    pub(crate) fn turn(&mut self, direction: Direction) -> bool {
        if self.collision.is_some() {
            return false;
        }
        self.snake.turn(direction)
    }

    /// Change the base tick interval (the player's chosen speed) and reset the
    /// current interval to match
    pub(crate) fn set_base_tick(&mut self, base_tick: Duration) {
        self.base_tick = base_tick;
        self.tick = base_tick;
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub(crate) fn food(&self) -> Food {
        self.food
    }

    #[cfg(test)]
    pub(crate) fn obstacles(&self) -> &HashSet<Cell> {
        &self.obstacles
    }

    #[cfg(test)]
    pub(crate) fn power_ups(&self) -> &HashMap<Cell, PowerUpKind> {
        &self.power_ups
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn tick_interval(&self) -> Duration {
        self.tick
    }

    #[cfg(test)]
    pub(crate) fn collision(&self) -> Option<Collision> {
        self.collision
    }

    pub(crate) fn is_over(&self) -> bool {
        self.collision.is_some()
    }

    /// Return a snapshot of what occupies each cell of the grid
    pub(crate) fn board(&self) -> Board {
        let mut board = Board::new();
        for &cell in &self.obstacles {
            board.paint(cell, Role::Obstacle);
        }
        for (&cell, &kind) in &self.power_ups {
            board.paint(cell, Role::PowerUp(kind));
        }
        board.paint(
            self.food.cell,
            if self.food.is_special() {
                Role::FoodSpecial
            } else {
                Role::Food
            },
        );
        for &cell in self.snake.body() {
            board.paint(cell, Role::SnakeBody);
        }
        board.paint(self.snake.head(), Role::SnakeHead);
        board
    }
}

/// What happened during a call to [`Engine::step()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Step {
    /// The snake moved forwards one cell
    Moved(Events),

    /// The snake crashed, ending the session
    Collided(Collision),

    /// The session was already over
    Halted,
}

/// Things that happened during a successful move
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Events {
    /// The power-up the snake picked up, if any
    pub(crate) power_up: Option<PowerUpKind>,

    /// The food the snake ate, if any
    pub(crate) food: Option<Food>,

    /// The new level, if the player levelled up
    pub(crate) level_up: Option<u32>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    Wall,
    Snake,
    Obstacle,
}

impl Collision {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Collision::Wall => "wall",
            Collision::Snake => "snake",
            Collision::Obstacle => "obstacle",
        }
    }
}

pub(crate) fn level_for_score(score: u32) -> u32 {
    score / consts::POINTS_PER_LEVEL + 1
}

/// Draw up to [`consts::SPAWN_ATTEMPTS`] cells at random, returning the first
/// for which `free` returns true.  If none is found, the last cell drawn is
/// returned as an `Err`.
fn sample_cell<R: Rng, F: Fn(Cell) -> bool>(rng: &mut R, free: F) -> Result<Cell, Cell> {
    let mut cell = Cell::random(rng);
    for _ in 1..consts::SPAWN_ATTEMPTS {
        if free(cell) {
            return Ok(cell);
        }
        cell = Cell::random(rng);
    }
    if free(cell) {
        Ok(cell)
    } else {
        Err(cell)
    }
}
