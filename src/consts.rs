//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Width & height of the playing field, in cells
pub(crate) const GRID_SIZE: i16 = 20;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Number of terminal columns used to draw a single grid cell
pub(crate) const CELL_WIDTH: u16 = 2;

/// Every fifth point earns a new level
pub(crate) const POINTS_PER_LEVEL: u32 = 5;

/// Points awarded for eating regular food
pub(crate) const REGULAR_FOOD_POINTS: u32 = 1;

/// Points awarded for eating special food
pub(crate) const SPECIAL_FOOD_POINTS: u32 = 3;

/// Probability that newly-spawned food is special
pub(crate) const SPECIAL_FOOD_PROBABILITY: f64 = 0.12;

/// Probability of spawning a power-up after eating
pub(crate) const POWER_UP_PROBABILITY: f64 = 0.12;

/// Probability of spawning an obstacle after eating
pub(crate) const OBSTACLE_PROBABILITY: f64 = 0.18;

/// Probability that a newly-spawned power-up is a "grow" rather than a "slow"
pub(crate) const GROW_PROBABILITY: f64 = 0.5;

/// Points awarded for picking up a "grow" power-up
pub(crate) const GROW_POINTS: u32 = 3;

/// How much a "slow" power-up lengthens the tick interval
pub(crate) const SLOW_STEP: Duration = Duration::from_millis(40);

/// A "slow" power-up never lengthens the tick interval past this
pub(crate) const SLOWEST_TICK: Duration = Duration::from_millis(200);

/// How much each new level shortens the tick interval
pub(crate) const LEVEL_STEP: Duration = Duration::from_millis(6);

/// Levelling up never shortens the tick interval past this
pub(crate) const FASTEST_TICK: Duration = Duration::from_millis(30);

/// Maximum number of random draws when placing an item on the grid
pub(crate) const SPAWN_ATTEMPTS: usize = 200;

/// Number of entries kept in the local & global high score tables
pub(crate) const HIGH_SCORE_SLOTS: usize = 10;

/// Maximum length (in graphemes) of a player name
pub(crate) const MAX_NAME_LENGTH: usize = 12;

/// Name recorded for a high score when the player doesn't give one
pub(crate) const DEFAULT_PLAYER_NAME: &str = "Anonymous";

/// Longest time a single leaderboard request may take, connecting included
pub(crate) const LEADERBOARD_TIMEOUT: Duration = Duration::from_secs(10);

/// How often the score board checks for leaderboard responses
pub(crate) const LEADERBOARD_POLL_PERIOD: Duration = Duration::from_millis(100);

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for regular food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for special food
pub(crate) const SPECIAL_FOOD_SYMBOL: char = '★';

/// Glyph for obstacles
pub(crate) const OBSTACLE_SYMBOL: char = '█';

/// Glyph for "grow" power-ups
pub(crate) const GROW_SYMBOL: char = '+';

/// Glyph for "slow" power-ups
pub(crate) const SLOW_SYMBOL: char = '≈';

/// Glyph for the snake's head when it's collided with something
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for regular food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for special food
pub(crate) const SPECIAL_FOOD_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

/// Style for power-ups
pub(crate) const POWER_UP_STYLE: Style = Style::new().fg(Color::LightCyan);

/// Style for obstacles
pub(crate) const OBSTACLE_STYLE: Style = Style::new().fg(Color::Gray);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the text being typed into the name field
pub(crate) const INPUT_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
