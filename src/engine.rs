//! Tick-driven snake simulation: movement, collisions, food and score.

use std::collections::VecDeque;

use log::debug;
use rand::Rng;

use crate::board::{BoardGeometry, Cell, Direction};

/// Rejection-sampling budget for food placement. On a nearly full board the
/// spawn gives up and leaves the food unset instead of spinning.
pub const FOOD_SPAWN_ATTEMPTS: usize = 2000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

/// What a single tick did, so the caller can drive sound and UI.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed.
    Skipped,
    Moved,
    Ate { score: u32 },
    GameOver { final_score: u32 },
}

/// Ordered body, head first. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    pub fn new(head: Cell) -> Self {
        Self { body: VecDeque::from([head]) }
    }

    /// Builds a snake from head-first cells. Returns `None` for an empty body.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() { None } else { Some(Self { body }) }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }
}

/// Picks a random free cell, or `None` when the attempt budget runs out.
pub fn spawn_food<R: Rng + ?Sized>(geometry: &BoardGeometry, snake: &Snake, rng: &mut R) -> Option<Cell> {
    if geometry.cols == 0 || geometry.rows == 0 {
        return None;
    }
    for _ in 0..FOOD_SPAWN_ATTEMPTS {
        let cell = Cell::new(
            rng.gen_range(0..geometry.cols) as i32,
            rng.gen_range(0..geometry.rows) as i32,
        );
        if !snake.contains(cell) {
            return Some(cell);
        }
    }
    debug!("no free cell for food after {} attempts", FOOD_SPAWN_ATTEMPTS);
    None
}

/// Owns the snake, heading, food, score and phase of one game.
#[derive(Clone, Debug)]
pub struct Engine {
    snake: Snake,
    direction: Direction,
    food: Option<Cell>,
    score: u32,
    phase: Phase,
}

impl Engine {
    pub fn new<R: Rng + ?Sized>(geometry: &BoardGeometry, rng: &mut R) -> Self {
        let snake = Snake::new(geometry.spawn_cell());
        let food = spawn_food(geometry, &snake, rng);
        Self { snake, direction: Direction::Right, food, score: 0, phase: Phase::Idle }
    }

    /// Engine resumed from an explicit mid-game position. The snake is
    /// non-empty by construction; cells are expected to lie on the board the
    /// engine will be ticked with, and `food` off the snake.
    pub fn with_state(snake: Snake, direction: Direction, food: Option<Cell>, score: u32, phase: Phase) -> Self {
        Self { snake, direction, food, score, phase }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Fresh snake, food and score. A paused game comes back running; the
    /// other phases are kept.
    pub fn reset<R: Rng + ?Sized>(&mut self, geometry: &BoardGeometry, rng: &mut R) {
        self.snake = Snake::new(geometry.spawn_cell());
        self.direction = Direction::Right;
        self.food = spawn_food(geometry, &self.snake, rng);
        self.score = 0;
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
    }

    /// Full reinitialisation straight into `Running`.
    pub fn restart<R: Rng + ?Sized>(&mut self, geometry: &BoardGeometry, rng: &mut R) {
        self.reset(geometry, rng);
        self.phase = Phase::Running;
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
    }

    /// Flips between `Running` and `Paused`; other phases are left alone.
    pub fn toggle_pause(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            other => other,
        };
        self.phase
    }

    /// Heading actually applied this tick: a reversal of the current heading
    /// is ignored.
    pub fn resolve_direction(current: Direction, pending: Direction) -> Direction {
        if pending == current.opposite() { current } else { pending }
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, geometry: &BoardGeometry, pending: Direction, rng: &mut R) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Skipped;
        }

        self.direction = Self::resolve_direction(self.direction, pending);
        let head = geometry.wrap(self.snake.head().step(self.direction));

        // The tail has not moved yet, so stepping into it is fatal too.
        if self.snake.contains(head) {
            self.phase = Phase::GameOver;
            return TickOutcome::GameOver { final_score: self.score };
        }

        self.snake.body.push_front(head);

        if self.food == Some(head) {
            self.score += 1;
            self.food = spawn_food(geometry, &self.snake, rng);
            TickOutcome::Ate { score: self.score }
        } else {
            self.snake.body.pop_back();
            if self.food.is_none() {
                self.food = spawn_food(geometry, &self.snake, rng);
            }
            TickOutcome::Moved
        }
    }
}
