use crate::food::{Food, FoodEvent};
use crate::grid::{Grid, Position};
use crate::snake::{Direction, Snake};

/// Kind of opaque cell the core asks the sink to paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    SnakeHead,
    SnakeBody,
    Food,
}

/// Minimal rendering surface the core draws into, so the game logic stays
/// headless. Implemented by the terminal frontend and by a recording fake
/// in tests.
pub trait RenderSink {
    fn clear(&mut self);
    fn draw_cell(&mut self, pos: Position, tile: Tile);
    fn present(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The head left the grid or ran into the body.
    Died,
    /// The snake covers every cell and no food can respawn.
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Over(Outcome),
}

/// The fixed-tick orchestrator. Each scheduler callback feeds `frame` a
/// monotonic millisecond timestamp; at most one logical tick runs per call,
/// and callbacks arriving inside the current tick period do nothing at all.
/// `Over` is absorbing: restarting means building a fresh `Game`.
pub struct Game {
    grid: Grid,
    snake: Snake,
    food: Food,
    tick_period_ms: f64,
    last_tick_ms: f64,
    over: Option<Outcome>,
}

impl Game {
    /// `tick_rate` is in logical updates per second and must be positive.
    pub fn new(grid: Grid, snake: Snake, food: Food, tick_rate: f64) -> Self {
        assert!(tick_rate > 0.0, "tick rate must be positive");
        Game {
            grid,
            snake,
            food,
            tick_period_ms: 1000.0 / tick_rate,
            last_tick_ms: 0.0,
            over: None,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Forwards a directional intent to the snake. Safe to call at any rate;
    /// the snake latches it once per tick.
    pub fn set_direction(&mut self, d: Direction) {
        self.snake.set_direction(d);
    }

    /// One scheduler callback with the current monotonic time.
    pub fn frame(&mut self, now_ms: f64, sink: &mut dyn RenderSink) -> Status {
        if let Some(outcome) = self.over {
            return Status::Over(outcome);
        }

        if now_ms - self.last_tick_ms < self.tick_period_ms {
            return Status::Running;
        }
        self.last_tick_ms = now_ms;

        self.snake.update(self.food.position());
        if self.food.update(&self.snake, &self.grid) == FoodEvent::BoardFull {
            self.over = Some(Outcome::Won);
            return Status::Over(Outcome::Won);
        }

        if self.grid.outside_bounds(self.snake.head()) || self.snake.self_intersects() {
            self.over = Some(Outcome::Died);
            return Status::Over(Outcome::Died);
        }

        sink.clear();
        self.snake.draw(sink);
        self.food.draw(sink);
        sink.present();
        Status::Running
    }
}
