use crate::game::{RenderSink, Tile};
use crate::grid::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// The snake body, head first, plus the direction it travels in. Segments are
/// distinct cells during normal play; overlap is the death condition and is
/// detected by `self_intersects`, not prevented here.
pub struct Snake {
    body: Vec<Position>,
    direction: Direction,
    queued: Option<Direction>,
}

impl Snake {
    /// Lays out `length` segments starting at `head` and trailing away
    /// opposite to `direction`.
    pub fn new(head: Position, length: usize, direction: Direction) -> Self {
        let (dx, dy) = direction.opposite().delta();
        let body = (0..length as i32).map(|i| head.offset(dx * i, dy * i)).collect();
        Snake { body, direction, queued: None }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn occupies(&self, p: Position) -> bool {
        self.body.contains(&p)
    }

    /// Records the direction to take at the next `update`. Requests arriving
    /// faster than the logical tick collapse to the most recent one; the turn
    /// is validated when it is latched, not here.
    pub fn set_direction(&mut self, d: Direction) {
        self.queued = Some(d);
    }

    /// Advances the head one cell in the current direction. Landing on `food`
    /// keeps the tail (net growth of one segment) and returns true; otherwise
    /// the tail is dropped and the snake translates by one cell.
    pub fn update(&mut self, food: Position) -> bool {
        if let Some(d) = self.queued.take() {
            // A reversal into the neck is discarded instead of becoming an
            // instant self-collision.
            if d != self.direction.opposite() {
                self.direction = d;
            }
        }

        let (dx, dy) = self.direction.delta();
        let new_head = self.head().offset(dx, dy);
        self.body.insert(0, new_head);

        let ate = new_head == food;
        if !ate {
            self.body.pop();
        }
        ate
    }

    /// True iff the head sits on any other segment.
    pub fn self_intersects(&self) -> bool {
        self.body[1..].contains(&self.head())
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        for (i, &segment) in self.body.iter().enumerate() {
            let tile = if i == 0 { Tile::SnakeHead } else { Tile::SnakeBody };
            sink.draw_cell(segment, tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_FOOD: Position = Position { x: -100, y: -100 };

    #[test]
    fn new_snake_trails_away_from_its_direction() {
        let snake = Snake::new(Position::new(5, 5), 3, Direction::Right);

        assert_eq!(snake.body(), &[
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(3, 5),
        ]);

        let snake = Snake::new(Position::new(5, 5), 2, Direction::Up);
        assert_eq!(snake.body(), &[Position::new(5, 5), Position::new(5, 6)]);
    }

    #[test]
    fn update_without_food_translates_by_one_cell() {
        let mut snake = Snake::new(Position::new(5, 5), 3, Direction::Right);

        let ate = snake.update(NO_FOOD);

        assert!(!ate);
        assert_eq!(snake.body().len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert!(!snake.occupies(Position::new(3, 5)), "tail cell must be freed");
    }

    #[test]
    fn update_onto_food_keeps_the_tail() {
        let mut snake = Snake::new(Position::new(5, 5), 3, Direction::Left);

        let ate = snake.update(Position::new(4, 5));

        assert!(ate);
        assert_eq!(snake.body().len(), 4);
        assert_eq!(snake.head(), Position::new(4, 5));
        assert!(snake.occupies(Position::new(7, 5)), "tail cell must be kept");
    }

    #[test]
    fn latest_direction_request_wins_within_a_tick() {
        let mut snake = Snake::new(Position::new(5, 5), 1, Direction::Right);

        snake.set_direction(Direction::Up);
        snake.set_direction(Direction::Down);
        snake.update(NO_FOOD);

        assert_eq!(snake.direction, Direction::Down);
        assert_eq!(snake.head(), Position::new(5, 6));
    }

    #[test]
    fn reversal_request_is_discarded() {
        let mut snake = Snake::new(Position::new(5, 5), 3, Direction::Right);

        snake.set_direction(Direction::Left);
        snake.update(NO_FOOD);

        assert_eq!(snake.direction, Direction::Right);
        assert_eq!(snake.head(), Position::new(6, 5));
    }

    #[test]
    fn reversal_hidden_behind_a_second_request_is_still_discarded() {
        let mut snake = Snake::new(Position::new(5, 5), 3, Direction::Right);

        // Up then Left before the tick: only the latest request is latched,
        // and it is validated against the direction actually travelled.
        snake.set_direction(Direction::Up);
        snake.set_direction(Direction::Left);
        snake.update(NO_FOOD);

        assert_eq!(snake.direction, Direction::Right);
        assert_eq!(snake.head(), Position::new(6, 5));
    }

    #[test]
    fn fresh_snake_does_not_self_intersect() {
        let snake = Snake::new(Position::new(5, 5), 4, Direction::Down);
        assert!(!snake.self_intersects());
    }

    #[test]
    fn tight_turn_into_the_body_is_detected() {
        let mut snake = Snake::new(Position::new(5, 5), 5, Direction::Right);

        snake.set_direction(Direction::Down);
        snake.update(NO_FOOD); // head (5,6)
        snake.set_direction(Direction::Left);
        snake.update(NO_FOOD); // head (4,6)
        snake.set_direction(Direction::Up);
        snake.update(NO_FOOD); // head (4,5), occupied by the body

        assert!(snake.self_intersects());
    }
}
