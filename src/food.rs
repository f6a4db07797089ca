use rand::seq::SliceRandom;

use crate::game::{RenderSink, Tile};
use crate::grid::{Grid, Position};
use crate::snake::Snake;

/// What the per-tick food check observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodEvent {
    /// The snake's head did not reach the food.
    Untouched,
    /// The food was consumed and has respawned on a free cell.
    Eaten,
    /// The food was consumed and no free cell remains to respawn on.
    BoardFull,
}

/// The single active food cell.
pub struct Food {
    position: Position,
}

impl Food {
    /// Places the initial food on a random cell not occupied by the snake.
    /// `None` means the snake already covers the whole grid.
    pub fn spawn(grid: &Grid, snake: &Snake) -> Option<Self> {
        pick_free_cell(grid, snake).map(|position| Food { position })
    }

    #[cfg(test)]
    pub(crate) fn at(position: Position) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Deterministic per-tick check: once the snake's head lands on the food,
    /// relocate it to a uniformly chosen free cell so it stays reachable.
    pub fn update(&mut self, snake: &Snake, grid: &Grid) -> FoodEvent {
        if snake.head() != self.position {
            return FoodEvent::Untouched;
        }

        match pick_free_cell(grid, snake) {
            Some(position) => {
                self.position = position;
                FoodEvent::Eaten
            }
            None => FoodEvent::BoardFull,
        }
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        sink.draw_cell(self.position, Tile::Food);
    }
}

fn pick_free_cell(grid: &Grid, snake: &Snake) -> Option<Position> {
    let free: Vec<Position> = grid.cells().filter(|&p| !snake.occupies(p)).collect();
    free.choose(&mut rand::thread_rng()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;

    #[test]
    fn food_is_untouched_while_the_head_is_elsewhere() {
        let grid = Grid::new(10, 10, 1);
        let snake = Snake::new(Position::new(5, 5), 3, Direction::Right);
        let mut food = Food::at(Position::new(0, 0));

        assert_eq!(food.update(&snake, &grid), FoodEvent::Untouched);
        assert_eq!(food.position(), Position::new(0, 0));
    }

    #[test]
    fn consumed_food_respawns_on_a_free_cell() {
        let grid = Grid::new(10, 10, 1);
        let mut snake = Snake::new(Position::new(5, 5), 3, Direction::Right);
        let mut food = Food::at(Position::new(6, 5));

        snake.update(food.position());
        assert_eq!(food.update(&snake, &grid), FoodEvent::Eaten);

        let respawned = food.position();
        assert_ne!(respawned, Position::new(6, 5));
        assert!(!grid.outside_bounds(respawned));
        assert!(!snake.occupies(respawned));
    }

    #[test]
    fn spawn_avoids_the_snake_even_on_a_crowded_grid() {
        // 2x2 grid with three cells taken, so only (0,1) is free.
        let grid = Grid::new(2, 2, 1);
        let mut snake = Snake::new(Position::new(1, 0), 2, Direction::Right);
        snake.set_direction(Direction::Down);
        snake.update(Position::new(1, 1)); // grows onto (1,1)

        for _ in 0..20 {
            let food = Food::spawn(&grid, &snake).unwrap();
            assert_eq!(food.position(), Position::new(0, 1));
        }
    }

    #[test]
    fn full_board_is_reported_instead_of_respawning() {
        // 3x1 grid, snake on (0,0) and (1,0), food on (2,0).
        let grid = Grid::new(3, 1, 1);
        let mut snake = Snake::new(Position::new(1, 0), 2, Direction::Right);
        let mut food = Food::at(Position::new(2, 0));

        snake.update(food.position()); // grows, now covers the whole row
        assert_eq!(food.update(&snake, &grid), FoodEvent::BoardFull);
    }
}
