mod food;
mod game;
mod grid;
mod snake;
mod term;

use std::thread::sleep;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use clap::Parser;

use crate::food::Food;
use crate::game::{Game, Outcome, Status};
use crate::grid::Grid;
use crate::snake::{Direction, Snake};
use crate::term::{Command, TermUi};

const POLL_INTERVAL_MS: u64 = 5;

#[derive(Parser)]
#[command(name = "gridsnake", version, about = "Classic snake on a fixed-tick grid")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value_t = 21)]
    width: i32,

    /// Grid height in cells
    #[arg(long, default_value_t = 21)]
    height: i32,

    /// Logical updates per second
    #[arg(long, default_value_t = 5.0)]
    speed: f64,

    /// Starting snake length
    #[arg(long, default_value_t = 3)]
    length: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ensure!(cli.width >= 5 && cli.height >= 5, "the grid must be at least 5x5");
    ensure!(cli.speed > 0.0, "speed must be positive");
    ensure!(cli.length >= 1, "the snake needs at least one segment");
    ensure!(
        cli.length <= (cli.width / 2) as usize,
        "a snake of length {} does not fit the left half of a {}-wide grid",
        cli.length,
        cli.width
    );

    let grid = Grid::new(cli.width, cli.height, term::CELL_WIDTH);
    let mut ui = TermUi::new(grid)?;

    ui.setup()?;
    let result = run(grid, &cli, &mut ui);
    ui.restore()?;
    result
}

fn run(grid: Grid, cli: &Cli, ui: &mut TermUi) -> Result<()> {
    loop {
        let outcome = match play(grid, cli, ui)? {
            Some(outcome) => outcome,
            None => return Ok(()), // quit mid-game
        };

        let headline = match outcome {
            Outcome::Died => "Game over!",
            Outcome::Won => "You won!",
        };
        ui.show_message(&[headline, "", "Press any key to play again,", "or CTRL+C to quit."])?;

        if !ui.wait_restart()? {
            return Ok(());
        }
        // Restarting is a brand new round, the in-process equivalent of the
        // page reload this game traditionally gets.
    }
}

/// One round: drives the fixed-tick loop with real wall-clock timestamps
/// until the game ends or the player quits (`None`).
fn play(grid: Grid, cli: &Cli, ui: &mut TermUi) -> Result<Option<Outcome>> {
    let snake = Snake::new(grid.center(), cli.length, Direction::Right);
    let food = Food::spawn(&grid, &snake).context("no free cell left to place food on")?;
    let mut game = Game::new(grid, snake, food, cli.speed);

    ui.reset_board()?;
    let clock = Instant::now();

    loop {
        sleep(Duration::from_millis(POLL_INTERVAL_MS));

        for cmd in ui.poll_commands()? {
            match cmd {
                Command::Turn(dir) => game.set_direction(dir),
                Command::Quit => return Ok(None),
            }
        }

        let now_ms = clock.elapsed().as_secs_f64() * 1000.0;
        if let Status::Over(outcome) = game.frame(now_ms, ui) {
            if outcome == Outcome::Died {
                ui.paint_dead_snake(game.snake().body())?;
            }
            return Ok(Some(outcome));
        }
    }
}
