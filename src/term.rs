use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{ensure, Result};
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style};

use crate::game::{RenderSink, Tile};
use crate::grid::{Grid, Position};
use crate::snake::Direction;

/// Terminal cells are taller than wide, so one grid cell spans two columns.
pub const CELL_WIDTH: u16 = 2;

const SNAKE_HEAD_CHAR: char = '█';
const SNAKE_BODY_CHAR: char = '▓';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

pub enum Command {
    Turn(Direction),
    Quit,
}

/// Crossterm frontend: owns the raw-mode terminal, maps keys to commands and
/// implements the rendering sink for a playfield centered on screen.
pub struct TermUi {
    stdout: Stdout,
    grid: Grid,
    origin: (u16, u16),
    term_size: (u16, u16),
}

impl TermUi {
    pub fn new(grid: Grid) -> Result<Self> {
        let (term_w, term_h) = terminal::size()?;
        let board_w = grid.width() as u16 * grid.cell_size() + 2;
        let board_h = grid.height() as u16 + 2;
        ensure!(
            term_w >= board_w && term_h >= board_h,
            "terminal is {}x{} but the board needs {}x{}",
            term_w, term_h, board_w, board_h
        );

        // Top-left of the playfield, one cell in from the border.
        let origin = ((term_w - board_w) / 2 + 1, (term_h - board_h) / 2 + 1);
        Ok(TermUi { stdout: stdout(), grid, origin, term_size: (term_w, term_h) })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Wipes the screen and redraws the playfield border. Called once per
    /// round, not per tick.
    pub fn reset_board(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;

        let w = self.grid.width() as u16 * self.grid.cell_size();
        let h = self.grid.height() as u16;
        let (ox, oy) = self.origin;

        for x in 0..w + 2 {
            let ch = if x == 0 || x == w + 1 { '+' } else { '-' };
            queue!(self.stdout, cursor::MoveTo(ox + x - 1, oy - 1), style::Print(ch))?;
            queue!(self.stdout, cursor::MoveTo(ox + x - 1, oy + h), style::Print(ch))?;
        }

        for y in 0..h {
            queue!(self.stdout, cursor::MoveTo(ox - 1, oy + y), style::Print('|'))?;
            queue!(self.stdout, cursor::MoveTo(ox + w, oy + y), style::Print('|'))?;
        }

        self.stdout.flush()?;
        Ok(())
    }

    /// Drains every key event that arrived since the last poll.
    pub fn poll_commands(&mut self) -> Result<Vec<Command>> {
        let mut commands = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                if let Some(cmd) = key_to_command(&ev) {
                    commands.push(cmd);
                }
            }
        }

        Ok(commands)
    }

    /// Blocks on the end screen until a key is pressed. True means play again.
    pub fn wait_restart(&mut self) -> Result<bool> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(!matches!(key_to_command(&ev), Some(Command::Quit)));
            }
        }
    }

    /// Repaints the body where it died, under the end-screen message.
    pub fn paint_dead_snake(&mut self, body: &[Position]) -> Result<()> {
        let (ox, oy) = self.origin;
        let cell: String =
            std::iter::repeat(DEAD_SNAKE_CHAR).take(self.grid.cell_size() as usize).collect();

        for pos in body {
            if self.grid.outside_bounds(*pos) {
                continue;
            }
            let x = ox + pos.x as u16 * self.grid.cell_size();
            queue!(self.stdout, cursor::MoveTo(x, oy + pos.y as u16), style::Print(&cell))?;
        }

        self.stdout.flush()?;
        Ok(())
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        let width = lines.iter().map(|l| l.len()).max().unwrap_or(0) as u16 + 2;
        let height = lines.len() as u16 + 2;
        let (term_w, term_h) = self.term_size;
        let top_left = (term_w / 2 - width / 2, term_h / 2 - height / 2);

        // Blank box first, then the centered lines over it
        for y in 0..height {
            for x in 0..width {
                queue!(
                    self.stdout,
                    cursor::MoveTo(top_left.0 + x, top_left.1 + y),
                    style::Print(' ')
                )?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{line: ^width$}", line = line, width = width as usize);
            let y = top_left.1 + i as u16 + 1;
            for (x, ch) in padded.char_indices() {
                queue!(self.stdout, cursor::MoveTo(top_left.0 + x as u16, y), style::Print(ch))?;
            }
        }

        self.stdout.flush()?;
        Ok(())
    }
}

impl RenderSink for TermUi {
    fn clear(&mut self) {
        let blank = " ".repeat((self.grid.width() as u16 * self.grid.cell_size()) as usize);
        let (ox, oy) = self.origin;

        for y in 0..self.grid.height() as u16 {
            queue!(self.stdout, cursor::MoveTo(ox, oy + y), style::Print(&blank))
                .expect("Error clearing board.");
        }
    }

    fn draw_cell(&mut self, pos: Position, tile: Tile) {
        let ch = match tile {
            Tile::SnakeHead => SNAKE_HEAD_CHAR,
            Tile::SnakeBody => SNAKE_BODY_CHAR,
            Tile::Food => FOOD_CHAR,
        };

        let (ox, oy) = self.origin;
        let x = ox + pos.x as u16 * self.grid.cell_size();
        let y = oy + pos.y as u16;
        let cell: String = std::iter::repeat(ch).take(self.grid.cell_size() as usize).collect();

        queue!(self.stdout, cursor::MoveTo(x, y), style::Print(cell)).expect("Error drawing cell.");
    }

    fn present(&mut self) {
        self.stdout.flush().expect("Error flushing.");
    }
}

fn key_to_command(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Direction::Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Direction::Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Direction::Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Direction::Right)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
