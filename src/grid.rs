/// A cell coordinate on the game grid. Compared structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Position { x: self.x + dx, y: self.y + dy }
    }
}

/// The bounded coordinate space of the game. Immutable after construction:
/// positions `(x, y)` with `0 <= x < width` and `0 <= y < height` are inside.
/// `cell_size` is how many output columns one cell spans when rendered.
#[derive(Debug, Clone, Copy)]
pub struct Grid {
    width: i32,
    height: i32,
    cell_size: u16,
}

impl Grid {
    pub fn new(width: i32, height: i32, cell_size: u16) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Grid { width, height, cell_size }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_size(&self) -> u16 {
        self.cell_size
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// True iff `p` lies outside the grid. Pure and stateless.
    pub fn outside_bounds(&self, p: Position) -> bool {
        p.x < 0 || p.x >= self.width || p.y < 0 || p.y >= self.height
    }

    /// All in-bounds positions, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| Position::new(x, y)))
    }
}
