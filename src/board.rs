//! Grid coordinates, headings and the board geometry derived from the viewport.

use macroquad::prelude::{Rect, Vec2};

/// Rows never drop below this, whatever the viewport aspect ratio.
pub const MIN_ROWS: u32 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Label carried by on-screen direction buttons.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// One step along `dir` without any wrapping.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Playable grid size and the pixel size of one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardGeometry {
    pub cols: u32,
    pub rows: u32,
    pub cell_size: u32,
}

impl BoardGeometry {
    /// Derives the grid from the viewport. `cols` is the density itself and
    /// `rows` follows the aspect ratio. Callers must not pass a zero-width
    /// viewport.
    pub fn compute(viewport: Vec2, density: u32) -> Self {
        let cols = density.max(1);
        let rows = ((viewport.y / viewport.x) * cols as f32).floor() as u32;
        let cell_size = viewport.x.floor() as u32 / cols;
        Self { cols, rows: rows.max(MIN_ROWS), cell_size }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.cols && (cell.y as u32) < self.rows
    }

    /// Wraps each axis independently so leaving one edge re-enters at the other.
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell {
            x: wrap_axis(cell.x, self.cols as i32),
            y: wrap_axis(cell.y, self.rows as i32),
        }
    }

    /// The cell where a fresh snake spawns.
    pub fn spawn_cell(&self) -> Cell {
        Cell::new((self.cols / 3) as i32, (self.rows / 2) as i32)
    }

    /// Pixel rectangle of `cell`, shrunk by `inset` on every side.
    pub fn cell_rect(&self, cell: Cell, inset: f32) -> Rect {
        let size = self.cell_size as f32;
        Rect::new(
            cell.x as f32 * size + inset,
            cell.y as f32 * size + inset,
            (size - inset * 2.0).max(0.0),
            (size - inset * 2.0).max(0.0),
        )
    }
}

fn wrap_axis(v: i32, len: i32) -> i32 {
    if v < 0 {
        len - 1
    } else if v >= len {
        0
    } else {
        v
    }
}
