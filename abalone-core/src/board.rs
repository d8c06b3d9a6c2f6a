//! Board geometry: hex cells stored in a rectangular grid
//!
//! The hexagon is embedded in an 11x11 grid. Each row is shifted so that
//! three of the six hex directions move along a single grid axis and the
//! remaining one (NW/SE) moves along both. The outer ring of the grid and the
//! two corners cut off by the hexagon are forbidden cells.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::moves::MoveError;

/// Side length of the storage grid (9 playable rows plus a border on each side)
pub const GRID_SIZE: i8 = 11;

/// Middle row of the storage grid
pub const MID_POINT: i8 = GRID_SIZE / 2;

/// Number of playable rows (A..I)
pub const PLAYABLE_ROWS: i8 = GRID_SIZE - 2;

/// Grid coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i8,
    pub col: i8,
}

impl Cell {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if this cell lies inside the storage grid (border included)
    pub fn in_grid(&self) -> bool {
        (0..GRID_SIZE).contains(&self.row) && (0..GRID_SIZE).contains(&self.col)
    }

    /// Check if a piece may stand on this cell
    pub fn is_playable(&self) -> bool {
        (1..=PLAYABLE_ROWS).contains(&self.row)
            && (1..=PLAYABLE_ROWS).contains(&self.col)
            && (self.col - self.row).abs() < MID_POINT
    }

    /// Get neighbor in direction. May leave the grid.
    pub fn neighbor(&self, direction: Direction) -> Cell {
        let (dr, dc) = direction.delta();
        Cell::new(self.row + dr, self.col + dc)
    }

    /// Convert a label such as `"G3"` into a grid cell.
    ///
    /// `row = letter_index + 1` and `col = digit + (letter_index - MID_POINT) + 1`,
    /// so row A carries digits 5-9, row E digits 1-9 and row I digits 1-5.
    pub fn from_label(label: &str) -> Result<Cell, MoveError> {
        let mut chars = label.trim().chars();
        let (letter, digit) = match (chars.next(), chars.next(), chars.next()) {
            (Some(l), Some(d), None) => (l.to_ascii_uppercase(), d),
            _ => return Err(MoveError::InvalidNotation(label.to_string())),
        };
        if !('A'..='Z').contains(&letter) {
            return Err(MoveError::InvalidNotation(label.to_string()));
        }
        let digit = match digit.to_digit(10) {
            Some(d) if d >= 1 => d as i8,
            _ => return Err(MoveError::InvalidNotation(label.to_string())),
        };
        let letter_index = (letter as u8 - b'A') as i8;
        if letter_index >= PLAYABLE_ROWS {
            return Err(MoveError::OutOfBounds(label.to_string()));
        }

        let cell = Cell::new(letter_index + 1, digit + (letter_index - MID_POINT) + 1);
        if !cell.is_playable() {
            return Err(MoveError::OutOfBounds(label.to_string()));
        }
        Ok(cell)
    }

    /// Inverse of [`Cell::from_label`], `None` for cells no piece can stand on
    pub fn label(&self) -> Option<String> {
        if !self.is_playable() {
            return None;
        }
        let letter = (b'A' + (self.row - 1) as u8) as char;
        let digit = self.col - self.row + MID_POINT;
        Some(format!("{}{}", letter, digit))
    }

    /// All playable cells, row by row
    pub fn playable() -> impl Iterator<Item = Cell> {
        (1..=PLAYABLE_ROWS)
            .flat_map(|row| (1..=PLAYABLE_ROWS).map(move |col| Cell::new(row, col)))
            .filter(Cell::is_playable)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(&label),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

impl FromStr for Cell {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cell::from_label(s)
    }
}

/// The six hex directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::E,
        Direction::W,
        Direction::NE,
        Direction::NW,
        Direction::SE,
        Direction::SW,
    ];

    /// Grid step (drow, dcol)
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::E => (0, 1),
            Direction::W => (0, -1),
            Direction::NE => (-1, 0),
            Direction::SW => (1, 0),
            Direction::NW => (-1, -1),
            Direction::SE => (1, 1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::E => Direction::W,
            Direction::W => Direction::E,
            Direction::NE => Direction::SW,
            Direction::SW => Direction::NE,
            Direction::NW => Direction::SE,
            Direction::SE => Direction::NW,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::E => "E",
            Direction::W => "W",
            Direction::NE => "NE",
            Direction::NW => "NW",
            Direction::SE => "SE",
            Direction::SW => "SW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Direction::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(token))
            .ok_or_else(|| MoveError::InvalidDirection(token.to_string()))
    }
}
