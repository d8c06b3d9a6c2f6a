//! Board state and win detection

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Cell, GRID_SIZE};
use crate::layout::Layout;
use crate::moves::{Delta, MoveError};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Pieces each side starts with
pub const PIECES_PER_SIDE: u8 = 14;

/// Ejected pieces that lose the game
pub const WIN_CAPTURES: u8 = 6;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Piece color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::Black, Color::White];

    pub fn other(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Layout / rendering symbol
    pub fn symbol(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'B' => Some(Color::Black),
            'W' => Some(Color::White),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("Black"),
            Color::White => f.write_str("White"),
        }
    }
}

impl std::str::FromStr for Color {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" | "b" => Ok(Color::Black),
            "white" | "w" => Ok(Color::White),
            _ => Err(MoveError::InvalidNotation(s.to_string())),
        }
    }
}

/// The other of the two colors
pub fn enemy_of(color: Color) -> Color {
    color.other()
}

/// What a grid cell holds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Content {
    /// Border cell: pieces pushed here leave the game
    Forbidden,
    Empty,
    Piece(Color),
}

impl Content {
    pub fn color(self) -> Option<Color> {
        match self {
            Content::Piece(color) => Some(color),
            _ => None,
        }
    }
}

/// Game meta-state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Color),
}

// ============================================================================
// BOARD
// ============================================================================

/// Board state: the storage grid plus per-color ejection counters.
///
/// All mutation during play goes through [`Board::apply`], which writes a
/// fully validated [`Delta`] in one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Content; GRID_SIZE as usize]; GRID_SIZE as usize],
    captured: [u8; 2],
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Board with every playable cell empty
    pub fn empty() -> Self {
        let mut cells = [[Content::Forbidden; GRID_SIZE as usize]; GRID_SIZE as usize];
        for cell in Cell::playable() {
            cells[cell.row as usize][cell.col as usize] = Content::Empty;
        }
        Self {
            cells,
            captured: [0; 2],
        }
    }

    /// Board from a layout. Missing pieces count as already captured.
    pub fn from_layout(layout: &Layout) -> Self {
        let mut board = Self::empty();
        for (cell, color) in layout.placements() {
            board.set(cell, Content::Piece(color));
        }
        for color in Color::BOTH {
            let live = board.live_count(color) as u8;
            board.captured[color.index()] = PIECES_PER_SIDE.saturating_sub(live);
        }
        board
    }

    /// Standard starting position
    pub fn standard() -> Self {
        Self::from_layout(&Layout::standard())
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Content of a cell, failing for coordinates outside the grid
    pub fn content_at(&self, cell: Cell) -> Result<Content, MoveError> {
        if !cell.in_grid() {
            return Err(MoveError::OutOfBounds(format!("({}, {})", cell.row, cell.col)));
        }
        Ok(self.cells[cell.row as usize][cell.col as usize])
    }

    /// Ejected pieces of a color
    pub fn captured(&self, color: Color) -> u8 {
        self.captured[color.index()]
    }

    /// Ejection counters as `(black, white)`
    pub fn captures(&self) -> Captures {
        Captures {
            black: self.captured(Color::Black),
            white: self.captured(Color::White),
        }
    }

    /// Pieces of a color still on the board
    pub fn live_count(&self, color: Color) -> usize {
        self.cells_of(color).count()
    }

    /// Cells holding a piece of the given color
    pub fn cells_of(&self, color: Color) -> impl Iterator<Item = Cell> + '_ {
        Cell::playable().filter(move |&cell| self.cells[cell.row as usize][cell.col as usize] == Content::Piece(color))
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Overwrite a cell. Writes outside the grid or onto the border are ignored.
    pub fn set(&mut self, cell: Cell, content: Content) {
        if cell.is_playable() {
            self.cells[cell.row as usize][cell.col as usize] = content;
        }
    }

    /// Count one more ejected piece of a color
    pub fn capture(&mut self, color: Color) {
        let counter = &mut self.captured[color.index()];
        *counter = (*counter + 1).min(PIECES_PER_SIDE);
    }

    /// Write a validated delta
    pub fn apply(&mut self, delta: &Delta) {
        for change in delta.changes() {
            self.set(change.cell, change.content);
        }
        if let Some(color) = delta.ejected() {
            self.capture(color);
        }
    }

    /// Meta-state derived from the counters
    pub fn status(&self) -> GameStatus {
        match is_game_over(self) {
            Some(winner) => GameStatus::Won(winner),
            None => GameStatus::InProgress,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// Ejection counters for scorekeeping collaborators
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captures {
    pub black: u8,
    pub white: u8,
}

// ============================================================================
// WIN DETECTION
// ============================================================================

/// Winner once the opponent has lost six pieces
pub fn is_game_over(board: &Board) -> Option<Color> {
    Color::BOTH
        .into_iter()
        .find(|&loser| board.captured(loser) >= WIN_CAPTURES)
        .map(Color::other)
}

// ============================================================================
// TESTS
// ============================================================================
