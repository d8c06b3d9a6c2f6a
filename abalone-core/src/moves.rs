//! Move engine: selection validation, pushes (sumito included), broadside moves
//!
//! Evaluation only reads the board. A legal move is returned as a [`Delta`]
//! that the caller writes with [`Board::apply`], so a rejected move can never
//! leave a partial update behind.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{Cell, Direction};
use crate::game::{Board, Color, Content};

/// Most pieces of one color a single move may displace
pub const MAX_MOVING: usize = 3;

// ============================================================================
// ERRORS
// ============================================================================

/// Why a move was rejected. Every variant leaves the board untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum MoveError {
    #[error("{0} is off the board")]
    OutOfBounds(String),

    #[error("you have to select your own piece(s), {0} is not yours")]
    WrongOwner(Cell),

    #[error("the selected range is not valid")]
    InvalidRange,

    #[error("you cannot move more than 3 pieces")]
    TooManyFriendly,

    #[error("wrong sumito")]
    InvalidSumito,

    #[error("destination {0} is not empty")]
    BlockedDestination(Cell),

    #[error("invalid input: {0:?}")]
    InvalidNotation(String),

    #[error("invalid direction {0:?} (expected one of E, W, NE, NW, SE, SW)")]
    InvalidDirection(String),

    #[error("it is {0}'s turn")]
    OutOfTurn(Color),

    #[error("the game is over")]
    GameOver,
}

// ============================================================================
// SELECTION
// ============================================================================

/// Line along which a multi-piece selection lies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Same row letter, consecutive digits (E/W)
    Row,
    /// Same digit, consecutive letters (NW/SE)
    Diagonal,
}

impl Axis {
    /// Check if a direction runs along this axis
    pub fn contains(self, direction: Direction) -> bool {
        match self {
            Axis::Row => matches!(direction, Direction::E | Direction::W),
            Axis::Diagonal => matches!(direction, Direction::NW | Direction::SE),
        }
    }
}

/// One to three distinct, consecutive, colinear cells
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Selection {
    cells: Vec<Cell>,
}

impl Selection {
    /// Validate the shape of a selection (ownership is checked against a board later)
    pub fn new(cells: Vec<Cell>) -> Result<Self, MoveError> {
        if cells.is_empty() || cells.len() > MAX_MOVING {
            return Err(MoveError::InvalidRange);
        }
        for (i, cell) in cells.iter().enumerate() {
            if !cell.in_grid() {
                return Err(MoveError::OutOfBounds(cell.to_string()));
            }
            if cells[..i].contains(cell) {
                return Err(MoveError::InvalidRange);
            }
        }
        let selection = Self { cells };
        if selection.cells.len() > 1 && selection.axis().is_none() {
            return Err(MoveError::InvalidRange);
        }
        Ok(selection)
    }

    /// Parse labels such as `"C3 C4"` or `"C3C4"`
    pub fn parse(text: &str) -> Result<Self, MoveError> {
        let compact: Vec<char> = text
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect();
        if compact.is_empty() || compact.len() % 2 != 0 {
            return Err(MoveError::InvalidNotation(text.to_string()));
        }

        let cells = compact
            .chunks(2)
            .map(|pair| Cell::from_label(&pair.iter().collect::<String>()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(cells)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Axis of a multi-cell selection, `None` for a single cell or a broken line
    pub fn axis(&self) -> Option<Axis> {
        if self.cells.len() < 2 {
            return None;
        }
        let n = self.cells.len() as i8;
        let first = self.cells[0];

        let same_row = self.cells.iter().all(|c| c.row == first.row);
        if same_row && span(self.cells.iter().map(|c| c.col)) < n {
            return Some(Axis::Row);
        }

        let same_digit = self.cells.iter().all(|c| c.col - c.row == first.col - first.row);
        if same_digit && span(self.cells.iter().map(|c| c.row)) < n {
            return Some(Axis::Diagonal);
        }

        None
    }

    /// Every selected cell must hold the mover's color
    pub fn check_owner(&self, board: &Board, color: Color) -> Result<(), MoveError> {
        for &cell in &self.cells {
            if board.content_at(cell)? != Content::Piece(color) {
                return Err(MoveError::WrongOwner(cell));
            }
        }
        Ok(())
    }

    /// Selected cell with no selected neighbor behind it
    fn rearmost(&self, direction: Direction) -> Cell {
        let behind = direction.opposite();
        self.cells
            .iter()
            .copied()
            .find(|cell| !self.cells.contains(&cell.neighbor(behind)))
            .unwrap_or(self.cells[0])
    }
}

impl TryFrom<Vec<Cell>> for Selection {
    type Error = MoveError;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        Selection::new(cells)
    }
}

impl From<Selection> for Vec<Cell> {
    fn from(selection: Selection) -> Self {
        selection.cells
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<_> = self.cells.iter().map(|c| c.to_string()).collect();
        f.write_str(&labels.join(" "))
    }
}

fn span(values: impl Iterator<Item = i8> + Clone) -> i8 {
    let min = values.clone().min().unwrap_or(0);
    let max = values.max().unwrap_or(0);
    max - min
}

// ============================================================================
// REQUESTS AND RESULTS
// ============================================================================

/// A player's intent for one turn
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub selection: Selection,
    pub color: Color,
    pub direction: Direction,
}

impl MoveRequest {
    pub fn new(selection: Selection, color: Color, direction: Direction) -> Self {
        Self {
            selection,
            color,
            direction,
        }
    }

    /// Parse `"<cells> <direction>"`, e.g. `"C3 C4 SW"` or `"C3C4 sw"`
    pub fn parse(color: Color, text: &str) -> Result<Self, MoveError> {
        let (cells, direction) = text
            .trim()
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| MoveError::InvalidNotation(text.to_string()))?;
        let direction: Direction = direction.parse()?;
        let selection = Selection::parse(cells)?;
        Ok(Self::new(selection, color, direction))
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.color, self.selection, self.direction)
    }
}

/// How a request moves its pieces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Along the line of the selection, possibly pushing enemy pieces
    Push,
    /// Sideways into empty cells
    Broadside,
}

/// One cell update
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub cell: Cell,
    pub content: Content,
}

/// Cell updates of a legal move, plus the color of the piece it ejects
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    changes: Vec<Change>,
    ejected: Option<Color>,
}

impl Delta {
    fn from_staged(staged: FxHashMap<Cell, Content>, ejected: Option<Color>) -> Self {
        let mut changes: Vec<Change> = staged
            .into_iter()
            .map(|(cell, content)| Change { cell, content })
            .collect();
        changes.sort_by_key(|change| change.cell);
        Self { changes, ejected }
    }

    /// Updates ordered by cell
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// New content of a cell, if the move touches it
    pub fn get(&self, cell: Cell) -> Option<Content> {
        self.changes
            .iter()
            .find(|change| change.cell == cell)
            .map(|change| change.content)
    }

    pub fn ejected(&self) -> Option<Color> {
        self.ejected
    }
}

/// A validated move, ready to apply
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub kind: MoveKind,
    pub delta: Delta,
}

// ============================================================================
// ENGINE
// ============================================================================

/// Decide between a push and a broadside move
pub fn classify(selection: &Selection, direction: Direction) -> MoveKind {
    match selection.axis() {
        Some(axis) if !axis.contains(direction) => MoveKind::Broadside,
        _ => MoveKind::Push,
    }
}

/// Validate a request against the board without touching it
pub fn evaluate(board: &Board, request: &MoveRequest) -> Result<Move, MoveError> {
    let MoveRequest {
        selection,
        color,
        direction,
    } = request;

    let result = selection.check_owner(board, *color).and_then(|()| {
        let kind = classify(selection, *direction);
        let delta = match kind {
            MoveKind::Push => push_move(board, selection.rearmost(*direction), *direction, *color)?,
            MoveKind::Broadside => free_move(board, selection, *direction, *color)?,
        };
        Ok(Move { kind, delta })
    });

    match &result {
        Ok(mv) => tracing::debug!(%request, kind = ?mv.kind, changes = mv.delta.changes.len(), "move accepted"),
        Err(err) => tracing::debug!(%request, %err, "move rejected"),
    }
    result
}

/// Validate a request and write it to the board
pub fn apply_move(board: &mut Board, request: &MoveRequest) -> Result<Move, MoveError> {
    let mv = evaluate(board, request)?;
    board.apply(&mv.delta);
    Ok(mv)
}

/// Walk the line from `origin` in `direction`, pushing everything in front.
///
/// The chain must be a run of at most three friendly pieces followed by a
/// strictly shorter run of enemy pieces. The walk stops at the first empty
/// cell, or at the border, where the leading piece is ejected.
pub fn push_move(
    board: &Board,
    origin: Cell,
    direction: Direction,
    mover: Color,
) -> Result<Delta, MoveError> {
    let mut staged = FxHashMap::default();
    staged.insert(origin, Content::Empty);

    let mut friendly = 1;
    let mut enemy = 0;
    let mut current = origin;
    let mut moving = Content::Piece(mover);

    loop {
        let next = current.neighbor(direction);
        let ahead = board.content_at(next).unwrap_or(Content::Forbidden);

        match ahead {
            Content::Forbidden => {
                if let Some(color) = moving.color() {
                    tracing::debug!(%color, from = %current, "piece pushed off the board");
                }
                return Ok(Delta::from_staged(staged, moving.color()));
            }
            Content::Empty => {
                staged.insert(next, moving);
                return Ok(Delta::from_staged(staged, None));
            }
            Content::Piece(color) if color == mover => {
                friendly += 1;
                if friendly > MAX_MOVING {
                    return Err(MoveError::TooManyFriendly);
                }
                // friendly piece behind an enemy one
                if enemy > 0 {
                    return Err(MoveError::InvalidSumito);
                }
            }
            Content::Piece(_) => {
                enemy += 1;
                if enemy >= friendly {
                    return Err(MoveError::InvalidSumito);
                }
            }
        }

        staged.insert(next, moving);
        moving = ahead;
        current = next;
    }
}

/// Shift every selected piece one step; all destinations must be empty
pub fn free_move(
    board: &Board,
    selection: &Selection,
    direction: Direction,
    mover: Color,
) -> Result<Delta, MoveError> {
    let mut staged = FxHashMap::default();
    for &cell in selection.cells() {
        staged.insert(cell, Content::Empty);
    }

    for &cell in selection.cells() {
        let dest = cell.neighbor(direction);
        if board.content_at(dest).unwrap_or(Content::Forbidden) != Content::Empty {
            return Err(MoveError::BlockedDestination(dest));
        }
        staged.insert(dest, Content::Piece(mover));
    }

    Ok(Delta::from_staged(staged, None))
}

// ============================================================================
// TESTS
// ============================================================================
