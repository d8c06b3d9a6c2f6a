//! Abalone Core - Rules engine
//!
//! This crate provides the game logic for Abalone:
//! - Board geometry (hexagon stored in an 11x11 grid with a forbidden border)
//! - Board state and capture counters
//! - Move engine: selection validation, pushes and sumito, broadside moves
//! - Win detection
//! - Starting layouts and game sessions

pub mod board;
pub mod config;
pub mod game;
pub mod layout;
pub mod moves;
pub mod session;

// Re-exports for convenient access
pub use board::{Cell, Direction, GRID_SIZE, MID_POINT};
pub use config::SessionConfig;
pub use game::{enemy_of, is_game_over, Board, Captures, Color, Content, GameStatus, PIECES_PER_SIDE, WIN_CAPTURES};
pub use layout::Layout;
pub use moves::{apply_move, classify, evaluate, Axis, Change, Delta, Move, MoveError, MoveKind, MoveRequest, Selection};
pub use session::{GameSession, MoveReport};
