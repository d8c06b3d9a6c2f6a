//! Check command - evaluate one move against a layout
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: check_move(), report_outcome()
//! - Level 3: CheckOutcome construction
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use abalone_core::{apply_move, Board, Captures, Color, MoveKind, MoveRequest};

use crate::layouts_cmd::LayoutArgs;
use crate::render::{self, render_board};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Side making the move
    #[arg(long, default_value = "black")]
    pub color: Color,

    /// Move as "<cells> <direction>", e.g. "C5 C6 C7 SW"
    #[arg(long = "move", value_name = "MOVE")]
    pub mv: String,

    /// Output result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of checking a single move
#[derive(Clone, Debug, Serialize)]
pub struct CheckOutcome {
    pub legal: bool,
    pub kind: Option<MoveKind>,
    /// `(cell label, new symbol)` pairs
    pub changes: Vec<(String, char)>,
    pub ejected: Option<Color>,
    pub captures: Captures,
    pub winner: Option<Color>,
    pub error: Option<String>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run the check command
pub fn run(args: CheckArgs) -> Result<()> {
    let layout = args.layout.load()?;
    let mut board = Board::from_layout(&layout);

    let outcome = check_move(&mut board, args.color, &args.mv);
    report_outcome(&outcome, &board, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Parse and apply a move. The board is untouched when the move is rejected.
fn check_move(board: &mut Board, color: Color, text: &str) -> CheckOutcome {
    let result = MoveRequest::parse(color, text).and_then(|request| apply_move(board, &request));

    match result {
        Ok(mv) => CheckOutcome {
            legal: true,
            kind: Some(mv.kind),
            changes: mv
                .delta
                .changes()
                .iter()
                .map(|change| (change.cell.to_string(), render::symbol(change.content)))
                .collect(),
            ejected: mv.delta.ejected(),
            captures: board.captures(),
            winner: abalone_core::is_game_over(board),
            error: None,
        },
        Err(e) => {
            tracing::debug!(input = text, error = %e, "move rejected");
            CheckOutcome {
                legal: false,
                kind: None,
                changes: Vec::new(),
                ejected: None,
                captures: board.captures(),
                winner: abalone_core::is_game_over(board),
                error: Some(e.to_string()),
            }
        }
    }
}

fn report_outcome(outcome: &CheckOutcome, board: &Board, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        print_text_outcome(outcome, board);
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_text_outcome(outcome: &CheckOutcome, board: &Board) {
    match (&outcome.error, outcome.kind) {
        (Some(error), _) => println!("Rejected: {}", error),
        (None, Some(kind)) => {
            println!("Legal {:?}", kind);
            for (cell, symbol) in &outcome.changes {
                println!("  {} -> {}", cell, symbol);
            }
            if let Some(color) = outcome.ejected {
                println!("  {} piece ejected", color);
            }
        }
        (None, None) => {}
    }
    if let Some(winner) = outcome.winner {
        println!("{} has won", winner);
    }
    println!();
    print!("{}", render_board(board));
}

#[cfg(test)]
mod tests {
    use super::*;
    use abalone_core::{Cell, Content};

    #[test]
    fn test_legal_broadside() {
        let mut board = Board::standard();
        let outcome = check_move(&mut board, Color::Black, "C5 C6 C7 SW");
        assert!(outcome.legal);
        assert_eq!(outcome.kind, Some(MoveKind::Broadside));
        assert_eq!(outcome.changes.len(), 6);
        assert!(outcome.changes.contains(&("D4".to_string(), 'B')));
        assert!(outcome.changes.contains(&("C5".to_string(), '.')));
        assert_eq!(
            board.content_at(Cell::from_label("D4").unwrap()).unwrap(),
            Content::Piece(Color::Black)
        );
    }

    #[test]
    fn test_rejected_move_keeps_board() {
        let mut board = Board::standard();
        let outcome = check_move(&mut board, Color::White, "C5 SE");
        assert!(!outcome.legal);
        assert!(outcome.error.unwrap().contains("C5"));
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn test_bad_notation_is_rejected() {
        let mut board = Board::standard();
        let outcome = check_move(&mut board, Color::Black, "C5");
        assert!(!outcome.legal);
        assert!(outcome.changes.is_empty());
    }

    #[test]
    fn test_outcome_serializes() {
        let mut board = Board::standard();
        let outcome = check_move(&mut board, Color::Black, "C5 SE");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["legal"], true);
        assert_eq!(json["kind"], "Push");
        assert_eq!(json["captures"]["black"], 0);
    }
}
