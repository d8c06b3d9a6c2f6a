//! Integration tests for the Abalone rules engine
//!
//! Tests the full stack: layouts, the move engine, sessions and win detection

use abalone_core::{
    apply_move, evaluate, Board, Cell, Color, Content, Direction, GameSession, GameStatus, Layout,
    MoveError, MoveKind, MoveRequest, Selection, SessionConfig, PIECES_PER_SIDE,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn cell(label: &str) -> Cell {
    Cell::from_label(label).unwrap()
}

/// Empty board with pieces placed by label
fn board_with(pieces: &[(&str, Color)]) -> Board {
    let mut board = Board::empty();
    for &(label, color) in pieces {
        board.set(cell(label), Content::Piece(color));
    }
    board
}

/// Black three in a row on E, two white pieces in front of the east edge,
/// white already four pieces down
fn sumito_layout() -> Layout {
    Layout {
        name: "sumito-drill".to_string(),
        rows: vec![
            "BBBBB".to_string(),
            "BB....".to_string(),
            ".......".to_string(),
            "........".to_string(),
            "....BBBWW".to_string(),
            "........".to_string(),
            "..WWW..".to_string(),
            "..WWW.".to_string(),
            "WW...".to_string(),
        ],
    }
}

fn session_with(layout: Layout, first: Color) -> GameSession {
    let config = SessionConfig::default()
        .with_layout(layout)
        .with_first_player(first);
    GameSession::new(config).unwrap()
}

/// Random request for `color`: one to three cells starting at one of its
/// pieces, laid out along a random hex line, moving in a random direction
fn random_request(board: &Board, color: Color, rng: &mut ChaCha8Rng) -> Option<MoveRequest> {
    let own: Vec<Cell> = board.cells_of(color).collect();
    let start = *own.choose(rng)?;
    let step = *Direction::ALL.choose(rng)?;
    let len = rng.gen_range(1..=3);

    let mut cells = vec![start];
    for _ in 1..len {
        let next = cells[cells.len() - 1].neighbor(step);
        cells.push(next);
    }
    let selection = Selection::new(cells).ok()?;
    let direction = *Direction::ALL.choose(rng)?;
    Some(MoveRequest::new(selection, color, direction))
}

fn assert_counts_consistent(board: &Board) {
    for color in Color::BOTH {
        assert_eq!(
            board.live_count(color) + board.captured(color) as usize,
            PIECES_PER_SIDE as usize,
            "{} pieces on board plus captured must stay at {}",
            color,
            PIECES_PER_SIDE
        );
    }
}

// ============================================================================
// MOVE ENGINE TESTS
// ============================================================================

#[test]
fn test_single_piece_cannot_push_single_piece() {
    let mut board = board_with(&[("E5", Color::Black), ("D5", Color::White)]);
    let before = board.clone();
    let request = MoveRequest::parse(Color::Black, "E5 NW").unwrap();
    assert_eq!(apply_move(&mut board, &request), Err(MoveError::InvalidSumito));
    assert_eq!(board, before);
}

#[test]
fn test_three_push_two_into_empty() {
    let mut board = board_with(&[
        ("E3", Color::Black),
        ("E4", Color::Black),
        ("E5", Color::Black),
        ("E6", Color::White),
        ("E7", Color::White),
    ]);
    let request = MoveRequest::parse(Color::Black, "E3 E4 E5 E").unwrap();
    let mv = apply_move(&mut board, &request).unwrap();

    assert_eq!(mv.kind, MoveKind::Push);
    assert_eq!(mv.delta.ejected(), None);
    assert_eq!(board.content_at(cell("E3")).unwrap(), Content::Empty);
    for label in ["E4", "E5", "E6"] {
        assert_eq!(board.content_at(cell(label)).unwrap(), Content::Piece(Color::Black));
    }
    for label in ["E7", "E8"] {
        assert_eq!(board.content_at(cell(label)).unwrap(), Content::Piece(Color::White));
    }
}

#[test]
fn test_four_in_a_row_is_too_many() {
    let board = board_with(&[
        ("E2", Color::Black),
        ("E3", Color::Black),
        ("E4", Color::Black),
        ("E5", Color::Black),
    ]);
    let request = MoveRequest::parse(Color::Black, "E2 E3 E4 E").unwrap();
    assert_eq!(evaluate(&board, &request), Err(MoveError::TooManyFriendly));
}

#[test]
fn test_broadside_never_captures() {
    let mut board = Board::standard();
    let request = MoveRequest::parse(Color::Black, "C5 C6 C7 SE").unwrap();
    let mv = apply_move(&mut board, &request).unwrap();
    assert_eq!(mv.kind, MoveKind::Broadside);
    assert_eq!(mv.delta.ejected(), None);
    assert_eq!(board.captures(), Board::standard().captures());
}

// ============================================================================
// SESSION TESTS
// ============================================================================

#[test]
fn test_game_to_six_ejections() {
    let mut session = session_with(sumito_layout(), Color::Black);
    assert_eq!(session.board().captured(Color::White), 4);

    let report = session.play_text("E5 E6 E7 E").unwrap();
    assert_eq!(report.kind, MoveKind::Push);
    assert_eq!(report.delta.ejected(), Some(Color::White));
    assert_eq!(report.captures.white, 5);
    assert_eq!(report.winner, None);

    session.play_text("I1 NE").unwrap();

    let report = session.play_text("E6 E7 E8 E").unwrap();
    assert_eq!(report.captures.white, 6);
    assert_eq!(report.winner, Some(Color::Black));
    assert_eq!(session.status(), GameStatus::Won(Color::Black));
    assert_eq!(session.moves_played(), 3);
    assert_counts_consistent(session.board());

    assert_eq!(session.play_text("H2 NE"), Err(MoveError::GameOver));
}

#[test]
fn test_random_playouts_keep_invariants() {
    for seed in 0..4u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let config = SessionConfig::default().with_seed(seed);
        let mut session = GameSession::new(config).unwrap();

        for _ in 0..20_000 {
            if session.winner().is_some() {
                break;
            }
            let color = session.to_move();
            let Some(request) = random_request(session.board(), color, &mut rng) else {
                continue;
            };

            let before = session.board().clone();
            match session.play(&request) {
                Ok(report) => {
                    if report.kind == MoveKind::Broadside {
                        assert_eq!(report.captures, before.captures());
                    }
                    let lost = report.delta.ejected().map_or(0, |_| 1);
                    let total_before = before.captured(Color::Black) + before.captured(Color::White);
                    let total_after = report.captures.black + report.captures.white;
                    assert_eq!(total_after, total_before + lost);
                    assert_eq!(session.to_move(), color.other());
                }
                Err(_) => {
                    assert_eq!(session.board(), &before);
                    assert_eq!(session.to_move(), color);
                }
            }
            assert_counts_consistent(session.board());
        }

        assert!(session.winner().is_some(), "seed {} never finished", seed);
    }
}

// ============================================================================
// LAYOUT TESTS
// ============================================================================

#[test]
fn test_every_layout_starts_a_game() {
    for layout in Layout::all() {
        let name = layout.name.clone();
        let session = session_with(layout, Color::White);
        assert_eq!(session.layout_name(), name);
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_counts_consistent(session.board());
    }
}

#[test]
fn test_layout_json_round_trip() {
    let layout = Layout::named("belgian-daisy").unwrap();
    let json = serde_json::to_string(&layout).unwrap();
    let parsed: Layout = serde_json::from_str(&json).unwrap();
    assert_eq!(Board::from_layout(&parsed), Board::from_layout(&layout));
}

#[test]
fn test_invalid_layout_rejected_by_session() {
    let mut layout = Layout::standard();
    layout.rows[0] = "BBB".to_string();
    let config = SessionConfig::default().with_layout(layout);
    assert!(GameSession::new(config).is_err());
}
