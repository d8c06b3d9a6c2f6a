//! Game session: one board, the side to move and the game meta-state

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::game::{Board, Captures, Color, GameStatus};
use crate::moves::{self, Delta, Move, MoveError, MoveKind, MoveRequest};

/// What an applied move changed, for rendering and scorekeeping
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub color: Color,
    pub kind: MoveKind,
    pub delta: Delta,
    pub captures: Captures,
    pub winner: Option<Color>,
}

/// A running game (single writer, owned by the turn loop)
#[derive(Clone, Debug)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    to_move: Color,
    status: GameStatus,
    moves_played: u32,
    rng: ChaCha8Rng,
}

impl GameSession {
    /// Start a game from configuration
    pub fn new(config: SessionConfig) -> anyhow::Result<Self> {
        config.layout.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let to_move = config.first_player.unwrap_or_else(|| draw_first(&mut rng));
        let board = Board::from_layout(&config.layout);

        tracing::info!(layout = %config.layout.name, seed, first = %to_move, "new game");

        Ok(Self {
            status: board.status(),
            config,
            board,
            to_move,
            moves_played: 0,
            rng,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Color> {
        match self.status {
            GameStatus::Won(color) => Some(color),
            GameStatus::InProgress => None,
        }
    }

    /// Applied moves since the last (re)start
    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    pub fn layout_name(&self) -> &str {
        &self.config.layout.name
    }

    // ========================================================================
    // TURN HANDLING
    // ========================================================================

    /// Check a request for the side to move without applying it
    pub fn preview(&self, request: &MoveRequest) -> Result<Move, MoveError> {
        self.check_turn(request.color)?;
        moves::evaluate(&self.board, request)
    }

    /// Apply a move for the side to move, then pass the turn.
    ///
    /// A rejected request leaves the session unchanged.
    pub fn play(&mut self, request: &MoveRequest) -> Result<MoveReport, MoveError> {
        self.check_turn(request.color)?;
        let Move { kind, delta } = moves::apply_move(&mut self.board, request)?;

        self.moves_played += 1;
        if let Some(color) = delta.ejected() {
            tracing::info!(%color, captured = self.board.captured(color), "piece ejected");
        }

        self.status = self.board.status();
        let winner = self.winner();
        if let Some(color) = winner {
            tracing::info!(winner = %color, moves = self.moves_played, "game over");
        }
        self.to_move = self.to_move.other();

        Ok(MoveReport {
            color: request.color,
            kind,
            delta,
            captures: self.board.captures(),
            winner,
        })
    }

    /// Parse `"<cells> <direction>"` for the side to move and play it
    pub fn play_text(&mut self, text: &str) -> Result<MoveReport, MoveError> {
        let request = MoveRequest::parse(self.to_move, text)?;
        self.play(&request)
    }

    /// Restart from the configured layout
    pub fn reset(&mut self) {
        self.board = Board::from_layout(&self.config.layout);
        self.status = self.board.status();
        self.to_move = self
            .config
            .first_player
            .unwrap_or_else(|| draw_first(&mut self.rng));
        self.moves_played = 0;
        tracing::info!(layout = %self.config.layout.name, first = %self.to_move, "game reset");
    }

    fn check_turn(&self, color: Color) -> Result<(), MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::GameOver);
        }
        if color != self.to_move {
            return Err(MoveError::OutOfTurn(self.to_move));
        }
        Ok(())
    }
}

fn draw_first(rng: &mut ChaCha8Rng) -> Color {
    if rng.gen_bool(0.5) {
        Color::Black
    } else {
        Color::White
    }
}
