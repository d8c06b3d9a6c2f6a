//! Play command - two players sharing one terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), play_loop()
//! - Level 3: handle_line(), announce_move()
//! - Level 4: prompt and input utilities
//!
//! Each turn reads one line: `<cells> <direction>` (e.g. `C5 C6 C7 SW`),
//! or one of `help`, `reset`, `quit`. Rejected moves are explained and the
//! same player is asked again.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Args;

use abalone_core::{Color, GameSession, MoveReport, SessionConfig};

use crate::layouts_cmd::LayoutArgs;
use crate::render::{self, render_board};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Side that moves first (drawn at random if omitted)
    #[arg(long, value_name = "COLOR")]
    pub first: Option<Color>,
}

/// What the loop should do after a line of input
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    /// Board changed, draw it again
    Redraw,
    /// Ask the same player again
    Retry,
    Quit,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run an interactive game on stdin/stdout
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed)?;
    let mut session = GameSession::new(config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    play_loop(&mut session, stdin.lock(), &mut stdout)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &PlayArgs, seed: Option<u64>) -> Result<SessionConfig> {
    let mut config = SessionConfig::default().with_layout(args.layout.load()?);
    if let Some(color) = args.first {
        config = config.with_first_player(color);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

/// Turn loop. Returns when the input ends or a player quits.
fn play_loop<R: BufRead, W: Write>(session: &mut GameSession, mut input: R, out: &mut W) -> Result<()> {
    writeln!(out, "Abalone ({} layout)\n", session.layout_name())?;
    writeln!(out, "{}\n", render::COMPASS)?;

    let mut flow = Flow::Redraw;
    loop {
        if flow == Flow::Redraw {
            writeln!(out, "\n{}", render_board(session.board()))?;
        }

        if let Some(winner) = session.winner() {
            writeln!(out, "{} wins after {} moves!", winner, session.moves_played())?;
            match prompt(&mut input, out, "Play again (y/n)? ")? {
                Some(answer) if answer.eq_ignore_ascii_case("y") => {
                    session.reset();
                    flow = Flow::Redraw;
                    continue;
                }
                _ => break,
            }
        }

        let question = format!(
            "{} ({}), your move: ",
            session.to_move(),
            session.to_move().symbol()
        );
        let Some(line) = prompt(&mut input, out, &question)? else {
            break;
        };

        flow = handle_line(session, &line, out)?;
        if flow == Flow::Quit {
            break;
        }
    }

    writeln!(out, "Bye!")?;
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn handle_line<W: Write>(session: &mut GameSession, line: &str, out: &mut W) -> Result<Flow> {
    match line.to_ascii_lowercase().as_str() {
        "" => Ok(Flow::Retry),
        "quit" | "exit" => Ok(Flow::Quit),
        "help" => {
            writeln!(out, "Enter 1-3 cells in a line and a direction, e.g. C5 C6 C7 SW")?;
            writeln!(out, "{}", render::COMPASS)?;
            Ok(Flow::Retry)
        }
        "reset" => {
            session.reset();
            writeln!(out, "Game restarted, {} to move", session.to_move())?;
            Ok(Flow::Redraw)
        }
        _ => match session.play_text(line) {
            Ok(report) => {
                announce_move(&report, out)?;
                Ok(Flow::Redraw)
            }
            Err(e) => {
                tracing::debug!(input = line, error = %e, "move rejected");
                writeln!(out, "Invalid move: {}", e)?;
                Ok(Flow::Retry)
            }
        },
    }
}

fn announce_move<W: Write>(report: &MoveReport, out: &mut W) -> Result<()> {
    if let Some(color) = report.delta.ejected() {
        let count = match color {
            Color::Black => report.captures.black,
            Color::White => report.captures.white,
        };
        writeln!(out, "A {} piece was pushed off the board ({} lost)", color, count)?;
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Print a question and read one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<Option<String>> {
    write!(out, "{}", question)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
