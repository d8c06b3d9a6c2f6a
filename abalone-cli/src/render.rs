//! Plain-text board rendering
//!
//! Rows are drawn top (A) to bottom (I) and shifted so that hex neighbors
//! line up. Diagonal numbers are printed where each NW-SE line leaves the
//! board: on the right of rows F-I and along the bottom edge.

use std::fmt;

use abalone_core::board::PLAYABLE_ROWS;
use abalone_core::{Board, Cell, Content, MID_POINT};

/// Direction legend shown at the start of a game
pub const COMPASS: &str = "\
  NW   NE
    \\ /
 W --o-- E
    / \\
  SW   SE";

/// Width of the board column, so the side panel lines up
const BOARD_WIDTH: usize = 28;

/// Symbol for a cell content
pub fn symbol(content: Content) -> char {
    match content {
        Content::Piece(color) => color.symbol(),
        Content::Empty => '.',
        Content::Forbidden => ' ',
    }
}

/// Board with the dead-zone counters alongside, drawn through `Display`
pub struct BoardView<'a>(pub &'a Board);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        let captures = board.captures();
        let panel = [
            "Dead zone".to_string(),
            format!("  Black: {}", captures.black),
            format!("  White: {}", captures.white),
        ];

        for row in 1..=PLAYABLE_ROWS {
            let mut line = " ".repeat((MID_POINT - row).unsigned_abs() as usize);
            line.push((b'A' + (row - 1) as u8) as char);
            for cell in Cell::playable().filter(|c| c.row == row) {
                line.push(' ');
                line.push(board.content_at(cell).map(symbol).unwrap_or(' '));
            }
            if row > MID_POINT {
                // Diagonal that leaves the board just above this row
                line.push_str(&format!(" {}", PLAYABLE_ROWS + MID_POINT + 1 - row));
            }

            match panel.get(row as usize - 1) {
                Some(side) => writeln!(f, "{:<width$}{}", line, side, width = BOARD_WIDTH)?,
                None => writeln!(f, "{}", line)?,
            }
        }

        let digits: Vec<String> = (1..=MID_POINT).map(|d| d.to_string()).collect();
        writeln!(f, "{}{}", " ".repeat(MID_POINT as usize + 2), digits.join(" "))
    }
}

/// Draw the board with the dead-zone counters alongside
pub fn render_board(board: &Board) -> String {
    BoardView(board).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use abalone_core::Color;

    #[test]
    fn test_standard_render() {
        let text = render_board(&Board::standard());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("    A B B B B B"));
        assert!(lines[0].ends_with("Dead zone"));
        assert!(lines[2].starts_with("  C . . B B B . ."));
        assert!(lines[4].starts_with("E . . . . . . . . ."));
        assert_eq!(lines[5], " F . . . . . . . . 9");
        assert_eq!(lines[8], "    I W W W W W 6");
        assert_eq!(lines[9], "       1 2 3 4 5");
    }

    #[test]
    fn test_render_shows_captures() {
        let mut board = Board::standard();
        board.capture(Color::White);
        board.capture(Color::White);
        let text = render_board(&board);
        assert!(text.contains("Black: 0"));
        assert!(text.contains("White: 2"));
    }

    #[test]
    fn test_board_view_formats_inline() {
        let board = Board::standard();
        let text = format!("{}", BoardView(&board));
        assert_eq!(text, render_board(&board));
        assert!(text.ends_with("1 2 3 4 5\n"));
    }

    #[test]
    fn test_symbols() {
        assert_eq!(symbol(Content::Empty), '.');
        assert_eq!(symbol(Content::Piece(Color::Black)), 'B');
        assert_eq!(symbol(Content::Piece(Color::White)), 'W');
    }
}
