//! Layout - starting positions
//!
//! A layout is nine text rows, top (A) to bottom (I), one symbol per playable
//! cell: `.` empty, `B` black, `W` white.

use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::board::{Cell, MID_POINT, PLAYABLE_ROWS};
use crate::game::{Color, PIECES_PER_SIDE};

const STANDARD: [&str; 9] = [
    "BBBBB",
    "BBBBBB",
    "..BBB..",
    "........",
    ".........",
    "........",
    "..WWW..",
    "WWWWWW",
    "WWWWW",
];

const GERMAN_DAISY: [&str; 9] = [
    ".....",
    "BB..WW",
    "BBB.WWW",
    ".BB..WW.",
    ".........",
    ".WW..BB.",
    "WWW.BBB",
    "WW..BB",
    ".....",
];

const BELGIAN_DAISY: [&str; 9] = [
    "BB.WW",
    "BBBWWW",
    ".BB.WW.",
    "........",
    ".........",
    "........",
    ".WW.BB.",
    "WWWBBB",
    "WW.BB",
];

const DUTCH_DAISY: [&str; 9] = [
    "BB.WW",
    "BWBWBW",
    ".BB.WW.",
    "........",
    ".........",
    "........",
    ".WW.BB.",
    "WBWBWB",
    "WW.BB",
];

const SWISS_DAISY: [&str; 9] = [
    ".....",
    "BB..WW",
    "BWB.WBW",
    ".BB..WW.",
    ".........",
    ".WW..BB.",
    "WBW.BWB",
    "WW..BB",
    ".....",
];

const DOMINATION: [&str; 9] = [
    ".....",
    "B....W",
    "BB...WW",
    "BBBB.WWW",
    "...W.W...",
    "WWW.BBBB",
    "WW...BB",
    "W....B",
    ".....",
];

const PYRAMID: [&str; 9] = [
    "B....",
    "BB....",
    "BBB....",
    "BBBB....",
    "BBBB.WWWW",
    "....WWWW",
    "....WWW",
    "....WW",
    "....W",
];

const THE_WALL: [&str; 9] = [
    "..B..",
    "......",
    ".BBBBB.",
    "BBBBBBBB",
    ".........",
    "WWWWWWWW",
    ".WWWWW.",
    "......",
    "..W..",
];

const NAMED: [(&str, [&str; 9]); 8] = [
    ("standard", STANDARD),
    ("german-daisy", GERMAN_DAISY),
    ("belgian-daisy", BELGIAN_DAISY),
    ("dutch-daisy", DUTCH_DAISY),
    ("swiss-daisy", SWISS_DAISY),
    ("domination", DOMINATION),
    ("pyramid", PYRAMID),
    ("the-wall", THE_WALL),
];

/// Starting position
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    pub rows: Vec<String>,
}

impl Layout {
    fn from_rows(name: &str, rows: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            rows: rows.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Standard opening: both sides in three rows at their edge
    pub fn standard() -> Self {
        Self::from_rows("standard", &STANDARD)
    }

    /// Built-in layout by name (case-insensitive, `_` and ` ` accepted for `-`)
    pub fn named(name: &str) -> Option<Self> {
        let wanted = name.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        NAMED
            .iter()
            .find(|(n, _)| *n == wanted)
            .map(|(n, rows)| Self::from_rows(n, rows))
    }

    /// Names of the built-in layouts
    pub fn names() -> impl Iterator<Item = &'static str> {
        NAMED.iter().map(|(n, _)| *n)
    }

    /// All built-in layouts
    pub fn all() -> Vec<Self> {
        NAMED
            .iter()
            .map(|(n, rows)| Self::from_rows(n, rows))
            .collect()
    }

    /// Expected length of a layout row (0-based)
    pub fn row_len(row: usize) -> usize {
        let mid = (MID_POINT - 1) as usize;
        PLAYABLE_ROWS as usize - mid.abs_diff(row)
    }

    /// Check row count, row lengths, symbols and piece counts
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.rows.len() != PLAYABLE_ROWS as usize {
            bail!(
                "layout {:?} has {} rows, expected {}",
                self.name,
                self.rows.len(),
                PLAYABLE_ROWS
            );
        }

        let mut counts = [0u8; 2];
        for (i, row) in self.rows.iter().enumerate() {
            let len = row.chars().count();
            if len != Self::row_len(i) {
                bail!(
                    "layout {:?} row {} has {} cells, expected {}",
                    self.name,
                    i + 1,
                    len,
                    Self::row_len(i)
                );
            }
            for symbol in row.chars() {
                match Color::from_symbol(symbol) {
                    Some(color) => counts[color as usize] += 1,
                    None if symbol == '.' => {}
                    None => bail!("layout {:?} has unknown symbol {:?}", self.name, symbol),
                }
            }
        }

        for color in Color::BOTH {
            if counts[color as usize] > PIECES_PER_SIDE {
                bail!(
                    "layout {:?} has {} {} pieces, at most {} allowed",
                    self.name,
                    counts[color as usize],
                    color,
                    PIECES_PER_SIDE
                );
            }
        }
        Ok(())
    }

    /// Occupied cells and their colors. Unknown symbols are skipped.
    pub fn placements(&self) -> impl Iterator<Item = (Cell, Color)> + '_ {
        self.rows.iter().enumerate().flat_map(|(i, row)| {
            let r = i as i8 + 1;
            let first_col = (r - (MID_POINT - 1)).max(1);
            row.chars().enumerate().filter_map(move |(j, symbol)| {
                Color::from_symbol(symbol).map(|color| (Cell::new(r, first_col + j as i8), color))
            })
        })
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read layout {}", path.display()))?;
        let layout: Layout = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse layout {}", path.display()))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}
