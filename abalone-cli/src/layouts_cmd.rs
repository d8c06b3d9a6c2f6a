//! Layouts command - list, show and export starting positions
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: list_layouts(), show_layout(), export_layout()
//! - Level 3: LayoutArgs::load() - shared layout selection for other commands
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Args;

use abalone_core::{Board, Layout};

use crate::render;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Layout selection shared by `play` and `check`
#[derive(Args, Clone, Debug)]
pub struct LayoutArgs {
    /// Built-in starting layout
    #[arg(long, default_value = "standard")]
    pub layout: String,

    /// Layout JSON file (overrides --layout)
    #[arg(long, value_name = "FILE")]
    pub layout_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct LayoutsArgs {
    /// Print the board for one layout
    #[arg(long, value_name = "NAME")]
    pub show: Option<String>,

    /// Write the selected layout (--show, default standard) as JSON
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run the layouts command
pub fn run(args: LayoutsArgs) -> Result<()> {
    if let Some(path) = &args.export {
        let name = args.show.as_deref().unwrap_or("standard");
        return export_layout(name, path);
    }

    match &args.show {
        Some(name) => show_layout(name),
        None => {
            list_layouts();
            Ok(())
        }
    }
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn list_layouts() {
    println!("Available layouts:");
    for name in Layout::names() {
        println!("  {}", name);
    }
}

fn show_layout(name: &str) -> Result<()> {
    let layout = named_layout(name)?;
    println!("{}\n", layout.name);
    print!("{}", render::render_board(&Board::from_layout(&layout)));
    Ok(())
}

fn export_layout(name: &str, path: &Path) -> Result<()> {
    let layout = named_layout(name)?;
    layout
        .save(path)
        .with_context(|| format!("Failed to export layout to {}", path.display()))?;
    tracing::info!(layout = %layout.name, path = %path.display(), "layout exported");
    println!("Wrote {} to {}", layout.name, path.display());
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

impl LayoutArgs {
    /// Resolve the selected layout, preferring a file when given
    pub fn load(&self) -> Result<Layout> {
        match &self.layout_file {
            Some(path) => Layout::load(path)
                .with_context(|| format!("Failed to load layout from {}", path.display())),
            None => named_layout(&self.layout),
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn named_layout(name: &str) -> Result<Layout> {
    Layout::named(name).ok_or_else(|| {
        anyhow!(
            "unknown layout {:?} (available: {})",
            name,
            Layout::names().collect::<Vec<_>>().join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_layout_lookup() {
        assert_eq!(named_layout("Swiss Daisy").unwrap().name, "swiss-daisy");
        let err = named_layout("nope").unwrap_err().to_string();
        assert!(err.contains("standard"));
    }

    #[test]
    fn test_layout_file_takes_precedence() {
        let path = std::env::temp_dir().join(format!("abalone-cli-layout-{}.json", std::process::id()));
        Layout::named("domination").unwrap().save(&path).unwrap();

        let args = LayoutArgs {
            layout: "standard".to_string(),
            layout_file: Some(path.clone()),
        };
        let layout = args.load().unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(layout.name, "domination");
    }

    #[test]
    fn test_missing_layout_file() {
        let args = LayoutArgs {
            layout: "standard".to_string(),
            layout_file: Some(PathBuf::from("/nonexistent/layout.json")),
        };
        assert!(args.load().is_err());
    }
}
