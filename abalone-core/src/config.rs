//! Configuration types for game sessions

use crate::game::Color;
use crate::layout::Layout;

/// Session configuration
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Starting position
    pub layout: Layout,
    /// Side that moves first (None = drawn at random)
    pub first_player: Option<Color>,
    /// Random seed for the first-player draw (None = random)
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            layout: Layout::standard(),
            first_player: None,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Set starting layout
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Fix the side that moves first
    pub fn with_first_player(mut self, color: Color) -> Self {
        self.first_player = Some(color);
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
