//! Search configuration.

use crate::ucb::DEFAULT_EXPLORATION_CONSTANT;

/// How the move returned by a search is picked among the root's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinalSelection {
    /// Highest average reward, i.e. UCB1 with an exploration constant of 0.
    /// Visit counts are ignored, so a child with one lucky visit can win.
    #[default]
    HighestAverage,
    /// Most visited child.
    MostVisited,
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// UCB1 exploration constant used during selection.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub exploration_constant: f64,

    /// Ranking applied to the root's children once the budget is spent.
    pub final_selection: FinalSelection,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            final_selection: FinalSelection::HighestAverage,
        }
    }
}

impl MctsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set UCB1 exploration constant
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Set final move ranking
    pub fn with_final_selection(mut self, final_selection: FinalSelection) -> Self {
        self.final_selection = final_selection;
        self
    }
}
