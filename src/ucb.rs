//! UCB1 scoring used to rank sibling nodes.

use crate::board::GameState;
use crate::mcts_node::MctsNode;

/// Exploration constant used while descending the tree.
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = 0.5;

/// Calculates the UCB1 (Upper Confidence Bound 1) value from raw statistics.
///
/// Unvisited nodes score `+inf`. A parent with a single visit gives no exploration
/// bonus, since `ln(1) == 0`.
pub fn ucb1(reward: f64, visits: u32, parent_visits: u32, exploration_constant: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }

    let visits = visits as f64;
    reward / visits + exploration_constant * f64::sqrt(f64::ln(parent_visits as f64) / visits)
}

/// UCB1 score of `node` under a parent visited `parent_visits` times.
pub fn score<T: GameState>(node: &MctsNode<T>, parent_visits: u32, exploration_constant: f64) -> f64 {
    ucb1(node.reward, node.visits, parent_visits, exploration_constant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::tic_tac_toe::TicTacToe;

    #[test]
    fn unvisited_is_infinite() {
        for c in [0.0, 0.5, 1.0, 100.0] {
            assert_eq!(ucb1(0.0, 0, 10, c), f64::INFINITY);
        }
        let node = MctsNode::new(TicTacToe::default());
        assert_eq!(score(&node, 1, 0.5), f64::INFINITY);
    }

    #[test]
    fn matches_formula() {
        let (reward, visits, parent_visits, c) = (3.5, 7u32, 40u32, 0.5);
        let expected = 3.5 / 7.0 + 0.5 * ((40f64).ln() / 7.0).sqrt();
        assert!((ucb1(reward, visits, parent_visits, c) - expected).abs() < 1e-12);
    }

    #[test]
    fn single_parent_visit_has_no_bonus() {
        assert_eq!(ucb1(1.0, 1, 1, 0.5), 1.0);
        assert_eq!(ucb1(0.5, 1, 1, 2.0), 0.5);
    }

    #[test]
    fn zero_constant_is_average_reward() {
        let mut node = MctsNode::new(TicTacToe::default());
        node.update(1.0);
        node.update(0.0);
        node.update(0.5);
        node.update(0.5);
        assert!((score(&node, 1000, 0.0) - 0.5).abs() < 1e-12);
    }
}
