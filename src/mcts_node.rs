use crate::board::GameState;

/// Represents a single node in the Monte Carlo search tree.
///
/// Each node stores the game state reached by the path from the root, the move that led
/// to it, and the statistics folded into it by backpropagation. Parent and child links
/// are kept by the arena in [`SearchTree`](crate::tree::SearchTree), not by the node.
#[derive(Debug, Clone)]
pub struct MctsNode<T: GameState> {
    /// The depth of the node in the tree. The root is at height 0.
    pub height: u32,
    /// The game state that this node represents.
    pub state: T,
    /// The move that led to this node's state from its parent. `None` for the root node.
    pub prev_move: Option<T::Move>,
    /// The number of simulations folded into this node.
    pub visits: u32,
    /// The accumulated reward; every simulation adds 0, 0.5 or 1.
    pub reward: f64,
}

impl<T: GameState> MctsNode<T> {
    /// Creates a root node for the given state.
    pub fn new(state: T) -> Self {
        MctsNode {
            height: 0,
            state,
            prev_move: None,
            visits: 0,
            reward: 0.0,
        }
    }

    /// Creates an unvisited child reached by `prev_move`.
    pub fn child(state: T, prev_move: T::Move, height: u32) -> Self {
        MctsNode {
            height,
            state,
            prev_move: Some(prev_move),
            visits: 0,
            reward: 0.0,
        }
    }

    /// Folds one simulation result into the statistics.
    pub fn update(&mut self, result: f64) {
        self.visits += 1;
        self.reward += result;
    }

    /// Calculates the average reward of this node.
    pub fn average_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward / (self.visits as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::tic_tac_toe::TicTacToe;

    #[test]
    fn update_counts_visits_and_reward() {
        let mut node = MctsNode::new(TicTacToe::default());
        assert_eq!(node.visits, 0);
        assert_eq!(node.average_reward(), 0.0);

        node.update(1.0);
        node.update(0.5);
        node.update(0.0);

        assert_eq!(node.visits, 3);
        assert_eq!(node.reward, 1.5);
        assert!((node.average_reward() - 0.5).abs() < 1e-12);
        assert!(node.reward <= node.visits as f64);
    }

    #[test]
    fn child_records_move_and_height() {
        let node = MctsNode::child(TicTacToe::default(), 4u8, 3);
        assert_eq!(node.prev_move, Some(4));
        assert_eq!(node.height, 3);
        assert_eq!(node.visits, 0);
    }
}
