//! Arena-backed search tree.
//!
//! All nodes live by value inside one [`ego_tree::Tree`]; parents are reached through
//! [`NodeId`] handles, so the tree has no reference cycles and is freed as a unit.

use crate::board::GameState;
use crate::error::{MctsError, Result};
use crate::mcts_node::MctsNode;
use crate::random::RandomGenerator;
use crate::ucb;
use ego_tree::{NodeId, NodeRef, Tree};

/// The tree of explored states built during a single search.
#[derive(Debug, Clone)]
pub struct SearchTree<T: GameState> {
    tree: Tree<MctsNode<T>>,
    root_id: NodeId,
}

impl<T: GameState> SearchTree<T> {
    /// Creates a tree holding only a root for `state`.
    pub fn new(state: T) -> Self {
        let tree = Tree::new(MctsNode::new(state));
        let root_id = tree.root().id();
        Self { tree, root_id }
    }

    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    /// Returns an immutable reference to the underlying arena.
    pub fn inner(&self) -> &Tree<MctsNode<T>> {
        &self.tree
    }

    /// Number of nodes in the tree, root included.
    pub fn len(&self) -> usize {
        self.tree.nodes().count()
    }

    pub fn node(&self, id: NodeId) -> Result<&MctsNode<T>> {
        Ok(self.node_ref(id)?.value())
    }

    pub fn parent_id(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node_ref(id)?.parent().map(|p| p.id()))
    }

    /// Children of `id` in insertion order.
    pub fn children_ids(&self, id: NodeId) -> Result<Vec<NodeId>> {
        Ok(self.node_ref(id)?.children().map(|c| c.id()).collect())
    }

    /// Returns `true` when every legal move from the node's state has a child.
    pub fn is_fully_expanded(&self, id: NodeId) -> Result<bool> {
        let node = self.node_ref(id)?;
        let legal_moves = node.value().state.get_legal_moves().len();
        Ok(node.children().count() == legal_moves)
    }

    /// Adds one child for a uniformly chosen untried move and returns its id.
    pub fn expand<K: RandomGenerator>(&mut self, id: NodeId, random: &mut K) -> Result<NodeId> {
        let node = self.node_ref(id)?;
        let tried: Vec<T::Move> = node
            .children()
            .filter_map(|c| c.value().prev_move)
            .collect();
        let untried: Vec<T::Move> = node
            .value()
            .state
            .get_legal_moves()
            .into_iter()
            .filter(|m| !tried.contains(m))
            .collect();

        let chosen = *random.choose(&untried).ok_or_else(|| {
            MctsError::InconsistentState("expanding a fully expanded node".to_string())
        })?;
        let next_state = node.value().state.make_move(&chosen)?;
        let child = MctsNode::child(next_state, chosen, node.value().height + 1);

        let mut parent = self.tree.get_mut(id).ok_or(MctsError::InvalidNode)?;
        Ok(parent.append(child).id())
    }

    /// Folds one simulation result into the node.
    pub fn update(&mut self, id: NodeId, result: f64) -> Result<()> {
        let mut node = self.tree.get_mut(id).ok_or(MctsError::InvalidNode)?;
        node.value().update(result);
        Ok(())
    }

    /// The child with the highest UCB1 score. Ties go to the earliest inserted child.
    pub fn best_child(&self, id: NodeId, exploration_constant: f64) -> Result<NodeId> {
        let node = self.node_ref(id)?;
        let parent_visits = node.value().visits;

        let mut best: Option<(NodeId, f64)> = None;
        for child in node.children() {
            let child_score = ucb::score(child.value(), parent_visits, exploration_constant);
            match best {
                Some((_, best_score)) if child_score <= best_score => {}
                _ => best = Some((child.id(), child_score)),
            }
        }

        best.map(|(child_id, _)| child_id)
            .ok_or(MctsError::NoExploredMoves)
    }

    /// The child with the most visits. Ties go to the earliest inserted child.
    pub fn most_visited_child(&self, id: NodeId) -> Result<NodeId> {
        let node = self.node_ref(id)?;

        let mut best: Option<(NodeId, u32)> = None;
        for child in node.children() {
            let visits = child.value().visits;
            match best {
                Some((_, best_visits)) if visits <= best_visits => {}
                _ => best = Some((child.id(), visits)),
            }
        }

        best.map(|(child_id, _)| child_id)
            .ok_or(MctsError::NoExploredMoves)
    }

    /// Ids from `id` up to the root, leaf first.
    pub fn path_to_root(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut path = vec![id];
        let mut current = self.node_ref(id)?;
        while let Some(parent) = current.parent() {
            path.push(parent.id());
            current = parent;
        }
        Ok(path)
    }

    fn node_ref(&self, id: NodeId) -> Result<NodeRef<'_, MctsNode<T>>> {
        self.tree.get(id).ok_or(MctsError::InvalidNode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;
    use crate::boards::tic_tac_toe::TicTacToe;
    use crate::random::CustomNumberGenerator;

    #[test]
    fn expand_until_full_never_duplicates_moves() {
        // arrange
        let mut tree = SearchTree::new(TicTacToe::default());
        let mut rg = CustomNumberGenerator::new(11);
        let root = tree.root_id();

        // act
        while !tree.is_fully_expanded(root).unwrap() {
            tree.expand(root, &mut rg).unwrap();
        }

        // assert
        let children = tree.children_ids(root).unwrap();
        assert_eq!(children.len(), 9);
        let mut moves: Vec<u8> = children
            .iter()
            .map(|&c| tree.node(c).unwrap().prev_move.unwrap())
            .collect();
        moves.sort();
        assert_eq!(moves, (0..9).collect::<Vec<u8>>());

        let root_state = &tree.node(root).unwrap().state;
        for &c in &children {
            let child = tree.node(c).unwrap();
            let expected = root_state.make_move(&child.prev_move.unwrap()).unwrap();
            assert_eq!(child.state, expected);
            assert_eq!(child.height, 1);
            assert_eq!(child.visits, 0);
            assert_eq!(tree.parent_id(c).unwrap(), Some(root));
        }
    }

    #[test]
    fn expand_fully_expanded_node_fails() {
        let cells = [1, -1, 1, 1, -1, -1, -1, 1, 0];
        let mut tree = SearchTree::new(TicTacToe::new(cells, Player::First).unwrap());
        let mut rg = CustomNumberGenerator::default();
        let root = tree.root_id();

        let child = tree.expand(root, &mut rg).unwrap();
        assert_eq!(tree.node(child).unwrap().prev_move, Some(8));
        assert!(tree.is_fully_expanded(root).unwrap());
        assert!(matches!(
            tree.expand(root, &mut rg),
            Err(MctsError::InconsistentState(_))
        ));
    }

    #[test]
    fn best_child_on_leaf_is_an_error() {
        let tree = SearchTree::new(TicTacToe::default());
        assert_eq!(
            tree.best_child(tree.root_id(), 0.5),
            Err(MctsError::NoExploredMoves)
        );
        assert_eq!(
            tree.most_visited_child(tree.root_id()),
            Err(MctsError::NoExploredMoves)
        );
    }

    #[test]
    fn best_child_prefers_unvisited_then_first_of_ties() {
        // arrange
        let mut tree = SearchTree::new(TicTacToe::default());
        let mut rg = CustomNumberGenerator::new(5);
        let root = tree.root_id();
        let a = tree.expand(root, &mut rg).unwrap();
        let b = tree.expand(root, &mut rg).unwrap();
        let c = tree.expand(root, &mut rg).unwrap();

        // act & assert: unvisited children are infinite, the first one wins
        assert_eq!(tree.best_child(root, 0.5).unwrap(), a);

        tree.update(a, 1.0).unwrap();
        tree.update(root, 1.0).unwrap();
        assert_eq!(tree.best_child(root, 0.5).unwrap(), b);

        tree.update(b, 1.0).unwrap();
        tree.update(c, 0.0).unwrap();
        tree.update(root, 1.0).unwrap();
        tree.update(root, 1.0).unwrap();
        assert_eq!(tree.best_child(root, 0.0).unwrap(), a);
    }

    #[test]
    fn zero_exploration_ignores_visit_count() {
        let mut tree = SearchTree::new(TicTacToe::default());
        let mut rg = CustomNumberGenerator::new(5);
        let root = tree.root_id();
        let heavy = tree.expand(root, &mut rg).unwrap();
        let lucky = tree.expand(root, &mut rg).unwrap();

        for i in 0..100 {
            tree.update(heavy, if i % 10 == 0 { 0.0 } else { 1.0 }).unwrap();
        }
        tree.update(lucky, 1.0).unwrap();
        for _ in 0..101 {
            tree.update(root, 1.0).unwrap();
        }

        assert_eq!(tree.best_child(root, 0.0).unwrap(), lucky);
        assert_eq!(tree.most_visited_child(root).unwrap(), heavy);
    }

    #[test]
    fn path_runs_leaf_to_root() {
        let mut tree = SearchTree::new(TicTacToe::default());
        let mut rg = CustomNumberGenerator::default();
        let root = tree.root_id();
        let a = tree.expand(root, &mut rg).unwrap();
        let b = tree.expand(a, &mut rg).unwrap();

        assert_eq!(tree.path_to_root(b).unwrap(), vec![b, a, root]);
        assert_eq!(tree.node(b).unwrap().height, 2);
        assert_eq!(tree.len(), 3);
    }
}
