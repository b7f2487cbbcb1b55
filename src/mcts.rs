use crate::board::{GameOutcome, GameState, Player};
use crate::config::{FinalSelection, MctsConfig};
use crate::error::{MctsError, Result};
use crate::mcts_node::MctsNode;
use crate::random::{RandomGenerator, StandardRandomGenerator};
use crate::rollout::{self, RolloutPolicy, UniformRollout};
use crate::tree::SearchTree;
use ego_tree::NodeId;
use tracing::{debug, trace};

/// The main struct for running the Monte Carlo Tree Search algorithm.
///
/// It holds the search tree, the random number generator, the rollout policy and the
/// configuration for one decision. The tree is never reused: build a new instance for
/// every move.
pub struct MonteCarloTreeSearch<T: GameState, K, P> {
    tree: SearchTree<T>,
    random: K,
    rollout_policy: P,
    config: MctsConfig,
    iterations: u32,
}

/// A builder for creating instances of `MonteCarloTreeSearch`.
///
/// This provides a convenient way to configure the MCTS search with different parameters.
pub struct MonteCarloTreeSearchBuilder<T, K, P> {
    state: T,
    random_generator: K,
    rollout_policy: P,
    config: MctsConfig,
}

impl<T: GameState> MonteCarloTreeSearchBuilder<T, StandardRandomGenerator, UniformRollout> {
    /// Creates a new builder with the given root state, an unseeded generator and
    /// uniformly random rollouts.
    pub fn new(state: T) -> Self {
        Self {
            state,
            random_generator: StandardRandomGenerator,
            rollout_policy: UniformRollout,
            config: MctsConfig::default(),
        }
    }
}

impl<T: GameState, K, P> MonteCarloTreeSearchBuilder<T, K, P> {
    /// Sets the random number generator for the MCTS search.
    pub fn with_random_generator<R: RandomGenerator>(
        self,
        rg: R,
    ) -> MonteCarloTreeSearchBuilder<T, R, P> {
        MonteCarloTreeSearchBuilder {
            state: self.state,
            random_generator: rg,
            rollout_policy: self.rollout_policy,
            config: self.config,
        }
    }

    /// Sets the policy used to play positions out during simulation.
    pub fn with_rollout_policy<Q: RolloutPolicy<T>>(
        self,
        policy: Q,
    ) -> MonteCarloTreeSearchBuilder<T, K, Q> {
        MonteCarloTreeSearchBuilder {
            state: self.state,
            random_generator: self.random_generator,
            rollout_policy: policy,
            config: self.config,
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: MctsConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the UCB1 exploration constant used during selection.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.config.exploration_constant = c;
        self
    }

    /// Sets how the final move is ranked.
    pub fn with_final_selection(mut self, final_selection: FinalSelection) -> Self {
        self.config.final_selection = final_selection;
        self
    }
}

impl<T: GameState, K: RandomGenerator, P: RolloutPolicy<T>> MonteCarloTreeSearchBuilder<T, K, P> {
    /// Builds the `MonteCarloTreeSearch` instance with the configured parameters.
    pub fn build(self) -> MonteCarloTreeSearch<T, K, P> {
        MonteCarloTreeSearch::new(
            self.state,
            self.random_generator,
            self.rollout_policy,
            self.config,
        )
    }
}

impl<T: GameState> MonteCarloTreeSearch<T, StandardRandomGenerator, UniformRollout> {
    /// Returns a new builder for `MonteCarloTreeSearch`.
    pub fn builder(
        state: T,
    ) -> MonteCarloTreeSearchBuilder<T, StandardRandomGenerator, UniformRollout> {
        MonteCarloTreeSearchBuilder::new(state)
    }

    /// Creates a search with an unseeded generator, uniform rollouts and the default config.
    pub fn from_state(state: T) -> Self {
        MonteCarloTreeSearchBuilder::new(state).build()
    }
}

impl<T: GameState, K: RandomGenerator, P: RolloutPolicy<T>> MonteCarloTreeSearch<T, K, P> {
    /// Creates a new `MonteCarloTreeSearch` instance rooted at `state`.
    ///
    /// It is recommended to use the builder pattern via `MonteCarloTreeSearch::builder()` instead.
    pub fn new(state: T, random: K, rollout_policy: P, config: MctsConfig) -> Self {
        Self {
            tree: SearchTree::new(state),
            random,
            rollout_policy,
            config,
            iterations: 0,
        }
    }

    /// Returns an immutable reference to the search tree.
    pub fn get_tree(&self) -> &SearchTree<T> {
        &self.tree
    }

    /// Returns a reference to the root node of the search tree.
    pub fn get_root(&self) -> &MctsNode<T> {
        self.tree.inner().root().value()
    }

    pub fn get_config(&self) -> &MctsConfig {
        &self.config
    }

    /// Number of completed iterations.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Performs one full iteration of the MCTS algorithm (Selection, Expansion, Simulation, Backpropagation).
    /// Returns the path of nodes that were updated during backpropagation, leaf first.
    pub fn do_iteration(&mut self) -> Result<Vec<NodeId>> {
        let mut node_id = self.select()?;

        if !self.tree.is_fully_expanded(node_id)? {
            node_id = self.tree.expand(node_id, &mut self.random)?;
        }

        let winner = self.simulate(node_id)?;
        let path = self.backpropagate(node_id, winner)?;
        self.iterations += 1;

        let leaf_height = self.tree.node(node_id)?.height;
        trace!(
            iteration = self.iterations,
            leaf_height,
            path_len = path.len(),
            ?winner,
            "MCTS iteration complete"
        );

        Ok(path)
    }

    /// Runs the MCTS search for a specified number of iterations.
    ///
    /// A failing iteration aborts the run; nothing is retried.
    pub fn iterate_n_times(&mut self, n: u32) -> Result<()> {
        for _ in 0..n {
            self.do_iteration()?;
        }
        Ok(())
    }

    /// Returns the move of the root's best child under the configured final ranking.
    pub fn best_move(&self) -> Result<T::Move> {
        let root_id = self.tree.root_id();
        let best_id = match self.config.final_selection {
            FinalSelection::HighestAverage => self.tree.best_child(root_id, 0.0)?,
            FinalSelection::MostVisited => self.tree.most_visited_child(root_id)?,
        };

        self.tree
            .node(best_id)?
            .prev_move
            .ok_or(MctsError::InvalidNode)
    }

    /// Runs `iterations` iterations and returns the chosen move. The tree is dropped on return.
    pub fn search(mut self, iterations: u32) -> Result<T::Move> {
        if self.get_root().state.is_terminal() {
            return Err(MctsError::TerminalPosition);
        }

        debug!(iterations, "MCTS search started");
        self.iterate_n_times(iterations)?;
        let best = self.best_move()?;

        debug!(
            iterations = self.iterations,
            tree_size = self.tree.len(),
            root_visits = self.get_root().visits,
            chosen = ?best,
            "MCTS search complete"
        );

        Ok(best)
    }

    /// Descends from the root while the current node is fully expanded and not terminal.
    fn select(&self) -> Result<NodeId> {
        let mut node_id = self.tree.root_id();
        while self.tree.is_fully_expanded(node_id)? && !self.tree.node(node_id)?.state.is_terminal()
        {
            node_id = self
                .tree
                .best_child(node_id, self.config.exploration_constant)?;
        }
        Ok(node_id)
    }

    /// Plays the node's state out on a scratch copy and returns the result.
    fn simulate(&mut self, node_id: NodeId) -> Result<GameOutcome> {
        let state = &self.tree.node(node_id)?.state;
        let end = rollout::rollout(&self.rollout_policy, state, &mut self.random)?;
        match end.get_winner() {
            GameOutcome::Undetermined => Err(MctsError::InconsistentState(
                "terminal state without a result".to_string(),
            )),
            outcome => Ok(outcome),
        }
    }

    /// Folds the simulation result into every node from `node_id` up to the root.
    fn backpropagate(&mut self, node_id: NodeId, winner: GameOutcome) -> Result<Vec<NodeId>> {
        let branch = self.tree.path_to_root(node_id)?;

        for &id in &branch {
            let mover = match self.tree.parent_id(id)? {
                Some(parent_id) => Some(self.tree.node(parent_id)?.state.get_current_player()),
                None => None,
            };
            self.tree.update(id, simulation_result(mover, winner))?;
        }

        Ok(branch)
    }
}

/// Reward credited to a node for one simulation.
///
/// `mover` is the side to move in the parent's state, i.e. the side that made the move
/// leading into the node; it is `None` for the root. The root is always credited 1, which
/// inflates its own statistics but never changes the move returned, since only the root's
/// children are ranked.
pub fn simulation_result(mover: Option<Player>, winner: GameOutcome) -> f64 {
    match (mover, winner) {
        (None, _) => 1.0,
        (Some(_), GameOutcome::Draw) => 0.5,
        (Some(player), GameOutcome::Win(w)) if w == player => 1.0,
        _ => 0.0,
    }
}

/// Builds a tree from `root_state`, runs `iterations` iterations and returns the chosen move.
pub fn search<T, K, P>(root_state: T, iterations: u32, random: K, rollout_policy: P) -> Result<T::Move>
where
    T: GameState,
    K: RandomGenerator,
    P: RolloutPolicy<T>,
{
    MonteCarloTreeSearch::new(root_state, random, rollout_policy, MctsConfig::default())
        .search(iterations)
}
