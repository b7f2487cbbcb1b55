//! Monte Carlo tree search for deterministic, perfect-information two-player games.
//!
//! A search builds a partial game tree from the current position, runs a fixed number of
//! selection, expansion, simulation and backpropagation passes, and returns the move of
//! the root child with the best average reward. The tree is built from scratch for every
//! decision and dropped once the move is returned.
//!
//! Any game implementing [`GameState`] can be searched; tic-tac-toe ships as the
//! reference implementation.
//!
//! # Example
//!
//! ```rust
//! use ttt_mcts::boards::tic_tac_toe::TicTacToe;
//! use ttt_mcts::mcts::MonteCarloTreeSearch;
//! use ttt_mcts::random::CustomNumberGenerator;
//! use ttt_mcts::rollout::PreferredMoveRollout;
//!
//! // Create a new Tic-Tac-Toe board
//! let board = TicTacToe::default();
//!
//! // Create and configure a new MCTS search instance using the builder
//! let mcts = MonteCarloTreeSearch::builder(board)
//!     .with_random_generator(CustomNumberGenerator::default())
//!     .with_rollout_policy(PreferredMoveRollout::new(TicTacToe::CENTER))
//!     .build();
//!
//! // Run the search and get the most promising move
//! let best_move = mcts.search(1000).unwrap();
//!
//! println!("The best move is: {:?}", best_move);
//! assert!(best_move < 9);
//! ```

/// Contains the `GameState` trait and the player and outcome enums shared by every game.
pub mod board;
/// Contains pre-made implementations of the `GameState` trait.
pub mod boards;
/// Search configuration.
pub mod config;
/// The error type shared by the search core and game implementations.
pub mod error;
/// The core module of the library, containing the `MonteCarloTreeSearch` driver.
pub mod mcts;
/// Contains the `MctsNode` struct, which represents a node in the search tree.
pub mod mcts_node;
/// Contains traits and implementations for random number generation.
pub mod random;
/// Play-out policies used to finish a position during simulation.
pub mod rollout;
/// The arena-backed search tree and its expansion and ranking operations.
pub mod tree;
/// UCB1 scoring of tree nodes.
pub mod ucb;

pub use board::{GameOutcome, GameState, Player};
pub use config::{FinalSelection, MctsConfig};
pub use error::{MctsError, Result};
pub use mcts::{MonteCarloTreeSearch, search};
