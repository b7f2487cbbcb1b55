//! Contains pre-made implementations of the `GameState` trait.

/// A `GameState` implementation for the game of Tic-Tac-Toe.
pub mod tic_tac_toe;
