use crate::error::Result;
use std::fmt::Debug;

/// The central trait of the library, defining the interface for a game state.
///
/// To search a custom game, this trait must be implemented. All operations are pure:
/// making a move never mutates the state it is called on, it produces a new one.
///
/// Implementations must keep `is_terminal` and `get_legal_moves` consistent: a state
/// is terminal exactly when it has no legal moves left to play.
pub trait GameState: Clone {
    /// The type representing a move in the game. This could be a simple `u8` for a board position
    /// or a more complex struct for games with intricate actions.
    type Move: Copy + PartialEq + Debug;

    /// Returns all moves playable from this state. Empty when no moves remain.
    fn get_legal_moves(&self) -> Vec<Self::Move>;

    /// Returns the successor state reached by playing `m`, with the side to move flipped.
    ///
    /// Fails with [`MctsError::IllegalMove`](crate::error::MctsError::IllegalMove) if `m`
    /// is not in the current legal move set.
    fn make_move(&self, m: &Self::Move) -> Result<Self>;

    /// Returns `true` when the game is decided or no legal moves remain.
    fn is_terminal(&self) -> bool;

    /// Returns the result of the game, or [`GameOutcome::Undetermined`] while it is still running.
    fn get_winner(&self) -> GameOutcome;

    /// Returns the side to move in this state.
    fn get_current_player(&self) -> Player;
}

/// The two sides of a two-player game.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Player {
    /// The side that moves first from the initial position.
    First,
    /// The side that moves second.
    Second,
}

impl Player {
    /// Returns the other side.
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

/// Represents the possible results of a game.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GameOutcome {
    /// No winner yet and moves remain.
    Undetermined,
    /// The given player has won.
    Win(Player),
    /// The game has ended in a draw.
    Draw,
}

impl GameOutcome {
    /// Returns `true` for a win or a draw.
    pub fn is_decided(&self) -> bool {
        !matches!(self, GameOutcome::Undetermined)
    }
}
