//! Play-out policies used in the simulation phase.

use crate::board::GameState;
use crate::error::{MctsError, Result};
use crate::random::RandomGenerator;

/// Picks the next move while a position is played out to the end.
pub trait RolloutPolicy<T: GameState> {
    /// Chooses one of `legal_moves`, which is never empty.
    fn select_move<K: RandomGenerator>(
        &self,
        state: &T,
        legal_moves: &[T::Move],
        random: &mut K,
    ) -> Result<T::Move>;
}

/// Uniformly random play-out.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformRollout;

impl<T: GameState> RolloutPolicy<T> for UniformRollout {
    fn select_move<K: RandomGenerator>(
        &self,
        _state: &T,
        legal_moves: &[T::Move],
        random: &mut K,
    ) -> Result<T::Move> {
        random
            .choose(legal_moves)
            .copied()
            .ok_or_else(|| MctsError::InconsistentState("no legal moves to choose from".into()))
    }
}

/// Plays a fixed preferred move whenever it is legal, and a random move otherwise.
///
/// For tic-tac-toe the preferred move is the center cell.
#[derive(Debug, Clone, Copy)]
pub struct PreferredMoveRollout<M> {
    preferred: M,
}

impl<M> PreferredMoveRollout<M> {
    pub fn new(preferred: M) -> Self {
        Self { preferred }
    }
}

impl<T, M> RolloutPolicy<T> for PreferredMoveRollout<M>
where
    T: GameState<Move = M>,
    M: Copy + PartialEq,
{
    fn select_move<K: RandomGenerator>(
        &self,
        state: &T,
        legal_moves: &[M],
        random: &mut K,
    ) -> Result<M> {
        if legal_moves.contains(&self.preferred) {
            return Ok(self.preferred);
        }
        UniformRollout.select_move(state, legal_moves, random)
    }
}

/// Plays `state` out to a terminal position with `policy` and returns that position.
pub fn rollout<T, P, K>(policy: &P, state: &T, random: &mut K) -> Result<T>
where
    T: GameState,
    P: RolloutPolicy<T>,
    K: RandomGenerator,
{
    let mut current = state.clone();
    while !current.is_terminal() {
        let legal_moves = current.get_legal_moves();
        if legal_moves.is_empty() {
            return Err(MctsError::InconsistentState(
                "non-terminal state without legal moves".to_string(),
            ));
        }

        let chosen = policy.select_move(&current, &legal_moves, random)?;
        current = current.make_move(&chosen)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{GameOutcome, Player};
    use crate::boards::tic_tac_toe::TicTacToe;
    use crate::random::{CustomNumberGenerator, SeededRandomGenerator};

    #[test]
    fn center_is_always_chosen_when_legal() {
        let policy = PreferredMoveRollout::new(TicTacToe::CENTER);
        let board = TicTacToe::default().make_move(&0).unwrap();
        let moves = board.get_legal_moves();

        for seed in 0..50 {
            let mut rg = SeededRandomGenerator::new(seed);
            assert_eq!(policy.select_move(&board, &moves, &mut rg).unwrap(), 4);
        }
    }

    #[test]
    fn falls_back_to_a_legal_move() {
        let policy = PreferredMoveRollout::new(TicTacToe::CENTER);
        let board = TicTacToe::default().make_move(&4).unwrap();
        let moves = board.get_legal_moves();
        let mut rg = CustomNumberGenerator::default();

        for _ in 0..50 {
            let m = policy.select_move(&board, &moves, &mut rg).unwrap();
            assert!(moves.contains(&m));
        }
    }

    #[test]
    fn rollout_takes_center_first() {
        // arrange
        let policy = PreferredMoveRollout::new(TicTacToe::CENTER);
        let board = TicTacToe::new([0, 0, 0, 0, 0, 0, 0, 0, -1], Player::First).unwrap();

        for seed in 0..20 {
            // act
            let mut rg = SeededRandomGenerator::new(seed);
            let end = rollout(&policy, &board, &mut rg).unwrap();

            // assert
            assert!(end.is_terminal());
            assert_ne!(end.get_winner(), GameOutcome::Undetermined);
            assert_eq!(end.cells()[4], 1);
        }
    }

    #[test]
    fn rollout_of_terminal_state_is_identity() {
        let board = TicTacToe::new([1, -1, 1, 1, -1, -1, -1, 1, 1], Player::Second).unwrap();
        let mut rg = CustomNumberGenerator::default();
        let end = rollout(&UniformRollout, &board, &mut rg).unwrap();
        assert_eq!(end, board);
    }

    #[test]
    fn uniform_rollout_with_no_moves_is_inconsistent() {
        let mut rg = CustomNumberGenerator::default();
        let board = TicTacToe::default();
        let no_moves: &[u8] = &[];
        let result = UniformRollout.select_move(&board, no_moves, &mut rg);
        assert!(matches!(result, Err(MctsError::InconsistentState(_))));
    }
}
