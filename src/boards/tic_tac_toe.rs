use crate::board::{GameOutcome, GameState, Player};
use crate::error::{MctsError, Result};
use std::fmt;

const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// An implementation of the `GameState` trait for the game of Tic-Tac-Toe.
///
/// The board is a 9-element array in row-major order. `X` (the first player) is stored
/// as `+1`, `O` as `-1` and an empty cell as `0`. A move is a `u8` from 0 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicTacToe {
    cells: [i8; 9],
    player: Player,
}

impl TicTacToe {
    /// The center cell, a strong opening and defensive move.
    pub const CENTER: u8 = 4;

    /// Creates a position from raw cells with `player` to move.
    ///
    /// Fails with [`MctsError::InvalidBoard`] if any cell is not `-1`, `0` or `1`.
    pub fn new(cells: [i8; 9], player: Player) -> Result<Self> {
        if let Some((i, c)) = cells.iter().enumerate().find(|(_, c)| !(-1..=1).contains(*c)) {
            return Err(MctsError::InvalidBoard(format!("cell {i} holds {c}")));
        }
        Ok(Self { cells, player })
    }

    pub fn cells(&self) -> &[i8; 9] {
        &self.cells
    }

    pub fn is_legal_move(&self, m: u8) -> bool {
        self.get_legal_moves().contains(&m)
    }

    fn mark(player: Player) -> i8 {
        match player {
            Player::First => 1,
            Player::Second => -1,
        }
    }

    fn line_winner(&self) -> Option<Player> {
        WINNING_LINES.iter().find_map(|line| {
            let sum: i32 = line.iter().map(|&i| i32::from(self.cells[i])).sum();
            match sum {
                3 => Some(Player::First),
                -3 => Some(Player::Second),
                _ => None,
            }
        })
    }

    fn has_empty_cell(&self) -> bool {
        self.cells.contains(&0)
    }
}

impl Default for TicTacToe {
    /// Creates an empty board with `X` to move.
    fn default() -> Self {
        Self {
            cells: [0; 9],
            player: Player::First,
        }
    }
}

impl GameState for TicTacToe {
    type Move = u8;

    fn get_legal_moves(&self) -> Vec<Self::Move> {
        if self.line_winner().is_some() {
            return Vec::new();
        }

        self.cells
            .iter()
            .enumerate()
            .filter(|(_, x)| **x == 0)
            .map(|(i, _)| i as u8)
            .collect()
    }

    fn make_move(&self, m: &Self::Move) -> Result<Self> {
        if !self.is_legal_move(*m) {
            return Err(MctsError::IllegalMove(format!(
                "cell {m} is not playable on this board"
            )));
        }

        let mut cells = self.cells;
        cells[*m as usize] = TicTacToe::mark(self.player);
        Ok(Self {
            cells,
            player: self.player.opponent(),
        })
    }

    fn is_terminal(&self) -> bool {
        self.get_winner().is_decided()
    }

    fn get_winner(&self) -> GameOutcome {
        if let Some(player) = self.line_winner() {
            return GameOutcome::Win(player);
        }

        if self.has_empty_cell() {
            GameOutcome::Undetermined
        } else {
            GameOutcome::Draw
        }
    }

    fn get_current_player(&self) -> Player {
        self.player
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            let symbols: Vec<&str> = chunk
                .iter()
                .map(|&c| match c {
                    1 => "X",
                    -1 => "O",
                    _ => " ",
                })
                .collect();
            writeln!(f, "{}", symbols.join(" | "))?;
            if row < 2 {
                writeln!(f, "{}", "-".repeat(9))?;
            }
        }
        Ok(())
    }
}
