extern crate ttt_mcts;

use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;
use ttt_mcts::boards::tic_tac_toe::TicTacToe;
use ttt_mcts::random::{RandomGenerator, StandardRandomGenerator};
use ttt_mcts::rollout::PreferredMoveRollout;
use ttt_mcts::{GameOutcome, GameState, MonteCarloTreeSearch, Player};

const AI_ITERATIONS: u32 = 1000;

/// Plays the search (X) against a human typing cells 0-8 with `--play`, or against a
/// random opponent otherwise. `O` always moves first.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let human = std::env::args().any(|a| a == "--play");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut opponent_rng = StandardRandomGenerator;

    let mut game = match TicTacToe::new([0; 9], Player::Second) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    while !game.is_terminal() {
        println!("{game}");

        let chosen = if game.get_current_player() == Player::First {
            println!("AI's Turn:");
            match ai_move(game) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("Search failed: {e}");
                    return;
                }
            }
        } else if human {
            println!("Your Turn:");
            match read_move(&game, &mut lines) {
                Some(m) => m,
                None => return,
            }
        } else {
            let moves = game.get_legal_moves();
            match opponent_rng.choose(&moves) {
                Some(&m) => m,
                None => return,
            }
        };

        game = match game.make_move(&chosen) {
            Ok(next) => next,
            Err(e) => {
                eprintln!("{e}");
                return;
            }
        };
    }

    println!("{game}");
    match game.get_winner() {
        GameOutcome::Win(Player::First) => println!("AI Wins!"),
        GameOutcome::Win(Player::Second) if human => println!("You Win!"),
        GameOutcome::Win(Player::Second) => println!("Random Player Wins!"),
        _ => println!("Draw!"),
    }
}

fn ai_move(game: TicTacToe) -> ttt_mcts::Result<u8> {
    MonteCarloTreeSearch::builder(game)
        .with_random_generator(StandardRandomGenerator)
        .with_rollout_policy(PreferredMoveRollout::new(TicTacToe::CENTER))
        .build()
        .search(AI_ITERATIONS)
}

/// Reads cells until a legal one is entered. `None` on end of input.
fn read_move<B: BufRead>(game: &TicTacToe, lines: &mut io::Lines<B>) -> Option<u8> {
    loop {
        if let Err(e) = io::stdout().flush() {
            eprintln!("{e}");
            return None;
        }
        let line = lines.next()?.ok()?;
        match line.trim().parse::<u8>() {
            Ok(m) if game.is_legal_move(m) => return Some(m),
            _ => {
                println!("Illegal Move! Try Again:");
                println!("{game}");
                print!("Your Turn : ");
            }
        }
    }
}
