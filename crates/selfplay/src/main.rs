//! Self-play and evaluation driver for the UCT search engine.
//!
//! `play` runs a fixed number of search iterations per ply, commits to the
//! move with the highest mean value, prints the board, and repeats until
//! the game ends; the game can optionally be saved as JSON. `evaluate`
//! plays the engine against a uniform-random baseline and reports
//! win/draw/loss counts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fmt::Display;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;
use uct_core::GameState;
use uct_mcts::{games::Connect4, games::TicTacToe, Mcts, SearchConfig};

/// UCT self-play and evaluation tool.
#[derive(Parser)]
#[command(name = "uct-selfplay")]
#[command(about = "Run UCT self-play games and evaluate against a random baseline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which bundled game to drive.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum GameChoice {
    Tictactoe,
    Connect4,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one self-play game, printing the board after every ply.
    Play {
        /// Game to play.
        #[arg(short, long, value_enum, default_value = "tictactoe")]
        game: GameChoice,

        /// Search iterations per ply.
        #[arg(short, long, default_value = "100")]
        iterations: usize,

        /// Maximum plies to play (default: until the game ends).
        #[arg(short, long)]
        plies: Option<usize>,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// UCB1 exploration constant.
        #[arg(long, default_value = "1.0")]
        exploration: f32,

        /// Random rollouts per expanded node.
        #[arg(long, default_value = "16")]
        rollouts: usize,

        /// Write the game record as JSON to this path.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Evaluate the engine against a uniform-random opponent.
    Evaluate {
        /// Game to play.
        #[arg(short, long, value_enum, default_value = "tictactoe")]
        game: GameChoice,

        /// Number of games to play (seats alternate each game).
        #[arg(short = 'n', long, default_value = "100")]
        games: usize,

        /// Search iterations per ply.
        #[arg(short, long, default_value = "100")]
        iterations: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// UCB1 exploration constant.
        #[arg(long, default_value = "1.0")]
        exploration: f32,

        /// Random rollouts per expanded node.
        #[arg(long, default_value = "16")]
        rollouts: usize,
    },
}

/// One committed ply of a self-play game.
#[derive(Serialize, Debug)]
struct PlyRecord {
    ply: usize,
    /// Chosen move, rendered with the game's move formatting.
    mv: String,
    /// Mean value of the chosen slot at commit time.
    value: f32,
    /// Simulations routed through the chosen slot.
    visits: u32,
}

/// A complete self-play game.
#[derive(Serialize, Debug)]
struct GameRecord {
    game: String,
    seed: u64,
    iterations_per_ply: usize,
    plies: Vec<PlyRecord>,
    /// Terminal payoff per player ([0.0, 0.0] if the ply limit cut the
    /// game short).
    result: Vec<f32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Play {
            game,
            iterations,
            plies,
            seed,
            exploration,
            rollouts,
            output,
        } => {
            let config = SearchConfig {
                exploration_constant: exploration,
                rollouts_per_expansion: rollouts,
            };
            let record = match game {
                GameChoice::Tictactoe => {
                    play_game(TicTacToe::new(), "tictactoe", config, iterations, plies, seed)?
                }
                GameChoice::Connect4 => {
                    play_game(Connect4::new(), "connect4", config, iterations, plies, seed)?
                }
            };

            if let Some(path) = output {
                let file = File::create(&path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                serde_json::to_writer_pretty(BufWriter::new(file), &record)
                    .context("failed to write game record")?;
                println!("Game record written to {}", path.display());
            }
            Ok(())
        }

        Commands::Evaluate {
            game,
            games,
            iterations,
            seed,
            exploration,
            rollouts,
        } => {
            let config = SearchConfig {
                exploration_constant: exploration,
                rollouts_per_expansion: rollouts,
            };
            match game {
                GameChoice::Tictactoe => {
                    run_evaluation(TicTacToe::new, config, games, iterations, seed)
                }
                GameChoice::Connect4 => {
                    run_evaluation(Connect4::new, config, games, iterations, seed)
                }
            }
        }
    }
}

/// Self-play one game: N iterations per ply, commit to argmax-Q, advance
/// the root (discarding siblings), print the board, stop on terminal.
fn play_game<G>(
    initial: G,
    name: &str,
    config: SearchConfig,
    iterations: usize,
    max_plies: Option<usize>,
    seed: u64,
) -> Result<GameRecord>
where
    G: GameState + Display,
{
    let rng = ChaCha8Rng::seed_from_u64(seed);
    let mut mcts = Mcts::new(initial, config, rng);
    let mut plies = Vec::new();

    println!("{}", mcts.root().state);
    while !mcts.root().state.is_terminal() {
        if let Some(limit) = max_plies {
            if plies.len() >= limit {
                info!(limit, "ply limit reached");
                break;
            }
        }

        mcts.run(iterations)?;
        let slot = mcts.best_slot().expect("non-terminal root has moves");
        let record = PlyRecord {
            ply: plies.len(),
            mv: format!("{:?}", mcts.root().valid_moves[slot]),
            value: mcts.root().action_values[slot],
            visits: mcts.root().visit_counts[slot],
        };
        info!(ply = record.ply, mv = %record.mv, value = record.value, "committing move");

        mcts.advance(slot)?;
        plies.push(record);
        println!("{}", mcts.root().state);
    }

    let state = &mcts.root().state;
    let result = if state.is_terminal() {
        state.result()
    } else {
        uct_core::ValueVector::zeros(state.num_players())
    };
    println!("Result: {:?}", result.as_slice());

    Ok(GameRecord {
        game: name.to_string(),
        seed,
        iterations_per_ply: iterations,
        plies,
        result: result.into_inner(),
    })
}

/// Play one game of the engine (as `seat`) against a uniform-random
/// opponent, reusing the search tree across plies. Returns the engine's
/// payoff.
fn play_versus_random<G: GameState>(
    initial: G,
    seat: usize,
    config: SearchConfig,
    iterations: usize,
    seed: u64,
) -> Result<f32> {
    let mut mcts = Mcts::new(initial, config, ChaCha8Rng::seed_from_u64(seed));
    let mut opponent = ChaCha8Rng::seed_from_u64(seed.wrapping_mul(0x9e37_79b9));

    while !mcts.root().state.is_terminal() {
        if mcts.root().state.player_to_move() == seat {
            mcts.run(iterations)?;
            let slot = mcts.best_slot().expect("non-terminal root has moves");
            mcts.advance(slot)?;
        } else {
            let moves = mcts.root().state.valid_moves();
            let mv = moves[opponent.gen_range(0..moves.len())];
            mcts.advance_move(mv)?;
        }
    }

    Ok(mcts.root().state.result()[seat])
}

/// Evaluation loop: alternate seats across games, tally W/D/L.
fn run_evaluation<G, F>(
    make_game: F,
    config: SearchConfig,
    games: usize,
    iterations: usize,
    seed: u64,
) -> Result<()>
where
    G: GameState,
    F: Fn() -> G,
{
    let mut wins = 0;
    let mut draws = 0;
    let mut losses = 0;

    println!(
        "Playing {} games: UCT ({} iterations/ply) vs uniform random",
        games, iterations
    );
    println!("================================================");

    for i in 0..games {
        // Alternate seats for fairness.
        let seat = i % 2;
        let game_seed = seed.wrapping_add(i as u64 * 1000);

        let payoff = play_versus_random(make_game(), seat, config.clone(), iterations, game_seed)?;
        if payoff > 0.5 {
            wins += 1;
        } else if payoff < -0.5 {
            losses += 1;
        } else {
            draws += 1;
        }

        if (i + 1) % 10 == 0 || i + 1 == games {
            println!(
                "  {}/{}: {} wins, {} draws, {} losses",
                i + 1,
                games,
                wins,
                draws,
                losses
            );
        }
    }

    println!("================================================");
    println!(
        "Final: {} wins, {} draws, {} losses ({:.1}% wins)",
        wins,
        draws,
        losses,
        100.0 * wins as f64 / games as f64
    );
    Ok(())
}
