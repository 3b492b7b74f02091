use anyhow::{bail, Context, Result};
use chess_core::engine::config::{Difficulty, EngineConfig};
use chess_core::engine::eval::SimpleEvaluator;
use chess_core::engine::player::ComputerPlayer;
use chess_core::engine::Evaluator;
use chess_core::logic::board::{Board, Color};
use chess_core::logic::clock::Clock;
use chess_core::logic::game::GameState;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Headless chess engine driver")]
struct Cli {
    /// Engine configuration (JSON). Piece values are scale factors over the defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Let the engine play both sides.
    Selfplay {
        #[arg(long, default_value = "medium")]
        white: Difficulty,
        #[arg(long, default_value = "medium")]
        black: Difficulty,
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
        #[arg(long)]
        seed: Option<u64>,
        /// Pause before each engine move.
        #[arg(long, default_value_t = 0)]
        think_ms: u64,
        /// Seconds on each side's clock; unlimited when omitted.
        #[arg(long)]
        clock_secs: Option<u64>,
        #[arg(long)]
        fen: Option<String>,
    },
    /// List legal moves in a position.
    Moves {
        #[arg(long)]
        fen: Option<String>,
    },
    /// Static evaluation and status of a position.
    Eval {
        #[arg(long)]
        fen: Option<String>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    EngineConfig::load_from_json(&json).with_context(|| format!("parsing config {}", path.display()))
}

fn load_game(fen: Option<&str>, config: &EngineConfig) -> Result<GameState> {
    let game = match fen {
        Some(fen) => {
            let (board, turn) = Board::from_fen(fen).with_context(|| format!("bad FEN '{fen}'"))?;
            GameState::from_position(board, turn)
        }
        None => GameState::new(),
    };
    Ok(game.with_rules(config.rules))
}

fn selfplay(
    mut game: GameState,
    config: Arc<EngineConfig>,
    players: [Difficulty; 2],
    max_plies: usize,
    seed: u64,
    think: Duration,
    clock_secs: Option<u64>,
) -> Result<()> {
    let [white, black] = players;
    let mut white = ComputerPlayer::new(config.clone(), white, StdRng::seed_from_u64(seed));
    let mut black = ComputerPlayer::new(config, black, StdRng::seed_from_u64(seed.wrapping_add(1)));
    let mut clock = clock_secs.map(|secs| Clock::new(Duration::from_secs(secs)));

    tracing::info!(seed, "self-play from {}", game.board.to_fen_string(game.turn));

    while !game.status.is_terminal() && game.ply() < max_plies {
        let mover = game.turn;
        let start = Instant::now();
        std::thread::sleep(think);

        let player = match mover {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        let Some(mv) = player.choose_move(&game) else {
            bail!("{mover} has no move in a non-terminal position");
        };

        if let Some(clock) = clock.as_mut() {
            if let Some(loser) = clock.tick(mover, start.elapsed()) {
                game.force_time_forfeit(loser);
                break;
            }
            clock.press(mover);
        }

        let outcome = game
            .make_move(mv.from, mv.to)
            .with_context(|| format!("engine chose illegal move {}{}", mv.from, mv.to))?;
        let san = outcome.record.notation.unwrap_or_default();
        if mover == Color::White {
            println!("{}. {san}", game.ply().div_ceil(2));
        } else {
            println!("{}... {san}", game.ply() / 2);
        }
        tracing::debug!(sound = ?outcome.sound, status = ?outcome.status);
    }

    match game.winner() {
        Some(winner) => println!("{winner} wins ({:?})", game.status),
        None if game.status.is_terminal() => println!("draw ({:?})", game.status),
        None => println!("stopped after {} plies", game.ply()),
    }
    if let Some(opening) = game.current_opening() {
        println!("opening: {}", opening.name);
    }
    println!("{}", game.board.to_fen_string(game.turn));
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Selfplay {
            white,
            black,
            max_plies,
            seed,
            think_ms,
            clock_secs,
            fen,
        } => {
            let game = load_game(fen.as_deref(), &config)?;
            let seed = seed.unwrap_or_else(rand::random);
            selfplay(
                game,
                Arc::new(config),
                [white, black],
                max_plies,
                seed,
                Duration::from_millis(think_ms),
                clock_secs,
            )
        }
        Command::Moves { fen } => {
            let game = load_game(fen.as_deref(), &config)?;
            for mv in game.legal_moves() {
                println!("{}{}", mv.from, mv.to);
            }
            Ok(())
        }
        Command::Eval { fen } => {
            let game = load_game(fen.as_deref(), &config)?;
            let score = SimpleEvaluator::new(Arc::new(config)).evaluate(&game.board);
            println!("status: {:?}", game.status);
            println!("score: {score} (positive favors black)");
            Ok(())
        }
    }
}
