use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use grid_tictactoe::ai::{Agent, MinimaxAgent, RandomAgent};
use grid_tictactoe::arena::play_series;
use grid_tictactoe::config::{AppConfig, Opponent};
use grid_tictactoe::error::MatchError;
use grid_tictactoe::game::{Board, Mark, MatchController, Player, PlayerRoster, Status};

/// N×N tic-tac-toe against an alpha-beta minimax opponent.
#[derive(Parser)]
#[command(name = "grid_tictactoe", about = "N×N tic-tac-toe with a minimax opponent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "tictactoe.toml")]
    config: PathBuf,

    /// Log filter, e.g. `info` or `grid_tictactoe=debug` (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play an interactive game on the console
    Play(PlayArgs),
    /// Run an automated series between the engine and an opponent
    Duel(DuelArgs),
    /// Print the default TOML configuration
    DefaultConfig,
}

#[derive(Args)]
struct PlayArgs {
    /// Board side length
    #[arg(long)]
    size: Option<usize>,

    /// Search depth (0 searches every empty cell)
    #[arg(long)]
    depth: Option<usize>,

    /// Disable the board-size depth tiers
    #[arg(long)]
    no_cap: bool,

    /// Let the computer move first
    #[arg(long)]
    computer_first: bool,

    /// Who plays against you
    #[arg(long, value_enum)]
    versus: Option<Opponent>,

    /// Your display name
    #[arg(long)]
    name: Option<String>,
}

#[derive(Args)]
struct DuelArgs {
    /// Board side length
    #[arg(long)]
    size: Option<usize>,

    /// Number of games
    #[arg(long)]
    games: Option<usize>,

    /// Opponent for the engine
    #[arg(long, value_enum)]
    opponent: Option<Opponent>,

    /// Seed for the random opponent
    #[arg(long)]
    seed: Option<u64>,

    /// Print every match record as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match cli.command {
        Command::Play(args) => {
            apply_play_overrides(&mut config, args);
            config.validate().context("invalid play options")?;
            run_play(&config)
        }
        Command::Duel(args) => {
            let json = args.json;
            apply_duel_overrides(&mut config, args);
            config.validate().context("invalid duel options")?;
            run_duel(&config, json)
        }
        Command::DefaultConfig => {
            print!("{}", AppConfig::default_toml()?);
            Ok(())
        }
    }
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn apply_play_overrides(config: &mut AppConfig, args: PlayArgs) {
    if let Some(size) = args.size {
        config.board.size = size;
    }
    if let Some(depth) = args.depth {
        config.search.depth = depth;
    }
    if args.no_cap {
        config.search.depth_cap = false;
    }
    if args.computer_first {
        config.play.computer_first = true;
    }
    if let Some(versus) = args.versus {
        config.play.versus = versus;
    }
    if let Some(name) = args.name {
        config.play.player_name = name;
    }
}

fn apply_duel_overrides(config: &mut AppConfig, args: DuelArgs) {
    if let Some(size) = args.size {
        config.board.size = size;
    }
    if let Some(games) = args.games {
        config.duel.games = games;
    }
    if let Some(opponent) = args.opponent {
        config.duel.opponent = opponent;
    }
    if args.seed.is_some() {
        config.duel.seed = args.seed;
    }
}

fn engine_from(config: &AppConfig) -> MinimaxAgent {
    let depth = (config.search.depth > 0).then_some(config.search.depth);
    MinimaxAgent::new(depth, config.search.depth_cap)
}

fn run_play(config: &AppConfig) -> Result<()> {
    let board = Board::square(config.board.size)?;
    let human = config.play.player_name.clone();
    let mut roster = PlayerRoster::new();

    let (first_mark, second_mark) = (Mark::X, Mark::O);
    let players = match config.play.versus {
        Opponent::Human => [
            Player::human(human, first_mark),
            Player::human(format!("{} (2)", config.play.player_name), second_mark),
        ],
        _ if config.play.computer_first => {
            [roster.automated(first_mark), Player::human(human, second_mark)]
        }
        _ => [Player::human(human, first_mark), roster.automated(second_mark)],
    };

    let mut game = MatchController::new(board, players, engine_from(config))?;
    let mut random = RandomAgent::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !game.is_over() {
        println!("\n{}", game.board());

        if !game.current_player().is_human() {
            let name = game.current_player().name().to_string();
            match config.play.versus {
                Opponent::Random => game.play_agent(&mut random)?,
                _ => game.play_automated()?,
            };
            if let Some(mv) = game.history().last() {
                println!("{name} plays {}", mv.index() + 1);
            }
            continue;
        }

        let player = game.current_player();
        print!(
            "{} ({}), cell 1-{} (u = undo, q = quit): ",
            player.name(),
            player.mark().as_char(),
            game.board().cell_count()
        );
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("reading move from stdin")?;
        match line.trim() {
            "q" => return Ok(()),
            "u" => undo_turn(&mut game),
            input => match input.parse::<usize>() {
                Ok(cell) if cell >= 1 => match game.play_human(cell - 1) {
                    Ok(_) => {}
                    Err(MatchError::InvalidMove(err)) => println!("{err}"),
                    Err(err) => return Err(err.into()),
                },
                _ => println!("enter a cell number, u or q"),
            },
        }
    }

    println!("\n{}", game.board());
    match (game.status(), game.winner()) {
        (Status::Win(_), Some(winner)) => println!("{} wins", winner.name()),
        _ => println!("draw"),
    }
    Ok(())
}

/// Undo back to the previous human turn.
fn undo_turn(game: &mut MatchController) {
    if game.undo().is_none() {
        println!("nothing to undo");
        return;
    }
    while !game.current_player().is_human() {
        if game.undo().is_none() {
            break;
        }
    }
}

fn run_duel(config: &AppConfig, json: bool) -> Result<()> {
    let mut engine = engine_from(config);
    let mut opponent: Box<dyn Agent> = match config.duel.opponent {
        Opponent::Minimax => Box::new(engine_from(config)),
        _ => Box::new(match config.duel.seed {
            Some(seed) => RandomAgent::with_seed(seed),
            None => RandomAgent::new(),
        }),
    };

    let metrics = play_series(
        config.board.size,
        config.duel.games,
        &mut engine,
        opponent.as_mut(),
        config.duel.alternate,
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(metrics.records())?);
        return Ok(());
    }

    println!(
        "{} games on {}x{}: engine {} wins ({:.1}%), {} {} wins ({:.1}%), {} draws",
        metrics.total_games(),
        config.board.size,
        config.board.size,
        metrics.wins(0),
        metrics.win_rate(0) * 100.0,
        opponent.name(),
        metrics.wins(1),
        metrics.win_rate(1) * 100.0,
        metrics.draws(),
    );
    println!("average length: {:.1} moves", metrics.average_length());
    Ok(())
}
