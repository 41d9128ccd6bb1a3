//! Terminal front end: play against the computer from stdin.
//!
//! Settings come from an optional JSON file with command-line flags on top;
//! logs go to stderr through `RUST_LOG` (default `info`).

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use brain_chess::chess_errors::{ChessError, ChessResult};
use brain_chess::config::EngineConfig;
use brain_chess::engines::difficulty::Difficulty;
use brain_chess::game_state::chess_types::Color;
use brain_chess::game_state::game_state::{GameStatus, MoveResult};
use brain_chess::session::game_session::ChessSession;
use brain_chess::session::persistence::DirectoryStore;
use brain_chess::session::statistics::TracingRecorder;
use brain_chess::utils::algebraic::{algebraic_to_square, parse_coordinate_move};
use brain_chess::utils::history_export::export_file_name;
use brain_chess::utils::render_game_state::render_board;

const HELP: &str = "\
commands:
  e2e4 | e2 e4       play a move
  new                start a new game
  board              show the board
  moves [sq]         legal moves, or destinations of one piece
  difficulty <lvl>   easy, medium or hard
  export [file]      write the current game as CSV
  history [file]     write finished games as CSV
  stats              wins, losses and draws
  reset              clear wins, losses and draws
  save <name>        write the game to <name>.json
  load <name>        read the game from <name>.json
  quit";

#[derive(Parser, Debug)]
#[command(version, about = "Play chess against the computer in the terminal")]
struct Args {
    /// JSON file with engine settings; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    difficulty: Option<Difficulty>,
    /// Side played by the human.
    #[arg(long)]
    color: Option<Color>,
    /// Pause before the computer replies, in milliseconds.
    #[arg(long = "delay-ms")]
    delay_ms: Option<u64>,
    /// Search depth of the hard engine.
    #[arg(long)]
    depth: Option<u8>,
    #[arg(long)]
    seed: Option<u64>,
    /// Keep stats and the game archive in this directory between runs.
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,
}

impl Args {
    fn engine_config(&self) -> ChessResult<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_json_file(path)?,
            None => EngineConfig::default(),
        };
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(color) = self.color {
            config.human_color = color;
        }
        if let Some(delay) = self.delay_ms {
            config.ai_reply_delay_ms = delay;
        }
        if let Some(depth) = self.depth {
            config.search_depth = depth;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn main() -> ChessResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.engine_config()?;
    let mut session = match &args.data_dir {
        Some(dir) => ChessSession::with_store(config, Box::new(DirectoryStore::open(dir)?)),
        None => ChessSession::new(config),
    };
    session.add_recorder(Box::new(TracingRecorder));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", render_board(&session.state().board, &[]))?;
    writeln!(out, "type 'help' for commands")?;
    answer_with_engine(&mut session, &mut out)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match handle_command(&mut session, input, &mut out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => {
                error!(error = %err, input, "command failed");
                writeln!(out, "error: {err}")?;
            }
        }
        out.flush()?;
    }

    info!(stats = ?session.stats(), "session closed");
    Ok(())
}

enum Flow {
    Continue,
    Quit,
}

fn handle_command(
    session: &mut ChessSession,
    input: &str,
    out: &mut impl Write,
) -> ChessResult<Flow> {
    let mut words = input.split_whitespace();
    let command = words.next().unwrap_or_default();
    let argument = words.next();

    match (command, argument) {
        ("quit" | "exit", _) => return Ok(Flow::Quit),
        ("help", _) => writeln!(out, "{HELP}")?,
        ("new", _) => {
            session.new_game();
            writeln!(out, "{}", render_board(&session.state().board, &[]))?;
            answer_with_engine(session, out)?;
        }
        ("board", _) => writeln!(out, "{}", render_board(&session.state().board, &[]))?,
        ("moves", Some(square)) => {
            let square = algebraic_to_square(square)?;
            let moves = session.get_valid_moves(square);
            writeln!(out, "{}", render_board(&session.state().board, &moves))?;
            let list: Vec<String> = moves.iter().map(ToString::to_string).collect();
            writeln!(out, "{square}: {}", list.join(" "))?;
        }
        ("moves", None) => {
            let list: Vec<String> = session.legal_moves().iter().map(ToString::to_string).collect();
            writeln!(out, "{}", list.join(" "))?;
        }
        ("difficulty", Some(level)) => {
            session.set_difficulty(level.parse()?);
            writeln!(out, "difficulty set to {}", session.config().difficulty)?;
        }
        ("export", path) => {
            let path = csv_path(path, "chess_current_game");
            fs::write(&path, session.export_current_game_csv())?;
            writeln!(out, "wrote {}", path.display())?;
        }
        ("history", path) => {
            let path = csv_path(path, "chess_games");
            fs::write(&path, session.export_archive_csv())?;
            writeln!(out, "wrote {}", path.display())?;
        }
        ("stats", _) => {
            let stats = session.stats();
            writeln!(
                out,
                "wins {} losses {} draws {}",
                stats.wins, stats.losses, stats.draws
            )?;
        }
        ("reset", _) => {
            session.reset_stats();
            writeln!(out, "stats cleared")?;
        }
        ("save", Some(name)) => {
            let (mut store, key) = game_file(name)?;
            session.save_game_to(&mut store, &key)?;
            writeln!(out, "saved {name}")?;
        }
        ("load", Some(name)) => {
            let (store, key) = game_file(name)?;
            session.load_game_from(&store, &key)?;
            writeln!(out, "{}", render_board(&session.state().board, &[]))?;
            answer_with_engine(session, out)?;
        }
        _ => {
            let (from, to) = parse_coordinate_move(input)
                .map_err(|_| ChessError::InvalidSetting(format!("unknown command '{input}'")))?;
            let result = session.play_human_move(from, to)?;
            report_move(out, "you", &result)?;
            writeln!(out, "{}", render_board(&session.state().board, &[]))?;
            answer_with_engine(session, out)?;
        }
    }
    Ok(Flow::Continue)
}

/// Explicit path, or `<prefix>_<today>.csv` in the working directory.
fn csv_path(explicit: Option<&str>, prefix: &str) -> PathBuf {
    match explicit {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(export_file_name(prefix, Local::now().date_naive())),
    }
}

/// `dir/name` or `dir/name.json` maps to key `name` in a store rooted at `dir`.
fn game_file(name: &str) -> ChessResult<(DirectoryStore, String)> {
    let path = Path::new(name);
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let key = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| ChessError::InvalidSetting(format!("bad game file '{name}'")))?;
    Ok((DirectoryStore::open(dir)?, key.to_owned()))
}

/// Let the computer move while it is on turn, pausing first like the web board did.
fn answer_with_engine(session: &mut ChessSession, out: &mut impl Write) -> ChessResult<()> {
    while session.ai_to_move() {
        thread::sleep(Duration::from_millis(session.config().ai_reply_delay_ms));
        let Some(result) = session.play_ai_move()? else {
            break;
        };
        report_move(out, session.engine_name(), &result)?;
        writeln!(out, "{}", render_board(&session.state().board, &[]))?;
    }
    Ok(())
}

fn report_move(out: &mut impl Write, who: &str, result: &MoveResult) -> ChessResult<()> {
    writeln!(out, "{who}: {}", result.notation)?;
    match result.status {
        GameStatus::Checkmate { winner } => writeln!(out, "checkmate, {winner} wins")?,
        GameStatus::Stalemate => writeln!(out, "stalemate, draw")?,
        GameStatus::Check => writeln!(out, "check")?,
        GameStatus::Ongoing => {}
    }
    Ok(())
}
