//! CSV exports of the current game and of the finished-game archive.

use std::fmt::Write as _;

use crate::session::statistics::GameRecord;

pub const CURRENT_GAME_HEADER: &str = "Move Number,White,Black";
pub const ARCHIVE_HEADER: &str = "Date,Result,Winner,Difficulty,Moves";
const ARCHIVE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// One row per full move; a missing black reply is an empty field.
pub fn current_game_csv(move_history: &[String]) -> String {
    let mut csv = String::from(CURRENT_GAME_HEADER);
    csv.push('\n');
    for (index, pair) in move_history.chunks(2).enumerate() {
        let white = pair.first().map(String::as_str).unwrap_or_default();
        let black = pair.get(1).map(String::as_str).unwrap_or_default();
        let _ = writeln!(csv, "{},{},{}", index + 1, quoted(white), quoted(black));
    }
    csv
}

pub fn archive_csv(games: &[GameRecord]) -> String {
    let mut csv = String::from(ARCHIVE_HEADER);
    csv.push('\n');
    for game in games {
        let date = game.date.format(ARCHIVE_DATE_FORMAT).to_string();
        let _ = writeln!(
            csv,
            "{},{},{},{},{}",
            quoted(&date),
            quoted(&game.result),
            quoted(&game.winner),
            quoted(game.difficulty.as_str()),
            quoted(&game.moves.join(" "))
        );
    }
    csv
}

/// File name for an export made on `date`, e.g. `chess_games_2024-05-01.csv`.
pub fn export_file_name(prefix: &str, date: chrono::NaiveDate) -> String {
    format!("{prefix}_{}.csv", date.format("%Y-%m-%d"))
}
