use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use zones::doc::ZoneStore;
use zones::normalize::{Size, to_screen};
use zones::persist::{self, Decoded, PersistError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{count} malformed record(s) in {path}")]
    Malformed { count: usize, path: PathBuf },
    #[error("reference size must be positive, got {width}x{height}")]
    EmptyReference { width: i32, height: i32 },
}

#[derive(Parser, Debug)]
#[command(name = "zones-cli", about = "Inspect persisted zone documents")]
struct Cli {
    /// Zones document to read.
    #[arg(long, env = "ZONEPICK_ZONES_FILE", default_value = zones::consts::DEFAULT_ZONES_FILE)]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every zone in normalized space.
    List,
    /// Report malformed records; fails if there are any.
    Check,
    /// Print every zone's screen rectangle for a reference size.
    Project {
        #[arg(long)]
        width: i32,
        #[arg(long)]
        height: i32,
    },
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let decoded = persist::load(&cli.file)?;

    match cli.command {
        Command::List => print_json(&list_json(&decoded.store)),
        Command::Check => {
            let report = check_json(&decoded);
            print_json(&report)?;
            if decoded.skipped.is_empty() {
                Ok(())
            } else {
                Err(CliError::Malformed { count: decoded.skipped.len(), path: cli.file })
            }
        }
        Command::Project { width, height } => {
            let reference = Size::new(width, height);
            if reference.is_empty() {
                return Err(CliError::EmptyReference { width, height });
            }
            print_json(&project_json(&decoded.store, reference))
        }
    }
}

fn list_json(store: &ZoneStore) -> Value {
    let zones: Vec<Value> = store
        .iter()
        .enumerate()
        .map(|(index, zone)| {
            json!({
                "index": index,
                "topleft": [zone.rect.left, zone.rect.top],
                "size": [zone.rect.width, zone.rect.height],
                "score": zone.score,
            })
        })
        .collect();
    Value::Array(zones)
}

fn check_json(decoded: &Decoded) -> Value {
    let skipped: Vec<Value> = decoded
        .skipped
        .iter()
        .map(|s| json!({ "position": s.position, "reason": s.reason }))
        .collect();
    let max_score: i64 = decoded.store.iter().filter(|z| z.is_reward()).map(|z| i64::from(z.score)).sum();
    json!({
        "zones": decoded.store.len(),
        "max_score": max_score,
        "skipped": skipped,
    })
}

fn project_json(store: &ZoneStore, reference: Size) -> Value {
    let rects: Vec<Value> = store
        .iter()
        .enumerate()
        .map(|(index, zone)| {
            let r = to_screen(zone.rect, reference);
            json!({
                "index": index,
                "left": r.left,
                "top": r.top,
                "width": r.width,
                "height": r.height,
                "score": zone.score,
            })
        })
        .collect();
    Value::Array(rects)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
