//! Interactive command-line entry point.
//!
//! # Responsibility
//! - Bootstrap logging and storage, then run the command loop.
//! - Keep the process alive across command failures; only `exit` leaves.

use findr_core::{
    default_log_level, init_logging, load_registry, load_search_history, sample_registry,
    save_registry, save_search_history, CandidateRegistry, SearchHistory,
};
use log::{error, warn};
use std::io::{BufRead, Write};
use std::path::PathBuf;

mod commands;
mod parser;

use commands::{execute, render_board, Outcome};

fn main() {
    let paths = match AppPaths::from_home() {
        Ok(paths) => paths,
        Err(message) => {
            eprintln!("findr: {message}");
            std::process::exit(1);
        }
    };

    if let Err(message) = init_logging(default_log_level(), &paths.log_dir.to_string_lossy()) {
        eprintln!("findr: logging disabled: {message}");
    }

    let mut registry = load_or_seed(&paths);
    let mut history = load_search_history(&paths.history_file).unwrap_or_else(|err| {
        warn!("event=search_history_load module=cli status=error error={err}");
        SearchHistory::new()
    });

    println!("Welcome to Findr. Type `help` for the command list.");
    println!("{}", render_board(registry.candidates()));

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                error!("event=stdin_read module=cli status=error error={err}");
                break;
            }
        }
        if line.trim().is_empty() {
            continue;
        }

        let outcome = run_command(&mut registry, &mut history, &line);
        println!("{}", outcome.message);
        if outcome.mutated {
            persist(&paths, &registry, &history);
        }
        if outcome.exit {
            break;
        }
    }
}

fn run_command(
    registry: &mut CandidateRegistry,
    history: &mut SearchHistory,
    line: &str,
) -> Outcome {
    match parser::parse_command(line) {
        Ok(request) => execute(registry, history, request),
        Err(err) => Outcome::message(err.to_string()),
    }
}

fn load_or_seed(paths: &AppPaths) -> CandidateRegistry {
    match load_registry(&paths.data_file) {
        Ok(Some(registry)) => registry,
        Ok(None) => sample_registry(),
        Err(err) => {
            // A corrupt data file starts an empty board rather than killing
            // the app; the broken file is left on disk untouched until the
            // next save.
            warn!("event=registry_load module=cli status=error outcome=start_empty error={err}");
            println!("Data file could not be read; starting with an empty board.");
            CandidateRegistry::new()
        }
    }
}

fn persist(paths: &AppPaths, registry: &CandidateRegistry, history: &SearchHistory) {
    if let Err(err) = save_registry(&paths.data_file, registry) {
        error!("event=registry_save module=cli status=error error={err}");
        println!("Warning: could not save the board: {err}");
    }
    if let Err(err) = save_search_history(&paths.history_file, history) {
        error!("event=search_history_save module=cli status=error error={err}");
    }
}

struct AppPaths {
    data_file: PathBuf,
    history_file: PathBuf,
    log_dir: PathBuf,
}

impl AppPaths {
    fn from_home() -> Result<Self, String> {
        let home = std::env::var("HOME").map_err(|_| "HOME is not set".to_string())?;
        let base = PathBuf::from(home).join(".local").join("share").join("findr");
        Ok(Self {
            data_file: base.join("findr.json"),
            history_file: base.join("searchhistory.json"),
            log_dir: base.join("logs"),
        })
    }
}
