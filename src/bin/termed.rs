//! Standalone editor binary.
//!
//! Thin wrapper around [`EditorSession`]: parses the command line, loads the
//! file, sets up raw mode and the alternate screen, runs the edit loop, and
//! persists the result when the session ends with a save.

use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use termed::{AnsiTerminal, EditorSession, ExitStatus, enable_raw_mode, fileio, is_tty};

const USAGE: &str = "usage: termed [FILE]

Edit FILE in the terminal. With no FILE, edits an empty document.

  -h, --help     print this help
  -V, --version  print the version

Keys: F1 shows the in-editor help panel.";

fn main() -> ExitCode {
    let mut path: Option<PathBuf> = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            "-V" | "--version" => {
                println!("termed {}", env!("CARGO_PKG_VERSION"));
                return ExitCode::SUCCESS;
            }
            _ if arg.starts_with('-') => {
                eprintln!("termed: unknown option: {arg}");
                eprintln!("{USAGE}");
                return ExitCode::FAILURE;
            }
            _ => {
                if path.is_some() {
                    eprintln!("termed: only one file may be given");
                    return ExitCode::FAILURE;
                }
                path = Some(PathBuf::from(arg));
            }
        }
    }

    match run(path) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("termed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: Option<PathBuf>) -> termed::Result<ExitCode> {
    if !is_tty(&io::stdin()) || !is_tty(&io::stdout()) {
        eprintln!("termed: stdin and stdout must be a terminal");
        return Ok(ExitCode::FAILURE);
    }

    let lines = match &path {
        Some(p) => fileio::load_lines(p)?,
        None => Vec::new(),
    };
    let name = path.as_ref().map_or_else(
        || "untitled".to_string(),
        |p| p.display().to_string(),
    );
    let mut session = EditorSession::from_lines(lines).with_name(&name);

    let raw_guard = enable_raw_mode()?;
    let mut terminal = AnsiTerminal::stdio()?;
    terminal.enter_alt_screen()?;
    let outcome = session.run(&mut terminal);
    terminal.leave_alt_screen()?;
    drop(raw_guard);

    let outcome = outcome?;
    match outcome.status {
        ExitStatus::Saved => {
            let target = path.unwrap_or_else(|| PathBuf::from("untitled.txt"));
            fileio::save_lines(&target, &outcome.lines)?;
            println!("termed: saved {}", target.display());
        }
        ExitStatus::Discarded => println!("termed: changes discarded"),
        ExitStatus::Aborted => {}
    }
    Ok(ExitCode::SUCCESS)
}
