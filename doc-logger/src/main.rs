//! doc-logger CLI — terminal host for the note log.
//!
//! Line numbers on the command line are 1-based, as editors display them.

use clap::{Parser, Subcommand};
use doc_logger::config::{Config, env_vars};
use doc_logger::notes::file_ops;
use doc_logger::types::EditorPosition;
use doc_logger::{CommandOutcome, DocLogError, PromptRequest, Session};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "doc-logger", about = "Attach notes to file:line locations in NOTES.md")]
struct Cli {
    /// Workspace root (default: current directory)
    #[arg(long, env = env_vars::WORKSPACE_ROOT)]
    root: Option<PathBuf>,

    /// Note file name inside the workspace root
    #[arg(long, env = env_vars::NOTES_FILE)]
    notes_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a note at FILE:LINE. Reads the text from stdin if --text is omitted.
    Add {
        file: PathBuf,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        line: u32,
        #[arg(long, short)]
        text: Option<String>,
    },
    /// Show the note at FILE:LINE and where it sits in the note file
    Open {
        file: PathBuf,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        line: u32,
    },
    /// Replace the text of the note at FILE:LINE
    Edit {
        file: PathBuf,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        line: u32,
        #[arg(long, short)]
        text: Option<String>,
    },
    /// Delete the note at FILE:LINE
    Delete {
        file: PathBuf,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        line: u32,
    },
    /// List notes in file order
    List {
        /// Only notes for this file
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Show the annotations an editor would render for FILE
    Annotations {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(name) = cli.notes_file.clone() {
        config.notes_file = name;
    }
    config.workspace_root = cli
        .root
        .clone()
        .or(config.workspace_root)
        .or_else(|| std::env::current_dir().ok())
        .map(|root| absolute(&root));

    let mut session = Session::new(&config);

    let result = run(&mut session, cli.command, &mut read_stdin);
    if let Some(message) = failure_message(&result) {
        eprintln!("{}", message);
    }
    ExitCode::from(exit_status(&result))
}

type CommandResult = doc_logger::Result<CommandOutcome<()>>;

/// Process exit status: cancelled prompts are not failures
fn exit_status(result: &CommandResult) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// What to print on stderr, if anything
fn failure_message(result: &CommandResult) -> Option<String> {
    match result {
        Ok(_) => None,
        Err(e @ DocLogError::NotFound { .. }) => Some(e.to_string()),
        Err(e) => Some(format!("Error: {}", e)),
    }
}

/// Run one command. `input` supplies note text when `--text` is absent.
fn run(
    session: &mut Session,
    command: Commands,
    input: &mut dyn FnMut(&PromptRequest) -> Option<String>,
) -> CommandResult {
    match command {
        Commands::Add { file, line, text } => {
            let target = position(&file, line);
            let mut prompt = |req: &PromptRequest| text.clone().or_else(|| input(req));
            match session.log_note(Some(&target), &mut prompt)? {
                CommandOutcome::Done(key) => {
                    println!("Note saved to {} ({})", notes_file_name(session), key);
                    Ok(CommandOutcome::Done(()))
                }
                CommandOutcome::Cancelled => Ok(CommandOutcome::Cancelled),
            }
        }
        Commands::Open { file, line } => {
            let location = session.open_note(&position(&file, line))?;
            println!("{}:{}", notes_file_name(session), location.line_index + 1);
            if let Some(note) = location.note {
                println!("{}\n{}", note.text, note.date);
            }
            Ok(CommandOutcome::Done(()))
        }
        Commands::Edit { file, line, text } => {
            let target = position(&file, line);
            let mut prompt = |req: &PromptRequest| text.clone().or_else(|| input(req));
            let outcome = session.edit_note_interactive(&target, &mut prompt)?;
            if !outcome.is_cancelled() {
                println!("Note updated in {}", notes_file_name(session));
            }
            Ok(outcome)
        }
        Commands::Delete { file, line } => {
            let target = position(&file, line);
            session.delete_note(&target.file, target.line)?;
            println!("Note deleted from {}", notes_file_name(session));
            Ok(CommandOutcome::Done(()))
        }
        Commands::List { file, json } => {
            let mut notes = session.store()?.records()?;
            if let Some(file) = file {
                let key = session.key_for(&absolute(&file), 0)?;
                notes.retain(|n| n.key.path == key.path);
            }
            if json {
                print_json(&notes);
            } else {
                for note in &notes {
                    println!("{}  {}  {}", note.date, note.key, note.text);
                }
            }
            Ok(CommandOutcome::Done(()))
        }
        Commands::Annotations { file, json } => {
            // Each CLI invocation is a fresh session, so the index starts empty
            session.rebuild_index()?;
            let annotations = session.annotations_for(&absolute(&file));
            if json {
                print_json(&annotations);
            } else {
                for annotation in &annotations {
                    let titles: Vec<&str> =
                        annotation.actions.iter().map(|a| a.title()).collect();
                    println!("{:>6}  {}", annotation.position.line + 1, titles.join("  "));
                }
            }
            Ok(CommandOutcome::Done(()))
        }
    }
}

/// Editor position for a 1-based command-line line number
fn position(file: &Path, line: u32) -> EditorPosition {
    EditorPosition::new(absolute(file), line.saturating_sub(1))
}

/// Absolute, `.`/`..`-free form of a command-line path
fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    file_ops::normalize_path(&joined)
}

fn notes_file_name(session: &Session) -> String {
    session
        .store()
        .ok()
        .and_then(|s| s.notes_path().file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_default()
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => log::error!("Failed to serialize output: {}", e),
    }
}

/// Read one line of note text from stdin. EOF cancels.
fn read_stdin(request: &PromptRequest) -> Option<String> {
    read_prompt_line(&mut io::stdin().lock(), &mut io::stderr(), request)
}

fn read_prompt_line(
    input: &mut impl BufRead,
    out: &mut impl Write,
    request: &PromptRequest,
) -> Option<String> {
    let _ = writeln!(out, "{}", request.message);
    if let Some(ref current) = request.initial_value {
        let _ = writeln!(out, "(current: {})", current);
    }
    if let Some(ref placeholder) = request.placeholder {
        let _ = writeln!(out, "{}", placeholder);
    }
    let _ = write!(out, "> ");
    let _ = out.flush();

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        Err(e) => {
            log::warn!("Failed to read note text: {}", e);
            None
        }
    }
}
