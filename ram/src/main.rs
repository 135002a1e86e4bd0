//! nuPython RAM CLI

use clap::{Parser, Subcommand};
use ram::error::report_error;
use ram::interp::{Interpreter, read_source};
use ram::memory::INITIAL_CAPACITY;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ram", version, about = "nuPython memory unit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an assignment script and print the resulting memory
    Run {
        /// Script to run
        file: PathBuf,
        /// Also print the memory map
        #[arg(long)]
        map: bool,
        /// Print a JSON snapshot instead of the text dump
        #[arg(long)]
        json: bool,
        /// Number of cells memory starts with
        #[arg(long, default_value_t = INITIAL_CAPACITY)]
        initial_capacity: usize,
    },
    /// Start an interactive session
    Repl {
        /// Number of cells memory starts with
        #[arg(long, default_value_t = INITIAL_CAPACITY)]
        initial_capacity: usize,
    },
    /// Parse a script and dump the syntax tree as JSON (debug)
    Parse {
        /// Script to parse
        file: PathBuf,
    },
    /// Tokenize a script and dump tokens (debug)
    Tokens {
        /// Script to tokenize
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RAM_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run {
            file,
            map,
            json,
            initial_capacity,
        } => run_file(&file, map, json, initial_capacity),
        Command::Repl { initial_capacity } => run_repl(initial_capacity),
        Command::Parse { file } => parse_file(&file),
        Command::Tokens { file } => tokenize_file(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_file(
    path: &Path,
    map: bool,
    json: bool,
    initial_capacity: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let filename = path.display().to_string();
    let source = load(&filename, path)?;

    let mut interp = Interpreter::with_capacity(initial_capacity);
    if let Err(err) = interp.exec_source(&source) {
        report_error(&filename, &source, &err)?;
        return Err(err.into());
    }

    let memory = interp.into_memory();
    if json {
        println!("{}", serde_json::to_string_pretty(&memory.snapshot())?);
    } else {
        memory.print();
    }
    if map {
        memory.print_map();
    }
    memory.destroy();
    Ok(())
}

/// Read a script, reporting read failures like any other script error
fn load(filename: &str, path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    match read_source(path) {
        Ok(source) => Ok(source),
        Err(err) => {
            report_error(filename, "", &err)?;
            Err(err.into())
        }
    }
}

fn run_repl(initial_capacity: usize) -> Result<(), Box<dyn std::error::Error>> {
    let mut repl = ram::repl::Repl::new(initial_capacity)?;
    repl.run()?;
    Ok(())
}

fn parse_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let filename = path.display().to_string();
    let source = load(&filename, path)?;

    let program = match ram::lexer::tokenize(&source)
        .and_then(|tokens| ram::parser::parse(&source, tokens))
    {
        Ok(program) => program,
        Err(err) => {
            report_error(&filename, &source, &err)?;
            return Err(err.into());
        }
    };

    println!("{}", serde_json::to_string_pretty(&program)?);
    Ok(())
}

fn tokenize_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let filename = path.display().to_string();
    let source = load(&filename, path)?;

    let tokens = match ram::lexer::tokenize(&source) {
        Ok(tokens) => tokens,
        Err(err) => {
            report_error(&filename, &source, &err)?;
            return Err(err.into());
        }
    };
    for (tok, span) in &tokens {
        println!("{:?} @ {}", tok, span);
    }

    Ok(())
}

