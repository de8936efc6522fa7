use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};
use memmap2::Mmap;

use rox::interpreter::Interpreter;
use rox::natives;
use rox::parser::Parser;
use rox::scanner::Scanner;
use rox::session::{DiagnosticSink, Outcome, Session, StderrSink};

#[derive(ClapParser, Debug)]
#[command(version, about = "Rox language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes a file, printing each token
    Tokenize { filename: PathBuf },

    /// Parses a file and prints its syntax tree as JSON
    Parse { filename: PathBuf },

    /// Runs a file as a program
    Run { filename: PathBuf },

    /// Starts an interactive prompt; declarations persist between lines
    Repl,
}

/// Maps the file and validates it as UTF-8.
fn read_source(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).with_context(|| format!("Failed to open file {:?}", filename))?;

    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat file {:?}", filename))?
        .len();
    if len == 0 {
        return Ok(String::new());
    }

    // SAFETY: the mapping is read once, immediately copied, and dropped;
    // concurrent truncation by another process is outside our control either way.
    let mmap = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to map file {:?}", filename))?;

    let text = std::str::from_utf8(&mmap)
        .with_context(|| format!("File {:?} is not valid UTF-8", filename))?;

    info!("Read {} bytes from {:?}", text.len(), filename);

    Ok(text.to_owned())
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record.module_path().unwrap_or("<unnamed>");
            let module = module.strip_prefix("rox::").unwrap_or(module);
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn new_session() -> Session {
    let mut interpreter = Interpreter::new();
    natives::register_defaults(&mut interpreter);
    Session::new(interpreter, Box::new(StderrSink))
}

fn tokenize(filename: &Path) -> Result<Outcome> {
    let source = read_source(filename)?;
    let mut outcome = Outcome::Success;
    let mut sink = StderrSink;

    for token in Scanner::new(&source) {
        match token {
            Ok(token) => println!("{}", token),
            Err(e) => {
                debug!("Tokenization error: {}", e);
                sink.report_error(&e);
                outcome = Outcome::StaticError;
            }
        }
    }

    Ok(outcome)
}

fn parse(filename: &Path) -> Result<Outcome> {
    let source = read_source(filename)?;
    let (tokens, lex_errors) = Scanner::new(&source).scan_all();
    let mut sink = StderrSink;

    for e in &lex_errors {
        sink.report_error(e);
    }

    match Parser::new(tokens).parse() {
        Ok(statements) if lex_errors.is_empty() => {
            let json = serde_json::to_string_pretty(&statements).context("Failed to encode AST")?;
            println!("{}", json);
            Ok(Outcome::Success)
        }
        Ok(_) => Ok(Outcome::StaticError),
        Err(errors) => {
            for e in &errors {
                sink.report_error(e);
            }
            Ok(Outcome::StaticError)
        }
    }
}

fn run(filename: &Path) -> Result<Outcome> {
    let source = read_source(filename)?;
    Ok(new_session().run(&source))
}

fn repl() -> Result<Outcome> {
    let mut session = new_session();
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush prompt")?;

        line.clear();
        if stdin.lock().read_line(&mut line).context("Failed to read input")? == 0 {
            break;
        }

        // A bad line shouldn't end the session.
        let outcome = session.run(&line);
        debug!("REPL unit finished: {:?}", outcome);
    }

    Ok(Outcome::Success)
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let outcome = match &args.commands {
        Commands::Tokenize { filename } => tokenize(filename)?,
        Commands::Parse { filename } => parse(filename)?,
        Commands::Run { filename } => run(filename)?,
        Commands::Repl => repl()?,
    };

    if outcome != Outcome::Success {
        debug!("Exiting with {:?}", outcome);
        std::process::exit(outcome.exit_code());
    }

    Ok(())
}
