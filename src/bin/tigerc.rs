//! `tigerc` — command-line driver for the Tiger semantic core.
//!
//! Parses one source file, runs symbol resolution and the built-in
//! rule set over it, and prints the accumulated diagnostics. Exit
//! status is derived from diagnostic-list non-emptiness.
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{error, info};

/// Specifies the log level of the compiler.
#[derive(ValueEnum, Clone, Default, Debug)]
enum LogLevel {
    #[default]
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to the Tiger source file to check.
    file: PathBuf,

    /// Specify the log level of the compiler.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    verbosity: LogLevel,

    /// Emit diagnostics as a JSON array instead of one per line.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    simple_logger::init_with_level((&cli.verbosity).into()).unwrap();

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(err) => {
            error!("Failed to read {}: {err}", cli.file.display());
            return ExitCode::FAILURE;
        }
    };

    let root = match tiger_check::parser::parse(&source) {
        Ok(root) => root,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    info!("Checking {}", cli.file.display());
    let diagnostics = tiger_check::check(&root);

    if cli.json {
        match serde_json::to_string_pretty(&diagnostics) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                error!("Failed to serialize diagnostics: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for diagnostic in &diagnostics {
            println!("{diagnostic}");
        }
    }

    if diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
