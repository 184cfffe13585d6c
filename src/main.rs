// File: src/main.rs
//
// Main entry point for the hlang interpreter.
// Handles command-line argument parsing and dispatches to the appropriate
// subcommand (run, repl, test or version).

use clap::{Parser as ClapParser, Subcommand};
use colored::Colorize;
use hlang::repl::Repl;
use hlang::runner;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(ClapParser)]
#[command(
    name = "hlang",
    about = "HindiScript - A programming language in Hindi",
    version = env!("CARGO_PKG_VERSION"),
    long_about = None
)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[command(arg_required_else_help = true)]
enum Commands {
    /// Run a .hlang file
    Run {
        /// Path to the .hlang file
        file: PathBuf,
    },

    /// Launch interactive hlang REPL
    Repl,

    /// Run .hlang scripts and compare their output with .out snapshots
    Test {
        /// Directory containing the scripts
        #[arg(default_value = "tests/programs")]
        dir: PathBuf,

        /// Regenerate all .out files based on actual output
        #[arg(long)]
        update: bool,
    },

    /// Show version information
    Version,
}

/// Installs a tracing subscriber when RUST_LOG is set, e.g. `RUST_LOG=hlang=debug`
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn run_file(file: &Path) -> ExitCode {
    if !file.exists() {
        eprintln!("{} File '{}' not found", "Error:".bright_red(), file.display());
        return ExitCode::FAILURE;
    }

    if file.extension().map_or(true, |ext| ext != "hlang") {
        eprintln!(
            "{} File '{}' does not have .hlang extension",
            "Warning:".bright_yellow(),
            file.display()
        );
    }

    let code = match fs::read_to_string(file) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} reading file: {}", "Error".bright_red(), err);
            return ExitCode::FAILURE;
        }
    };

    match runner::run(&code) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_tracing();

    match cli.command {
        Commands::Run { file } => run_file(&file),

        Commands::Repl => match Repl::new().and_then(|mut repl| repl.run()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red(), err);
                ExitCode::FAILURE
            }
        },

        Commands::Test { dir, update } => match runner::run_script_tests(&dir, update) {
            Ok(report) => {
                report.print_summary();
                if report.failed() == 0 {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }
            Err(err) => {
                eprintln!(
                    "{} Failed to read test directory {}: {}",
                    "[!]".bright_red(),
                    dir.display(),
                    err
                );
                ExitCode::FAILURE
            }
        },

        Commands::Version => {
            println!("HindiScript v{}", env!("CARGO_PKG_VERSION"));
            println!("A programming language in Hindi");
            ExitCode::SUCCESS
        }
    }
}
