// File: src/runner.rs
//
// Entry points that drive the whole pipeline: lex, parse, evaluate.
//
// `run` is what the CLI calls for `hlang run`. `run_script_tests` powers
// `hlang test`: every `.hlang` file in a directory runs with its output
// captured and is compared against a sibling `.out` snapshot.

use crate::errors::HlangError;
use crate::interpreter::Interpreter;
use crate::parser::parse_source;
use colored::Colorize;
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Runs `source` on a fresh interpreter, printing `bol` output to stdout.
///
/// On a runtime error the diagnostic is written to stderr and the error is
/// returned so the caller can pick an exit code.
pub fn run(source: &str) -> Result<(), HlangError> {
    let program = parse_source(source);
    tracing::debug!(statements = program.body.len(), "running program");

    let mut interpreter = Interpreter::new();
    match interpreter.run_program(&program) {
        Ok(_) => Ok(()),
        Err(err) => {
            tracing::debug!(kind = %err.kind, "program failed");
            eprint!("{}", err);
            Err(err)
        }
    }
}

/// Runs `source` with output captured. A runtime error appends its summary
/// line after whatever was printed before it.
pub fn run_captured(source: &str) -> String {
    let program = parse_source(source);
    let buffer = Rc::new(RefCell::new(Vec::new()));

    let mut interpreter = Interpreter::new();
    interpreter.set_output(buffer.clone());
    let result = interpreter.run_program(&program);

    let mut output = String::from_utf8_lossy(&buffer.borrow()).into_owned();
    if let Err(err) = result {
        output.push_str(&err.summary());
        output.push('\n');
    }
    output
}

/// Result of one snapshot comparison
#[derive(Debug, Clone)]
pub struct ScriptOutcome {
    pub path: PathBuf,
    pub expected: String,
    pub actual: String,
    pub elapsed: Duration,
}

impl ScriptOutcome {
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScriptReport {
    pub outcomes: Vec<ScriptOutcome>,
}

impl ScriptReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// Prints one line per script, a diff for failures and a final tally
    pub fn print_summary(&self) {
        for outcome in &self.outcomes {
            if outcome.passed() {
                println!(
                    "{} {} ({:.2?})",
                    "[✓]".bright_green(),
                    outcome.path.display(),
                    outcome.elapsed
                );
            } else {
                println!("{} {}", "[✗]".bright_red(), outcome.path.display());
                println!("Expected:\n{}\nGot:\n{}\n", outcome.expected, outcome.actual);
            }
        }

        let tally = format!("Passed {}/{} tests", self.passed(), self.outcomes.len());
        if self.failed() == 0 {
            println!("\n{} {}", "[✓]".bright_green(), tally);
        } else {
            println!("\n{} {}", "[✗]".bright_red(), tally);
        }
    }
}

/// Runs every `.hlang` script in `dir` against its `.out` snapshot.
///
/// With `update`, or when a snapshot is missing, the snapshot is written from
/// the actual output (and the script counts as passing).
pub fn run_script_tests(dir: &Path, update: bool) -> io::Result<ScriptReport> {
    let mut scripts: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "hlang"))
        .collect();
    scripts.sort();

    let mut report = ScriptReport::default();
    for path in scripts {
        let source = fs::read_to_string(&path)?;
        let snapshot = path.with_extension("out");

        let start = Instant::now();
        let actual = run_captured(&source).trim().to_string();
        let elapsed = start.elapsed();

        let expected = if snapshot.exists() && !update {
            fs::read_to_string(&snapshot)?.trim().to_string()
        } else {
            tracing::debug!(path = %snapshot.display(), "writing snapshot");
            fs::write(&snapshot, format!("{}\n", actual))?;
            actual.clone()
        };

        report.outcomes.push(ScriptOutcome { path, expected, actual, elapsed });
    }

    Ok(report)
}
