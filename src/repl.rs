// File: src/repl.rs
//
// Interactive REPL (Read-Eval-Print Loop) for hlang.
// Provides an interactive shell for executing hlang code with features like:
// - Multi-line input for blocks (keep typing until braces balance)
// - Command history with up/down arrow navigation
// - Special commands (:help, :clear, :quit, :vars, :reset)
// - Persistent state across inputs
// - Errors are reported and the session keeps going

use crate::interpreter::{Interpreter, Value};
use crate::parser::parse_source;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// REPL session that maintains interpreter state and handles user interaction
pub struct Repl {
    interpreter: Interpreter,
    editor: DefaultEditor,
}

impl Repl {
    /// Creates a new REPL session with a fresh interpreter
    pub fn new() -> Result<Self, ReadlineError> {
        let editor = DefaultEditor::new()?;
        Ok(Repl { interpreter: Interpreter::new(), editor })
    }

    fn show_banner(&self) {
        println!(
            "{}",
            format!("hlang REPL v{} - Interactive Shell", env!("CARGO_PKG_VERSION")).bright_cyan()
        );
        println!(
            "  {} Use {} for commands or {} to exit",
            "Welcome!".bright_green(),
            ":help".bright_yellow(),
            ":quit".bright_yellow()
        );
        println!("  {} Multi-line input: leave a brace open", "Tip:".bright_magenta());
        println!();
    }

    /// Starts the REPL loop
    pub fn run(&mut self) -> Result<(), ReadlineError> {
        self.show_banner();

        let mut buffer = String::new();

        loop {
            let prompt = if buffer.is_empty() {
                "hlang> ".bright_green().to_string()
            } else {
                "....> ".bright_blue().to_string()
            };

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.as_str());

                    if buffer.is_empty() && line.trim().starts_with(':') {
                        if self.handle_command(line.trim()) {
                            continue;
                        }
                        break;
                    }

                    buffer.push_str(&line);
                    buffer.push('\n');

                    if is_input_complete(&buffer) {
                        self.eval_input(&buffer);
                        buffer.clear();
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C (Ctrl+D or :quit to exit)".bright_yellow());
                    buffer.clear();
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "\nAlvida!".bright_cyan());
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    /// Handles special REPL commands starting with ':'
    /// Returns true to continue REPL, false to quit
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            ":help" | ":h" => {
                self.show_help();
                true
            }
            ":quit" | ":q" | ":exit" => {
                println!("{}", "Alvida!".bright_cyan());
                false
            }
            ":clear" | ":c" => {
                print!("\x1B[2J\x1B[1;1H");
                self.show_banner();
                true
            }
            ":vars" | ":v" => {
                self.show_variables();
                true
            }
            ":reset" | ":r" => {
                self.interpreter = Interpreter::new();
                println!("{}", "✓ Environment reset".bright_green());
                true
            }
            _ => {
                println!(
                    "{} Unknown command: {}. Type {} for available commands.",
                    "Error:".bright_red(),
                    cmd.bright_yellow(),
                    ":help".bright_yellow()
                );
                true
            }
        }
    }

    fn show_help(&self) {
        println!();
        println!("{}", "REPL Commands:".bright_cyan().bold());
        println!("  {}  Display this help message", ":help  or :h".bright_yellow());
        println!("  {}  Exit the REPL", ":quit  or :q".bright_yellow());
        println!("  {}  Clear the screen", ":clear or :c".bright_yellow());
        println!("  {}  Show global variables", ":vars  or :v".bright_yellow());
        println!("  {}  Reset environment", ":reset or :r".bright_yellow());
        println!();
        println!("{}", "Examples:".bright_cyan().bold());
        println!("  {}", "hlang> ye naam = \"duniya\"".dimmed());
        println!("  {}", "hlang> firseKaro namaste(kaun) {".dimmed());
        println!("  {}", "....>     bol(+ \"namaste \" kaun)".dimmed());
        println!("  {}", "....> }".dimmed());
        println!("  {}", "hlang> namaste(naam)".dimmed());
        println!();
    }

    fn show_variables(&self) {
        let bindings = self.interpreter.global_bindings();
        println!();
        if bindings.is_empty() {
            println!("  {}", "(no variables defined)".dimmed());
        }
        for (name, value) in bindings {
            println!("  {} = {}", name.bright_yellow(), format_value(&value));
        }
        println!();
    }

    /// Runs one complete input as a program on the persistent interpreter
    fn eval_input(&mut self, input: &str) {
        if input.trim().is_empty() {
            return;
        }

        let program = parse_source(input);
        let echo = program.body.last().is_some_and(|node| node.is_expression());

        match self.interpreter.run_program(&program) {
            Ok(Value::Null) => {}
            Ok(value) if echo => println!("{} {}", "=>".bright_blue(), format_value(&value)),
            Ok(_) => {}
            Err(err) => print!("{}", err),
        }
    }
}

/// Formats a value for the REPL: strings are quoted so they stand apart from numbers
fn format_value(value: &Value) -> String {
    match value {
        Value::Str(s) => format!("\"{}\"", s).bright_green().to_string(),
        Value::Number(_) => value.to_string().bright_white().to_string(),
        Value::Bool(_) => value.to_string().bright_magenta().to_string(),
        Value::Null => value.to_string().dimmed().to_string(),
        Value::Function(function) => {
            format!("<function {}({})>", function.name, function.params.join(", "))
                .bright_cyan()
                .to_string()
        }
    }
}

/// Checks if the input is complete: braces and parentheses balanced, no
/// string left open. Quotes and `//` comments are honored.
pub fn is_input_complete(input: &str) -> bool {
    let mut depth: i64 = 0;
    let mut quote: Option<char> = None;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if let Some(open) = quote {
            if ch == '\\' {
                chars.next();
            } else if ch == open {
                quote = None;
            }
            continue;
        }

        match ch {
            '"' | '\'' => quote = Some(ch),
            '/' if chars.peek() == Some(&'/') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        break;
                    }
                }
            }
            '{' | '(' => depth += 1,
            '}' | ')' => depth -= 1,
            _ => {}
        }
    }

    quote.is_none() && depth <= 0
}
