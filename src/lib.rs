// File: src/lib.rs
//
// Library interface for the hlang interpreter.
// Exposes the lexer, parser and interpreter for the CLI, the REPL and
// integration tests.

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod stack;

pub use errors::HlangError;
pub use runner::run;
