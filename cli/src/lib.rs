pub mod ast;
mod big_cli;
mod common;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod stats;

pub use big_cli::*;
pub use common::*;
