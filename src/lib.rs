// DLI: an interpreter for a small parenthesized expression language
//
// Programs are a single form built from integers, additions, conditionals,
// let-bindings, one-argument functions, assignment, blocks and arrays. The
// library turns source text into one output line: the canonical rendering
// of the result, or `ERROR`.

// Public modules
pub mod ast;
pub mod config;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod repl;
pub mod runner;
pub mod value;

// Re-export commonly used items
pub use ast::Expr;
pub use config::Config;
pub use environment::Environment;
pub use error::{DlError, ErrorKind, Span};
pub use evaluator::Evaluator;
pub use lexer::{Lexer, Token, TokenType};
pub use parser::Parser;
pub use printer::render;
pub use value::Value;

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{interpret, run, run_with_config, ERROR_OUTPUT};
