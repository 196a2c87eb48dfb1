use crate::config::Config;
use crate::error::DlError;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::runner::{on_interpreter_stack, ERROR_OUTPUT};
use crate::value::Value;
use std::io::{self, Write};

/// Line-oriented REPL. Each line is one program; the environment carries
/// over between lines, so `(set x (val 1))` is visible to the next line.
pub fn start(config: &Config) {
    let session_config = config.clone();
    if let Err(error) = on_interpreter_stack(config, move || session(&session_config)) {
        eprintln!("Error starting the interpreter: {}", error);
    }
}

fn session(config: &Config) {
    println!("DLI Interpreter v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    let mut evaluator = Evaluator::with_config(config);

    loop {
        print!("> ");
        if let Err(error) = io::stdout().flush() {
            eprintln!("Error writing prompt: {}", error);
            break;
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF reached (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    println!("Goodbye!");
                    break;
                }

                match run_repl_command(line, config, &mut evaluator) {
                    Ok(value) => println!("{}", value),
                    Err(error) => {
                        println!("{}", ERROR_OUTPUT);
                        error.report(line, None);
                    }
                }
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }
}

fn run_repl_command(source: &str, config: &Config, evaluator: &mut Evaluator) -> Result<Value, DlError> {
    let mut lexer = Lexer::new(source.to_string());
    let tokens = lexer.scan_tokens()?;

    let mut parser = Parser::with_config(tokens, config);
    let expr = parser.parse()?;

    evaluator.evaluate(&expr)
}
