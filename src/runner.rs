use crate::config::Config;
use crate::error::{DlError, ErrorKind, Span};
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::value::Value;
use std::io;
use std::thread;

/// The only output a failed run ever produces.
pub const ERROR_OUTPUT: &str = "ERROR";

/// Lexes, parses and evaluates `source` against a fresh environment.
///
/// The work runs on a thread with `config.stack_size` bytes of stack, so the
/// depth limits, not the caller's stack, decide how deep a program may go.
pub fn interpret(source: &str, config: &Config) -> Result<Value, DlError> {
    let source = source.to_string();
    let run_config = config.clone();
    on_interpreter_stack(config, move || interpret_on_current_stack(&source, &run_config))
        .unwrap_or_else(|err| Err(spawn_failure(err)))
}

/// Runs a program and returns its single output line: the rendered result,
/// or `ERROR` if anything at all went wrong.
pub fn run(source: &str) -> String {
    run_with_config(source, &Config::default())
}

pub fn run_with_config(source: &str, config: &Config) -> String {
    let source = source.to_string();
    let run_config = config.clone();
    // Rendering is recursive too, so it happens on the same stack.
    let output = on_interpreter_stack(config, move || {
        interpret_on_current_stack(&source, &run_config).map(|value| value.to_string())
    })
    .unwrap_or_else(|err| Err(spawn_failure(err)));

    match output {
        Ok(line) => line,
        Err(error) => {
            log::debug!("run failed with {:?}: {}", error.kind, error);
            ERROR_OUTPUT.to_string()
        }
    }
}

/// Runs `work` on a dedicated thread sized by `config.stack_size` and waits
/// for it. A panic inside `work` is re-raised on the calling thread.
pub fn on_interpreter_stack<T, F>(config: &Config, work: F) -> io::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let handle = thread::Builder::new()
        .name("dli-interpreter".to_string())
        .stack_size(config.stack_size)
        .spawn(work)?;

    match handle.join() {
        Ok(result) => Ok(result),
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

/// `interpret` without the dedicated thread. Deep programs can overflow
/// the caller's stack before a depth limit is reached.
pub fn interpret_on_current_stack(source: &str, config: &Config) -> Result<Value, DlError> {
    let mut lexer = Lexer::new(source.to_string());
    let tokens = lexer.scan_tokens()?;

    let mut parser = Parser::with_config(tokens, config);
    let expr = parser.parse()?;

    let mut evaluator = Evaluator::with_config(config);
    let value = evaluator.evaluate(&expr)?;
    log::debug!(
        "evaluated to a {} with {} binding(s) left in the environment",
        value.type_name(),
        evaluator.environment().len()
    );
    Ok(value)
}

fn spawn_failure(err: io::Error) -> DlError {
    DlError::new(
        ErrorKind::ResourceExhausted,
        Span::single(0),
        format!("Could not start the interpreter thread: {}", err),
    )
}
