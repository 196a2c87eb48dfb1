use clap::{value_parser, Arg, ArgMatches, Command};
use dli::runner::{interpret_on_current_stack, on_interpreter_stack};
use dli::{repl, Config, ERROR_OUTPUT};
use std::fs;
use std::path::Path;

fn main() {
    env_logger::init();

    let matches = Command::new("dli")
        .about("Evaluates a program in the parenthesized DL expression language")
        .arg(
            Arg::new("file")
                .help("The program file to evaluate")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the result line to this file instead of stdout")
                .value_name("OUTPUT"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .help("Deepest form nesting allowed while parsing")
                .value_name("N")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("max-eval-depth")
                .long("max-eval-depth")
                .help("Deepest recursion allowed while evaluating")
                .value_name("N")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("diagnostics")
                .short('d')
                .long("diagnostics")
                .help("Explain failures on stderr")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let config = config_from(&matches);

    match matches.get_one::<String>("file") {
        Some(file_path) if !matches.get_flag("interactive") => run_file(file_path, &matches, &config),
        _ => repl::start(&config),
    }
}

fn config_from(matches: &ArgMatches) -> Config {
    let mut config = Config::default();
    if let Some(depth) = matches.get_one::<usize>("max-depth") {
        config.max_depth = *depth;
    }
    if let Some(depth) = matches.get_one::<usize>("max-eval-depth") {
        config.max_eval_depth = *depth;
    }
    config
}

fn run_file(path: &str, matches: &ArgMatches, config: &Config) {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        std::process::exit(1);
    }

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    };

    let diagnostics = matches.get_flag("diagnostics");
    let filename = path.to_string_lossy().into_owned();
    let run_config = config.clone();
    let line = match on_interpreter_stack(config, move || {
        output_line(&source, &filename, diagnostics, &run_config)
    }) {
        Ok(line) => line,
        Err(e) => {
            eprintln!("Error starting the interpreter: {}", e);
            std::process::exit(1);
        }
    };

    match matches.get_one::<String>("output") {
        Some(output) => {
            if let Err(e) = fs::write(output, &line) {
                eprintln!("Error writing file '{}': {}", output, e);
                std::process::exit(1);
            }
        }
        None => println!("{}", line),
    }
}

fn output_line(source: &str, filename: &str, diagnostics: bool, config: &Config) -> String {
    match interpret_on_current_stack(source, config) {
        Ok(value) => value.to_string(),
        Err(error) => {
            if diagnostics {
                error.report(source, Some(filename));
            }
            ERROR_OUTPUT.to_string()
        }
    }
}
