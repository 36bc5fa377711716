use rusty_monkey::interpreter::{Interpreter, Object};

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::{fs, process};

/// Exit code for a script that fails to parse.
const EXIT_PARSE_ERROR: i32 = 65;
/// Exit code for a script that evaluates to an error.
const EXIT_RUNTIME_ERROR: i32 = 70;

static TRACING_INIT: Once = Once::new();

/// Interpreter for the monkey language. Starts a REPL when no script is given.
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Cli {
    /// Script to run as a single program.
    script: Option<PathBuf>,

    /// Print the canonical form of each parsed program before evaluating it.
    #[clap(long)]
    print_ast: bool,

    /// REPL prompt.
    #[clap(long, default_value = ">> ")]
    prompt: String,
}

fn main() -> io::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.script {
        Some(path) => run_file(&cli, path),
        None => run_prompt(&cli),
    }
}

/// Installs a `fmt` subscriber only when `RUST_LOG` is set.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn run_prompt(cli: &Cli) -> io::Result<()> {
    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        write!(stdout, "{}", cli.prompt)?;
        stdout.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        match run(cli, &mut interpreter, &line) {
            Ok(value) => writeln!(stdout, "{}", value)?,
            Err(errors) => report_errors(&errors),
        }
    }

    writeln!(stdout)?;
    Ok(())
}

fn run_file(cli: &Cli, path: &Path) -> io::Result<()> {
    let source = fs::read_to_string(path)?;
    let mut interpreter = Interpreter::new();

    match run(cli, &mut interpreter, &source) {
        Ok(value) => {
            println!("{}", value);
            if value.is_error() {
                process::exit(EXIT_RUNTIME_ERROR);
            }
        }
        Err(errors) => {
            report_errors(&errors);
            process::exit(EXIT_PARSE_ERROR);
        }
    }

    Ok(())
}

fn run(cli: &Cli, interpreter: &mut Interpreter, source: &str) -> Result<Object, Vec<String>> {
    let (program, errors) = rusty_monkey::parse(source);
    if !errors.is_empty() {
        return Err(errors);
    }

    if cli.print_ast {
        println!("{}", program.ast_string());
    }

    Ok(interpreter.eval_program(&program))
}

fn report_errors(errors: &[String]) {
    for error in errors {
        eprintln!("{}", error);
    }
}
