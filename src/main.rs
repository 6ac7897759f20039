use std::{fs, io, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use pyrite::{
    Session,
    repl::{Repl, ReplConfig},
};
use tracing_subscriber::EnvFilter;

/// pyrite is a small interpreter for an indentation-sensitive, Python-like
/// scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script file to run. Starts the interactive prompt when omitted.
    script: Option<PathBuf>,

    /// Runs the given source text instead of a script file.
    #[arg(short, long, conflicts_with = "script")]
    command: Option<String>,

    /// Does not print the banner when starting the interactive prompt.
    #[arg(short, long)]
    quiet: bool,

    /// Logs lexer, parser and evaluator activity to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    install_tracing(args.verbose);

    let source = match (&args.command, &args.script) {
        (Some(command), _) => command.clone(),
        (None, Some(path)) => fs::read_to_string(path).with_context(|| {
                                                          format!("Failed to read the script '{}'. Perhaps this file does not exist?",
                                                                  path.display())
                                                      })?,
        (None, None) => {
            let mut config = ReplConfig::default();
            if args.quiet {
                config.banner = None;
            }
            let stdin = io::stdin();
            Repl::new(config, stdin.lock(), io::stdout()).run()
                                                        .context("Interactive session failed")?;
            return Ok(ExitCode::SUCCESS);
        },
    };

    Ok(run_source(&source))
}

/// Runs a whole script, echoing results the same way the prompt does.
///
/// Each result is printed as soon as its statement finishes, so a runtime
/// error still leaves the output of the statements before it.
fn run_source(source: &str) -> ExitCode {
    let mut session = Session::new();

    let outcome = session.run_each(source, |evaluation| {
                             if let Some(text) = evaluation.echo() {
                                 println!("{text}");
                             }
                         });

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn install_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                     .with_writer(io::stderr)
                                     .try_init();
}
