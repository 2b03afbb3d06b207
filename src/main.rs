use std::fs;

use clap::Parser;
use operon::{
    interpreter::environment::{Environment, Outcome, Settings},
    repl,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// operon is a numeric expression interpreter whose operators, precedence and
/// associativity come from an open grammar.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells operon to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode is a feature that automatically prints out the last present
    /// value of a script instead of every value.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Lines starting with this prefix are commands.
    #[arg(long, default_value = ":")]
    command_prefix: String,

    /// Do not continue lines starting with an operator from `ans`.
    #[arg(long)]
    no_starter: bool,

    /// Increases log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// A script, or a path with `--file`. Starts an interactive session when
    /// omitted.
    contents: Option<String>,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr))
                                  .with(filter)
                                  .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let settings = Settings { command_prefix: args.command_prefix.clone(),
                              starter:        !args.no_starter, };
    let mut env = Environment::new().with_settings(settings);

    let Some(contents) = args.contents else {
        repl::run(env);
        return;
    };

    let script = if args.file {
        fs::read_to_string(&contents).unwrap_or_else(|_| {
                                         eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
                                         std::process::exit(1);
                                     })
    } else {
        contents
    };

    let mut last = None;
    for (line, statement) in repl::statements(&script) {
        match env.run(&statement) {
            Ok(outcome) => {
                if args.pipe_mode {
                    if let Outcome::Value(Some(value)) = outcome {
                        last = Some(value);
                    }
                } else if let Err(e) = env.show(&outcome) {
                    eprintln!("Error: {e}");
                }
            },
            Err(e) => eprintln!("Error on line {line}: {e}"),
        }
    }

    if let Some(value) = last {
        println!("{value}");
    }
}
