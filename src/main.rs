use std::fs;

use clap::Parser;
use pasci::{error::Error, evaluate, run};

/// pasci runs programs written in a small Pascal-like language with nested
/// procedures and static scoping.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells pasci to look at a file instead of inline source.
    #[arg(short, long)]
    file: bool,

    /// Evaluates a bare arithmetic expression and prints its value.
    #[arg(short, long, conflicts_with = "globals")]
    expression: bool,

    /// Prints the program's global variables after it has run.
    #[arg(short, long)]
    globals: bool,

    contents: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let source = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let outcome = if args.expression {
        evaluate(&source).map(|value| println!("{value}"))
    } else {
        run(&source).map(|globals| {
            if args.globals {
                for (name, value) in &globals {
                    println!("{name} = {value}");
                }
            }
        })
    };

    if let Err(e) = outcome {
        report(&e);
        std::process::exit(1);
    }
}

fn report(error: &Error) {
    eprintln!("{}: {error}", error.kind());
}
