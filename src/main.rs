use std::fs;

use clap::Parser;
use keel::run;

/// keel is a small, statically typed scripting language with a tree-walking
/// interpreter.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the script to run.
    path: String,
}

fn main() {
    let args = Args::parse();

    let source = fs::read_to_string(&args.path).unwrap_or_else(|_| {
                     eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                               &args.path);
                     std::process::exit(1);
                 });

    if let Err(e) = run(&source) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
