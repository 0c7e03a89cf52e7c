//! Jack Compiler CLI
//!
//! Command-line interface for compiling `.jack` programs to tokens, parse
//! tree and VM code output.

use clap::Parser as ClapParser;
use std::path::PathBuf;
use std::process;

use jackc::config::{CompileOptions, Verbosity};
use jackc::driver::compile_file;
use jackc::walker::collect_jack_files;

#[derive(ClapParser)]
#[command(name = "jackc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Jack compiler - compile .jack programs to tokens/tree/VM code", long_about = None)]
struct Cli {
    /// Input .jack files or directories containing them
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Verbosity of output
    #[arg(short = 'v', long, default_value = "minimal")]
    verbosity: String,

    /// Maximum recursion depth when traversing directories
    #[arg(short = 'd', long = "max-depth")]
    max_depth: Option<usize>,

    /// Write the <kind> value </kind> tokens file for each input
    #[arg(long = "emit-tokens")]
    emit_tokens: bool,

    /// Write the structured-markup parse tree for each input
    #[arg(long = "emit-tree")]
    emit_tree: bool,

    /// Suppress VM code output
    #[arg(long = "no-vm")]
    no_vm: bool,
}

fn main() {
    let cli = Cli::parse();

    let verbosity = match Verbosity::parse(&cli.verbosity) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let files = match collect_jack_files(&cli.paths, cli.max_depth) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if files.is_empty() {
        println!("No .jack files found in the given paths");
        return;
    }

    let options = CompileOptions {
        verbosity,
        emit_tokens: cli.emit_tokens,
        emit_tree: cli.emit_tree,
        emit_vm: !cli.no_vm,
        max_depth: cli.max_depth,
    };

    let mut had_failure = false;
    for file in &files {
        match compile_file(file, &options) {
            Ok(written) => {
                if verbosity == Verbosity::Full {
                    for path in &written {
                        println!("{} -> {}", file.display(), path.display());
                    }
                } else {
                    println!("Compiled {}", file.display());
                }
            }
            Err(e) => {
                eprintln!("Error compiling {}: {}", file.display(), e);
                had_failure = true;
            }
        }
    }

    if had_failure {
        process::exit(1);
    }
}
