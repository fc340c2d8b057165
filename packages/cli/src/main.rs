mod commands;
mod config;
mod input;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{decode, grade, normalize, DecodeArgs, GradeArgs, NormalizeArgs};
use config::Project;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// genui - streaming UI trees: decode, normalize and grade
#[derive(Parser, Debug)]
#[command(name = "genui")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding genui.config.json (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a patch stream and print the operations
    Decode(DecodeArgs),

    /// Grade the tree a patch stream builds
    Grade(GradeArgs),

    /// Print the normalized tree
    Normalize(NormalizeArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    let project = || -> Result<Project> {
        let dir = match &cli.config {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Cannot get current directory")?,
        };
        Project::load(&dir)
    };

    match cli.command {
        Command::Decode(args) => decode(args).map(|_| true),
        Command::Normalize(args) => normalize(args, &project()?).map(|_| true),
        Command::Grade(args) => grade(args, &project()?),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!();
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            eprintln!();
            std::process::exit(1);
        }
    }
}
