use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use othello_engine::play::{self, PlayOptions};

#[derive(Debug, Parser)]
#[command(author, version, about = "Play Othello in the terminal")]
struct Cli {
    /// Print the legal moves before every prompt
    #[arg(long)]
    hints: bool,

    /// Read moves from FILE (one per line) instead of stdin
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Log filter, e.g. "info", "debug"
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    log: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log.as_str())).init();

    let options = PlayOptions {
        show_hints: cli.hints,
    };
    let mut stdout = io::stdout();

    let game = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            play::run(BufReader::new(file), &mut stdout, options)?
        }
        None => play::run(io::stdin().lock(), &mut stdout, options)?,
    };

    info!("Session ended: {:?}", game.status());
    Ok(())
}
