use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bikeshare::{DatasetLoader, Prompter, Session};

#[derive(Parser, Debug)]
#[command(name = "bikeshare", version, about = "Explore US bikeshare trip data")]
struct Cli {
    #[arg(
        long,
        env = "BIKESHARE_DATA_DIR",
        default_value = ".",
        help = "Directory holding chicago.csv, new_york_city.csv and washington.csv"
    )]
    data_dir: PathBuf,

    #[arg(long, short, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries the session.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();
    log::debug!("data directory: {}", cli.data_dir.display());

    let prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
    let mut session = Session::new(prompter, DatasetLoader::new(&cli.data_dir));
    session.run().context("bikeshare session failed")?;

    Ok(())
}
