pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use dropzone_core::error::Result;

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Hash {
            files,
            config,
            quiet,
        } => handlers::handle_hash(files, config, quiet).await,
        Commands::Accepts { file } => handlers::handle_accepts(file),
        Commands::Config { config } => handlers::handle_config(config),
    }
}
