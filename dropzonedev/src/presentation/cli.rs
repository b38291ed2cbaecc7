use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "dropzone dev CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct ConfigArgs {
    /// JSON config file (camelCase keys)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override dropzoneCaption
    #[arg(long)]
    pub caption: Option<String>,
    /// Override readErrorMessage
    #[arg(long = "error-message")]
    pub error_message: Option<String>,
    /// Override chunkSize (bytes per read)
    #[arg(long = "chunk-size")]
    pub chunk_size: Option<usize>,
    /// Emit null instead of a descriptor when the read fails
    #[arg(long = "reject-on-read-error")]
    pub reject_on_read_error: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Drop each file in turn and print its descriptor (or null) as JSON
    Hash {
        files: Vec<PathBuf>,
        #[command(flatten)]
        config: ConfigArgs,
        /// Suppress the progress line on stderr
        #[arg(long)]
        quiet: bool,
    },

    /// Report whether the drop surface would accept a file
    Accepts { file: PathBuf },

    /// Print the effective configuration
    Config {
        #[command(flatten)]
        config: ConfigArgs,
    },
}
