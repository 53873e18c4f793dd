//! Command line interface

use clap::Parser;

use crate::config::DEFAULT_CONFIG_PATH;

/// Serve a random image from a directory on every request
#[derive(Parser, Debug, Clone)]
#[command(name = "random-image-server")]
#[command(version)]
pub struct Cli {
    /// Log every request (client, method, path, selected file, elapsed time)
    #[arg(short, long)]
    pub verbose: bool,

    /// Path of the YAML configuration file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,
}
