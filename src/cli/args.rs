//! CLI argument definitions using clap
//!
//! Commands:
//! - bagtrack init --config <path>
//! - bagtrack start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bagtrack - a small, self-hostable baggage tracking service
#[derive(Parser, Debug)]
#[command(name = "bagtrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file and create the data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./bagtrack.json")]
        config: PathBuf,
    },

    /// Start the bagtrack server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./bagtrack.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
