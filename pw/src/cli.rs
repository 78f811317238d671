//! CLI argument parsing for promptwild

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pw")]
#[command(author, version, about = "Resolve wildcard placeholders from line lists and CSV rows", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides the config file)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the placeholders in a template
    Resolve {
        /// Template text (reads --file or stdin if not provided)
        template: Option<String>,

        /// Read the template from a file
        #[arg(short, long, conflicts_with = "template")]
        file: Option<PathBuf>,

        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of resolutions to print
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Report unresolved placeholders on stderr
        #[arg(short, long)]
        report: bool,

        /// Exit with an error if any placeholder is left unresolved
        #[arg(long)]
        strict: bool,
    },

    /// List the wildcards available in the data directory
    List,

    /// Print text unchanged (reads stdin if not provided)
    Display {
        /// Text to display
        text: Option<String>,
    },
}
