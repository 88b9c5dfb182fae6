//! Root CLI structure for particle-bake

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "particle-bake")]
#[command(about = "Bake simulated particle systems into meshes and images", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Log level selected by `-v` (repeatable) and `-q`, `warn` otherwise
    pub fn log_level(&self) -> log::LevelFilter {
        match (self.verbose, self.quiet) {
            (0, true) => log::LevelFilter::Error,
            (0, false) => log::LevelFilter::Warn,
            (1, _) => log::LevelFilter::Info,
            (2, _) => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate a scene file and bake the result
    Bake(crate::commands::bake::BakeArgs),

    /// Print the first free path for a desired output path
    Resolve {
        /// Desired output path
        path: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
