//! Root CLI structure for gta-rs

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gta-rs")]
#[command(about = "Command-line tools for GTA1 map and style files", long_about = None)]
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

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

impl Cli {
    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            json: self.json,
            quiet: self.quiet,
        }
    }
}

/// Presentation flags shared by every command
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    /// Hide decode/encode warnings
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// CMP map operations
    Cmp {
        #[command(subcommand)]
        command: crate::commands::cmp::CmpCommands,
    },

    /// GRY/G24 style operations
    Style {
        #[command(subcommand)]
        command: crate::commands::style::StyleCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
