pub mod completions;
pub mod rip;

use clap::{Parser, Subcommand};

/// ripper - Strip flat backgrounds from generated sprites
#[derive(Parser, Debug)]
#[command(name = "ripper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remove backgrounds from a sprite or a directory of sprites
    Rip(rip::RipArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
