//! Flare CLI - Command-line interface for the Flare fireworks show

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, render, simulate, ShowArgs};

#[derive(Parser)]
#[command(name = "flare")]
#[command(about = "Looping particle fireworks message show", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render frames of the show to PNG images (headless)
    Render {
        #[command(flatten)]
        show: ShowArgs,

        /// Output directory for frame images
        #[arg(short, long, default_value = "frames")]
        output: String,

        /// Save every Nth frame
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
        every: u64,
    },

    /// Run the show without drawing and report statistics
    Simulate {
        #[command(flatten)]
        show: ShowArgs,
    },

    /// Print the default configuration, or validate a configuration file
    Config {
        /// Configuration file to validate instead of printing defaults
        #[arg(long)]
        check: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            show,
            output,
            every,
        } => render::run(render::RenderArgs {
            show,
            output,
            every,
        }),
        Commands::Simulate { show } => simulate::run(show),
        Commands::Config { check } => config::run(check.as_deref()),
    }
}
