//! Command line entry point for the AppCache packer.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use appcache_packer::AppCachePacker;

#[derive(Parser, Debug)]
#[command(name = "appcache_packer")]
#[command(version)]
#[command(about = "Packs an HTML-based SPA and its resources into an AppCache archive")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pack an HTML file and its locally referenced assets
    Pack {
        /// The input HTML file
        #[arg(short = 'i', long = "in", value_name = "FILE", default_value = "index.html")]
        input: PathBuf,

        /// The output AppCache file
        #[arg(
            short = 'o',
            long = "out",
            value_name = "FILE",
            default_value = "index.appcache"
        )]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Pack { input, output } => {
            // Asset references resolve against the invocation directory.
            let packer = AppCachePacker::new(".");
            packer.pack_file(&input, &output)
        }
    }
}
