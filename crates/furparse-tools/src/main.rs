use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod fur;
use fur::{chip_table, chips as fur_chips, info as fur_info, read_fur_as_vec};

/// furparse command line tools
#[derive(Parser)]
#[command(
    name = "furparse",
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show header and song summary for a module (raw or zlib; use '-' for stdin)
    Info {
        /// Input file to read (use '-' for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// List the chip slots of a module with volume, panning and parameters
    Chips {
        /// Input file to read (use '-' for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// List every chip id the decoder knows
    ChipTable,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ok = match cli.command {
        Commands::Info { file } => {
            let bytes = read_fur_as_vec(&file)?;
            fur_info(&file, &bytes)
        }
        Commands::Chips { file } => {
            let bytes = read_fur_as_vec(&file)?;
            fur_chips(&file, &bytes)
        }
        Commands::ChipTable => {
            chip_table();
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
