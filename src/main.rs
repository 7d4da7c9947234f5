//! prv-tables CLI
//!
//! Converts Paraver .prv execution traces into typed STATE/EVENT/COMM
//! tables, with optional JSON summary and CSV output.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use prv_tables::commands::{execute_header, execute_parse, ParseArgs};
use prv_tables::ParserConfig;

/// prv-tables - Paraver trace to typed tables
#[derive(Parser, Debug)]
#[command(name = "prv-tables")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a trace into STATE/EVENT/COMM tables
    Parse {
        /// Path to the .prv trace file
        trace: PathBuf,

        /// Output path for the JSON parse summary
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory to write state.csv / event.csv / comm.csv into
        #[arg(long)]
        csv_dir: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Byte budget per read batch
        #[arg(long, default_value_t = prv_tables::utils::config::DEFAULT_MAX_BATCH_BYTES)]
        max_batch_bytes: usize,

        /// Total pre-allocated i64 elements across the three buffers
        #[arg(long, default_value_t = prv_tables::utils::config::DEFAULT_INITIAL_ELEMENTS)]
        initial_elements: usize,

        /// Lines between buffer headroom checks
        #[arg(long, default_value_t = prv_tables::utils::config::DEFAULT_MICRO_BATCH_LINES)]
        micro_batch_lines: usize,
    },

    /// Parse and display only the trace header
    Header {
        /// Path to the .prv trace file
        trace: PathBuf,

        /// Print the header as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Parse {
            trace,
            output,
            csv_dir,
            summary,
            max_batch_bytes,
            initial_elements,
            micro_batch_lines,
        } => {
            let args = ParseArgs {
                trace,
                output_json: output,
                csv_dir,
                print_summary: summary,
                config: ParserConfig {
                    max_batch_bytes,
                    initial_elements,
                    micro_batch_lines,
                },
            };

            execute_parse(args)?;
        }

        Commands::Header { trace, json } => {
            execute_header(trace, json)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("prv-tables v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Streaming parser for Paraver .prv execution traces.");
}
