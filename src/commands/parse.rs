//! Parse command implementation.
//!
//! The parse command:
//! 1. Parses the header line into trace metadata
//! 2. Streams the record lines into the three tables
//! 3. Writes the summary JSON and optional CSV dumps
//! 4. Prints a text summary when requested

use crate::output::{write_summary, write_tables_csv, KindCounts, ParseSummary};
use crate::parser::{parse_file, parse_header, TraceHeader};
use crate::utils::config::ParserConfig;
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the parse command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ParseArgs {
    /// Trace file to parse
    pub trace: PathBuf,

    /// Output path for the summary JSON (optional)
    pub output_json: Option<PathBuf>,

    /// Directory for per-kind CSV dumps (optional)
    pub csv_dir: Option<PathBuf>,

    /// Print a text summary to stdout
    pub print_summary: bool,

    /// Parser tuning
    pub config: ParserConfig,
}

/// Execute the parse command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Header grammar violations
/// * Record stream parse errors (I/O, malformed records)
/// * File write errors for the requested artifacts
pub fn execute_parse(args: ParseArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Parsing trace: {}", args.trace.display());
    debug!(
        "Using config: max_batch_bytes {}, initial_elements {}, micro_batch_lines {}",
        args.config.max_batch_bytes, args.config.initial_elements, args.config.micro_batch_lines
    );

    // Step 1: Parse the header line
    info!("Step 1/3: Parsing header...");
    let header_line = read_header_line(&args.trace)
        .with_context(|| format!("Failed to read header from {}", args.trace.display()))?;
    let header = parse_header(&header_line).context("Failed to parse trace header")?;

    debug!(
        "Header: {} application(s), exec time {} ns",
        header.applications.len(),
        header.exec_time_ns
    );

    // Step 2: Parse the record stream
    info!("Step 2/3: Parsing records...");
    let tables = parse_file(&args.trace, &args.config).context("Failed to parse trace records")?;

    // Step 3: Write outputs
    info!("Step 3/3: Writing outputs...");
    let elapsed = start_time.elapsed();

    if let Some(output_json) = &args.output_json {
        let summary = build_summary(&args.trace, &header, &tables, elapsed.as_secs_f64());
        write_summary(&summary, output_json).context("Failed to write summary JSON")?;
        info!("Summary written to: {}", output_json.display());
    }

    if let Some(csv_dir) = &args.csv_dir {
        write_tables_csv(&tables, csv_dir).context("Failed to write CSV tables")?;
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("PARSE SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Trace:        {}", args.trace.display());
        println!("Exec time:    {} ns", header.exec_time_ns);
        println!("Date:         {}", header.date);
        println!("Applications: {}", header.applications.len());
        println!("State rows:   {}", tables.states.num_rows());
        println!("Event rows:   {}", tables.events.num_rows());
        println!("Comm rows:    {}", tables.comms.num_rows());
        println!("Skipped:      {} line(s)", tables.skipped_lines);
        println!("Elapsed:      {:.3}s", elapsed.as_secs_f64());
        println!("{}", "=".repeat(80));
    }

    info!("Parse completed in {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

/// Read the first line of a trace file
///
/// **Public** - shared with the header command
pub fn read_header_line(path: impl AsRef<Path>) -> std::io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim_end().to_string())
}

/// Assemble the summary artifact from one parse run
///
/// **Private** - internal helper for execute_parse
fn build_summary(
    trace: &Path,
    header: &TraceHeader,
    tables: &crate::parser::TraceTables,
    elapsed_seconds: f64,
) -> ParseSummary {
    ParseSummary {
        trace: trace.display().to_string(),
        header: Some(header.clone()),
        counts: KindCounts {
            state_rows: tables.states.num_rows(),
            event_rows: tables.events.num_rows(),
            comm_rows: tables.comms.num_rows(),
        },
        skipped_lines: tables.skipped_lines,
        elapsed_seconds,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}
