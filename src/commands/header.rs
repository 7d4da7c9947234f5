//! Header command implementation.
//!
//! Parses only the header line of a trace and prints the decoded metadata.

use crate::commands::parse::read_header_line;
use crate::parser::parse_header;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Execute the header command
///
/// **Public** - main entry point called from main.rs
pub fn execute_header(trace: PathBuf, json: bool) -> Result<()> {
    let line = read_header_line(&trace)
        .with_context(|| format!("Failed to read header from {}", trace.display()))?;
    let header = parse_header(&line).context("Failed to parse trace header")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&header)?);
        return Ok(());
    }

    println!("Trace:        {}", trace.display());
    println!("Date:         {}", header.date);
    println!("Exec time:    {} ns", header.exec_time_ns);
    match &header.node_counts {
        Some(counts) => println!("Node counts:  {:?}", counts),
        None => println!("Node counts:  (not present)"),
    }
    println!("Applications: {}", header.applications.len());
    for (index, tasks) in header.applications.iter().enumerate() {
        println!("  App {}: {} task(s)", index + 1, tasks.len());
        for (task, placement) in tasks.iter().enumerate() {
            println!(
                "    Task {}: {} thread(s) on node {}",
                task + 1,
                placement.thread_count,
                placement.node_id
            );
        }
    }

    Ok(())
}
