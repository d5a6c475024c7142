//! CLI tool for converting lyric text files to PPTX presentations.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use versedeck_core::{filter_text_files, process_batch, ConvertOptions, LayoutOptions};
use versedeck_pptx::PptxWriter;

/// Convert blank-line-separated lyric .txt files into slide decks.
#[derive(Parser, Debug)]
#[command(name = "versedeck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input lyric file(s) (.txt)
    #[arg(required_unless_present = "input_dir")]
    input: Vec<PathBuf>,

    /// Convert every .txt file in this directory (non-recursive)
    #[arg(short = 'd', long)]
    input_dir: Option<PathBuf>,

    /// Output directory (default: presentations)
    #[arg(short, long, default_value = "presentations")]
    output: PathBuf,

    /// Append a final all-black slide after the last lyric slide
    #[arg(long)]
    trailing_blank: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let mut inputs = args.input.clone();
    if let Some(dir) = &args.input_dir {
        inputs.extend(scan_directory(dir)?);
    }

    let inputs = filter_text_files(inputs);
    if inputs.is_empty() {
        anyhow::bail!("No .txt input files to convert");
    }

    log::debug!("{} input file(s) after filtering", inputs.len());

    let options = ConvertOptions {
        output_dir: args.output.clone(),
        layout: LayoutOptions {
            trailing_blank_slide: args.trailing_blank,
        },
    };
    let writer = PptxWriter::new();

    let outcomes = process_batch(inputs.iter().map(PathBuf::as_path), &options, &writer);

    let mut successful = Vec::new();
    let mut failed = Vec::new();

    for outcome in &outcomes {
        match &outcome.result {
            Ok(output_path) => {
                if args.verbose {
                    eprintln!("Written to: {}", output_path.display());
                }
                successful.push(outcome.basename());
            }
            Err(e) => {
                eprintln!("Error processing {}: {}", outcome.basename(), e);
                failed.push(outcome.basename());
            }
        }
    }

    println!("\nProcessing Summary:");
    if !successful.is_empty() {
        println!("Successfully converted: {}", successful.join(", "));
    }
    if !failed.is_empty() {
        println!("Failed to convert: {}", failed.join(", "));
    }

    Ok(())
}

/// Collect candidate files from a directory (non-recursive).
fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            paths.push(entry.path());
        }
    }

    // Stable order regardless of directory iteration order
    paths.sort();
    Ok(paths)
}
