//! Extract command - build the admissions table for a batch of CDS PDFs.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cds_core::models::config::TextEngine;
use cds_core::pipeline::{BatchReport, Pipeline, display_name, log_summary};

use crate::output::{Format, render};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input files or glob patterns, processed in the order given
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Write the CSV export to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the CSV export to the configured file name
    #[arg(long, conflicts_with = "output")]
    save: bool,

    /// Format for printing results (defaults to the configured format)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Text engine (defaults to the configured engine)
    #[arg(long, value_enum)]
    engine: Option<Engine>,

    /// Let metric labels and their numbers sit on different lines
    #[arg(long)]
    span_lines: bool,

    /// Exit with an error if any document fails
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum Engine {
    /// lopdf, page by page
    PerPage,
    /// pdf-extract, whole document
    Stream,
}

impl From<Engine> for TextEngine {
    fn from(engine: Engine) -> Self {
        match engine {
            Engine::PerPage => TextEngine::PerPage,
            Engine::Stream => TextEngine::Stream,
        }
    }
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if let Some(engine) = args.engine {
        config.pdf.engine = engine.into();
    }
    if args.span_lines {
        config.extraction.span_lines = true;
    }

    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No PDF files found for: {}", args.inputs.join(" "));
    }
    info!("Found {} files to process", files.len());

    let pipeline = Pipeline::from_config(&config)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    // Sequential on purpose: one document at a time, in input order
    let mut report = BatchReport::default();
    for path in &files {
        let name = display_name(path);
        pb.set_message(name.clone());
        let result = pipeline.process_path(path);
        report.record(&name, result);
        pb.inc(1);
    }
    pb.finish_and_clear();
    log_summary(&report);

    for failure in &report.failures {
        eprintln!(
            "{} {}: {}",
            style("✗").red(),
            failure.filename,
            failure.error
        );
    }

    if !report.table.is_empty() {
        let format = args.format.map(Into::into).unwrap_or(config.output.format);
        print!("{}", render(&report.table, format)?);
    }

    let export_path = args
        .output
        .clone()
        .or_else(|| args.save.then(|| PathBuf::from(&config.output.file_name)));

    if let Some(path) = export_path {
        let file = File::create(&path)?;
        report.table.write_csv(BufWriter::new(file))?;
        eprintln!(
            "{} Saved {} rows to {}",
            style("✓").green(),
            report.table.len(),
            path.display()
        );
    }

    eprintln!(
        "{} Processed {} files in {:?}: {} rows, {} failed",
        style("ℹ").blue(),
        report.processed(),
        start.elapsed(),
        style(report.table.len()).green(),
        style(report.failures.len()).red()
    );

    if args.strict && report.has_failures() {
        anyhow::bail!(
            "{} of {} documents failed",
            report.failures.len(),
            report.processed()
        );
    }

    Ok(())
}

/// Expand inputs into file paths, keeping the given order.
///
/// Glob patterns contribute their matching `.pdf` files in sorted order; plain
/// paths are kept as given so a missing file is reported as a failure.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if !is_glob(input) {
            files.push(PathBuf::from(input));
            continue;
        }

        let mut matches: Vec<PathBuf> = glob(input)?
            .filter_map(|r| r.ok())
            .filter(|p| is_pdf(p))
            .collect();
        matches.sort();

        debug!("Pattern {} matched {} files", input, matches.len());
        files.extend(matches);
    }

    Ok(files)
}

fn is_glob(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

fn is_pdf(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}
