//! Text command - show what the text extractor sees.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use cds_core::pdf::{PdfExtractor, PdfProcessor};

/// Arguments for the text command.
#[derive(Args)]
pub struct TextArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Print a marker before each page
    #[arg(long)]
    pages: bool,
}

pub fn run(args: TextArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let data = fs::read(&args.input)?;
    let mut extractor = PdfExtractor::with_config(config.pdf);
    extractor.load(&data)?;
    debug!("PDF has {} pages", extractor.page_count());

    if args.pages {
        for page in extractor.extract_pages()? {
            println!("{}", style(format!("--- page {} ---", page.number)).dim());
            println!("{}", page.text);
        }
    } else {
        print!("{}", extractor.extract_text()?);
    }

    Ok(())
}
