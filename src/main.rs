//! PDF mask redaction CLI.
//!
//! Applies a redaction mask PDF to pages of an input PDF and writes the
//! result, by default back over the input file.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use mask_redactor::{RedactionResult, RedactionService, RunConfig};

/// PDF Mask Redaction Tool
///
/// Redact scanned PDF pages by drawing a redaction mask (also a PDF) over
/// them. Text under the mask is NOT removed; use this on image-only pages.
///
/// If the mask has several pages, mask pages are applied page for page
/// until either document runs out, and --pages/--all are ignored.
#[derive(Parser)]
#[command(name = "mask-redactor")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "INPUTFILE")]
    inputfile: PathBuf,

    /// PDF file containing the redaction mask
    #[arg(value_name = "REDACTIONMASK")]
    redactionmask: PathBuf,

    /// Output file name (default is to overwrite the input file)
    #[arg(value_name = "OUTPUTFILE")]
    outputfile: Option<PathBuf>,

    /// Show more output
    #[arg(short, long)]
    verbose: bool,

    /// List or range of pages (ex: 1,4-6 would redact page 1 and 4 through 6)
    #[arg(short, long, value_name = "PAGES", default_value = "1", conflicts_with = "all")]
    pages: String,

    /// Redact all pages
    #[arg(short, long)]
    all: bool,
}

/// Redaction command handler with dependency injection.
struct RedactionHandler {
    service: RedactionService,
    verbose: bool,
}

impl RedactionHandler {
    /// Creates a new handler with the overlay strategy.
    fn new(verbose: bool) -> Self {
        Self {
            service: RedactionService::with_overlay_strategy(),
            verbose,
        }
    }

    /// Executes a redaction run.
    fn redact(&self, config: &RunConfig) -> Result<RedactionResult> {
        let plan = self
            .service
            .plan(config)
            .with_context(|| "Could not open documents")?;

        if self.verbose {
            if plan.mask_mode().is_per_page() {
                println!(
                    "Applying multi-page redaction mask from {}",
                    plan.mask().path().display()
                );
            }
            println!(
                "Input file: {} - {} pages.",
                plan.input().path().display(),
                plan.input().page_count()
            );
            println!("Redacting pages: {}", plan.selection());
        }

        let result = self
            .service
            .execute(plan)
            .with_context(|| "Redaction failed")?;

        if self.verbose {
            match &result.output {
                Some(path) if result.has_redactions() => println!("Wrote {}", path.display()),
                Some(path) => println!(
                    "No selected page exists in the input; wrote an unmasked copy to {}",
                    path.display()
                ),
                None => println!("Input has no pages; nothing written."),
            }
        }

        Ok(result)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = RunConfig::new(
        &cli.inputfile,
        &cli.redactionmask,
        cli.outputfile.as_deref(),
        &cli.pages,
        cli.all,
        cli.verbose,
    )?;

    let handler = RedactionHandler::new(config.verbose());
    handler.redact(&config)?;

    Ok(())
}
