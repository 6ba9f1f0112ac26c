//! Command-line interface for the extractor.

use std::path::PathBuf;

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::ExtractOptions;
use crate::error::{ExtractorError, Result};
use crate::extractor::{extract, ExtractionReport};

/// Statblock Extractor - Convert Hero Lab portfolio statblocks to JSON.
#[derive(Parser)]
#[command(name = "statblock-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Portfolio archives (.por, .stock) or XML statblocks to convert
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory (default: next to each input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not write raw XML, HTML and text statblock copies
    #[arg(long)]
    pub no_raw: bool,

    /// Do not split minions into their own JSON files
    #[arg(long)]
    pub no_minions: bool,
}

impl Cli {
    /// Extraction options selected on the command line.
    pub fn options(&self) -> ExtractOptions {
        let mut options = ExtractOptions::new()
            .with_raw(!self.no_raw)
            .with_minions(!self.no_minions);
        if let Some(output) = &self.output {
            options = options.with_output_dir(output);
        }
        options
    }
}

/// Run the CLI.
///
/// Every input is processed even when an earlier one fails. Returns an
/// error when any input, or any statblock inside one, failed.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let options = cli.options();
    options.validate()?;

    let progress = (cli.inputs.len() > 1).then(|| create_progress_bar(cli.inputs.len()));
    let mut failed = 0usize;

    for input in &cli.inputs {
        if let Some(pb) = &progress {
            pb.set_message(input.display().to_string());
        }

        let outcome = extract(input, &options);
        let print = |line: String| match &progress {
            Some(pb) => pb.suspend(|| println!("{line}")),
            None => println!("{line}"),
        };

        match outcome {
            Ok(report) => {
                if !report.is_success() {
                    failed += 1;
                }
                for line in report_lines(&report) {
                    print(line);
                }
            }
            Err(e) => {
                failed += 1;
                tracing::debug!(input = %input.display(), error = ?e, "extraction failed");
                print(format!(
                    "{} {}: {e}",
                    style("Failed").red().bold(),
                    input.display()
                ));
            }
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if failed > 0 {
        return Err(ExtractorError::BatchFailed {
            failed,
            total: cli.inputs.len(),
        });
    }

    Ok(())
}

fn create_progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template"),
    );
    pb
}

/// Human-readable summary of one report.
fn report_lines(report: &ExtractionReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}",
        style("Extracted").bold(),
        style(report.input.display()).cyan()
    )];

    for character in &report.characters {
        lines.push(format!("  Character: {}", style(character).green()));
    }
    for minion in &report.minions {
        lines.push(format!("  Minion: {}", style(minion).green()));
    }
    for path in &report.outputs {
        lines.push(format!("  {} {}", style("Wrote").dim(), path.display()));
    }
    for warning in &report.warnings {
        lines.push(format!("  {} {warning}", style("Warning:").yellow().bold()));
    }
    for failure in &report.failures {
        lines.push(format!("  {} {failure}", style("Error:").red().bold()));
    }

    lines
}
