//! Bulk Calendar Events
//!
//! Creates and opens a template Excel sheet, then saves all events added to it
//! to a .ics file. A pre-filled sheet can be given with `--file` instead.

mod launcher;
mod logging;
mod prompt;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bulkcal_core::config::BulkCalConfig;
use bulkcal_core::pipeline::{self, RunOptions};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing::{debug, info};

use launcher::SystemLauncher;
use prompt::TerminalPrompt;

#[derive(Parser, Debug)]
#[command(name = "Bulk Calendar Events", display_name = "Bulk Calendar Events")]
#[command(bin_name = "bulkcal", version)]
#[command(about = "Create a calendar (.ics) file from a spreadsheet of events")]
struct Cli {
    /// Run with DEBUG level logging (default is INFO)
    #[arg(long)]
    debug: bool,

    /// Pre-filled events spreadsheet to load (.xlsx). A blank template is
    /// created and opened when omitted.
    #[arg(short, long, value_parser = xlsx_file)]
    file: Option<PathBuf>,

    /// Output filename (.ics), defaults to 'output.ics' in the work directory
    #[arg(short, long, value_parser = ics_file)]
    output: Option<PathBuf>,

    /// Don't reveal the output file in the file manager when done
    #[arg(long)]
    no_reveal: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = logging::init(cli.debug);
    info!("Running with logging level {}", level);
    debug!("Script args: {:?}", cli);

    let config = BulkCalConfig::load().context("Failed to load config")?;
    debug!("Config: {:?}", config);

    let output = match cli.output {
        Some(path) => path,
        None => config.default_output_path()?,
    };

    let options = RunOptions {
        input: cli.file,
        output,
        template_path: config.template_path()?,
        reveal: config.reveal && !cli.no_reveal,
    };

    let launcher = SystemLauncher {
        editor: config.editor.clone(),
    };

    let summary = pipeline::run(&options, &launcher, &TerminalPrompt)?;

    println!(
        "{} {} {} to {}",
        "Saved".green(),
        summary.events,
        if summary.events == 1 { "event" } else { "events" },
        summary.output.display().bold()
    );

    Ok(())
}

/// Lowercased extension of `path` with its leading dot, or "" if there is none
fn extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Check that the path given to --file is an .xlsx file
fn xlsx_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    match extension(&path).as_str() {
        ".xlsx" => Ok(path),
        ext => Err(format!(
            "File must be an Excel spreadsheet (.xlsx), but got {ext}"
        )),
    }
}

/// Check that the path given to --output is an .ics file
fn ics_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    match extension(&path).as_str() {
        ".ics" => Ok(path),
        ext => Err(format!("File must be a Calendar file (.ics), but got {ext}")),
    }
}
