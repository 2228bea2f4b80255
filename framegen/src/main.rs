//! Configuration-driven document generator.
//!
//! Reads `V21.ini` from the project root and writes PRD, CLAUDE, PLANNING and
//! TASKS documents. Every output path must fall within the configured
//! allowlist or nothing is written.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use framegen::error::GenError;
use framegen::exit_codes;
use framegen::generate::{GenerateOptions, GenerateReport, generate};
use framegen::io::config::DEFAULT_CONFIG_FILE;
use framegen::logging;

#[derive(Parser)]
#[command(
    name = "framegen",
    version,
    about = "Generate project planning documents from an INI config"
)]
struct Cli {
    /// Project root; outputs are written relative to it.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Config file, relative to the project root.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Render and check outputs without writing anything.
    #[arg(long)]
    dry_run: bool,

    /// Print the run report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        let code = match err.downcast_ref::<GenError>() {
            Some(gen_err) => {
                eprintln!("error: {}: {:#}", gen_err.kind(), err);
                exit_codes::for_error(gen_err)
            }
            None => {
                eprintln!("error: {:#}", err);
                exit_codes::INVALID
            }
        };
        std::process::exit(code);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = GenerateOptions {
        root: cli.root.clone(),
        config_path: cli.config.clone(),
        dry_run: cli.dry_run,
    };
    let report = generate(&options)?;
    print_report(&report, cli.json)
}

fn print_report(report: &GenerateReport, json: bool) -> Result<()> {
    if json {
        let payload = serde_json::to_string_pretty(report).context("serialize report")?;
        println!("{payload}");
        return Ok(());
    }
    for result in &report.results {
        println!("{:<9} {}", result.status.as_str(), result.path.display());
    }
    Ok(())
}
