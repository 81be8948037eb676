mod cli;

use std::io::IsTerminal;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use tftldr::report::{self, Summary};
use tftldr::{Config, summarize};

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    let input = read_plan(&cli)
        .wrap_err_with(|| format!("failed to read plan '{}'", cli.input.display()))?;

    let records = summarize(&input, &config.ignore)
        .wrap_err_with(|| format!("failed to parse plan '{}'", cli.input.display()))?;

    tracing::info!(count = records.len(), "summary complete");

    if records.is_empty() {
        println!("No changes.");
    } else {
        let color = !cli.no_color && std::io::stdout().is_terminal();
        println!("{}", report::render_table(&records, &config.columns, color));
        println!("{}", Summary::from_records(&records));
    }

    if let Some(path) = &cli.csv {
        report::export_csv(path, &records, &config.columns)
            .wrap_err_with(|| format!("failed to export CSV to '{}'", path.display()))?;
        println!("Exported changes to CSV: {}", path.display());
    }

    Ok(())
}

fn read_plan(cli: &Cli) -> std::io::Result<String> {
    if cli.reads_stdin() {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(&cli.input)
    }
}
