//! `evidencekit`: build a styled Excel workbook from CSV sheets.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use evidencekit_io_xlsx::{build_workbook, resolve_sheet_inputs};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init()?;

    let inputs = resolve_sheet_inputs(&cli.sheets)?;
    let report = build_workbook(&inputs, &cli.output).with_context(|| {
        format!(
            "Failed to build workbook '{}'",
            cli.output.display()
        )
    })?;

    println!("Wrote workbook: {}", report.path_file_out.display());
    Ok(())
}
