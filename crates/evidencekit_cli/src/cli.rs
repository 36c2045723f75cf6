use std::path::PathBuf;

use clap::Parser;

/// Command-line surface of the workbook builder.
#[derive(Debug, Parser)]
#[command(name = "evidencekit")]
#[command(
    version,
    about = "Build a styled Excel workbook from CSV sheets."
)]
pub struct Cli {
    /// Sheet spec: NAME=/path/to/file.csv (repeatable, in sheet order).
    ///
    /// Names must be unique ignoring case; a repeated name is rejected
    /// rather than replacing the earlier file. `field_dictionary` is reserved.
    #[arg(long = "sheet", value_name = "NAME=PATH")]
    pub sheets: Vec<String>,

    /// Output .xlsx path
    #[arg(long, value_name = "PATH")]
    pub output: PathBuf,
}
