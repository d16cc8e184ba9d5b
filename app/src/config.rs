//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

/// Default location of the state document, next to the working directory.
pub const DEFAULT_DATA_FILE: &str = "library_data.json";

/// Command-line options for the lending desk.
#[derive(Debug, Clone, Parser)]
#[command(name = "circulation", about = "Menu-driven library lending desk")]
pub struct Cli {
    /// Path to the JSON state document.
    #[arg(long = "data-file", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,
}
