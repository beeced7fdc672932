use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Split a MySQL dump file into one .sql file per table"
)]
pub struct Cli {
    /// Input SQL dump file
    #[arg(long = "in", value_name = "FILE")]
    pub input: PathBuf,

    /// Output directory for the per-table files
    #[arg(long = "out", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Only list the table names found in the dump; write nothing
    #[arg(long)]
    pub list: bool,

    /// Create the output directory if it does not exist
    #[arg(long)]
    pub force: bool,

    /// strftime pattern rendered at startup and appended to each filename
    /// (e.g. "%d-%m-%Y_%H-%M")
    #[arg(long = "postfix-time", value_name = "PATTERN")]
    pub postfix_time: Option<String>,

    /// Literal text appended to each output filename
    #[arg(long = "postfix-name", value_name = "TEXT")]
    pub postfix_name: Option<String>,

    /// Comma-separated table names to skip
    #[arg(long, value_name = "TABLES")]
    pub ignore: Option<String>,

    /// Comma-separated table names to export exclusively; overrides --ignore
    #[arg(long, value_name = "TABLES")]
    pub only: Option<String>,

    /// Use a named preset from presets.toml
    #[arg(long)]
    pub preset: Option<String>,
}
