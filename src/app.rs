// Declare modules
pub mod cli;
pub mod config;
pub mod models;
pub mod splitter;

use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{CommandFactory, Parser};

use self::cli::Cli;
use self::config::{default_presets_path, resolve_config};
use self::splitter::{split, FsSink, NullSink};

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();
    let started = Instant::now();

    // 2. Resolve Configuration
    let presets_path = default_presets_path();
    let config = match resolve_config(args, Local::now(), presets_path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            // Mistakes in the invocation get the full usage text; resource
            // failures (e.g. mkdir denied) just get the message.
            if err.shows_usage() {
                Cli::command().print_help().ok();
                eprintln!();
            }
            return Err(err.into());
        }
    };

    // 3. Open the dump
    let input = File::open(&config.dump_path)
        .with_context(|| format!("could not open {}", config.dump_path.display()))?;
    let reader = BufReader::new(input);

    // 4. Run the splitter
    let report = if config.list_only {
        split(&config, reader, &mut NullSink)?
    } else {
        let dir = config
            .output_dir
            .as_ref()
            .context("no output directory resolved")?;
        let mut sink = FsSink::new(dir);
        split(&config, reader, &mut sink)?
    };

    // 5. Print results (table names only arrive in list mode)
    for table in &report.tables {
        println!("{table}");
    }
    println!("Finished in {:.2} seconds", started.elapsed().as_secs_f64());

    Ok(())
}
