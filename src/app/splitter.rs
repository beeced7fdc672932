use std::fs::File;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::app::models::Config;

/// Line prefix announcing the start of a new table block in a dump.
pub const TABLE_MARKER: &str = "-- Table structure for table";

/// Destination for exported table files.
///
/// The engine keeps at most one file open: `open` closes whatever was
/// open before, `write` appends to the most recently opened file, and
/// `close` releases it. Open and write failures are fatal to the whole
/// run; close is best-effort.
pub trait TableSink {
    fn open(&mut self, file_name: &str) -> Result<()>;
    fn write(&mut self, data: &[u8]) -> Result<()>;
    fn close(&mut self);
}

/// Writes table files into a directory on disk.
pub struct FsSink {
    dir: PathBuf,
    out: Option<(File, PathBuf)>,
}

impl FsSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            out: None,
        }
    }
}

impl TableSink for FsSink {
    fn open(&mut self, file_name: &str) -> Result<()> {
        self.close();
        let path = self.dir.join(file_name);
        let file = File::create(&path)
            .with_context(|| format!("could not create output file {}", path.display()))?;
        self.out = Some((file, path));
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        // the engine only writes between a successful open and the next close
        debug_assert!(self.out.is_some(), "write with no open output file");
        if let Some((file, path)) = self.out.as_mut() {
            file.write_all(data)
                .with_context(|| format!("error while writing to {}", path.display()))?;
        }
        Ok(())
    }

    fn close(&mut self) {
        self.out.take();
    }
}

/// Sink for list mode; the engine never opens files through it.
pub struct NullSink;

impl TableSink for NullSink {
    fn open(&mut self, _file_name: &str) -> Result<()> {
        Ok(())
    }

    fn write(&mut self, _data: &[u8]) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) {}
}

/// Result of one pass over the dump. `tables` is populated only in list
/// mode, in the order the markers were encountered.
#[derive(Debug, Default)]
pub struct SplitReport {
    pub tables: Vec<String>,
}

/// Where the scanner is within the dump.
enum ScanState {
    /// Before the first marker; every line accumulates into the preamble.
    Preamble,
    /// Inside a table block. `skipping` discards the body of tables the
    /// filter rejected (and every body in list mode).
    Table { skipping: bool },
}

/// Scan the dump once, routing each line to the preamble buffer, the
/// sink, or nowhere.
///
/// Lines are read as raw bytes (terminator included, final line possibly
/// unterminated) so table bodies survive byte-identically; only the
/// extracted table name is decoded. Each marker line closes the previous
/// output file and, if the table is selected, opens a fresh one seeded
/// with the preamble captured before the first marker.
pub fn split<R: BufRead>(
    config: &Config,
    mut input: R,
    sink: &mut dyn TableSink,
) -> Result<SplitReport> {
    let mut preamble: Vec<u8> = Vec::new();
    let mut tables: Vec<String> = Vec::new();
    let mut state = ScanState::Preamble;
    let mut line: Vec<u8> = Vec::new();

    loop {
        line.clear();
        let read = input
            .read_until(b'\n', &mut line)
            .context("failed to read input dump")?;
        if read == 0 {
            break;
        }

        if line.starts_with(TABLE_MARKER.as_bytes()) {
            let name = extract_table_name(&line);

            if config.list_only {
                tables.push(name);
                state = ScanState::Table { skipping: true };
            } else {
                sink.close();
                if config.is_selected(&name) {
                    log::debug!("exporting table {name}");
                    sink.open(&config.output_file_name(&name))?;
                    sink.write(&preamble)?;
                    sink.write(&line)?;
                    state = ScanState::Table { skipping: false };
                } else {
                    log::debug!("skipping table {name}");
                    state = ScanState::Table { skipping: true };
                }
            }
        } else {
            match state {
                ScanState::Preamble => preamble.extend_from_slice(&line),
                ScanState::Table { skipping: false } => sink.write(&line)?,
                ScanState::Table { skipping: true } => {}
            }
        }
    }

    sink.close();
    Ok(SplitReport { tables })
}

/// Pull the table name out of a marker line.
///
/// Strips the marker prefix, then drops backtick, space, CR and LF bytes
/// anywhere in the remainder. Nothing else is trimmed: a dump that puts
/// tabs around the name yields a name containing tabs, matched verbatim
/// by the filters.
fn extract_table_name(line: &[u8]) -> String {
    let rest = &line[TABLE_MARKER.len()..];
    let name: Vec<u8> = rest
        .iter()
        .copied()
        .filter(|b| !matches!(b, b'`' | b' ' | b'\r' | b'\n'))
        .collect();
    String::from_utf8_lossy(&name).into_owned()
}
