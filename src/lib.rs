//! Split a MySQL dump file into one `.sql` file per table.
//!
//! The dump is scanned in a single pass, line by line. Every line before
//! the first `-- Table structure for table` marker is captured as the
//! preamble and replicated at the top of each exported file, so every
//! per-table file can be imported on its own.

pub mod app;
