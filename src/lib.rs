//! # rowsift - CSV row filtering
//!
//! Reads a comma-delimited file into an ordered table, keeps the rows whose
//! value in one column equals a target string, and prints both tables as
//! numbered listings.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rowsift::{filter_by_column, read_table, render_table, LogSink, TextEncoding};
//! use std::path::Path;
//!
//! fn main() -> rowsift::Result<()> {
//!     let sink = LogSink::global();
//!     let table = read_table(Path::new("sales.csv"), TextEncoding::Utf8, &sink)?;
//!     let books = filter_by_column(&table, 2, "Books", &sink)?;
//!     print!("{}", render_table(&books, "Books"));
//!     Ok(())
//! }
//! ```
//!
//! ## Components
//!
//! | Stage | Entry point | Fails with |
//! |-------|-------------|------------|
//! | Reader | [`read_table`] | `NotFound`, `Decoding`, `Parse` |
//! | Filter | [`filter_by_column`] | `InvalidArgument`, `OutOfRange` |
//! | Printer | [`render_table`] | never |
//!
//! Every component logs through an injected [`LogSink`] instead of the
//! process-wide logger.

#![allow(clippy::uninlined_format_args)]

/// Read → filter → print driver
pub mod app;

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Layered configuration (file, environment, flags)
pub mod config;

/// Text encodings for input files
pub mod encoding;

/// Error types and result handling
pub mod error;

/// Row selection by column value
pub mod filter;

/// Injectable log sink and logger setup
pub mod logging;

/// Table rendering
pub mod printer;

/// Delimited file loading
pub mod reader;

/// Row and table types
pub mod table;

pub use crate::error::{Result, RowsiftError};

pub use app::{Pipeline, RunSummary};
pub use cli::Cli;
pub use config::{Config, RunOptions};
pub use encoding::TextEncoding;
pub use filter::{filter_by_column, ColumnSelector, FilterCriterion};
pub use logging::LogSink;
pub use printer::{render_table, OutputFormat, TablePrinter};
pub use reader::{parse_table, read_table, TableReader};
pub use table::{Row, Table};
