use crate::printer::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[clap(
    name = "rowsift",
    version,
    about = "Read a CSV file and keep the rows whose column matches a value",
    long_about = r#"
rowsift - read a comma-delimited file, print it, then print the rows whose
value in one column equals a target string.

EXAMPLES:
  # Rows of sales.csv whose third column is "Books"
  rowsift sales.csv --column 2 --value Books

  # Select the column by its header name
  rowsift sales.csv --column-name category --value Books

  # Latin-1 input, JSON output
  rowsift legacy.csv -e latin-1 --output-format json

CONFIGURATION:
  Flags override ROWSIFT_* environment variables, which override the config
  file (--config, ./.rowsift.toml, ~/.config/rowsift/config.toml,
  ~/.rowsift.toml), which overrides the built-in defaults.
"#
)]
pub struct Cli {
    /// Input file
    pub file: Option<PathBuf>,

    /// 0-based index of the column to match
    #[clap(
        long,
        short = 'c',
        allow_negative_numbers = true,
        conflicts_with = "column_name"
    )]
    pub column: Option<i64>,

    /// Select the column by its name in the first row
    #[clap(long, short = 'n')]
    pub column_name: Option<String>,

    /// Value the column must equal
    #[clap(long, short = 'v')]
    pub value: Option<String>,

    /// Text encoding of the input (utf-8, ascii, latin-1)
    #[clap(long, short = 'e')]
    pub encoding: Option<String>,

    #[clap(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Explicit configuration file
    #[clap(long, value_parser)]
    pub config: Option<PathBuf>,

    /// Write log lines to this file instead of stderr
    #[clap(long, value_parser)]
    pub log: Option<PathBuf>,

    #[clap(long)]
    pub log_level: Option<String>,

    /// Only log errors
    #[clap(long, short = 'q', default_value_t = false)]
    pub quiet: bool,
}
