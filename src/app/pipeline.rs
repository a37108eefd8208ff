//! Read → filter → print, once per run.
use crate::config::RunOptions;
use crate::error::Result as RowsiftResult;
use crate::filter::filter_by_column;
use crate::logging::LogSink;
use crate::printer::TablePrinter;
use crate::reader::TableReader;
use std::io::Write;

/// Counts from a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub rows_read: usize,
    pub rows_matched: usize,
}

/// Drives one read/filter/print run against an output stream
pub struct Pipeline {
    sink: LogSink,
}

impl Pipeline {
    pub fn new(sink: LogSink) -> Self {
        Self { sink }
    }

    /// Run the pipeline, writing both listings to `out`.
    ///
    /// An empty input is not an error: a warning is logged and nothing is
    /// printed.
    pub fn run<W: Write>(&self, options: &RunOptions, out: &mut W) -> RowsiftResult<RunSummary> {
        self.sink.info(format_args!("Starting CSV processing"));

        let table = TableReader::new(options.encoding, self.sink.clone()).read(&options.file)?;
        if table.is_empty() {
            self.sink.warn(format_args!("No data found in CSV file"));
            return Ok(RunSummary::default());
        }

        let printer = TablePrinter::new(options.output_format);
        printer.print(out, &table, "Original Data")?;

        let column_index = options.column.resolve(&table)?;
        let filtered = filter_by_column(&table, column_index, &options.value, &self.sink)?;

        let title = format!(
            "Filtered Data (Column {} = '{}')",
            column_index, options.value
        );
        printer.print(out, &filtered, &title)?;

        self.sink
            .info(format_args!("CSV processing completed successfully"));
        Ok(RunSummary {
            rows_read: table.len(),
            rows_matched: filtered.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::TextEncoding;
    use crate::error::RowsiftError;
    use crate::filter::ColumnSelector;
    use crate::logging::testing::CaptureLogger;
    use crate::printer::OutputFormat;
    use log::Level;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn options(file: &Path, column: ColumnSelector) -> RunOptions {
        RunOptions {
            file: file.to_path_buf(),
            encoding: TextEncoding::Utf8,
            column,
            value: "Books".to_string(),
            output_format: OutputFormat::Text,
        }
    }

    #[test]
    fn test_run_prints_original_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sales.csv");
        fs::write(&path, "1,Pen,Books\n2,Cup,Home\n3,Atlas,Books\n").unwrap();
        let capture = CaptureLogger::default();

        let mut out = Vec::new();
        let summary = Pipeline::new(LogSink::new(capture.clone()))
            .run(&options(&path, ColumnSelector::Index(2)), &mut out)
            .unwrap();

        assert_eq!(
            summary,
            RunSummary {
                rows_read: 3,
                rows_matched: 2
            }
        );
        let expected = "\nOriginal Data:\n-------------\n  1: 1, Pen, Books\n  2: 2, Cup, Home\n  3: 3, Atlas, Books\n\
                        \nFiltered Data (Column 2 = 'Books'):\n----------------------------------\n  1: 1, Pen, Books\n  2: 3, Atlas, Books\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert!(capture.contains(Level::Info, "Starting CSV processing"));
        assert!(capture.contains(Level::Info, "CSV processing completed successfully"));
    }

    #[test]
    fn test_run_by_column_name_keeps_header_row() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sales.csv");
        fs::write(&path, "id,item,category\n1,Pen,Books\n2,Cup,Home\n").unwrap();

        let mut out = Vec::new();
        let summary = Pipeline::new(LogSink::discard())
            .run(
                &options(&path, ColumnSelector::Name("category".to_string())),
                &mut out,
            )
            .unwrap();

        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.rows_matched, 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Filtered Data (Column 2 = 'Books'):"));
    }

    #[test]
    fn test_empty_file_prints_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();
        let capture = CaptureLogger::default();

        let mut out = Vec::new();
        let summary = Pipeline::new(LogSink::new(capture.clone()))
            .run(&options(&path, ColumnSelector::Index(2)), &mut out)
            .unwrap();

        assert_eq!(summary, RunSummary::default());
        assert!(out.is_empty());
        assert!(capture.contains(Level::Warn, "No data found in CSV file"));
    }

    #[test]
    fn test_out_of_range_after_original_listing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sales.csv");
        fs::write(&path, "1,Pen\n").unwrap();

        let mut out = Vec::new();
        let err = Pipeline::new(LogSink::discard())
            .run(&options(&path, ColumnSelector::Index(2)), &mut out)
            .unwrap_err();

        assert!(matches!(err, RowsiftError::OutOfRange { index: 2, width: 2 }));
        assert!(String::from_utf8(out).unwrap().contains("Original Data:"));
    }
}
