//! Loads a comma-delimited file into a [`Table`].
use crate::encoding::TextEncoding;
use crate::error::{Result as RowsiftResult, RowsiftError};
use crate::logging::LogSink;
use crate::table::{Row, Table};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

pub const DELIMITER: u8 = b',';
const QUOTE: u8 = b'"';

/// Reads delimited files with a fixed encoding
pub struct TableReader {
    encoding: TextEncoding,
    sink: LogSink,
}

impl TableReader {
    pub fn new(encoding: TextEncoding, sink: LogSink) -> Self {
        Self { encoding, sink }
    }

    /// Read `path` into a table, one row per record, fields untouched.
    ///
    /// # Errors
    ///
    /// * `NotFound` if `path` is not an existing file
    /// * `Decoding` if the bytes are invalid under the reader's encoding
    /// * `Parse` if a quoted field is never closed
    pub fn read(&self, path: &Path) -> RowsiftResult<Table> {
        if !path.is_file() {
            self.sink
                .error(format_args!("File not found: {}", path.display()));
            return Err(RowsiftError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = self.read_bytes(path)?;

        let text = self.encoding.decode(&bytes).map_err(|offset| {
            self.sink.error(format_args!(
                "Encoding error reading {}: invalid {} at byte {}",
                path.display(),
                self.encoding,
                offset
            ));
            RowsiftError::Decoding {
                path: path.to_path_buf(),
                encoding: self.encoding,
                offset,
            }
        })?;

        let table = parse_table(&text).inspect_err(|e| {
            self.sink.error(format_args!("CSV parsing error: {e}"));
        })?;

        self.check_widths(&table);
        self.sink.info(format_args!(
            "Successfully read {} rows from {}",
            table.len(),
            path.display()
        ));
        Ok(table)
    }

    fn read_bytes(&self, path: &Path) -> RowsiftResult<Vec<u8>> {
        let mut file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RowsiftError::NotFound {
                path: path.to_path_buf(),
            },
            _ => RowsiftError::Io(e),
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Soft width check: ragged rows are reported, never rejected.
    fn check_widths(&self, table: &Table) {
        let Some(width) = table.width() else {
            return;
        };
        for (i, row) in table.iter().enumerate().skip(1) {
            if row.len() != width {
                self.sink.warn(format_args!(
                    "Row {} has {} fields, expected {}",
                    i + 1,
                    row.len(),
                    width
                ));
            }
        }
    }
}

/// Read `path` with `encoding`, logging through `sink`.
pub fn read_table(path: &Path, encoding: TextEncoding, sink: &LogSink) -> RowsiftResult<Table> {
    TableReader::new(encoding, sink.clone()).read(path)
}

/// Split already-decoded text into rows.
///
/// A blank line is an empty row. The csv parser drops those, so the record
/// layout is scanned first and empty rows are put back in place.
pub fn parse_table(text: &str) -> RowsiftResult<Table> {
    let layout = scan_records(text).map_err(|line| RowsiftError::Parse {
        line,
        message: "unexpected end of data inside quoted field".to_string(),
    })?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(DELIMITER)
        .from_reader(text.as_bytes());
    let mut records = rdr.records();

    let mut rows: Vec<Row> = Vec::with_capacity(layout.len());
    for kind in layout {
        if kind == RecordKind::Blank {
            rows.push(Row::new());
            continue;
        }
        let record = match records.next() {
            Some(result) => result.map_err(|e| RowsiftError::Parse {
                line: e.position().map(|p| p.line() as usize).unwrap_or(0),
                message: e.to_string(),
            })?,
            None => {
                return Err(RowsiftError::Parse {
                    line: rows.len() + 1,
                    message: "record boundaries disagree with the csv parser".to_string(),
                })
            }
        };
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(Table::new(rows))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    Data,
    Blank,
}

/// Record boundaries of `text`, in order.
///
/// Follows the quoting rules the csv parser applies: a quote only opens a
/// field at field start, `""` inside a quoted field is an escaped quote, and
/// `\n`, `\r\n` and `\r` all end a record. Fails with the line on which a
/// quoted field opened and was never closed.
fn scan_records(text: &str) -> Result<Vec<RecordKind>, usize> {
    let mut layout = Vec::new();
    let mut line = 1;
    let mut opened_at: Option<usize> = None;
    let mut at_field_start = true;
    let mut has_content = false;
    let mut bytes = text.bytes().peekable();

    while let Some(b) = bytes.next() {
        if opened_at.is_some() {
            match b {
                QUOTE if bytes.peek() == Some(&QUOTE) => {
                    bytes.next();
                }
                QUOTE => opened_at = None,
                b'\n' => line += 1,
                _ => {}
            }
            continue;
        }
        match b {
            QUOTE if at_field_start => {
                opened_at = Some(line);
                at_field_start = false;
                has_content = true;
            }
            DELIMITER => {
                at_field_start = true;
                has_content = true;
            }
            b'\r' | b'\n' => {
                if b == b'\r' && bytes.peek() == Some(&b'\n') {
                    bytes.next();
                }
                line += 1;
                layout.push(if has_content {
                    RecordKind::Data
                } else {
                    RecordKind::Blank
                });
                at_field_start = true;
                has_content = false;
            }
            _ => {
                at_field_start = false;
                has_content = true;
            }
        }
    }

    if let Some(line) = opened_at {
        return Err(line);
    }
    if has_content {
        layout.push(RecordKind::Data);
    }
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::testing::CaptureLogger;
    use log::Level;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reads_rows_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            &temp_dir,
            "sales.csv",
            b"id,item,category\n1,Pen,Books\n2, Cup ,Home\n",
        );

        let table = read_table(&path, TextEncoding::Utf8, &LogSink::discard()).unwrap();
        let expected: Table = vec![
            vec!["id", "item", "category"],
            vec!["1", "Pen", "Books"],
            vec!["2", " Cup ", "Home"],
        ]
        .into_iter()
        .collect();
        assert_eq!(table, expected);
    }

    #[test]
    fn test_quoted_fields() {
        let table =
            parse_table("1,\"Pen, blue\",Books\r\n2,\"The \"\"Atlas\"\"\",Books\r\n").unwrap();
        assert_eq!(table.rows()[0][1], "Pen, blue");
        assert_eq!(table.rows()[1][1], "The \"Atlas\"");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_quoted_newline_stays_in_field() {
        let table = parse_table("1,\"two\nlines\",x\n2,y,z\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0][1], "two\nlines");
    }

    #[test]
    fn test_unterminated_quote_is_parse_error() {
        let err = parse_table("1,Pen,Books\n2,\"Cup,Home\n3,Atlas,Books\n").unwrap_err();
        match err {
            RowsiftError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn test_inner_quote_in_unquoted_field_is_literal() {
        let table = parse_table("5\" ruler,Tools\n").unwrap();
        assert_eq!(table.rows()[0][0], "5\" ruler");
    }

    #[test]
    fn test_blank_lines_are_empty_rows() {
        let table = parse_table("a\n\nb\n").unwrap();
        let expected = Table::new(vec![
            vec!["a".to_string()],
            Vec::new(),
            vec!["b".to_string()],
        ]);
        assert_eq!(table, expected);

        let table = parse_table("1,Pen,Books\r\n\r\n3,Atlas,Books\r\n\r\n").unwrap();
        assert_eq!(table.len(), 4);
        assert!(table.rows()[1].is_empty());
        assert!(table.rows()[3].is_empty());
    }

    #[test]
    fn test_leading_blank_line_sets_zero_width() {
        let table = parse_table("\n1,Pen,Books\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.width(), Some(0));
    }

    #[test]
    fn test_blank_line_inside_quotes_is_not_a_row() {
        let table = parse_table("1,\"a\n\nb\",x\n2,y,z").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0][1], "a\n\nb");
        assert_eq!(table.rows()[1], vec!["2", "y", "z"]);
    }

    #[test]
    fn test_blank_line_counted_in_read_log() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "gap.csv", b"1,Pen,Books\n\n3,Atlas,Books\n");
        let capture = CaptureLogger::default();

        let table =
            read_table(&path, TextEncoding::Utf8, &LogSink::new(capture.clone())).unwrap();
        assert_eq!(table.len(), 3);
        assert!(capture.contains(Level::Info, "Successfully read 3 rows"));
    }

    #[test]
    fn test_empty_file_gives_empty_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "empty.csv", b"");
        let table = read_table(&path, TextEncoding::Utf8, &LogSink::discard()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.csv");
        let capture = CaptureLogger::default();

        let err = read_table(&path, TextEncoding::Utf8, &LogSink::new(capture.clone()))
            .unwrap_err();
        assert!(matches!(err, RowsiftError::NotFound { .. }));
        assert!(capture.contains(Level::Error, "File not found"));
    }

    #[test]
    fn test_directory_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err =
            read_table(temp_dir.path(), TextEncoding::Utf8, &LogSink::discard()).unwrap_err();
        assert!(matches!(err, RowsiftError::NotFound { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_decoding_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "bad.csv", b"1,caf\xe9,Books\n");

        let err = read_table(&path, TextEncoding::Utf8, &LogSink::discard()).unwrap_err();
        match err {
            RowsiftError::Decoding {
                encoding, offset, ..
            } => {
                assert_eq!(encoding, TextEncoding::Utf8);
                assert_eq!(offset, 5);
            }
            other => panic!("expected Decoding, got {other:?}"),
        }
    }

    #[test]
    fn test_latin1_file_reads() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "latin.csv", b"1,caf\xe9,Books\n");
        let table = read_table(&path, TextEncoding::Latin1, &LogSink::discard()).unwrap();
        assert_eq!(table.rows()[0][1], "caf\u{e9}");
    }

    #[test]
    fn test_logs_row_count_and_ragged_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_dir, "ragged.csv", b"a,b,c\nd,e\nf,g,h\n");
        let capture = CaptureLogger::default();

        let table =
            read_table(&path, TextEncoding::Utf8, &LogSink::new(capture.clone())).unwrap();
        assert_eq!(table.len(), 3);
        assert!(capture.contains(Level::Info, "Successfully read 3 rows"));
        assert!(capture.contains(Level::Warn, "Row 2 has 2 fields, expected 3"));
    }
}
