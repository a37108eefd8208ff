//! Byte-to-text decoding for input files.
use crate::error::RowsiftError;
use std::fmt;
use std::str::FromStr;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Text encodings accepted by the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Ascii,
    Latin1,
}

impl TextEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Ascii => "ascii",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Decode `bytes` into owned text.
    ///
    /// On failure returns the byte offset of the first sequence that is not
    /// valid under this encoding. A leading UTF-8 byte-order mark is dropped.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, usize> {
        match self {
            TextEncoding::Utf8 => {
                let skip = if bytes.starts_with(UTF8_BOM) {
                    UTF8_BOM.len()
                } else {
                    0
                };
                std::str::from_utf8(&bytes[skip..])
                    .map(str::to_owned)
                    .map_err(|e| skip + e.valid_up_to())
            }
            TextEncoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(offset),
                None => Ok(bytes.iter().map(|&b| b as char).collect()),
            },
            // Every byte maps to the code point of the same value.
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = RowsiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            other => Err(RowsiftError::InvalidArgument(format!(
                "unsupported encoding '{other}'"
            ))),
        }
    }
}
