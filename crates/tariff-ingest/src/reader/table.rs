//! Delimited text parsing with encoding and delimiter fallback.

use std::fmt;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

use super::delimiter::{Delimiter, guess_delimiter, sniff_delimiter};
use super::encoding::TextEncoding;

/// A parsed delimited file: header names and string cells.
///
/// Every row has exactly `headers.len()` cells; short records are padded
/// with empty cells, which downstream coercion treats as missing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Position of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

/// How an attempt picks its delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterChoice {
    /// Guessed from the first line, or forced by the caller.
    Fixed(Delimiter),
    /// Sniffed from the decoded text.
    Sniffed,
}

/// One encoding/delimiter combination tried against a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseAttempt {
    pub encoding: TextEncoding,
    pub delimiter: DelimiterChoice,
}

impl fmt::Display for ParseAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.delimiter {
            DelimiterChoice::Fixed(delimiter) => write!(f, "{} with {delimiter}", self.encoding),
            DelimiterChoice::Sniffed => write!(f, "{} with sniffed delimiter", self.encoding),
        }
    }
}

impl ParseAttempt {
    /// Runs the attempt, returning the table and the delimiter actually used.
    pub fn run(self, bytes: &[u8]) -> std::result::Result<(RawTable, Delimiter), String> {
        let text = self.encoding.decode(bytes)?;
        let delimiter = match self.delimiter {
            DelimiterChoice::Fixed(delimiter) => delimiter,
            DelimiterChoice::Sniffed => {
                sniff_delimiter(&text).ok_or_else(|| "could not determine delimiter".to_string())?
            }
        };
        let table = parse_delimited(&text, delimiter)?;
        Ok((table, delimiter))
    }
}

/// The ordered attempts for a file whose guessed delimiter is `guess`.
///
/// Both encodings are tried with the guessed delimiter before falling back
/// to sniffing under each encoding.
pub fn parse_plan(guess: Delimiter) -> [ParseAttempt; 4] {
    [
        ParseAttempt {
            encoding: TextEncoding::Utf8,
            delimiter: DelimiterChoice::Fixed(guess),
        },
        ParseAttempt {
            encoding: TextEncoding::Latin1,
            delimiter: DelimiterChoice::Fixed(guess),
        },
        ParseAttempt {
            encoding: TextEncoding::Utf8,
            delimiter: DelimiterChoice::Sniffed,
        },
        ParseAttempt {
            encoding: TextEncoding::Latin1,
            delimiter: DelimiterChoice::Sniffed,
        },
    ]
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().to_string()
}

/// Parses decoded text with a fixed delimiter.
///
/// Fails when there is no header row or a record has more fields than the
/// header. Blank lines are skipped by the reader.
pub fn parse_delimited(text: &str, delimiter: Delimiter) -> std::result::Result<RawTable, String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter.as_byte())
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err("no header row".to_string());
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, csv::Position::line);
            return Err(format!(
                "expected {} fields in line {line}, saw {}",
                headers.len(),
                record.len()
            ));
        }
        let mut row: Vec<String> = record.iter().map(normalize_cell).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

/// A successfully parsed file and how it was parsed.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub table: RawTable,
    pub encoding: TextEncoding,
    pub delimiter: Delimiter,
    /// True when the first attempt failed and a fallback succeeded.
    pub used_fallback: bool,
}

/// Reads the first line of `bytes` for delimiter guessing, ignoring bad bytes.
fn first_line(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).replace('\u{fffd}', "")
}

/// Reads and parses a delimited file, trying each attempt of the plan.
///
/// `force` overrides the first-line guess.
///
/// # Errors
///
/// [`IngestError::FileRead`] if the file cannot be read, and
/// [`IngestError::Parse`] listing every attempt when all of them fail.
pub fn read_delimited_file(path: &Path, force: Option<Delimiter>) -> Result<ParsedFile> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::file_read(path, e))?;
    let guess = force.unwrap_or_else(|| guess_delimiter(&first_line(&bytes)));

    let mut failures = Vec::new();
    for (index, attempt) in parse_plan(guess).into_iter().enumerate() {
        match attempt.run(&bytes) {
            Ok((table, delimiter)) => {
                if index > 0 {
                    warn!(
                        path = %path.display(),
                        attempt = %attempt,
                        "parsed after fallback"
                    );
                }
                return Ok(ParsedFile {
                    table,
                    encoding: attempt.encoding,
                    delimiter,
                    used_fallback: index > 0,
                });
            }
            Err(reason) => {
                debug!(path = %path.display(), attempt = %attempt, %reason, "parse attempt failed");
                failures.push(format!("{attempt}: {reason}"));
            }
        }
    }

    Err(IngestError::Parse {
        path: path.to_path_buf(),
        attempts: failures,
    })
}
