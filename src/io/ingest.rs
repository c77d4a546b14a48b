//! Tab-delimited ingest.
//!
//! Lab exports carry a `.csv` / `.xls` extension but are tab-separated text
//! with ragged rows and no header. This module only splits lines into cells;
//! classification happens in `extract`.
//!
//! Design goals:
//! - **Row-level errors** (a line the reader cannot decode becomes an `Err`
//!   item, not a failed run)
//! - **Lossy decoding** (stray Latin-1 bytes do not sink a file)
//! - **Separation of concerns**: no classification logic here

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::ByteRecord;

use crate::domain::RawRow;
use crate::error::AppError;
use crate::extract::{RowParseError, RowParseErrorKind};

/// Read every row of a tab-delimited file.
pub fn read_rows(path: &Path) -> Result<Vec<Result<RawRow, RowParseError>>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open input '{}': {e}", path.display())))?;
    Ok(read_rows_from(file))
}

/// Read every row from any reader.
///
/// One item per physical line (`\n` or `\r\n`), numbered from 1. Blank
/// lines are kept as rows with no cells so they show up in the row log.
pub fn read_rows_from<R: Read>(reader: R) -> Vec<Result<RawRow, RowParseError>> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut rows = Vec::new();
    let mut line: u64 = 0;

    loop {
        buf.clear();
        line += 1;
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => rows.push(split_line(line, trim_line_end(&buf))),
            Err(e) => {
                rows.push(Err(unreadable(line, e.to_string())));
                break;
            }
        }
    }

    rows
}

fn trim_line_end(bytes: &[u8]) -> &[u8] {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

/// Split one line into cells with the csv tokenizer.
fn split_line(line: u64, bytes: &[u8]) -> Result<RawRow, RowParseError> {
    if bytes.is_empty() {
        return Ok(RawRow::new(line, Vec::new()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(bytes);

    let mut record = ByteRecord::new();
    match reader.read_byte_record(&mut record) {
        Ok(_) => {
            let cells = record
                .iter()
                .map(|cell| String::from_utf8_lossy(cell).into_owned())
                .collect();
            Ok(RawRow::new(line, cells))
        }
        Err(e) => Err(unreadable(line, e.to_string())),
    }
}

fn unreadable(line: u64, message: String) -> RowParseError {
    RowParseError {
        line,
        raw: Vec::new(),
        kind: RowParseErrorKind::Unreadable { message },
    }
}
