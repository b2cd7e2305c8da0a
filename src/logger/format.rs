//! Record formatting

use chrono::{DateTime, Local, TimeZone};

/// Character code of the default column delimiter (TAB)
pub const DEFAULT_COLUMN_CODE: u32 = 9;

/// Character code of the default row delimiter (LF)
pub const DEFAULT_ROW_CODE: u32 = 10;

/// Build a delimiter string from a list of character codes.
///
/// Codes that are not valid Unicode scalar values are skipped.
pub fn delimiter_from_codes(codes: &[u32]) -> String {
    codes.iter().filter_map(|code| char::from_u32(*code)).collect()
}

/// Parse a `+`-joined code list such as `"13+10"`.
///
/// Entries that are not unsigned integers are skipped.
pub fn parse_code_list(list: &str) -> Vec<u32> {
    list.split('+')
        .map(str::trim)
        .filter_map(|code| code.parse::<u32>().ok())
        .collect()
}

/// Column and row delimiters used to lay out a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    /// Separates the timestamp, type and message columns
    pub column: String,

    /// Terminates every record
    pub row: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            column: delimiter_from_codes(&[DEFAULT_COLUMN_CODE]),
            row: delimiter_from_codes(&[DEFAULT_ROW_CODE]),
        }
    }
}

impl Delimiters {
    /// Create delimiters from explicit strings
    pub fn new(column: impl Into<String>, row: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            row: row.into(),
        }
    }

    /// Builder: set the column delimiter from character codes
    pub fn with_column_codes(mut self, codes: &[u32]) -> Self {
        self.column = delimiter_from_codes(codes);
        self
    }

    /// Builder: set the row delimiter from character codes
    pub fn with_row_codes(mut self, codes: &[u32]) -> Self {
        self.row = delimiter_from_codes(codes);
        self
    }
}

/// Render a timestamp the way records carry it (RFC 2822).
pub fn format_timestamp<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    time.to_rfc2822()
}

/// Current local time as a record timestamp
pub fn timestamp_now() -> String {
    format_timestamp(&Local::now())
}

/// Lay out one record.
///
/// `[timestamp]` + col, then `col [type] col` when `include_type` is set,
/// then the message and the row delimiter.
pub fn format_record(
    message: &str,
    log_type: &str,
    timestamp: &str,
    delimiters: &Delimiters,
    include_type: bool,
) -> String {
    let mut record = String::with_capacity(
        timestamp.len()
            + message.len()
            + log_type.len()
            + delimiters.column.len() * 3
            + delimiters.row.len()
            + 6,
    );

    record.push('[');
    record.push_str(timestamp);
    record.push(']');
    record.push_str(&delimiters.column);

    if include_type {
        record.push_str(&delimiters.column);
        record.push('[');
        record.push_str(log_type);
        record.push(']');
        record.push_str(&delimiters.column);
    }

    record.push_str(message);
    record.push_str(&delimiters.row);
    record
}
