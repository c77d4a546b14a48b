use serde::Serialize;

/// Why a single row could not be turned into a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowParseErrorKind {
    /// Trial row without a second cell.
    MissingValue,
    /// Second cell is neither `*` nor an integer.
    InvalidInteger { text: String },
    /// The reader could not decode the line at all.
    Unreadable { message: String },
}

impl std::fmt::Display for RowParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowParseErrorKind::MissingValue => write!(f, "trial row has no value cell"),
            RowParseErrorKind::InvalidInteger { text } => {
                write!(f, "value '{text}' is neither '*' nor an integer")
            }
            RowParseErrorKind::Unreadable { message } => write!(f, "unreadable line: {message}"),
        }
    }
}

/// A malformed row. Recoverable under `RowPolicy::Skip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowParseError {
    pub line: u64,
    pub raw: Vec<String>,
    pub kind: RowParseErrorKind,
}

impl std::fmt::Display for RowParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {} (row {:?})", self.line, self.kind, self.raw)
    }
}

impl std::error::Error for RowParseError {}

/// Errors that abort extraction of a whole file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// A trial row appeared before any key row.
    MissingKey { line: u64, raw: Vec<String> },
    /// No key row was ever seen, so there is no column to size the table by.
    EmptyInput,
    /// Malformed row under `RowPolicy::Abort`.
    RowParse(RowParseError),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::MissingKey { line, raw } => write!(
                f,
                "line {line}: trial row {raw:?} appeared before any key row"
            ),
            ExtractError::EmptyInput => write!(f, "no key rows found; nothing to extract"),
            ExtractError::RowParse(err) => write!(f, "malformed row, {err}"),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::RowParse(err) => Some(err),
            _ => None,
        }
    }
}
