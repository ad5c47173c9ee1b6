use std::{
    fmt, io,
    path::{Path, PathBuf},
};

/// A failure reading from or writing to the record store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The underlying file could not be opened, read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The operating system error.
        #[source]
        source: io::Error,
    },

    /// Stored data is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Converts a `csv` failure, keeping I/O errors distinct from bad data.
    pub(crate) fn from_csv(path: &Path, error: csv::Error) -> Self {
        let line = error.position().map_or(0, csv::Position::line);
        let message = error.to_string();
        match error.into_kind() {
            csv::ErrorKind::Io(source) => Self::io(path, source),
            _ => ParseError::new(path, line, ParseErrorKind::Malformed(message)).into(),
        }
    }
}

/// A stored row that cannot be turned back into a record.
#[derive(Debug, thiserror::Error)]
pub struct ParseError {
    path: PathBuf,
    line: u64,
    kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(path: &Path, line: u64, kind: ParseErrorKind) -> Self {
        Self {
            path: path.to_path_buf(),
            line,
            kind,
        }
    }

    /// The file containing the bad row.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The 1-based line the bad row starts on.
    #[must_use]
    pub const fn line(&self) -> u64 {
        self.line
    }

    /// What is wrong with the row.
    #[must_use]
    pub const fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.path.display(), self.line, self.kind)
    }
}

/// The ways a stored row can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// The header row does not name the expected columns.
    #[error("unexpected header '{found}'")]
    Header {
        /// The header as found, comma-joined.
        found: String,
    },

    /// The row has the wrong number of fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Fields in the header.
        expected: usize,
        /// Fields in the row.
        found: usize,
    },

    /// The age column is not a whole number.
    #[error("invalid age '{0}'")]
    Age(String),

    /// The blood column is not one of the eight blood types.
    #[error("unknown blood type '{0}'")]
    BloodType(String),

    /// The file is not well-formed delimited text.
    #[error("{0}")]
    Malformed(String),
}
