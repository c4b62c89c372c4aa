use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A column of the star table, used to name the offending field in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    RaHours,
    RaMinutes,
    RaSeconds,
    DecDegrees,
    DecMinutes,
    DecSeconds,
    Distance,
    CatalogNumber,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::RaHours => "ra_h",
            Field::RaMinutes => "ra_m",
            Field::RaSeconds => "ra_s",
            Field::DecDegrees => "dec_deg",
            Field::DecMinutes => "dec_m",
            Field::DecSeconds => "dec_s",
            Field::Distance => "distance",
            Field::CatalogNumber => "num",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Malformed catalog text. Line numbers are 1-based and count the header.
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("line 1: star count {value:?} is not a positive integer")]
    InvalidCount { value: String },

    #[error("line {line}: missing field `{field}`")]
    MissingField { line: usize, field: Field },

    #[error("line {line}: field `{field}` has invalid value {value:?}")]
    InvalidField {
        line: usize,
        field: Field,
        value: String,
    },

    #[error("catalog declares {expected} stars but only {found} records are present")]
    TruncatedCatalog { expected: usize, found: usize },
}

/// Any failure that aborts a run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed catalog: {0}")]
    Format(#[from] FormatError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A star whose distance row sums to zero, rejected under the strict policy.
    #[error("star #{index} (num = {catalog_number}) has a zero distance sum; spread is undefined")]
    DegenerateRow { index: usize, catalog_number: i32 },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = FormatError::InvalidField {
            line: 3,
            field: Field::RaSeconds,
            value: "x1".to_string(),
        };
        assert_eq!(err.to_string(), "line 3: field `ra_s` has invalid value \"x1\"");

        let err = FormatError::MissingField {
            line: 2,
            field: Field::CatalogNumber,
        };
        assert_eq!(err.to_string(), "line 2: missing field `num`");
    }

    #[test]
    fn format_error_converts() {
        let err: Error = FormatError::InvalidCount {
            value: "abc".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Format(FormatError::InvalidCount { .. })));
        assert!(err.to_string().contains("\"abc\""));
    }

    #[test]
    fn io_error_names_path() {
        let err = Error::io(
            "missing/stars.txt",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().contains("missing/stars.txt"));
    }
}
