//! Star table loading.
//!
//! The table is plain text. The first line holds the number of stars N, and
//! each of the next N lines holds one star:
//!
//! ```text
//! name  ra_h  ra_m  ra_s  dec_deg  dec_m  dec_s  distance_ly  num
//! ```
//!
//! Fields are separated by runs of tabs and/or spaces. The name is everything
//! before the first separator. Any malformed field rejects the whole table.

use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::error::{Error, Field, FormatError};

/// One row of the star table, exactly as read.
#[derive(Debug, Clone, PartialEq)]
pub struct StarRecord {
    pub name: String,
    pub catalog_number: i32,
    pub ra_hours: i32,
    pub ra_minutes: i32,
    pub ra_seconds: f64,
    pub dec_degrees: i32,
    pub dec_minutes: i32,
    pub dec_seconds: f64,
    /// Distance in light-years.
    pub distance_ly: i32,
}

fn is_separator(c: char) -> bool {
    c == '\t' || c == ' '
}

fn parse_field<T: FromStr>(
    line: usize,
    field: Field,
    value: Option<&str>,
) -> Result<T, FormatError> {
    let value = value.ok_or(FormatError::MissingField { line, field })?;
    value.parse().map_err(|_| FormatError::InvalidField {
        line,
        field,
        value: value.to_string(),
    })
}

/// Like `parse_field`, but also rejects `NaN` and infinities.
fn parse_real(line: usize, field: Field, value: Option<&str>) -> Result<f64, FormatError> {
    let parsed: f64 = parse_field(line, field, value)?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(FormatError::InvalidField {
            line,
            field,
            value: value.unwrap_or_default().to_string(),
        })
    }
}

/// Parse one record line. `line` is the 1-based line number used in errors.
fn parse_record(line: usize, text: &str) -> Result<StarRecord, FormatError> {
    let (name, rest) = text.split_once(is_separator).unwrap_or((text, ""));
    if name.is_empty() {
        return Err(FormatError::MissingField {
            line,
            field: Field::Name,
        });
    }

    let mut fields = rest.split(is_separator).filter(|s| !s.is_empty());

    let ra_hours = parse_field(line, Field::RaHours, fields.next())?;
    let ra_minutes = parse_field(line, Field::RaMinutes, fields.next())?;
    let ra_seconds = parse_real(line, Field::RaSeconds, fields.next())?;
    let dec_degrees = parse_field(line, Field::DecDegrees, fields.next())?;
    let dec_minutes = parse_field(line, Field::DecMinutes, fields.next())?;
    let dec_seconds = parse_real(line, Field::DecSeconds, fields.next())?;
    let distance_ly = parse_field(line, Field::Distance, fields.next())?;
    let catalog_number = parse_field(line, Field::CatalogNumber, fields.next())?;

    Ok(StarRecord {
        name: name.to_string(),
        catalog_number,
        ra_hours,
        ra_minutes,
        ra_seconds,
        dec_degrees,
        dec_minutes,
        dec_seconds,
        distance_ly,
    })
}

/// Parse a complete star table.
///
/// Returns exactly as many records as the header declares. Lines past the
/// last declared record and fields past the catalog number are ignored.
pub fn parse_catalog(text: &str) -> Result<Vec<StarRecord>, FormatError> {
    let mut lines = text.lines();

    let header = lines.next().unwrap_or("");
    let count = header
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| FormatError::InvalidCount {
            value: header.to_string(),
        })?;

    // The header count is untrusted, so the reservation is capped.
    let mut records = Vec::with_capacity(count.min(4096));
    for (i, line) in lines.take(count).enumerate() {
        records.push(parse_record(i + 2, line)?);
    }

    if records.len() != count {
        return Err(FormatError::TruncatedCatalog {
            expected: count,
            found: records.len(),
        });
    }

    debug!("Parsed {} star records", records.len());
    Ok(records)
}

/// Read and parse a star table from disk.
///
/// The read is asynchronous; parsing starts only once the whole file is in memory.
pub async fn load_catalog(path: &Path) -> Result<Vec<StarRecord>, Error> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(parse_catalog(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "3\n\
        Sirius\t6\t45\t8.9\t-16\t42\t58.0\t9\t1\n\
        Procyon \t 7  39 18.1\t5 13 30.0   11\t2\n\
        Altair\t19\t50\t47.0\t8\t52\t6.0\t17\t3\n";

    #[test]
    fn parses_sample_table() {
        let stars = parse_catalog(SAMPLE).unwrap();
        assert_eq!(stars.len(), 3);

        assert_eq!(
            stars[0],
            StarRecord {
                name: "Sirius".to_string(),
                catalog_number: 1,
                ra_hours: 6,
                ra_minutes: 45,
                ra_seconds: 8.9,
                dec_degrees: -16,
                dec_minutes: 42,
                dec_seconds: 58.0,
                distance_ly: 9,
            }
        );
        assert_eq!(stars[1].name, "Procyon");
        assert_eq!(stars[1].ra_seconds, 18.1);
        assert_eq!(stars[1].distance_ly, 11);
        assert_eq!(stars[2].catalog_number, 3);
    }

    #[test]
    fn accepts_crlf_and_trailing_lines() {
        let text = "1\r\nVega 18 36 56.3 38 47 1.0 25 7\r\nignored line\r\n";
        let stars = parse_catalog(text).unwrap();
        assert_eq!(stars.len(), 1);
        assert_eq!(stars[0].name, "Vega");
        assert_eq!(stars[0].catalog_number, 7);
    }

    #[test]
    fn ignores_fields_after_catalog_number() {
        let stars = parse_catalog("1\nDeneb 20 41 25.9 45 16 49.0 2615 9 extra\n").unwrap();
        assert_eq!(stars[0].catalog_number, 9);
    }

    #[test]
    fn rejects_non_integer_header() {
        for header in ["abc", "", "2.5", "0", "-3"] {
            let text = format!("{header}\nVega 18 36 56.3 38 47 1.0 25 7\n");
            let err = parse_catalog(&text).unwrap_err();
            assert_eq!(
                err,
                FormatError::InvalidCount {
                    value: header.to_string()
                }
            );
        }
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            parse_catalog(""),
            Err(FormatError::InvalidCount { .. })
        ));
    }

    #[test]
    fn invalid_field_is_named() {
        let text = "2\nVega 18 36 56.3 38 47 1.0 25 7\nAltair 19 5O 47.0 8 52 6.0 17 3\n";
        let err = parse_catalog(text).unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidField {
                line: 3,
                field: Field::RaMinutes,
                value: "5O".to_string(),
            }
        );
    }

    #[test]
    fn integer_fields_reject_reals() {
        let err = parse_catalog("1\nVega 18 36 56.3 38 47 1.0 25.5 7\n").unwrap_err();
        assert!(matches!(
            err,
            FormatError::InvalidField {
                field: Field::Distance,
                ..
            }
        ));
    }

    #[test]
    fn missing_field_is_named() {
        let err = parse_catalog("1\nVega 18 36 56.3 38 47 1.0 25\n").unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingField {
                line: 2,
                field: Field::CatalogNumber,
            }
        );

        let err = parse_catalog("1\nVega\n").unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingField {
                line: 2,
                field: Field::RaHours,
            }
        );
    }

    #[test]
    fn leading_separator_means_missing_name() {
        let err = parse_catalog("1\n\tVega 18 36 56.3 38 47 1.0 25 7\n").unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingField {
                line: 2,
                field: Field::Name,
            }
        );
    }

    #[test]
    fn truncated_table_is_rejected() {
        let err = parse_catalog("3\nVega 18 36 56.3 38 47 1.0 25 7\n").unwrap_err();
        assert_eq!(
            err,
            FormatError::TruncatedCatalog {
                expected: 3,
                found: 1,
            }
        );
    }

    #[test]
    fn oversized_count_is_truncated() {
        let text = "100000000000000000\nVega 18 36 56.3 38 47 1.0 25 7\n";
        let err = parse_catalog(text).unwrap_err();
        assert_eq!(
            err,
            FormatError::TruncatedCatalog {
                expected: 100_000_000_000_000_000,
                found: 1,
            }
        );
    }

    #[test]
    fn non_finite_seconds_are_rejected() {
        for (text, field, value) in [
            ("1\nVega 18 36 NaN 38 47 1.0 25 7\n", Field::RaSeconds, "NaN"),
            ("1\nVega 18 36 56.3 38 47 inf 25 7\n", Field::DecSeconds, "inf"),
            ("1\nVega 18 36 -infinity 38 47 1.0 25 7\n", Field::RaSeconds, "-infinity"),
        ] {
            let err = parse_catalog(text).unwrap_err();
            assert_eq!(
                err,
                FormatError::InvalidField {
                    line: 2,
                    field,
                    value: value.to_string(),
                }
            );
        }
    }

    #[tokio::test]
    async fn load_missing_file_is_io_error() {
        let err = load_catalog(Path::new("definitely/not/here/stars.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
