//! Option micro-grammars shared by parametric generators.

use chrono::NaiveDate;
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a parametric generator rejected its options string.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("could not parse {bound} '{value}' as an integer")]
    InvalidInt { bound: &'static str, value: String },
    #[error("could not parse {bound} '{value}' as a YYYY-MM-DD date")]
    InvalidDate { bound: &'static str, value: String },
    #[error("min ({min}) is greater than max ({max})")]
    InvertedRange { min: String, max: String },
    #[error("{what} must be between {min} and {max}, got {value}")]
    OutOfRange {
        what: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },
    #[error("no file path given")]
    MissingPath,
    #[error("no readable file found at '{path}': {source}")]
    UnreadableFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("file '{0}' has no lines")]
    EmptyFile(String),
    #[error("takes no options")]
    Unexpected,
}

/// A `min,max` pair where either side may be left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeOptions<'a> {
    pub min: Option<&'a str>,
    pub max: Option<&'a str>,
}

/// Split `min,max` options. Whitespace around each side is ignored and an
/// empty side is reported as absent.
pub fn split_range(options: &str) -> RangeOptions<'_> {
    let (min, max) = match options.split_once(',') {
        Some((min, max)) => (min, Some(max)),
        None => (options, None),
    };
    RangeOptions {
        min: non_empty(min),
        max: max.and_then(non_empty),
    }
}

/// Split a comma-separated list. Entries are kept verbatim, blanks and
/// surrounding spaces included; only empty options give an empty list.
pub fn split_list(options: &str) -> Vec<String> {
    if options.is_empty() {
        return Vec::new();
    }
    options.split(',').map(str::to_string).collect()
}

/// Strip one pair of matching single or double quotes.
pub fn strip_quotes(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

pub fn parse_int_bound(bound: &'static str, value: &str) -> Result<i64, OptionsError> {
    value.parse::<i64>().map_err(|_| OptionsError::InvalidInt {
        bound,
        value: value.to_string(),
    })
}

pub fn parse_date_bound(bound: &'static str, value: &str) -> Result<NaiveDate, OptionsError> {
    parse_date_value(value).ok_or_else(|| OptionsError::InvalidDate {
        bound,
        value: value.to_string(),
    })
}

pub fn parse_date_value(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_range_handles_missing_sides() {
        assert_eq!(
            split_range(""),
            RangeOptions {
                min: None,
                max: None
            }
        );
        assert_eq!(
            split_range("5"),
            RangeOptions {
                min: Some("5"),
                max: None
            }
        );
        assert_eq!(
            split_range(",7"),
            RangeOptions {
                min: None,
                max: Some("7")
            }
        );
        assert_eq!(
            split_range(" 1 , 9 "),
            RangeOptions {
                min: Some("1"),
                max: Some("9")
            }
        );
    }

    #[test]
    fn strip_quotes_only_removes_matching_pairs() {
        assert_eq!(strip_quotes("\"a,b.txt\""), "a,b.txt");
        assert_eq!(strip_quotes("'a:b.txt'"), "a:b.txt");
        assert_eq!(strip_quotes("'mismatch\""), "'mismatch\"");
        assert_eq!(strip_quotes("plain.txt"), "plain.txt");
        assert_eq!(strip_quotes("'"), "'");
    }

    #[test]
    fn split_list_keeps_entries_verbatim() {
        assert_eq!(split_list("a,,b, c"), vec!["a", "", "b", " c"]);
        assert_eq!(split_list(","), vec!["", ""]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn bounds_report_which_side_failed() {
        let err = parse_int_bound("max", "ten").unwrap_err();
        assert_eq!(err.to_string(), "could not parse max 'ten' as an integer");
        assert!(parse_date_bound("min", "2016-13-01").is_err());
        assert_eq!(
            parse_date_bound("min", "2016-02-29").ok(),
            NaiveDate::from_ymd_opt(2016, 2, 29)
        );
    }
}
