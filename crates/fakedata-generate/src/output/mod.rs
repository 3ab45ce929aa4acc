use std::fmt;
use std::str::FromStr;

use crate::columns::Column;

pub mod delimited;
pub mod ndjson;
pub mod sql;

pub use delimited::DelimitedFormatter;
pub use ndjson::NdjsonFormatter;
pub use sql::SqlFormatter;

/// Renders one row of values.
///
/// Callers guarantee that `columns` and `values` have the same length.
pub trait Formatter {
    fn format(&self, columns: &[Column], values: &[String]) -> String;

    /// Header line for formats that have one.
    fn header(&self, _columns: &[Column]) -> Option<String> {
        None
    }
}

/// Output formats selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Column,
    Csv,
    Tab,
    Sql,
    Ndjson,
}

impl OutputFormat {
    pub const ALL: &'static [OutputFormat] = &[
        OutputFormat::Column,
        OutputFormat::Csv,
        OutputFormat::Tab,
        OutputFormat::Sql,
        OutputFormat::Ndjson,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Column => "column",
            OutputFormat::Csv => "csv",
            OutputFormat::Tab => "tab",
            OutputFormat::Sql => "sql",
            OutputFormat::Ndjson => "ndjson",
        }
    }

    /// Build the formatter. `separator` only applies to `column`, `table`
    /// only to `sql`.
    pub fn formatter(self, separator: &str, table: &str) -> Box<dyn Formatter> {
        match self {
            OutputFormat::Column => Box::new(DelimitedFormatter::new(separator)),
            OutputFormat::Csv => Box::new(DelimitedFormatter::new(",")),
            OutputFormat::Tab => Box::new(DelimitedFormatter::new("\t")),
            OutputFormat::Sql => Box::new(SqlFormatter::new(table)),
            OutputFormat::Ndjson => Box::new(NdjsonFormatter),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .iter()
            .copied()
            .find(|format| format.as_str() == value)
            .ok_or_else(|| format!("unknown format: {value}"))
    }
}
