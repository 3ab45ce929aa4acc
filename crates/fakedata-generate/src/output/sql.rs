use crate::columns::Column;
use crate::output::Formatter;

/// `INSERT INTO` statements.
///
/// Values are wrapped in single quotes as-is; embedded quotes are not
/// escaped.
#[derive(Debug, Clone)]
pub struct SqlFormatter {
    table: String,
}

impl SqlFormatter {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }
}

impl Formatter for SqlFormatter {
    fn format(&self, columns: &[Column], values: &[String]) -> String {
        debug_assert_eq!(columns.len(), values.len());
        let names: Vec<&str> = columns.iter().map(|column| column.name.as_str()).collect();
        let values: Vec<String> = values.iter().map(|value| format!("'{value}'")).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({});",
            self.table,
            names.join(","),
            values.join(",")
        )
    }
}
