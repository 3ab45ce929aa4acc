use crate::columns::Column;
use crate::output::Formatter;

/// Values joined by a fixed separator, without quoting.
#[derive(Debug, Clone)]
pub struct DelimitedFormatter {
    separator: String,
}

impl DelimitedFormatter {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl Formatter for DelimitedFormatter {
    fn format(&self, columns: &[Column], values: &[String]) -> String {
        debug_assert_eq!(columns.len(), values.len());
        values.join(&self.separator)
    }

    fn header(&self, columns: &[Column]) -> Option<String> {
        let names: Vec<&str> = columns.iter().map(|column| column.name.as_str()).collect();
        Some(names.join(&self.separator))
    }
}
