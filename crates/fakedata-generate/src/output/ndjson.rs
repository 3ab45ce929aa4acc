use serde_json::{Map, Value};

use crate::columns::Column;
use crate::output::Formatter;

/// One JSON object per row, keyed by column display name.
#[derive(Debug, Clone, Copy, Default)]
pub struct NdjsonFormatter;

impl Formatter for NdjsonFormatter {
    fn format(&self, columns: &[Column], values: &[String]) -> String {
        debug_assert_eq!(columns.len(), values.len());
        let record: Map<String, Value> = columns
            .iter()
            .zip(values)
            .map(|(column, value)| (column.name.clone(), Value::String(value.clone())))
            .collect();
        Value::Object(record).to_string()
    }
}
