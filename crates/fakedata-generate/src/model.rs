use serde::{Deserialize, Serialize};

/// How many rows (or template passes) a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowLimit {
    /// Exactly this many.
    Rows(u64),
    /// Until the process is stopped or the reader goes away.
    Stream,
}

impl RowLimit {
    pub fn is_stream(self) -> bool {
        matches!(self, RowLimit::Stream)
    }
}

/// Options for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    pub limit: RowLimit,
    /// Write the formatter's header line before the first row.
    pub header: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            limit: RowLimit::Rows(10),
            header: false,
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub rows_written: u64,
    /// The output was closed by the reader before the run completed.
    pub output_closed: bool,
}
