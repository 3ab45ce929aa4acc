use std::io::{self, Write};
use std::time::Instant;

use rand::RngCore;
use tracing::{debug, info};

use crate::columns::Columns;
use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GenerationReport, RowLimit};
use crate::output::Formatter;

/// Produce one formatted row, newline included.
///
/// Each column's bound function is called exactly once, in column order.
pub fn generate_row(
    columns: &Columns,
    formatter: &dyn Formatter,
    rng: &mut dyn RngCore,
) -> String {
    let values: Vec<String> = columns.iter().map(|column| column.generate(rng)).collect();
    let mut row = formatter.format(columns.as_slice(), &values);
    row.push('\n');
    row
}

/// Drives the row loop for column mode.
#[derive(Debug, Clone, Default)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Write rows to `out` until the limit is reached.
    ///
    /// In stream mode every row is flushed as soon as it is written. A reader
    /// closing the output ends the run without an error.
    pub fn run<W: Write>(
        &self,
        columns: &Columns,
        formatter: &dyn Formatter,
        rng: &mut dyn RngCore,
        out: &mut W,
    ) -> Result<GenerationReport, GenerationError> {
        let start = Instant::now();
        let stream = self.options.limit.is_stream();
        let mut report = GenerationReport::default();

        info!(
            columns = columns.len(),
            limit = ?self.options.limit,
            header = self.options.header,
            "generation started"
        );

        if self.options.header {
            match formatter.header(columns.as_slice()) {
                Some(mut header) => {
                    header.push('\n');
                    if !emit(out, &header, stream, &mut report)? {
                        return Ok(report);
                    }
                }
                None => debug!("format has no header line"),
            }
        }

        let mut remaining = match self.options.limit {
            RowLimit::Rows(rows) => Some(rows),
            RowLimit::Stream => None,
        };

        while remaining.is_none_or(|rows| rows > 0) {
            let row = generate_row(columns, formatter, rng);
            if !emit(out, &row, stream, &mut report)? {
                break;
            }
            report.rows_written += 1;
            if let Some(rows) = remaining.as_mut() {
                *rows -= 1;
            }
        }

        if !report.output_closed {
            flush(out, &mut report)?;
        }

        info!(
            rows = report.rows_written,
            output_closed = report.output_closed,
            duration_ms = start.elapsed().as_millis() as u64,
            "generation finished"
        );
        Ok(report)
    }
}

/// Write one chunk; `Ok(false)` means the reader has gone away.
pub(crate) fn emit<W: Write>(
    out: &mut W,
    chunk: &str,
    flush_now: bool,
    report: &mut GenerationReport,
) -> Result<bool, GenerationError> {
    let written = out
        .write_all(chunk.as_bytes())
        .and_then(|()| if flush_now { out.flush() } else { Ok(()) });
    match written {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            debug!("output closed by reader");
            report.output_closed = true;
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn flush<W: Write>(
    out: &mut W,
    report: &mut GenerationReport,
) -> Result<(), GenerationError> {
    match out.flush() {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            report.output_closed = true;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
