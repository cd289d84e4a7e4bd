//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It streams
//! records from a `SyncReader` into a `FineEngine` one at a time, so memory
//! use is proportional to the registry, not to the input file.
//!
//! Rejected records (bad rows and records the registry refuses) are logged
//! at `warn` level and skipped.

use crate::cli::OutputFormat;
use crate::core::FineEngine;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{write_output, ProcessingStrategy};
use crate::types::FineError;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use traffic_fines_engine::cli::OutputFormat;
/// use traffic_fines_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(OutputFormat::Report);
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("records.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy {
    format: OutputFormat,
}

impl SyncProcessingStrategy {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Stream every record through a fresh `FineEngine`, then write the output
    ///
    /// Fatal errors (file not found, I/O errors) are returned immediately.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), FineError> {
        let mut engine = FineEngine::new();
        let reader = SyncReader::new(input_path)?;

        let mut rejected = 0u64;
        for result in reader {
            match result {
                Ok(record) => {
                    let line_type = record.record_type();
                    match engine.process(record) {
                        Ok(Some(fine)) => debug!("issued fine {}", fine),
                        Ok(None) => debug!("applied {:?} record", line_type),
                        Err(e) => {
                            rejected += 1;
                            warn!("record rejected: {}", e);
                        }
                    }
                }
                Err(e) => {
                    rejected += 1;
                    warn!("skipping record: {}", e);
                }
            }
        }

        let totals = engine.totals();
        info!(
            violations = totals.violations,
            fines = %totals.fines,
            rejected,
            "processing complete"
        );

        let summaries = engine.summaries();
        write_output(self.format, &totals, &summaries, output)
    }
}
