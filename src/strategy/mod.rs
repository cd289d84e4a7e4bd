//! Processing strategy module for driver record processing
//!
//! This module defines the Strategy pattern for complete processing pipelines,
//! encompassing both CSV parsing and the fines engine. This allows different
//! processing implementations (synchronous, asynchronous batch) to be selected
//! at runtime.

use crate::cli::{OutputFormat, StrategyType};
use crate::io::csv_format::{write_report, write_summary_csv};
use crate::types::{FineError, PersonSummary, Totals};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete record processing pipelines
///
/// Each strategy reads driver records from a CSV file, applies them to its
/// registry and writes the end-of-run output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process records from `input_path` and write the result to `output`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - A fatal I/O error occurs during reading or writing
    /// - Output cannot be written
    ///
    /// Rejected records are logged and skipped; they never cause this method
    /// to return an error.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), FineError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` is only used by the async strategy; `None` means defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    format: OutputFormat,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(format)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, format))
        }
    }
}

/// Write the end-of-run output in the requested format
pub(crate) fn write_output(
    format: OutputFormat,
    totals: &Totals,
    summaries: &[PersonSummary],
    output: &mut dyn Write,
) -> Result<(), FineError> {
    match format {
        OutputFormat::Summary => write_summary_csv(summaries, output),
        OutputFormat::Report => write_report(totals, summaries, output),
    }
}
