//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. It processes records in batches using thread-based
//! parallelism with person-based partitioning.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (person partitioning + tasks)
//!     └── AsyncFineEngine (thread-safe processing)
//!         └── AsyncRegistry (DashMap people/vehicles + AtomicTally)
//! ```
//!
//! # Ordering
//!
//! - Batches are processed one after another, so a person's records keep
//!   their input order across the whole file
//! - Within a batch, each person's records run in their own tokio task
//! - Fine ids are ledger positions, so the output is identical to the sync
//!   strategy for the same input

use crate::cli::OutputFormat;
use crate::core::r#async::{AsyncFineEngine, AsyncRegistry, BatchProcessor};
use crate::io::async_reader::AsyncReader;
use crate::strategy::{write_output, ProcessingStrategy};
use crate::types::FineError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for batch processing
///
/// Controls how records are batched and the number of worker threads
/// for parallel processing within each batch.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of records per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig; zero values fall back to the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Records are read in batches and processed batch-by-batch. Within each
/// batch, records are partitioned by person and processed in parallel.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    format: OutputFormat,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Run the batch pipeline on a dedicated multi-threaded tokio runtime
    ///
    /// Fatal errors (file not found, I/O errors, runtime errors) are returned
    /// immediately. Rejected records are logged and skipped.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), FineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| FineError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(async {
            let registry = Arc::new(AsyncRegistry::new());
            let engine = Arc::new(AsyncFineEngine::new(Arc::clone(&registry)));
            let processor = BatchProcessor::new(engine);

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| FineError::IoError {
                    message: format!("Failed to open file '{}': {}", input_path.display(), e),
                })?;

            // csv-async reads through the futures AsyncRead traits
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut rejected = 0u64;
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                debug!("processing batch of {} records", batch.len());
                for processed in processor.process_batch(batch).await {
                    if let Err(e) = processed.result {
                        rejected += 1;
                        warn!(
                            "{:?} record for person {} rejected: {}",
                            processed.record.record_type(),
                            processed.record.person(),
                            e
                        );
                    }
                }
            }

            let totals = registry.totals();
            info!(
                violations = totals.violations,
                fines = %totals.fines,
                rejected = rejected + reader.rejected(),
                "processing complete"
            );

            let summaries = registry.summaries();
            write_output(self.format, &totals, &summaries, output)
        })
    }
}
