//! Asynchronous CSV reader with batch interface
//!
//! Reads driver records from any `futures` async source in batches sized for
//! the batch processor.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of ReportRecords
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{FineError, RecordError, ReportRecord};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV reader
///
/// Maintains streaming behavior with constant memory usage.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
    rejected: u64,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader over `reader`
    ///
    /// Uses the same trimming and flexible-width settings as the sync reader.
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 1,
            rejected: 0,
        }
    }

    /// Read up to `batch_size` driver records
    ///
    /// Rows that fail to parse or convert are logged with their line number
    /// and skipped. Returns an empty vector once the input is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<ReportRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            let row = match records.next().await {
                Some(row) => row,
                None => break,
            };
            self.line_num += 1;

            let converted = row
                .map_err(|e| FineError::ParseError {
                    line: Some(self.line_num),
                    message: e.to_string(),
                })
                .and_then(convert_csv_record);

            match converted {
                Ok(record) => batch.push(record),
                Err(source) => {
                    self.rejected += 1;
                    let error = RecordError {
                        line: self.line_num,
                        source,
                    };
                    warn!("skipping record: {}", error);
                }
            }
        }

        batch
    }

    /// Number of rows skipped so far because they failed to parse or convert
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}
