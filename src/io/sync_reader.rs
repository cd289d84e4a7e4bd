//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over driver records from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<ReportRecord, RecordError>` for each CSV row:
//!
//! ```no_run
//! use traffic_fines_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("records.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Processing record: {:?}", record),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the iterator
//! - Line numbers are included in errors for debugging

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{FineError, RecordError, ReportRecord};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Maintains streaming behavior with constant memory usage.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (trailing optional columns may be omitted)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file could not be opened.
    pub fn new(path: &Path) -> Result<Self, FineError> {
        let file = File::open(path).map_err(|e| FineError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<ReportRecord, RecordError>;

    /// Get the next driver record from the CSV file
    ///
    /// # Returns
    ///
    /// * `Some(Ok(ReportRecord))` - Successfully parsed record
    /// * `Some(Err(RecordError))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let row = deserializer.next()?;
        self.line_num += 1;

        let line = self.line_num;
        Some(
            row.map_err(FineError::from)
                .and_then(convert_csv_record)
                .map_err(|source| RecordError { line, source }),
        )
    }
}
