//! Traffic Fines Engine CLI
//!
//! Command-line interface for processing driver records from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- records.csv > summary.csv
//! cargo run -- --format report records.csv
//! cargo run -- --strategy sync records.csv > summary.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 records.csv > summary.csv
//! RUST_LOG=debug cargo run -- records.csv
//! ```
//!
//! The program reads person, vehicle, violation, amend and retire records
//! from the input CSV file, applies them through the selected processing
//! strategy and writes either a per-person CSV summary or the text report to
//! stdout. Rejected records are logged to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use std::process;
use traffic_fines_engine::cli;
use traffic_fines_engine::strategy;

fn main() {
    let args = cli::parse_args();
    if let Err(e) = cli::init_logging(&args.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config, args.format)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
