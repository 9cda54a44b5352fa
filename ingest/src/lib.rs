pub mod collector;
pub mod loader;
pub mod model;


pub use collector::{collect_inputs, DEFAULT_INPUT_GLOB};
pub use loader::{load_run, load_runs};
pub use model::{BenchmarkRun, IngestionRecord, QueryRecord, RawBenchmarkRun};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("No valid benchmark files found")]
    NoValidFiles,
    #[error("Input glob was invalid: {0}")]
    InvalidGlob(#[from] globset::Error),
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}
