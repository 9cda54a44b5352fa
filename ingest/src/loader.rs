use crate::{
    model::{BenchmarkRun, RawBenchmarkRun},
    IngestError,
};
use std::{fs::File, io::BufReader, path::Path};
use tracing::debug;

/// Parse a single benchmark file.
///
/// A file that cannot be opened or parsed is an error for the whole invocation,
/// there is no partial report.
#[tracing::instrument(level = "debug")]
pub fn load_run(path: &Path) -> Result<BenchmarkRun, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: RawBenchmarkRun =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            IngestError::Malformed {
                path: path.to_path_buf(),
                source,
            }
        })?;
    let run = BenchmarkRun::from_raw(raw, path);

    debug!(
        db_type = run.db_type.as_str(),
        ingestion = run.ingestion.len(),
        queries = run.queries.len(),
        "Loaded benchmark run"
    );

    Ok(run)
}

/// load all runs in order, stopping at the first broken file
pub fn load_runs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<BenchmarkRun>, IngestError> {
    paths.iter().map(|path| load_run(path.as_ref())).collect()
}
