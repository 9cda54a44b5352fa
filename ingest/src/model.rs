use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// cumulative progress snapshot taken while loading data into a database
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngestionRecord {
    pub duration_ms: f64,
    pub n_records: f64,
}

/// single query execution, `duration_ms == -1` marks a failed or timed out query
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryRecord {
    pub query_id: i64,
    pub duration_ms: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// File contents as written by the benchmark harness.
/// Unknown keys are tolerated, producers tend to add fields over time.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawBenchmarkRun {
    #[serde(default)]
    pub db_type: Option<String>,
    // `null` is accepted as well as a missing key
    #[serde(default)]
    pub ingestion: Option<Vec<IngestionRecord>>,
    #[serde(default)]
    pub queries: Option<Vec<QueryRecord>>,
}

/// A loaded benchmark file, immutable once built
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkRun {
    pub db_type: String,
    pub source: PathBuf,
    pub ingestion: Vec<IngestionRecord>,
    pub queries: Vec<QueryRecord>,
}

impl BenchmarkRun {
    /// resolve the optional fields of a raw run, `source` supplies the fallback database name
    pub fn from_raw(raw: RawBenchmarkRun, source: &Path) -> Self {
        let db_type = raw.db_type.unwrap_or_else(|| db_type_from_path(source));

        Self {
            db_type,
            source: source.to_path_buf(),
            ingestion: raw.ingestion.unwrap_or_default(),
            queries: raw.queries.unwrap_or_default(),
        }
    }
}

/// file name without its extension, used when a run does not name its database
pub fn db_type_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
