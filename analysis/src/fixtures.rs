use std::path::PathBuf;
use tsbench_ingest::{BenchmarkRun, IngestionRecord, QueryRecord};

/// run with `(durationMs, nRecords)` snapshots and `(queryId, durationMs, description)` queries
pub fn run(db_type: &str, ingestion: &[(f64, f64)], queries: &[(i64, f64, &str)]) -> BenchmarkRun {
    BenchmarkRun {
        db_type: db_type.to_string(),
        source: PathBuf::from(format!("{db_type}.json")),
        ingestion: ingestion
            .iter()
            .map(|&(duration_ms, n_records)| IngestionRecord {
                duration_ms,
                n_records,
            })
            .collect(),
        queries: queries
            .iter()
            .map(|&(query_id, duration_ms, description)| QueryRecord {
                query_id,
                duration_ms,
                description: Some(description.to_string()).filter(|text| !text.is_empty()),
            })
            .collect(),
    }
}
