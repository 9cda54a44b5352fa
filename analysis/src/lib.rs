pub mod baseline;
pub mod comparison;
pub mod grouping;
pub mod ingestion;
pub mod query;
pub mod speedup;
pub mod stats;

#[cfg(test)]
mod fixtures;

pub use comparison::{IngestionSpeedup, MedianSpeedup, QuerySpeedupRow, SpeedupCell, Summary};
pub use grouping::{group_by_database, DatabaseGroups};
pub use ingestion::{aggregate_ingestion, IngestionStats, IngestionStatsMap};
pub use query::{aggregate_queries, QueryOutcome, QueryStats, QueryStatsMap};
pub use speedup::{compute_speedups, Speedups};

use tracing::info;
use tsbench_ingest::BenchmarkRun;

/// All aggregates of one report generation.
///
/// Built once from the loaded runs and handed to the renderers by reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub ingestion: IngestionStatsMap,
    pub queries: QueryStatsMap,
    pub baseline: Option<String>,
    /// number of benchmark files the analysis was built from
    pub file_count: usize,
}

impl Analysis {
    pub fn from_runs(runs: Vec<BenchmarkRun>) -> Self {
        let file_count = runs.len();

        Self::from_groups(&group_by_database(runs), file_count)
    }

    pub fn from_groups(groups: &DatabaseGroups, file_count: usize) -> Self {
        let ingestion = aggregate_ingestion(groups);
        let queries = aggregate_queries(groups);
        let baseline = baseline::select_baseline(&ingestion, &queries);

        info!(
            databases = groups.len(),
            queries = queries.len(),
            baseline = baseline.as_deref().unwrap_or("none"),
            "Aggregated benchmark runs"
        );

        Self {
            ingestion,
            queries,
            baseline,
            file_count,
        }
    }

    /// databases shown as report columns, those with ingestion statistics
    pub fn databases(&self) -> impl Iterator<Item = &str> {
        self.ingestion.keys().map(String::as_str)
    }
}
