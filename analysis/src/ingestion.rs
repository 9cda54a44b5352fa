use crate::{
    grouping::DatabaseGroups,
    stats::{clamp_non_negative, mean, median},
};
use itertools::Itertools;
use std::{collections::BTreeMap, iter};
use tracing::debug;
use tsbench_ingest::{BenchmarkRun, IngestionRecord};

/// Summary of all ingestion runs of one database.
///
/// Per step values (durations, batch sizes, rates) are pooled across runs and
/// reduced with the median, per run totals are reduced with the mean.
#[derive(Clone, Debug, PartialEq)]
pub struct IngestionStats {
    pub median_duration_ms: f64,
    pub median_records_per_batch: f64,
    /// records per second
    pub median_ingestion_rate: f64,
    pub mean_total_records: f64,
    pub mean_total_duration_ms: f64,
    /// number of runs with ingestion data
    pub file_count: usize,
}

/// map of dbType -> IngestionStats
pub type IngestionStatsMap = BTreeMap<String, IngestionStats>;

#[derive(Debug, Clone, Default, PartialEq)]
/// series derived from the cumulative snapshots of a single run
pub struct RunSeries {
    pub durations: Vec<f64>,
    pub records_per_batch: Vec<f64>,
    pub rates: Vec<f64>,
    pub total_records: f64,
    pub total_duration_ms: f64,
}

impl RunSeries {
    pub fn derive(records: &[IngestionRecord]) -> Self {
        let durations = records
            .iter()
            .map(|record| clamp_non_negative(record.duration_ms))
            .collect_vec();

        // the first snapshot is its own batch, later ones are deltas of the counter
        let records_per_batch = iter::once(records.first().map(|first| first.n_records))
            .flatten()
            .chain(
                records
                    .iter()
                    .tuple_windows()
                    .map(|(previous, next)| next.n_records - previous.n_records),
            )
            .map(clamp_non_negative)
            .collect_vec();

        // zero length steps are left out of the rate series entirely
        let rates = durations
            .iter()
            .zip(records_per_batch.iter())
            .filter(|(duration, _)| **duration > 0.0)
            .map(|(duration, batch)| batch * 1000.0 / duration)
            .collect_vec();

        Self {
            total_records: records
                .last()
                .map_or(0.0, |last| clamp_non_negative(last.n_records)),
            total_duration_ms: durations.iter().sum(),
            durations,
            records_per_batch,
            rates,
        }
    }
}

/// Aggregate the ingestion part of a database group.
///
/// Runs without ingestion snapshots do not contribute, `None` if no run does.
pub fn ingestion_stats(runs: &[BenchmarkRun]) -> Option<IngestionStats> {
    let series = runs
        .iter()
        .filter(|run| !run.ingestion.is_empty())
        .map(|run| RunSeries::derive(&run.ingestion))
        .collect_vec();

    if series.is_empty() {
        return None;
    }

    // flat pools across runs, not per run averages
    let durations = series
        .iter()
        .flat_map(|run| run.durations.iter().copied())
        .collect_vec();
    let batches = series
        .iter()
        .flat_map(|run| run.records_per_batch.iter().copied())
        .collect_vec();
    let rates = series
        .iter()
        .flat_map(|run| run.rates.iter().copied())
        .collect_vec();
    let total_records = series.iter().map(|run| run.total_records).collect_vec();
    let total_durations = series.iter().map(|run| run.total_duration_ms).collect_vec();

    Some(IngestionStats {
        median_duration_ms: median(&durations).unwrap_or(0.0),
        median_records_per_batch: median(&batches).unwrap_or(0.0),
        median_ingestion_rate: median(&rates).unwrap_or(0.0),
        mean_total_records: mean(&total_records).unwrap_or(0.0),
        mean_total_duration_ms: mean(&total_durations).unwrap_or(0.0),
        file_count: series.len(),
    })
}

/// ingestion statistics for every database that has any ingestion data
pub fn aggregate_ingestion(groups: &DatabaseGroups) -> IngestionStatsMap {
    groups
        .iter()
        .filter_map(|(db_type, runs)| {
            let stats = ingestion_stats(runs)?;
            debug!(
                db_type = db_type.as_str(),
                files = stats.file_count,
                median_duration_ms = stats.median_duration_ms,
                "Aggregated ingestion"
            );

            Some((db_type.clone(), stats))
        })
        .collect()
}
