use crate::{grouping::DatabaseGroups, stats::mean};
use itertools::Itertools;
use std::collections::BTreeMap;
use tracing::{debug, warn};
use tsbench_ingest::QueryRecord;

/// metric value standing in for a query that never completed
pub const FAILED_SENTINEL: f64 = -1.0;

/// Mean duration of one query on one database across all of its runs
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QueryOutcome {
    Mean(f64),
    /// every run failed or timed out
    Failed,
}

impl QueryOutcome {
    /// failed entries (negative durations) are discarded before averaging
    pub fn from_durations(durations: &[f64]) -> Self {
        let successful = durations
            .iter()
            .copied()
            .filter(|duration| *duration >= 0.0)
            .collect_vec();

        mean(&successful).map_or(Self::Failed, Self::Mean)
    }

    pub fn mean(self) -> Option<f64> {
        match self {
            Self::Mean(value) => Some(value),
            Self::Failed => None,
        }
    }

    pub fn is_completed(self) -> bool {
        matches!(self, Self::Mean(_))
    }

    /// plain metric value with failures mapped to `FAILED_SENTINEL`
    pub fn as_metric(self) -> f64 {
        self.mean().unwrap_or(FAILED_SENTINEL)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryStats {
    pub description: String,
    /// dbType -> outcome, only databases that reported the query
    pub databases: BTreeMap<String, QueryOutcome>,
}

impl QueryStats {
    /// metric map as consumed by the speedup calculator
    pub fn metric_values(&self) -> BTreeMap<String, f64> {
        self.databases
            .iter()
            .map(|(db_type, outcome)| (db_type.clone(), outcome.as_metric()))
            .collect()
    }
}

/// map of query id -> QueryStats
pub type QueryStatsMap = BTreeMap<i64, QueryStats>;

pub fn default_description(query_id: i64) -> String {
    format!("Query {query_id}")
}

/// Aggregate the query part of all database groups.
///
/// Runs without ingestion data still contribute here.
pub fn aggregate_queries(groups: &DatabaseGroups) -> QueryStatsMap {
    let mut descriptions = BTreeMap::new();
    let mut durations: BTreeMap<(i64, &str), Vec<f64>> = BTreeMap::new();

    for (db_type, runs) in groups {
        for query in runs.iter().flat_map(|run| run.queries.iter()) {
            durations
                .entry((query.query_id, db_type.as_str()))
                .or_default()
                .push(query.duration_ms);
            record_description(&mut descriptions, query);
        }
    }

    durations
        .into_iter()
        .fold(QueryStatsMap::new(), |mut stats, ((query_id, db_type), pool)| {
            let outcome = QueryOutcome::from_durations(&pool);
            debug!(query_id, db_type, runs = pool.len(), ?outcome, "Aggregated query");

            stats
                .entry(query_id)
                .or_insert_with(|| QueryStats {
                    description: descriptions
                        .get(&query_id)
                        .cloned()
                        .unwrap_or_else(|| default_description(query_id)),
                    databases: BTreeMap::new(),
                })
                .databases
                .insert(db_type.to_owned(), outcome);

            stats
        })
}

// first non-empty description wins, later mismatches are only reported
fn record_description(descriptions: &mut BTreeMap<i64, String>, query: &QueryRecord) {
    let Some(description) = query.description.as_deref().filter(|text| !text.is_empty()) else {
        return;
    };

    match descriptions.get(&query.query_id) {
        Some(existing) if existing != description => {
            warn!(
                query_id = query.query_id,
                kept = existing.as_str(),
                ignored = description,
                "Conflicting query descriptions"
            );
        }
        Some(_) => {}
        None => {
            descriptions.insert(query.query_id, description.to_owned());
        }
    }
}
