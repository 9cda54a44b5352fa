use crate::{ingestion::IngestionStatsMap, query::QueryStatsMap};
use itertools::Itertools;
use tracing::debug;

/// number of queries `db_type` completed, counted over every known query id
pub fn completed_queries(db_type: &str, queries: &QueryStatsMap) -> usize {
    queries
        .values()
        .filter(|stats| {
            stats
                .databases
                .get(db_type)
                .map_or(false, |outcome| outcome.is_completed())
        })
        .count()
}

/// Choose the reference database for all speedups.
///
/// Among the databases that completed the most queries the one with the
/// slowest median ingestion step wins, so speedups are usually >= 1.
/// Equal durations go to the lexicographically smallest identifier.
/// `None` only without any ingestion statistics.
pub fn select_baseline(ingestion: &IngestionStatsMap, queries: &QueryStatsMap) -> Option<String> {
    let counts = ingestion
        .keys()
        .map(|db_type| (db_type.as_str(), completed_queries(db_type, queries)))
        .collect_vec();
    let most_completed = counts.iter().map(|(_, count)| *count).max();

    let candidates = counts
        .iter()
        .filter(|(_, count)| Some(*count) == most_completed)
        .map(|(db_type, _)| *db_type)
        .collect_vec();
    debug!(?candidates, ?most_completed, "Baseline candidates");

    slowest(candidates.into_iter(), ingestion)
        .or_else(|| slowest(ingestion.keys().map(String::as_str), ingestion))
}

fn slowest<'a, I>(databases: I, ingestion: &IngestionStatsMap) -> Option<String>
where
    I: Iterator<Item = &'a str>,
{
    databases
        .filter_map(|db_type| {
            ingestion
                .get(db_type)
                .map(|stats| (db_type, stats.median_duration_ms))
        })
        .max_by(|(a, a_duration), (b, b_duration)| {
            a_duration.total_cmp(b_duration).then_with(|| b.cmp(a))
        })
        .map(|(db_type, _)| db_type.to_owned())
}
