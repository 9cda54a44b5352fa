//! Comparison tables derived from an [`Analysis`], ready for rendering.

use crate::{
    baseline::completed_queries,
    speedup::compute_speedups,
    stats::median,
    Analysis,
};
use itertools::Itertools;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
pub struct IngestionSpeedup {
    pub database: String,
    pub duration_speedup: f64,
    /// median rate relative to the baseline, 0 when the baseline rate is 0
    pub rate_improvement: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpeedupCell {
    /// baseline column of a query the baseline reported
    Baseline,
    Speedup(f64),
    NotAvailable,
}

impl SpeedupCell {
    /// contribution to the median speedup pool, unavailable cells count as 0
    fn pooled(self) -> f64 {
        match self {
            Self::Speedup(value) => value,
            Self::Baseline | Self::NotAvailable => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuerySpeedupRow {
    pub query_id: i64,
    pub description: String,
    /// one cell per report database, sorted
    pub cells: Vec<(String, SpeedupCell)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MedianSpeedup {
    pub database: String,
    /// median over all queries, failures included as 0
    pub median: f64,
    /// min over successful queries only
    pub min: f64,
    pub max: f64,
    pub successful: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub best_ingestion: Option<(String, f64)>,
    pub best_query: Option<(String, f64)>,
}

impl Analysis {
    pub fn ingestion_speedups(&self) -> Vec<IngestionSpeedup> {
        let Some(baseline) = self.baseline.as_deref() else {
            return Vec::new();
        };
        let Some(baseline_stats) = self.ingestion.get(baseline) else {
            return Vec::new();
        };

        let durations = self
            .ingestion
            .iter()
            .map(|(db_type, stats)| (db_type.clone(), stats.median_duration_ms))
            .collect::<BTreeMap<_, _>>();

        compute_speedups(&durations, baseline)
            .into_iter()
            .filter_map(|(database, duration_speedup)| {
                let stats = self.ingestion.get(&database)?;
                let rate_improvement = if baseline_stats.median_ingestion_rate > 0.0 {
                    stats.median_ingestion_rate / baseline_stats.median_ingestion_rate
                } else {
                    0.0
                };

                Some(IngestionSpeedup {
                    database,
                    duration_speedup,
                    rate_improvement,
                })
            })
            .collect()
    }

    /// one row per query id, empty without a baseline
    pub fn query_speedups(&self) -> Vec<QuerySpeedupRow> {
        let Some(baseline) = self.baseline.as_deref() else {
            return Vec::new();
        };

        self.queries
            .iter()
            .map(|(query_id, stats)| {
                let speedups = compute_speedups(&stats.metric_values(), baseline);
                let cells = self
                    .databases()
                    .map(|db_type| {
                        let cell = if db_type == baseline {
                            if stats.databases.contains_key(baseline) {
                                SpeedupCell::Baseline
                            } else {
                                SpeedupCell::NotAvailable
                            }
                        } else {
                            match speedups.get(db_type) {
                                Some(speedup) if *speedup > 0.0 => SpeedupCell::Speedup(*speedup),
                                _ => SpeedupCell::NotAvailable,
                            }
                        };

                        (db_type.to_owned(), cell)
                    })
                    .collect_vec();

                QuerySpeedupRow {
                    query_id: *query_id,
                    description: stats.description.clone(),
                    cells,
                }
            })
            .collect()
    }

    /// median/min/max query speedup for every non-baseline database
    pub fn median_query_speedups(&self) -> Vec<MedianSpeedup> {
        let Some(baseline) = self.baseline.as_deref() else {
            return Vec::new();
        };

        let mut pools: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        let rows = self.query_speedups();

        for (db_type, cell) in rows.iter().flat_map(|row| row.cells.iter()) {
            if db_type != baseline {
                pools.entry(db_type.as_str()).or_default().push(cell.pooled());
            }
        }

        pools
            .into_iter()
            .filter_map(|(database, pool)| {
                let successful = pool.iter().copied().filter(|value| *value > 0.0).collect_vec();

                Some(MedianSpeedup {
                    database: database.to_owned(),
                    median: median(&pool)?,
                    min: successful.iter().copied().reduce(f64::min).unwrap_or(0.0),
                    max: successful.iter().copied().reduce(f64::max).unwrap_or(0.0),
                    successful: successful.len(),
                })
            })
            .collect()
    }

    /// number of queries the baseline completed, 0 without a baseline
    pub fn baseline_completed_queries(&self) -> usize {
        self.baseline
            .as_deref()
            .map_or(0, |baseline| completed_queries(baseline, &self.queries))
    }

    pub fn summary(&self) -> Summary {
        Summary {
            best_ingestion: first_max(
                self.ingestion_speedups()
                    .into_iter()
                    .map(|speedup| (speedup.database, speedup.duration_speedup)),
            ),
            best_query: first_max(
                self.median_query_speedups()
                    .into_iter()
                    .map(|speedup| (speedup.database, speedup.median)),
            ),
        }
    }
}

// largest value, earlier entries win ties
fn first_max<I>(entries: I) -> Option<(String, f64)>
where
    I: Iterator<Item = (String, f64)>,
{
    entries.fold(None, |best, entry| match best {
        Some(best) if best.1 >= entry.1 => Some(best),
        _ => Some(entry),
    })
}
