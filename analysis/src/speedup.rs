//! Metric agnostic speedup ratios against a baseline database.

use crate::stats::clamp_non_negative;
use std::collections::BTreeMap;

/// a measured 0ms is treated as this many ms, so the ratio stays finite
pub const ZERO_DURATION_FLOOR_MS: f64 = 0.1;

/// map of dbType -> speedup against the baseline
pub type Speedups = BTreeMap<String, f64>;

/// Speedup of every non-baseline database, `baseline_value / value`.
///
/// Negative values mark failures: a failed baseline counts as 0, failed
/// candidates are left out. Candidates without a defined ratio (zero
/// baseline) are left out as well. Empty if the baseline is not in `values`.
pub fn compute_speedups(values: &BTreeMap<String, f64>, baseline: &str) -> Speedups {
    let Some(&baseline_value) = values.get(baseline) else {
        return Speedups::new();
    };
    let baseline_value = clamp_non_negative(baseline_value);

    values
        .iter()
        .filter(|(db_type, _)| db_type.as_str() != baseline)
        .filter_map(|(db_type, &value)| {
            speedup_ratio(baseline_value, value).map(|speedup| (db_type.clone(), speedup))
        })
        .collect()
}

/// ratio for an already clamped baseline value
pub fn speedup_ratio(baseline_value: f64, value: f64) -> Option<f64> {
    if value < 0.0 || baseline_value <= 0.0 {
        None
    } else if value == 0.0 {
        Some(baseline_value / ZERO_DURATION_FLOOR_MS)
    } else {
        Some(baseline_value / value)
    }
}
