//! Markdown speedup report.

use crate::format::{duration, speedup, thousands};
use itertools::Itertools;
use tsbench_analysis::{Analysis, QueryOutcome, SpeedupCell};

const NOT_AVAILABLE: &str = "N/A";

/// Render the full report, lines are joined without a trailing newline.
pub fn render(analysis: &Analysis) -> String {
    let baseline = analysis.baseline.as_deref().unwrap_or("None");
    let mut lines = vec![
        "# Database Performance Speedup Report (Averaged Results)".to_string(),
        String::new(),
        format!("**Baseline Database:** {baseline}"),
        "**Analysis Method:** Results averaged across multiple benchmark runs per database type"
            .to_string(),
        String::new(),
    ];

    ingestion_section(analysis, &mut lines);
    query_section(analysis, &mut lines);
    summary_section(analysis, &mut lines);

    lines.join("\n")
}

fn ingestion_section(analysis: &Analysis, lines: &mut Vec<String>) {
    lines.push("## Ingestion Performance".to_string());
    lines.push(String::new());

    if analysis.ingestion.is_empty() {
        return;
    }

    lines.push("### Ingestion Statistics (Averaged)".to_string());
    lines.push(String::new());
    lines.push("| Database | Median Duration (ms) | Median Records/Batch | Median Rate (records/s) | Avg Total Records | Avg Total Duration (ms) | Files |".to_string());
    lines.push("|----------|-------------------|-------------------|---------------------|---------------|---------------------|-------|".to_string());

    for (db_type, stats) in analysis.ingestion.iter() {
        lines.push(format!(
            "| {db_type} | {:.1} | {} | {} | {} | {} | {} |",
            stats.median_duration_ms,
            thousands(stats.median_records_per_batch),
            thousands(stats.median_ingestion_rate),
            thousands(stats.mean_total_records),
            thousands(stats.mean_total_duration_ms),
            stats.file_count
        ));
    }
    lines.push(String::new());

    let speedups = analysis.ingestion_speedups();
    let Some(baseline) = analysis.baseline.as_deref().filter(|_| !speedups.is_empty()) else {
        return;
    };

    lines.push("### Ingestion Speedups".to_string());
    lines.push(String::new());
    lines.push("| Database | Duration Speedup | Rate Improvement |".to_string());
    lines.push("|----------|------------------|------------------|".to_string());
    lines.push(format!("| {baseline} | 1.00x | 1.00x |"));

    for row in speedups {
        lines.push(format!(
            "| {} | {} | {} |",
            row.database,
            speedup(row.duration_speedup),
            speedup(row.rate_improvement)
        ));
    }
    lines.push(String::new());
}

fn query_section(analysis: &Analysis, lines: &mut Vec<String>) {
    lines.push("## Query Performance".to_string());
    lines.push(String::new());

    if analysis.queries.is_empty() {
        return;
    }

    let databases = analysis.databases().collect_vec();
    let separator = format!(
        "|----------|-------------|{}|",
        databases.iter().map(|_| "-".repeat(12)).join("|")
    );

    lines.push("### Query Execution Times (Averaged)".to_string());
    lines.push(String::new());
    lines.push(format!(
        "| Query ID | Description | {} |",
        databases.iter().map(|db_type| format!("{db_type} (ms)")).join(" | ")
    ));
    lines.push(separator.clone());

    for (query_id, stats) in analysis.queries.iter() {
        let cells = databases
            .iter()
            .map(|db_type| match stats.databases.get(*db_type) {
                Some(QueryOutcome::Mean(mean)) => duration(*mean),
                Some(QueryOutcome::Failed) | None => NOT_AVAILABLE.to_string(),
            })
            .collect_vec();

        lines.push(table_row(*query_id, &stats.description, &cells));
    }
    lines.push(String::new());

    let Some(baseline) = analysis.baseline.as_deref() else {
        return;
    };

    lines.push("### Query Speedups".to_string());
    lines.push(String::new());
    lines.push(format!(
        "| Query ID | Description | {} |",
        databases.iter().map(|db_type| format!("{db_type} Speedup")).join(" | ")
    ));
    lines.push(separator);

    for row in analysis.query_speedups() {
        let cells = row
            .cells
            .iter()
            .map(|(_, cell)| match cell {
                SpeedupCell::Baseline => speedup(1.0),
                SpeedupCell::Speedup(value) => speedup(*value),
                SpeedupCell::NotAvailable => NOT_AVAILABLE.to_string(),
            })
            .collect_vec();

        lines.push(table_row(row.query_id, &row.description, &cells));
    }
    lines.push(String::new());

    lines.push("### Median Query Speedups".to_string());
    lines.push(String::new());
    lines.push(
        "| Database | Median Speedup | Min Speedup | Max Speedup | Queries Analyzed |".to_string(),
    );
    lines.push(
        "|----------|-----------------|-------------|-------------|------------------|".to_string(),
    );
    lines.push(format!(
        "| {baseline} | 1.00x | 1.00x | 1.00x | {} |",
        analysis.baseline_completed_queries()
    ));

    for row in analysis.median_query_speedups() {
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            row.database,
            speedup(row.median),
            speedup(row.min),
            speedup(row.max),
            row.successful
        ));
    }
    lines.push(String::new());
}

fn summary_section(analysis: &Analysis, lines: &mut Vec<String>) {
    let baseline = analysis.baseline.as_deref().unwrap_or("None");
    let summary = analysis.summary();

    lines.push("## Summary".to_string());
    lines.push(String::new());

    if let Some((db_type, value)) = summary.best_ingestion {
        lines.push(format!(
            "- **Best Ingestion Performance:** {db_type} ({} faster than {baseline})",
            speedup(value)
        ));
    }
    if let Some((db_type, value)) = summary.best_query {
        lines.push(format!(
            "- **Best Median Query Performance:** {db_type} ({} faster than {baseline})",
            speedup(value)
        ));
    }

    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(format!(
        "*Report generated from {} benchmark files, averaged by database type*",
        analysis.file_count
    ));

    if !analysis.ingestion.is_empty() {
        lines.push(String::new());
        lines.push("**File Count Summary:**".to_string());
        for (db_type, stats) in analysis.ingestion.iter() {
            lines.push(format!("- {db_type}: {} files", stats.file_count));
        }
    }
}

fn table_row(query_id: i64, description: &str, cells: &[String]) -> String {
    cells
        .iter()
        .fold(format!("| {query_id} | {description} |"), |mut row, cell| {
            row.push(' ');
            row.push_str(cell);
            row.push_str(" |");
            row
        })
}
