use std::collections::BTreeMap;
use tsbench_ingest::BenchmarkRun;

/// map of dbType -> all runs of that database, iterated in identifier order
pub type DatabaseGroups = BTreeMap<String, Vec<BenchmarkRun>>;

/// Partition runs by database identity.
/// Runs of the same database keep their load order inside the group.
pub fn group_by_database<I>(runs: I) -> DatabaseGroups
where
    I: IntoIterator<Item = BenchmarkRun>,
{
    runs.into_iter()
        .fold(DatabaseGroups::new(), |mut groups, run| {
            groups.entry(run.db_type.clone()).or_default().push(run);
            groups
        })
}
