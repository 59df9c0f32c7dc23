//! Commit sequence and benchmark names, fixed once the history is loaded

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;
use tracing::info;

use crate::data::{BenchmarkHistory, BenchmarkResult, CommitRecord};
use crate::error::{Error, Result};

/// A commit on the chart's x axis
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Commit {
    /// Position in the chronological sequence
    pub index: usize,
    pub hash: String,
    pub author: String,
    pub title: String,
    pub submitted: DateTime<Utc>,
}

impl Commit {
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}

/// Read-only store of the loaded history
#[derive(Debug, Clone)]
pub struct SeriesStore {
    commits: Vec<Commit>,
    benchmarks: BTreeSet<String>,
    /// Per commit index, results keyed by benchmark name
    results: Vec<BTreeMap<String, BenchmarkResult>>,
}

impl SeriesStore {
    /// Build the store from history records in any order.
    pub fn from_history(history: BenchmarkHistory) -> Result<Self> {
        Self::from_records(history.into_chronological())
    }

    /// Build the store from records already in chronological order.
    pub fn from_records(records: Vec<CommitRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyHistory);
        }

        let mut commits = Vec::with_capacity(records.len());
        let mut results = Vec::with_capacity(records.len());
        let mut benchmarks = BTreeSet::new();

        for (index, record) in records.into_iter().enumerate() {
            let submitted = record.submitted_at();
            benchmarks.extend(record.benchmarks.keys().cloned());
            commits.push(Commit {
                index,
                hash: record.hash,
                author: record.author,
                title: record.title,
                submitted,
            });
            results.push(record.benchmarks);
        }

        info!(
            "Loaded {} commits with {} benchmarks",
            commits.len(),
            benchmarks.len()
        );

        Ok(Self {
            commits,
            benchmarks,
            results,
        })
    }

    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn commit(&self, index: usize) -> Option<&Commit> {
        self.commits.get(index)
    }

    /// Commits within `range`, clamped to the sequence
    pub fn commits_in(&self, range: Range<usize>) -> &[Commit] {
        let end = range.end.min(self.commits.len());
        let start = range.start.min(end);
        &self.commits[start..end]
    }

    /// All known benchmark names, sorted
    pub fn benchmark_names(&self) -> &BTreeSet<String> {
        &self.benchmarks
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.benchmarks.contains(name)
    }

    /// Value of `metric` for `benchmark` at each commit of `range`.
    ///
    /// Commits without a result for the benchmark yield `None`, keeping the
    /// returned vector aligned with [`SeriesStore::commits_in`].
    pub fn series(&self, benchmark: &str, metric: &str, range: Range<usize>) -> Vec<Option<f64>> {
        let end = range.end.min(self.results.len());
        let start = range.start.min(end);
        self.results[start..end]
            .iter()
            .map(|by_name| by_name.get(benchmark).and_then(|r| r.value(metric)))
            .collect()
    }

    /// Number of commits that carry a result for `benchmark`
    pub fn result_count(&self, benchmark: &str) -> usize {
        self.results
            .iter()
            .filter(|by_name| by_name.contains_key(benchmark))
            .count()
    }

    /// Number of benchmarks recorded at commit `index`
    pub fn benchmarks_at(&self, index: usize) -> usize {
        self.results.get(index).map_or(0, BTreeMap::len)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// `commits` records named c0..cN, each carrying `benchmarks` with
    /// `code_size` equal to the commit index.
    pub(crate) fn make_store(commits: usize, benchmarks: &[&str]) -> SeriesStore {
        let records: Vec<CommitRecord> = (0..commits)
            .map(|i| {
                let json = serde_json::json!({
                    "hash": format!("c{i:039}"),
                    "submitted": 1_700_000_000 + i as i64,
                    "author": "dev",
                    "title": format!("commit {i}"),
                    "benchmarks": benchmarks
                        .iter()
                        .map(|b| (b.to_string(), serde_json::json!({"results": [{"code_size": i}]})))
                        .collect::<serde_json::Map<_, _>>(),
                });
                serde_json::from_value(json).unwrap()
            })
            .collect();
        SeriesStore::from_records(records).unwrap()
    }

    #[test]
    fn test_empty_history_is_rejected() {
        let result = SeriesStore::from_records(Vec::new());
        assert!(matches!(result, Err(Error::EmptyHistory)));
    }

    #[test]
    fn test_from_history_orders_commits() {
        let history = BenchmarkHistory::from_json_str(
            r#"[
                {"hash": "new", "submitted": 20, "benchmarks": {"B": {"results": [{"code_size": 2}]}}},
                {"hash": "old", "submitted": 10, "benchmarks": {"A": {"results": [{"code_size": 1}]}}}
            ]"#,
        )
        .unwrap();
        let store = SeriesStore::from_history(history).unwrap();

        assert_eq!(store.commit_count(), 2);
        assert_eq!(store.commit(0).unwrap().hash, "old");
        assert_eq!(store.commit(1).unwrap().index, 1);
        let names: Vec<_> = store.benchmark_names().iter().cloned().collect();
        assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_series_is_aligned_with_commits() {
        let history = BenchmarkHistory::from_json_str(
            r#"[
                {"hash": "a", "submitted": 1, "benchmarks": {"A": {"results": [{"code_size": 1}]}}},
                {"hash": "b", "submitted": 2, "benchmarks": {"B": {"results": [{"code_size": 2}]}}},
                {"hash": "c", "submitted": 3, "benchmarks": {"A": {"results": [{"code_size": 3}]}}}
            ]"#,
        )
        .unwrap();
        let store = SeriesStore::from_history(history).unwrap();

        assert_eq!(store.series("A", "code_size", 0..3), vec![Some(1.0), None, Some(3.0)]);
        assert_eq!(store.series("A", "code_size", 1..3), vec![None, Some(3.0)]);
        assert_eq!(store.series("A", "runtime", 0..1), vec![None]);
        assert_eq!(store.result_count("A"), 2);
        assert_eq!(store.benchmarks_at(1), 1);
    }

    #[test]
    fn test_commits_in_clamps_range() {
        let store = make_store(5, &["A"]);
        assert_eq!(store.commits_in(3..10).len(), 2);
        assert_eq!(store.commits_in(7..10).len(), 0);
    }

    #[test]
    fn test_short_hash() {
        let store = make_store(1, &["A"]);
        assert_eq!(store.commit(0).unwrap().short_hash(), "c000000");
    }
}
