//! Data structures for the benchmark history file

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};

/// One measured sample: metric name to value (e.g. `code_size`, `runtime`)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BenchmarkSample(pub BTreeMap<String, serde_json::Value>);

impl BenchmarkSample {
    /// Numeric value of `metric`, if present and a number
    pub fn metric(&self, metric: &str) -> Option<f64> {
        self.0.get(metric).and_then(serde_json::Value::as_f64)
    }
}

/// All samples recorded for one benchmark at one commit
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BenchmarkResult {
    #[serde(default)]
    pub results: Vec<BenchmarkSample>,
}

impl BenchmarkResult {
    /// The value plotted for this result: `metric` from the first sample
    pub fn value(&self, metric: &str) -> Option<f64> {
        self.results.first().and_then(|sample| sample.metric(metric))
    }
}

/// One commit entry of the history file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommitRecord {
    /// Author name
    #[serde(default)]
    pub author: String,
    /// Git commit SHA
    pub hash: String,
    /// Committer timestamp, Unix seconds
    pub submitted: i64,
    /// Commit title (first line of the message)
    #[serde(default)]
    pub title: String,
    /// Results keyed by benchmark name
    #[serde(default)]
    pub benchmarks: BTreeMap<String, BenchmarkResult>,
}

impl CommitRecord {
    pub fn submitted_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.submitted, 0)
            .single()
            .unwrap_or_default()
    }
}

/// Contents of a `<target>_benchmark_data.json` history file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct BenchmarkHistory {
    pub records: Vec<CommitRecord>,
}

impl BenchmarkHistory {
    pub fn from_json_str(content: &str) -> Result<Self> {
        let history: Self = serde_json::from_str(content)?;
        Ok(history)
    }

    /// Load the history from a JSON file. A missing file is an error.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_json_str(&content)
    }

    /// Sort records oldest first and drop the empty records at the old end.
    ///
    /// The sort is stable so commits sharing a timestamp keep their file order.
    pub fn into_chronological(mut self) -> Vec<CommitRecord> {
        self.records.sort_by_key(|record| record.submitted);
        let first_with_data = self
            .records
            .iter()
            .position(|record| !record.benchmarks.is_empty())
            .unwrap_or(self.records.len());
        self.records.split_off(first_with_data)
    }
}
