//! Measurement counts and normalized job results.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::job::{JobId, JobStatus};

/// Histogram of measurement outcomes: bitstring → number of occurrences.
///
/// Iteration and serialization are ordered by bitstring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<String, u64>);

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `bitstring`, saturating at `u64::MAX`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        let entry = self.0.entry(bitstring.into()).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Occurrences of `bitstring` (0 if never observed).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Iterate over `(bitstring, count)` pairs in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no outcome has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts, i.e. the number of shots executed.
    ///
    /// Saturates at `u64::MAX`.
    pub fn total_shots(&self) -> u64 {
        self.0.values().fold(0, |acc, &v| acc.saturating_add(v))
    }

    /// Outcomes sorted by descending count, ties broken by bitstring.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequent outcome, if any.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.sorted().into_iter().next()
    }

    /// Relative frequency of each outcome.
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        let total = self.total_shots();
        if total == 0 {
            return BTreeMap::new();
        }
        self.0
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total as f64))
            .collect()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (bitstring, count) in iter {
            counts.insert(bitstring, count);
        }
        counts
    }
}

/// The result of one finished job, normalized across backends.
///
/// Built exactly once per job and cached by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    /// Whether the execution succeeded.
    pub success: bool,
    /// Number of shots, equal to `counts.total_shots()`.
    pub shots: u64,
    /// Measurement counts.
    pub counts: Counts,
    /// Name of the backend that produced the job.
    pub backend_name: String,
    /// Version of that backend.
    pub backend_version: String,
    /// Identifier of the job.
    pub job_id: JobId,
    /// Name of the executed circuit.
    pub circuit_name: String,
    /// Final job status.
    pub status: JobStatus,
    /// When the result was materialized.
    pub date: DateTime<Utc>,
}

impl NormalizedResult {
    /// Build a successful result from measurement counts; `shots` is derived
    /// from the counts and `date` is set to now.
    pub fn from_counts(
        counts: Counts,
        backend_name: impl Into<String>,
        backend_version: impl Into<String>,
        job_id: JobId,
        circuit_name: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            shots: counts.total_shots(),
            counts,
            backend_name: backend_name.into(),
            backend_version: backend_version.into(),
            job_id,
            circuit_name: circuit_name.into(),
            status: JobStatus::Done,
            date: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bell_counts() -> Counts {
        let mut counts = Counts::new();
        counts.insert("00", 510);
        counts.insert("11", 490);
        counts.insert("01", 24);
        counts
    }

    #[test]
    fn test_insert_accumulates() {
        let mut counts = Counts::new();
        counts.insert("10", 1);
        counts.insert("10", 1);
        counts.insert("01", 3);
        assert_eq!(counts.get("10"), 2);
        assert_eq!(counts.get("01"), 3);
        assert_eq!(counts.get("11"), 0);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_large_counts_saturate() {
        let mut counts = Counts::new();
        counts.insert("0", u64::MAX);
        counts.insert("1", 1);
        assert_eq!(counts.total_shots(), u64::MAX);

        counts.insert("0", 5);
        assert_eq!(counts.get("0"), u64::MAX);

        let p = counts.probabilities();
        assert!(p["0"] <= 1.0);
    }

    #[test]
    fn test_sorted_and_most_frequent() {
        let counts = bell_counts();
        let sorted = counts.sorted();
        assert_eq!(sorted[0].0, "00");
        assert_eq!(sorted[2].0, "01");
        assert_eq!(counts.most_frequent(), Some((&"00".to_string(), &510)));
        assert!(Counts::new().most_frequent().is_none());
    }

    #[test]
    fn test_probabilities() {
        let mut counts = Counts::new();
        counts.insert("0", 3);
        counts.insert("1", 1);
        let p = counts.probabilities();
        assert!((p["0"] - 0.75).abs() < 1e-12);
        assert!((p["1"] - 0.25).abs() < 1e-12);
        assert!(Counts::new().probabilities().is_empty());
    }

    #[test]
    fn test_counts_serialize_as_plain_map() {
        let json = serde_json::to_value(bell_counts()).unwrap();
        assert_eq!(json, serde_json::json!({"00": 510, "01": 24, "11": 490}));
    }

    #[test]
    fn test_from_counts() {
        let result = NormalizedResult::from_counts(
            bell_counts(),
            "plugin-runner",
            "0.1.0",
            JobId::new("https://runner/tasks/1"),
            "bell",
        );
        assert!(result.success);
        assert_eq!(result.shots, 1024);
        assert_eq!(result.status, JobStatus::Done);
        assert_eq!(result.circuit_name, "bell");
    }

    proptest! {
        #[test]
        fn prop_total_shots_is_sum(entries in prop::collection::vec(("[01]{1,4}", 0u64..10_000), 0..32)) {
            let expected: u64 = entries.iter().map(|(_, c)| *c).sum();
            let counts: Counts = entries.into_iter().collect();
            prop_assert_eq!(counts.total_shots(), expected);
        }
    }
}
