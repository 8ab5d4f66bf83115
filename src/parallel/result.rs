use std::collections::HashMap;

use log::warn;

use crate::algorithm::DistanceMap;
use crate::{Error, Result};

/// Output of one dispatched job
#[derive(Debug)]
pub struct ShortestPathResult<W = f64> {
    pub start: String,
    pub outcome: Result<DistanceMap<W>>,
}

/// Per-start outcomes of a run, one entry per dispatched start node.
/// Failed jobs keep their error instead of being dropped.
#[derive(Debug)]
pub struct AggregateResult<W = f64> {
    entries: HashMap<String, Result<DistanceMap<W>>>,
}

impl<W> AggregateResult<W> {
    pub fn with_capacity(capacity: usize) -> Self {
        AggregateResult {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Folds a job result in. A second result for the same start is
    /// discarded and reported; returns whether the result was kept.
    pub fn insert(&mut self, result: ShortestPathResult<W>) -> bool {
        if self.entries.contains_key(&result.start) {
            warn!("duplicate result for start node {}; keeping the first", result.start);
            return false;
        }
        self.entries.insert(result.start, result.outcome);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, start: &str) -> bool {
        self.entries.contains_key(start)
    }

    pub fn get(&self, start: &str) -> Option<&Result<DistanceMap<W>>> {
        self.entries.get(start)
    }

    /// Distance map of a successful job
    pub fn distances(&self, start: &str) -> Option<&DistanceMap<W>> {
        self.entries.get(start).and_then(|r| r.as_ref().ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Result<DistanceMap<W>>)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn successes(&self) -> impl Iterator<Item = (&str, &DistanceMap<W>)> + '_ {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().ok().map(|d| (k.as_str(), d)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &Error)> + '_ {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().err().map(|e| (k.as_str(), e)))
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// Records `error(start)` for every start that has no entry yet and
    /// returns how many were added.
    pub fn fill_missing<F>(&mut self, starts: &[String], error: F) -> usize
    where
        F: Fn(&str) -> Error,
    {
        let mut added = 0;
        for start in starts {
            if !self.contains(start) {
                self.entries.insert(start.clone(), Err(error(start)));
                added += 1;
            }
        }
        added
    }
}

impl<W> FromIterator<ShortestPathResult<W>> for AggregateResult<W> {
    fn from_iter<I: IntoIterator<Item = ShortestPathResult<W>>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut aggregate = AggregateResult::with_capacity(iter.size_hint().0);
        for result in iter {
            aggregate.insert(result);
        }
        aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(start: &str) -> ShortestPathResult<f64> {
        let mut distances = DistanceMap::new();
        distances.insert(start.to_string(), 0.0);
        ShortestPathResult {
            start: start.to_string(),
            outcome: Ok(distances),
        }
    }

    #[test]
    fn test_fill_missing_marks_only_absent_starts() {
        let mut aggregate: AggregateResult<f64> = vec![ok("a"), ok("c")].into_iter().collect();
        let starts: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();

        let added = aggregate.fill_missing(&starts, |s| Error::WorkerLost(s.to_string()));

        assert_eq!(added, 2);
        assert_eq!(aggregate.len(), 4);
        assert_eq!(aggregate.failed_count(), 2);
        assert!(aggregate.distances("a").is_some());
        assert!(matches!(aggregate.get("b"), Some(Err(Error::WorkerLost(s))) if s == "b"));
        assert!(matches!(aggregate.get("d"), Some(Err(Error::WorkerLost(s))) if s == "d"));
    }

    #[test]
    fn test_duplicate_result_keeps_first() {
        let mut aggregate = AggregateResult::with_capacity(1);
        assert!(aggregate.insert(ok("a")));
        assert!(!aggregate.insert(ShortestPathResult {
            start: "a".to_string(),
            outcome: Err(Error::Cancelled("a".to_string())),
        }));
        assert_eq!(aggregate.failed_count(), 0);
    }
}
