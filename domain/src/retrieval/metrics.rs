//! Per-call retrieval timing

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Elapsed seconds per backend for a single retrieval call
///
/// Entries keep the order in which backends were configured. A backend
/// that was unavailable (or failed) for the call is recorded as `0.0` and
/// flagged as unmeasured, so aggregates can leave it out.
/// Serializes as a JSON object `{ "<backend>": seconds }`; the unmeasured
/// flags are not serialized.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, f64>")]
pub struct RetrievalMetrics {
    entries: Vec<(String, f64)>,
    unmeasured: Vec<String>,
}

impl RetrievalMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// All-zero metrics for the given backends (used when retrieval is skipped)
    pub fn zeroed<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut metrics = Self::new();
        for name in names {
            metrics.record_unmeasured(name);
        }
        metrics
    }

    /// Record the elapsed seconds for a backend, replacing any previous entry
    pub fn record(&mut self, name: impl Into<String>, seconds: f64) {
        let name = name.into();
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        self.unmeasured.retain(|n| *n != name);
        self.set(name, seconds);
    }

    /// Record the `0` placeholder for a backend that was skipped or failed
    pub fn record_unmeasured(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.unmeasured.contains(&name) {
            self.unmeasured.push(name.clone());
        }
        self.set(name, 0.0);
    }

    fn set(&mut self, name: String, seconds: f64) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = seconds,
            None => self.entries.push((name, seconds)),
        }
    }

    /// Recorded value, placeholders included
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, secs)| *secs)
    }

    /// Seconds actually measured for `name`; `None` for placeholders
    pub fn measured(&self, name: &str) -> Option<f64> {
        if self.is_unmeasured(name) {
            return None;
        }
        self.get(name)
    }

    pub fn is_unmeasured(&self, name: &str) -> bool {
        self.unmeasured.iter().any(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), *s))
    }

    /// True when every recorded backend took zero time (or none were recorded)
    pub fn is_all_zero(&self) -> bool {
        self.entries.iter().all(|(_, secs)| *secs == 0.0)
    }
}

impl From<BTreeMap<String, f64>> for RetrievalMetrics {
    fn from(map: BTreeMap<String, f64>) -> Self {
        let mut metrics = Self::new();
        for (name, seconds) in map {
            metrics.record(name, seconds);
        }
        metrics
    }
}

impl Serialize for RetrievalMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, seconds) in &self.entries {
            map.serialize_entry(name, seconds)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_has_one_entry_per_backend() {
        let metrics = RetrievalMetrics::zeroed(["faiss", "chroma", "cyborg"]);
        assert_eq!(metrics.len(), 3);
        assert!(metrics.is_all_zero());
        assert_eq!(metrics.get("chroma"), Some(0.0));
    }

    #[test]
    fn test_unmeasured_entry_is_zero_but_not_measured() {
        let mut metrics = RetrievalMetrics::new();
        metrics.record("faiss", 0.002);
        metrics.record_unmeasured("chroma");
        assert_eq!(metrics.get("chroma"), Some(0.0));
        assert_eq!(metrics.measured("chroma"), None);
        assert_eq!(metrics.measured("faiss"), Some(0.002));
        assert_eq!(metrics.measured("cyborg"), None);

        let json = serde_json::to_string(&metrics).unwrap();
        assert_eq!(json, r#"{"faiss":0.002,"chroma":0.0}"#);
    }

    #[test]
    fn test_record_clears_unmeasured_flag() {
        let mut metrics = RetrievalMetrics::zeroed(["cyborg"]);
        assert!(metrics.is_unmeasured("cyborg"));
        metrics.record("cyborg", 0.01);
        assert_eq!(metrics.measured("cyborg"), Some(0.01));
    }

    #[test]
    fn test_record_replaces_existing_entry() {
        let mut metrics = RetrievalMetrics::new();
        metrics.record("faiss", 0.5);
        metrics.record("faiss", 0.25);
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics.get("faiss"), Some(0.25));
    }

    #[test]
    fn test_record_clamps_negative_and_nan() {
        let mut metrics = RetrievalMetrics::new();
        metrics.record("a", -1.0);
        metrics.record("b", f64::NAN);
        assert_eq!(metrics.get("a"), Some(0.0));
        assert_eq!(metrics.get("b"), Some(0.0));
    }

    #[test]
    fn test_serializes_in_configured_order() {
        let mut metrics = RetrievalMetrics::new();
        metrics.record("faiss", 0.001);
        metrics.record("chroma", 0.002);
        metrics.record("cyborg", 0.003);
        let json = serde_json::to_string(&metrics).unwrap();
        assert_eq!(json, r#"{"faiss":0.001,"chroma":0.002,"cyborg":0.003}"#);
    }

    #[test]
    fn test_empty_serializes_as_empty_object() {
        let json = serde_json::to_string(&RetrievalMetrics::new()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_deserialize_from_object() {
        let metrics: RetrievalMetrics =
            serde_json::from_str(r#"{"cyborg":0.5,"faiss":0.1}"#).unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics.get("cyborg"), Some(0.5));
    }
}
