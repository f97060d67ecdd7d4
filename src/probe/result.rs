use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of one issued probe. Created once per call, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallResult {
    pub status_code: u16,
    pub content: String,
    pub request_time: f64,
}

/// Aggregated probe outcomes keyed by endpoint path.
///
/// Per-endpoint sequences keep call order; a repeated endpoint appends to
/// its existing sequence. Keys serialize in sorted order.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultLog(BTreeMap<String, Vec<CallResult>>);

impl ResultLog {
    pub fn record(&mut self, endpoint: &str, result: CallResult) {
        self.0.entry(endpoint.to_owned()).or_default().push(result);
    }

    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn calls_for(&self, endpoint: &str) -> &[CallResult] {
        self.0.get(endpoint).map_or(&[], Vec::as_slice)
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
