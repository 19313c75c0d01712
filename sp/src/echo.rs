//! Append-only log of recorded predictions

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::format::json;
use crate::progression::common_difference;

/// A recorded (sequence, prediction) pair
///
/// Created only by [`EchoLog::record`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Echo {
    #[serde(serialize_with = "serialize_timestamp")]
    timestamp: DateTime<Utc>,
    #[serde(serialize_with = "json::list")]
    sequence: Vec<f64>,
    #[serde(serialize_with = "json::number")]
    prediction: f64,
    #[serde(serialize_with = "json::option")]
    common_difference: Option<f64>,
}

impl Echo {
    /// When the echo was recorded
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Snapshot of the sequence at recording time
    pub fn sequence(&self) -> &[f64] {
        &self.sequence
    }

    /// The predicted next term
    pub fn prediction(&self) -> f64 {
        self.prediction
    }

    /// Common difference computed when the echo was recorded
    pub fn common_difference(&self) -> Option<f64> {
        self.common_difference
    }

    /// Timestamp as ISO-8601 UTC with millisecond precision
    pub fn timestamp_iso(&self) -> String {
        iso_timestamp(self.timestamp)
    }
}

/// ISO-8601 rendering used for every timestamp the application shows
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&iso_timestamp(*at))
}

/// Ordered, in-memory store of echoes for one process or session
///
/// There is no capacity limit and nothing is persisted. Callers validate the
/// sequence before recording; the log does not re-check it.
#[derive(Debug, Default)]
pub struct EchoLog {
    echoes: Vec<Echo>,
}

impl EchoLog {
    /// An empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an echo for `sequence` and its `prediction`
    ///
    /// The common difference is recomputed from `sequence`, and the sequence
    /// is copied so later changes to the caller's list do not leak in.
    pub fn record(&mut self, sequence: &[f64], prediction: f64) -> &Echo {
        let echo = Echo {
            timestamp: Utc::now(),
            sequence: sequence.to_vec(),
            prediction,
            common_difference: common_difference(sequence),
        };
        debug!(len = sequence.len(), prediction, "EchoLog::record: appending echo");
        self.echoes.push(echo);
        &self.echoes[self.echoes.len() - 1]
    }

    /// All echoes, oldest first
    pub fn all(&self) -> &[Echo] {
        &self.echoes
    }

    /// Number of echoes recorded since creation or the last `clear`
    pub fn count(&self) -> usize {
        self.echoes.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.echoes.is_empty()
    }

    /// Remove every echo, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.echoes.len();
        self.echoes.clear();
        debug!(removed, "EchoLog::clear: cleared echoes");
        removed
    }
}
