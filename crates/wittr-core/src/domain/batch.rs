//! Event batches decoded from inbound frames.

use serde::Serialize;

/// A single event record. Its shape belongs to the consumer.
pub type EventRecord = serde_json::Value;

/// Ordered records decoded from exactly one inbound frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EventBatch {
    records: Vec<EventRecord>,
}

impl EventBatch {
    #[must_use]
    pub const fn new(records: Vec<EventRecord>) -> Self {
        Self { records }
    }

    /// Records in wire order.
    #[must_use]
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<EventRecord> {
        self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<EventRecord>> for EventBatch {
    fn from(records: Vec<EventRecord>) -> Self {
        Self::new(records)
    }
}

impl IntoIterator for EventBatch {
    type Item = EventRecord;
    type IntoIter = std::vec::IntoIter<EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
