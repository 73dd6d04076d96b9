//! Raw collection shape handed over by the data store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A collection of raw records as the data store delivers it.
///
/// The realtime store returns keyed maps (`id -> record`); request bodies may
/// carry plain lists instead. Both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordSet<T> {
    Keyed(BTreeMap<String, T>),
    List(Vec<T>),
}

/// A raw record left out of the canonical set, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    /// Store key or record id, when one was available.
    pub key: Option<String>,
    pub reason: String,
}

impl RejectedRecord {
    pub fn new(key: Option<String>, reason: impl ToString) -> Self {
        Self {
            key,
            reason: reason.to_string(),
        }
    }
}

impl<T> RecordSet<T> {
    /// Flatten into `(store key, record)` pairs in a stable order.
    ///
    /// Keyed maps iterate by key; lists keep their order and carry no key.
    pub fn into_entries(self) -> Vec<(Option<String>, T)> {
        match self {
            RecordSet::Keyed(map) => map.into_iter().map(|(k, v)| (Some(k), v)).collect(),
            RecordSet::List(list) => list.into_iter().map(|v| (None, v)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RecordSet::Keyed(map) => map.len(),
            RecordSet::List(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for RecordSet<T> {
    fn default() -> Self {
        RecordSet::List(Vec::new())
    }
}

impl<T> From<Vec<T>> for RecordSet<T> {
    fn from(value: Vec<T>) -> Self {
        RecordSet::List(value)
    }
}
