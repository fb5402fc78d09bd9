//! Bounded in-memory history of successful predictions, newest first.

use std::collections::VecDeque;

use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

use super::PredictionSummary;

/// One successful prediction together with the input that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry<T> {
    /// Millisecond timestamp, bumped when needed so ids stay unique.
    pub id: u64,
    pub stats: T,
    pub prediction: f64,
    pub confidence: f64,
    pub timestamp: OffsetDateTime,
}

impl<T> HistoryEntry<T> {
    /// Wall-clock time of the prediction as `HH:MM:SS`.
    pub fn time_label(&self) -> String {
        const TIME_FORMAT: &[FormatItem<'static>] =
            format_description!("[hour]:[minute]:[second]");
        self.timestamp
            .format(TIME_FORMAT)
            .unwrap_or_else(|_| "--:--:--".to_string())
    }
}

#[derive(Clone, Debug)]
pub struct PredictionHistory<T> {
    entries: VecDeque<HistoryEntry<T>>,
    limit: usize,
    last_id: u64,
}

impl<T> PredictionHistory<T> {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
            last_id: 0,
        }
    }

    /// Prepend an entry, evicting the oldest one beyond the limit.
    pub fn record(
        &mut self,
        stats: T,
        summary: PredictionSummary,
        timestamp: OffsetDateTime,
    ) -> &HistoryEntry<T> {
        let millis = u64::try_from(timestamp.unix_timestamp_nanos() / 1_000_000).unwrap_or(0);
        let id = millis.max(self.last_id + 1);
        self.last_id = id;
        self.entries.push_front(HistoryEntry {
            id,
            stats,
            prediction: summary.value,
            confidence: summary.confidence,
            timestamp,
        });
        self.entries.truncate(self.limit);
        &self.entries[0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn latest(&self) -> Option<&HistoryEntry<T>> {
        self.entries.front()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry<T>> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry<T>> {
        self.entries.iter()
    }
}
