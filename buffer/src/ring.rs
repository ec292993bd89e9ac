use parking_lot::Mutex;
use std::collections::VecDeque;

use corelib::models::TelemetryRecord;

/// Default number of samples retained.
pub const MAX_RECORDS: usize = 1000;

/// Buffer specialised for the telemetry service.
pub type TelemetryBuffer = BoundedTimeSeriesBuffer<TelemetryRecord>;

/// Bounded in-memory time series, oldest first.
///
/// Guarantees:
/// - Length never exceeds `capacity`.
/// - On overflow exactly one entry is evicted from the front (FIFO).
/// - Entries are never reordered or mutated after insertion.
/// - Every read is taken from a single consistent snapshot.
///
/// One lock guards the whole sequence. Reads copy out under the lock so that
/// callers serialize and send without holding it.
pub struct BoundedTimeSeriesBuffer<T> {
    capacity: usize,
    entries: Mutex<VecDeque<T>>,
}

impl<T: Clone> BoundedTimeSeriesBuffer<T> {
    /// Empty buffer holding at most [`MAX_RECORDS`] entries.
    pub fn new() -> Self {
        Self::with_capacity(MAX_RECORDS)
    }

    /// Empty buffer with an explicit bound. A capacity of 0 is raised to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends at the tail, evicting the oldest entry when full.
    /// Returns the length after the append.
    pub fn append(&self, entry: T) -> usize {
        let mut entries = self.entries.lock();

        entries.push_back(entry);
        if entries.len() > self.capacity {
            entries.pop_front();
        }

        entries.len()
    }

    /// The last `min(limit, len)` entries in append order.
    pub fn recent(&self, limit: usize) -> Vec<T> {
        let entries = self.entries.lock();

        let start = entries.len() - limit.min(entries.len());

        entries.range(start..).cloned().collect()
    }

    /// Most recently appended entry, if any.
    pub fn latest(&self) -> Option<T> {
        self.entries.lock().back().cloned()
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<T: Clone> Default for BoundedTimeSeriesBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}
