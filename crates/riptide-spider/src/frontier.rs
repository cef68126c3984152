//! Best-first frontier: a priority queue of candidate URLs with uniqueness.

use dashmap::DashSet;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Mutex;
use url::Url;

/// One candidate awaiting fetch.
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    pub url: Url,
    pub priority: f64,
    pub depth: u32,
    sequence: u64,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}
impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; higher priority should sort greater.
        // Ties broken by ascending sequence (FIFO), so a *smaller* sequence
        // must compare as *greater* to come out first.
        self.priority
            .partial_cmp(&other.priority)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Thread-safe best-first queue with URL uniqueness and a capacity-based
/// backpressure policy: on overflow the lowest-priority entry is dropped.
pub struct Frontier {
    heap: Mutex<BinaryHeap<FrontierEntry>>,
    enqueued: DashSet<String>,
    visited: DashSet<String>,
    sequence: AtomicU64,
    capacity: usize,
    dropped: AtomicU64,
}

impl Frontier {
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: Mutex::new(BinaryHeap::new()),
            enqueued: DashSet::new(),
            visited: DashSet::new(),
            sequence: AtomicU64::new(0),
            capacity,
            dropped: AtomicU64::new(0),
        }
    }

    /// Enqueues `url` at `priority`/`depth` unless it is already enqueued or
    /// already visited. On overflow, drops the current lowest-priority entry
    /// to make room and increments the drop counter.
    pub fn push(&self, url: Url, priority: f64, depth: u32) {
        let key = url.to_string();
        if self.visited.contains(&key) || !self.enqueued.insert(key.clone()) {
            return;
        }

        let sequence = self.sequence.fetch_add(1, AtomicOrdering::Relaxed);
        let entry = FrontierEntry {
            url,
            priority,
            depth,
            sequence,
        };

        let mut heap = self.heap.lock().unwrap();
        heap.push(entry);

        if heap.len() > self.capacity {
            // BinaryHeap has no direct "pop minimum"; rebuild is acceptable
            // here since overflow is the exceptional path, not the hot path.
            let mut all: Vec<_> = heap.drain().collect();
            all.sort_by(|a, b| b.cmp(a));
            if let Some(worst) = all.pop() {
                self.enqueued.remove(&worst.url.to_string());
                self.dropped.fetch_add(1, AtomicOrdering::Relaxed);
            }
            *heap = all.into_iter().collect();
        }
    }

    /// Pops the highest-priority entry, marking its URL visited so it can
    /// never be re-enqueued.
    pub fn pop(&self) -> Option<FrontierEntry> {
        let mut heap = self.heap.lock().unwrap();
        let entry = heap.pop()?;
        let key = entry.url.to_string();
        self.enqueued.remove(&key);
        self.visited.insert(key);
        Some(entry)
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.enqueued.contains(&url.to_string()) || self.visited.contains(&url.to_string())
    }

    pub fn size(&self) -> usize {
        self.heap.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(AtomicOrdering::Relaxed)
    }
}
