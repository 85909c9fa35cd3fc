use std::collections::{BTreeMap, HashMap, VecDeque};

use log::debug;
use parking_lot::Mutex;

use crate::common::types::{FrameId, Timestamp};
use crate::storage::buffer::error::ReplacerError;

/// Where a tracked frame currently sits, along with its index key.
#[derive(Debug, Clone, Copy)]
enum IndexSlot {
    /// Cold index, keyed by the frame's admission stamp.
    Cold(Timestamp),
    /// Warm index, keyed by the frame's k-th most recent stamp plus an
    /// insertion sequence number that keeps equal stamps in arrival order.
    Warm(Timestamp, u64),
}

#[derive(Debug)]
struct FrameEntry {
    /// Last k access stamps, oldest at the front.
    history: VecDeque<Timestamp>,
    /// Total accesses ever recorded; unlike the history this is never trimmed.
    access_count: usize,
    evictable: bool,
    slot: IndexSlot,
}

struct LRUKState {
    capacity: usize,
    k: usize,
    frames: HashMap<FrameId, FrameEntry>,
    /// Frames with fewer than k accesses, earliest-admitted first.
    cold: BTreeMap<Timestamp, FrameId>,
    /// Frames with at least k accesses, smallest k-th-recent stamp first.
    warm: BTreeMap<(Timestamp, u64), FrameId>,
    clock: Timestamp,
    warm_seq: u64,
    evictable_count: usize,
}

/// LRU-K page replacement policy.
///
/// Tracks the last k access times of each frame and evicts the evictable
/// frame with the largest backward k-distance. Frames with fewer than k
/// recorded accesses count as infinitely distant, so they are reclaimed
/// before any fully-historied frame, in plain LRU order among themselves.
/// Every operation takes one exclusive lock for its full duration, so the
/// replacer can be shared across worker threads behind an `Arc`.
pub struct LRUKReplacer {
    state: Mutex<LRUKState>,
}

impl LRUKReplacer {
    /// Create a replacer for `capacity` frames, tracking `k` accesses each.
    pub fn new(capacity: usize, k: usize) -> Self {
        assert!(capacity > 0, "replacer capacity must be positive");
        assert!(k >= 1, "history depth k must be at least 1");

        Self {
            state: Mutex::new(LRUKState {
                capacity,
                k,
                frames: HashMap::with_capacity(capacity),
                cold: BTreeMap::new(),
                warm: BTreeMap::new(),
                clock: 0,
                warm_seq: 0,
                evictable_count: 0,
            }),
        }
    }

    /// Record an access to `frame_id` at the next logical timestamp.
    ///
    /// A first access admits the frame as evictable; if the replacer is
    /// already full of evictable frames, a victim is reclaimed to make room.
    pub fn record_access(&self, frame_id: FrameId) -> Result<(), ReplacerError> {
        self.state.lock().record_access(frame_id)
    }

    /// Select and clear the frame with the largest backward k-distance,
    /// or return `None` if no frame is currently evictable.
    pub fn evict(&self) -> Option<FrameId> {
        self.state.lock().evict()
    }

    /// Mark a frame as eligible (or ineligible) for eviction.
    ///
    /// Silent no-op for frames that have never been accessed. Does not move
    /// the frame between indexes or touch its history.
    pub fn set_evictable(&self, frame_id: FrameId, evictable: bool) {
        self.state.lock().set_evictable(frame_id, evictable);
    }

    /// Drop all bookkeeping for a frame, as if it had been evicted.
    ///
    /// No-op for frames that were never accessed; pinned frames cannot be
    /// removed.
    pub fn remove(&self, frame_id: FrameId) -> Result<(), ReplacerError> {
        self.state.lock().remove(frame_id)
    }

    /// Number of frames currently eligible for eviction.
    pub fn size(&self) -> usize {
        self.state.lock().evictable_count
    }
}

impl LRUKState {
    fn record_access(&mut self, frame_id: FrameId) -> Result<(), ReplacerError> {
        if frame_id as usize >= self.capacity {
            return Err(ReplacerError::InvalidFrame(frame_id));
        }

        self.clock += 1;
        let stamp = self.clock;

        let count = match self.frames.get_mut(&frame_id) {
            Some(entry) => {
                entry.history.push_back(stamp);
                if entry.history.len() > self.k {
                    entry.history.pop_front();
                }
                entry.access_count += 1;
                entry.access_count
            }
            None => {
                // Admitting a brand-new frame; reclaim one first if the
                // replacer is already full of evictable frames.
                if self.evictable_count == self.capacity {
                    self.evict();
                }

                let mut history = VecDeque::with_capacity(self.k);
                history.push_back(stamp);
                self.frames.insert(
                    frame_id,
                    FrameEntry {
                        history,
                        access_count: 1,
                        evictable: true,
                        slot: IndexSlot::Cold(stamp),
                    },
                );
                self.cold.insert(stamp, frame_id);
                self.evictable_count += 1;
                1
            }
        };

        // At k accesses the frame graduates from the cold index; past k it
        // is re-sorted under its new k-th-recent stamp.
        if count >= self.k {
            self.requeue_warm(frame_id);
        }

        Ok(())
    }

    fn evict(&mut self) -> Option<FrameId> {
        if self.evictable_count == 0 {
            return None;
        }

        // Cold frames have infinite backward distance and always outrank
        // warm ones; both indexes iterate in eviction order.
        let LRUKState { frames, cold, warm, .. } = self;
        let victim = cold
            .values()
            .chain(warm.values())
            .copied()
            .find(|id| frames.get(id).is_some_and(|entry| entry.evictable))?;

        self.clear_frame(victim);
        debug!("Evicted frame {}", victim);
        Some(victim)
    }

    fn set_evictable(&mut self, frame_id: FrameId, evictable: bool) {
        let Some(entry) = self.frames.get_mut(&frame_id) else {
            return;
        };
        if entry.evictable == evictable {
            return;
        }
        entry.evictable = evictable;
        if evictable {
            self.evictable_count += 1;
        } else {
            self.evictable_count -= 1;
        }
    }

    fn remove(&mut self, frame_id: FrameId) -> Result<(), ReplacerError> {
        if frame_id as usize >= self.capacity {
            return Err(ReplacerError::InvalidFrame(frame_id));
        }

        let evictable = match self.frames.get(&frame_id) {
            None => return Ok(()),
            Some(entry) => entry.evictable,
        };
        if !evictable {
            return Err(ReplacerError::IllegalRemoval(frame_id));
        }

        self.clear_frame(frame_id);
        debug!("Removed frame {}", frame_id);
        Ok(())
    }

    /// Move a frame to its sorted warm position, keyed by the oldest stamp
    /// in its history. Covers both the cold-to-warm promotion at the k-th
    /// access and repositioning on every access after that.
    fn requeue_warm(&mut self, frame_id: FrameId) {
        let Some(entry) = self.frames.get_mut(&frame_id) else {
            return;
        };
        match entry.slot {
            IndexSlot::Cold(key) => {
                self.cold.remove(&key);
            }
            IndexSlot::Warm(stamp, seq) => {
                self.warm.remove(&(stamp, seq));
            }
        }

        let Some(&kth_stamp) = entry.history.front() else {
            return;
        };
        self.warm_seq += 1;
        entry.slot = IndexSlot::Warm(kth_stamp, self.warm_seq);
        self.warm.insert((kth_stamp, self.warm_seq), frame_id);
    }

    /// Forget everything about a frame: history, access count, index entry.
    fn clear_frame(&mut self, frame_id: FrameId) {
        if let Some(entry) = self.frames.remove(&frame_id) {
            match entry.slot {
                IndexSlot::Cold(key) => {
                    self.cold.remove(&key);
                }
                IndexSlot::Warm(stamp, seq) => {
                    self.warm.remove(&(stamp, seq));
                }
            }
            if entry.evictable {
                self.evictable_count -= 1;
            }
        }
    }
}
