//! Time block model.
//!
//! A time block is one concrete meeting occurrence of a section: a specific
//! lecture on a specific day, not a weekly pattern.
//!
//! # Time Model
//! All times are in milliseconds relative to a scheduling epoch.
//! The consumer defines what epoch means.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A meeting occurrence [start, end).
///
/// Half-open interval: includes start, excludes end. Two blocks where one
/// ends exactly when the other starts do not overlap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeBlock {
    /// Block start (ms, inclusive).
    pub start_ms: i64,
    /// Block end (ms, exclusive).
    pub end_ms: i64,
}

impl TimeBlock {
    /// Creates a new time block.
    ///
    /// Does not check `start_ms < end_ms`; ingestion through
    /// [`SectionTable`](super::SectionTable) rejects malformed blocks.
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    /// Duration of this block (ms).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Whether the block is well formed (`start < end`).
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.start_ms < self.end_ms
    }

    /// Whether two blocks overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_ms < other.end_ms && other.start_ms < self.end_ms
    }

    /// Orders this block relative to `other` for the merge scan.
    ///
    /// Returns `Less` if this block ends at or before `other` starts,
    /// `Greater` if it starts at or after `other` ends, and `Equal` when
    /// the two overlap.
    pub fn compare_placement(&self, other: &Self) -> Ordering {
        if self.end_ms <= other.start_ms {
            Ordering::Less
        } else if self.start_ms >= other.end_ms {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl From<(i64, i64)> for TimeBlock {
    fn from((start_ms, end_ms): (i64, i64)) -> Self {
        Self::new(start_ms, end_ms)
    }
}
