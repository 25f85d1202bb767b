//! Section time-conflict detection.
//!
//! Two sections conflict when any meeting of one overlaps any meeting of
//! the other. Only sections from different requirement categories are
//! compared: alternatives within a category already exclude each other
//! through the exactly-one constraint.
//!
//! # Algorithm
//!
//! [`blocks_conflict`] is a two-pointer merge over two start-sorted block
//! lists, O(|a| + |b|). [`find_conflicts`] applies it to every section pair
//! across every pair of distinct categories.
//!
//! # Complexity
//! O(R² · S² · B) where R = categories, S = sections per category,
//! B = blocks per section. This is the superlinear stage of the pipeline;
//! callers bound it by capping the course count.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{Requirement, Requirements, SectionId, SectionTable, TimeBlock};

/// A pair of sections that cannot both be selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Conflict {
    /// Section from the earlier category.
    pub first: SectionId,
    /// Section from the later category.
    pub second: SectionId,
}

impl Conflict {
    /// Creates a conflict pair.
    pub fn new(first: impl Into<SectionId>, second: impl Into<SectionId>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Whether the pair involves `section`.
    pub fn involves(&self, section: &SectionId) -> bool {
        &self.first == section || &self.second == section
    }
}

/// Whether any block of `a` overlaps any block of `b`.
///
/// Expects both slices sorted ascending by `start_ms`, as guaranteed by
/// [`SectionTable`]. Sortedness is checked in O(|a| + |b|); unsorted input
/// is sorted into temporary copies before the merge.
///
/// An empty slice on either side never conflicts.
///
/// # Example
/// ```
/// use u_timetable::conflict::blocks_conflict;
/// use u_timetable::models::TimeBlock;
///
/// let a = [TimeBlock::new(0, 100), TimeBlock::new(200, 300)];
/// let b = [TimeBlock::new(100, 200)];
/// assert!(!blocks_conflict(&a, &b));
/// assert!(blocks_conflict(&a, &[TimeBlock::new(250, 260)]));
/// ```
pub fn blocks_conflict(a: &[TimeBlock], b: &[TimeBlock]) -> bool {
    if is_start_sorted(a) && is_start_sorted(b) {
        return merge_overlaps(a, b);
    }
    log::debug!("sorting unsorted block lists before conflict check");
    merge_overlaps(&sorted_copy(a), &sorted_copy(b))
}

fn sorted_copy(blocks: &[TimeBlock]) -> Vec<TimeBlock> {
    let mut blocks = blocks.to_vec();
    blocks.sort_by_key(|b| (b.start_ms, b.end_ms));
    blocks
}

fn merge_overlaps(a: &[TimeBlock], b: &[TimeBlock]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].compare_placement(&b[j]) {
            // a[i] ends before b[j] starts, so before every later b block too
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => return true,
        }
    }
    false
}

fn is_start_sorted(blocks: &[TimeBlock]) -> bool {
    blocks.windows(2).all(|w| w[0].start_ms <= w[1].start_ms)
}

/// Finds every conflicting section pair across distinct categories.
///
/// Output order follows category order, then section order, so identical
/// input always yields an identical list. Sections missing from `table`
/// have no blocks and never conflict.
pub fn find_conflicts(requirements: &Requirements, table: &SectionTable) -> Vec<Conflict> {
    let reqs = requirements.as_slice();
    let mut conflicts = Vec::new();
    for (i, first) in reqs.iter().enumerate() {
        for second in &reqs[i + 1..] {
            conflicts.extend(category_pair_conflicts(first, second, table));
        }
    }
    conflicts
}

/// Parallel version of [`find_conflicts`].
///
/// Each category pair is checked independently on the rayon pool. Results
/// are concatenated in category-pair order, so the output equals the
/// sequential version.
#[cfg(feature = "parallel")]
pub fn find_conflicts_parallel(requirements: &Requirements, table: &SectionTable) -> Vec<Conflict> {
    use rayon::prelude::*;

    let reqs = requirements.as_slice();
    let pairs: Vec<(usize, usize)> = (0..reqs.len())
        .flat_map(|i| ((i + 1)..reqs.len()).map(move |j| (i, j)))
        .collect();

    pairs
        .par_iter()
        .map(|&(i, j)| category_pair_conflicts(&reqs[i], &reqs[j], table))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

fn category_pair_conflicts(
    first: &Requirement,
    second: &Requirement,
    table: &SectionTable,
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    for a in &first.sections {
        let a_blocks = table.blocks(a);
        if a_blocks.is_empty() {
            continue;
        }
        for b in &second.sections {
            if blocks_conflict(a_blocks, table.blocks(b)) {
                log::debug!("{a} conflicts with {b}");
                conflicts.push(Conflict::new(a.clone(), b.clone()));
            }
        }
    }
    conflicts
}
