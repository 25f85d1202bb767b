//! Scheduling run summary.
//!
//! Carries the produced schedules together with the diagnostics the
//! presentation layer reports alongside them.
//!
//! | Field | Definition |
//! |-------|-----------|
//! | `schedules` | Decoded schedules, solver order |
//! | `conflicts` | Every cross-category conflicting pair |
//! | `possibility_space` | Product of category sizes |
//! | `truncated` | The cap stopped enumeration with schedules left over |

use serde::Serialize;
use std::collections::BTreeSet;

use crate::conflict::Conflict;
use crate::models::{Schedule, SectionId};

/// Result of one scheduling run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleReport {
    /// Conflict-free schedules, at most `limit` of them.
    pub schedules: Vec<Schedule>,
    /// Section pairs excluded by time overlap.
    pub conflicts: Vec<Conflict>,
    /// Combinations before conflicts are applied (saturating).
    pub possibility_space: u128,
    /// Whether more schedules existed beyond the limit.
    pub truncated: bool,
}

impl ScheduleReport {
    /// Number of schedules.
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    /// Whether no schedule satisfies the requirements.
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Every section appearing in at least one schedule.
    pub fn sections_used(&self) -> BTreeSet<&SectionId> {
        self.schedules.iter().flat_map(|s| s.iter()).collect()
    }

    /// One-line summary, e.g. "72 valid schedules found out of 81 possibilities".
    pub fn summary(&self) -> String {
        let suffix = if self.truncated { " (truncated at limit)" } else { "" };
        format!(
            "{} valid schedules found out of {} possibilities{}",
            self.schedules.len(),
            self.possibility_space,
            suffix
        )
    }
}
