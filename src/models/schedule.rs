//! Schedule (solution) model.
//!
//! A schedule is one conflict-free combination of sections: exactly one
//! section per requirement category, no two of which meet at the same time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{SectionId, SectionTable};

/// One candidate timetable.
///
/// Sections are kept sorted so equal schedules compare and hash equal
/// regardless of the order the solver reported them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Schedule {
    /// Selected sections.
    pub sections: BTreeSet<SectionId>,
}

/// A single meeting of a scheduled section within a viewing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    /// Start relative to the window start (ms).
    pub offset_ms: i64,
    /// Meeting length (ms).
    pub duration_ms: i64,
    /// Course identifier.
    pub course_id: String,
    /// Section label.
    pub section_label: String,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a section.
    pub fn add_section(&mut self, section: SectionId) {
        self.sections.insert(section);
    }

    /// Builder form of [`add_section`](Self::add_section).
    pub fn with_section(mut self, section: impl Into<SectionId>) -> Self {
        self.sections.insert(section.into());
        self
    }

    /// Whether the schedule includes a section.
    pub fn contains(&self, section: &SectionId) -> bool {
        self.sections.contains(section)
    }

    /// Number of selected sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether no sections are selected.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterates selected sections in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.iter()
    }

    /// Lists every meeting of this schedule inside `[start_ms, end_ms)`.
    ///
    /// A meeting is included when it starts at or after `start_ms` and ends
    /// strictly before `end_ms`. Events are sorted by offset; ties keep
    /// section order.
    pub fn events_between(
        &self,
        table: &SectionTable,
        start_ms: i64,
        end_ms: i64,
    ) -> Vec<ScheduleEvent> {
        let mut events: Vec<ScheduleEvent> = self
            .sections
            .iter()
            .flat_map(|id| {
                table
                    .blocks(id)
                    .iter()
                    .filter(move |b| start_ms <= b.start_ms && b.end_ms < end_ms)
                    .map(move |b| ScheduleEvent {
                        offset_ms: b.start_ms - start_ms,
                        duration_ms: b.duration_ms(),
                        course_id: id.course_id.clone(),
                        section_label: id.section_label.clone(),
                    })
            })
            .collect();
        events.sort_by_key(|e| e.offset_ms);
        events
    }
}

impl FromIterator<SectionId> for Schedule {
    fn from_iter<I: IntoIterator<Item = SectionId>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}
