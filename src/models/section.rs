//! Course section model.
//!
//! A section is one enrollable offering of a course component, such as
//! `LEC 001` or `TUT 104`. It owns every concrete meeting occurrence within
//! the term, sorted by start time.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::TimeBlock;
use crate::error::{Result, ScheduleError};
use crate::validation::validate_sections;

/// Identifies a section: `(course_id, section_label)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionId {
    /// Course identifier (e.g., "CS246").
    pub course_id: String,
    /// Section label within the course (e.g., "LEC 001").
    pub section_label: String,
}

impl SectionId {
    /// Creates a new section identifier.
    pub fn new(course_id: impl Into<String>, section_label: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            section_label: section_label.into(),
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.course_id, self.section_label)
    }
}

impl<C: Into<String>, L: Into<String>> From<(C, L)> for SectionId {
    fn from((course_id, section_label): (C, L)) -> Self {
        Self::new(course_id, section_label)
    }
}

/// A section and its meeting occurrences.
///
/// A section with no blocks (TBA, online, or unscheduled) is valid and
/// never conflicts with anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section identifier.
    #[serde(flatten)]
    pub id: SectionId,
    /// Meeting occurrences, ascending by start.
    #[serde(default)]
    pub blocks: Vec<TimeBlock>,
}

impl Section {
    /// Creates a section with no meeting blocks.
    pub fn new(course_id: impl Into<String>, section_label: impl Into<String>) -> Self {
        Self {
            id: SectionId::new(course_id, section_label),
            blocks: Vec::new(),
        }
    }

    /// Adds a meeting block.
    pub fn with_block(mut self, start_ms: i64, end_ms: i64) -> Self {
        self.blocks.push(TimeBlock::new(start_ms, end_ms));
        self
    }

    /// Replaces the meeting blocks.
    pub fn with_blocks(mut self, blocks: Vec<TimeBlock>) -> Self {
        self.blocks = blocks;
        self
    }

    /// Whether blocks are in ascending start order.
    pub fn is_sorted(&self) -> bool {
        self.blocks
            .windows(2)
            .all(|pair| pair[0].start_ms <= pair[1].start_ms)
    }

    /// Sorts blocks by start time (stable).
    pub fn sort_blocks(&mut self) {
        self.blocks.sort_by_key(|b| b.start_ms);
    }
}

/// Validated section data for one scheduling run.
///
/// Built from the upstream `(course_id, section_label) -> blocks` mapping.
/// Preserves first-seen order so grouping and variable numbering are
/// reproducible across runs on identical input.
///
/// # Guarantees
/// - Every block satisfies `start_ms < end_ms`.
/// - Section identifiers are unique and non-empty.
/// - Each section's blocks are sorted ascending by start.
///
/// # Example
/// ```
/// use u_timetable::models::SectionTable;
///
/// let table = SectionTable::from_entries(vec![
///     (("CS246", "LEC 001"), vec![(0, 4_800_000)]),
///     (("CS246", "TUT 101"), vec![]),
/// ]).unwrap();
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Section>", into = "Vec<Section>")]
pub struct SectionTable {
    sections: Vec<Section>,
    index: HashMap<SectionId, usize>,
}

impl SectionTable {
    /// Validates and indexes a list of sections.
    ///
    /// Reports every malformed block, duplicate identifier, and empty
    /// identifier at once. Unsorted block lists are re-sorted rather
    /// than rejected.
    pub fn from_sections(mut sections: Vec<Section>) -> Result<Self> {
        validate_sections(&sections).map_err(ScheduleError::InvalidInput)?;

        let mut index = HashMap::with_capacity(sections.len());
        for (i, section) in sections.iter_mut().enumerate() {
            if !section.is_sorted() {
                log::debug!("re-sorting meeting blocks of {}", section.id);
                section.sort_blocks();
            }
            index.insert(section.id.clone(), i);
        }

        Ok(Self { sections, index })
    }

    /// Builds a table from `((course_id, section_label), [(start_ms, end_ms)])` entries.
    pub fn from_entries<I, C, L, B>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = ((C, L), B)>,
        C: Into<String>,
        L: Into<String>,
        B: IntoIterator<Item = (i64, i64)>,
    {
        let sections = entries
            .into_iter()
            .map(|((course_id, section_label), blocks)| Section {
                id: SectionId::new(course_id, section_label),
                blocks: blocks.into_iter().map(TimeBlock::from).collect(),
            })
            .collect();
        Self::from_sections(sections)
    }

    /// Looks up a section.
    pub fn get(&self, id: &SectionId) -> Option<&Section> {
        self.index.get(id).map(|&i| &self.sections[i])
    }

    /// Meeting blocks for a section.
    ///
    /// Unknown sections have no blocks, so they never conflict.
    pub fn blocks(&self, id: &SectionId) -> &[TimeBlock] {
        self.get(id).map(|s| s.blocks.as_slice()).unwrap_or(&[])
    }

    /// Iterates sections in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the table has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Distinct course ids in first-seen order.
    pub fn course_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.sections
            .iter()
            .map(|s| s.id.course_id.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

impl TryFrom<Vec<Section>> for SectionTable {
    type Error = ScheduleError;

    fn try_from(sections: Vec<Section>) -> Result<Self> {
        Self::from_sections(sections)
    }
}

impl From<SectionTable> for Vec<Section> {
    fn from(table: SectionTable) -> Self {
        table.sections
    }
}
