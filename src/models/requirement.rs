//! Requirement categories and section classification.
//!
//! A requirement category is a course component a student must enroll in
//! exactly once: CS246 lecture, CS246 tutorial, and so on. Sections of the
//! same category are interchangeable alternatives.
//!
//! # Classification Policy
//!
//! How a section label maps to an instruction type is institution-specific.
//! The default policy takes the first three characters of the label
//! (`"LEC 001"` → `"LEC"`), but any [`SectionClassifier`] can be supplied.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::{SectionId, SectionTable};

/// Derives the instruction type of a section.
///
/// Must be deterministic: the same section always maps to the same type.
/// Closures `Fn(&SectionId) -> String` implement this trait.
pub trait SectionClassifier: Send + Sync {
    /// Instruction type key (e.g., "LEC", "TUT", "LAB").
    fn instruction_type(&self, section: &SectionId) -> String;
}

impl<F> SectionClassifier for F
where
    F: Fn(&SectionId) -> String + Send + Sync,
{
    fn instruction_type(&self, section: &SectionId) -> String {
        self(section)
    }
}

/// Classifies by a fixed-length prefix of the section label.
///
/// Counts characters, not bytes. Labels shorter than `length` are used whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelPrefix {
    /// Number of leading characters that name the instruction type.
    pub length: usize,
}

impl LabelPrefix {
    /// Creates a prefix classifier.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for LabelPrefix {
    fn default() -> Self {
        Self { length: 3 }
    }
}

impl SectionClassifier for LabelPrefix {
    fn instruction_type(&self, section: &SectionId) -> String {
        section.section_label.chars().take(self.length).collect()
    }
}

/// Classifies by the leading run of alphabetic characters.
///
/// `"LEC 001"` → `"LEC"`, `"L01"` → `"L"`, `"LAB2"` → `"LAB"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadingAlphabetic;

impl SectionClassifier for LeadingAlphabetic {
    fn instruction_type(&self, section: &SectionId) -> String {
        section
            .section_label
            .chars()
            .take_while(|c| c.is_alphabetic())
            .collect()
    }
}

/// Identifies a requirement: `(course_id, instruction_type)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequirementCategory {
    /// Course identifier.
    pub course_id: String,
    /// Instruction type derived by the classifier.
    pub instruction_type: String,
}

impl RequirementCategory {
    /// Creates a new category.
    pub fn new(course_id: impl Into<String>, instruction_type: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            instruction_type: instruction_type.into(),
        }
    }
}

impl fmt::Display for RequirementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.course_id, self.instruction_type)
    }
}

/// A category and its alternative sections.
///
/// Zero sections is valid: it makes the whole problem unsatisfiable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Category identifier.
    pub category: RequirementCategory,
    /// Alternatives, in first-seen order.
    pub sections: Vec<SectionId>,
}

/// Requirement categories for one scheduling run, in first-seen order.
///
/// # Example
/// ```
/// use u_timetable::models::{LabelPrefix, Requirements, SectionTable};
///
/// let table = SectionTable::from_entries(vec![
///     (("CS246", "LEC 001"), vec![]),
///     (("CS246", "TUT 101"), vec![]),
///     (("CS246", "LEC 002"), vec![]),
/// ]).unwrap();
/// let requirements = Requirements::group(&table, &LabelPrefix::default());
/// assert_eq!(requirements.len(), 2);
/// assert_eq!(requirements.possibility_space(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Requirements {
    entries: Vec<Requirement>,
    index: HashMap<RequirementCategory, usize>,
}

impl Requirements {
    /// Creates an empty requirement set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Partitions every section of `table` into categories.
    ///
    /// Category order and section order within a category follow the
    /// table's first-seen order.
    pub fn group(table: &SectionTable, classifier: &dyn SectionClassifier) -> Self {
        let mut requirements = Self::new();
        for section in table.iter() {
            let category = RequirementCategory::new(
                section.id.course_id.clone(),
                classifier.instruction_type(&section.id),
            );
            requirements.push_section(category, section.id.clone());
        }
        requirements
    }

    /// Adds a requirement with explicit alternatives.
    ///
    /// Extends the category if it already exists; duplicate sections are
    /// ignored. An empty `sections` list still registers the category.
    pub fn add_requirement<S>(&mut self, category: RequirementCategory, sections: S)
    where
        S: IntoIterator,
        S::Item: Into<SectionId>,
    {
        let slot = self.slot(category);
        for section in sections {
            let section = section.into();
            let entry = &mut self.entries[slot];
            if !entry.sections.contains(&section) {
                entry.sections.push(section);
            }
        }
    }

    /// Builder form of [`add_requirement`](Self::add_requirement).
    pub fn with_requirement<S>(mut self, category: RequirementCategory, sections: S) -> Self
    where
        S: IntoIterator,
        S::Item: Into<SectionId>,
    {
        self.add_requirement(category, sections);
        self
    }

    fn push_section(&mut self, category: RequirementCategory, section: SectionId) {
        let slot = self.slot(category);
        self.entries[slot].sections.push(section);
    }

    fn slot(&mut self, category: RequirementCategory) -> usize {
        if let Some(&i) = self.index.get(&category) {
            return i;
        }
        let i = self.entries.len();
        self.index.insert(category.clone(), i);
        self.entries.push(Requirement {
            category,
            sections: Vec::new(),
        });
        i
    }

    /// Looks up a category.
    pub fn get(&self, category: &RequirementCategory) -> Option<&Requirement> {
        self.index.get(category).map(|&i| &self.entries[i])
    }

    /// Iterates requirements in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.entries.iter()
    }

    /// Requirements as a slice.
    pub fn as_slice(&self) -> &[Requirement] {
        &self.entries
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no categories.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category containing a section, if any.
    pub fn category_of(&self, section: &SectionId) -> Option<&RequirementCategory> {
        self.entries
            .iter()
            .find(|r| r.sections.contains(section))
            .map(|r| &r.category)
    }

    /// Theoretical number of combinations: product of category sizes.
    ///
    /// Saturates at `u128::MAX`. An empty requirement set has one
    /// (empty) combination.
    pub fn possibility_space(&self) -> u128 {
        self.entries
            .iter()
            .fold(1u128, |acc, r| acc.saturating_mul(r.sections.len() as u128))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> SectionTable {
        SectionTable::from_entries(vec![
            (("CS240", "LEC 002"), vec![]),
            (("ECON201", "LEC 002"), vec![]),
            (("CS240", "TUT 104"), vec![]),
            (("CS240", "LEC 001"), vec![]),
            (("CS240", "TUT 101"), vec![]),
            (("CS240", "TST 201"), vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn test_label_prefix() {
        let id = SectionId::new("CS240", "LEC 001");
        assert_eq!(LabelPrefix::default().instruction_type(&id), "LEC");
        assert_eq!(LabelPrefix::new(1).instruction_type(&id), "L");
        assert_eq!(
            LabelPrefix::new(3).instruction_type(&SectionId::new("X", "L1")),
            "L1"
        );
    }

    #[test]
    fn test_leading_alphabetic() {
        let c = LeadingAlphabetic;
        assert_eq!(c.instruction_type(&SectionId::new("X", "LEC 001")), "LEC");
        assert_eq!(c.instruction_type(&SectionId::new("X", "L01")), "L");
        assert_eq!(c.instruction_type(&SectionId::new("X", "LAB2")), "LAB");
    }

    #[test]
    fn test_closure_classifier() {
        let by_course_only = |_: &SectionId| String::from("ANY");
        let table = sample_table();
        let requirements = Requirements::group(&table, &by_course_only);
        assert_eq!(requirements.len(), 2); // CS240, ECON201
    }

    #[test]
    fn test_group_requirements() {
        let table = sample_table();
        let requirements = Requirements::group(&table, &LabelPrefix::default());

        let categories: Vec<String> = requirements
            .iter()
            .map(|r| r.category.to_string())
            .collect();
        assert_eq!(
            categories,
            ["CS240-LEC", "ECON201-LEC", "CS240-TUT", "CS240-TST"]
        );

        let lec = requirements
            .get(&RequirementCategory::new("CS240", "LEC"))
            .unwrap();
        let labels: Vec<&str> = lec.sections.iter().map(|s| s.section_label.as_str()).collect();
        assert_eq!(labels, ["LEC 002", "LEC 001"]);
    }

    #[test]
    fn test_every_section_in_exactly_one_category() {
        let table = sample_table();
        let requirements = Requirements::group(&table, &LabelPrefix::default());
        for section in table.iter() {
            let count = requirements
                .iter()
                .filter(|r| r.sections.contains(&section.id))
                .count();
            assert_eq!(count, 1, "{} grouped {} times", section.id, count);
        }
    }

    #[test]
    fn test_possibility_space() {
        let table = sample_table();
        let requirements = Requirements::group(&table, &LabelPrefix::default());
        // LEC 2 × ECON 1 × TUT 2 × TST 1
        assert_eq!(requirements.possibility_space(), 4);
        assert_eq!(Requirements::new().possibility_space(), 1);
    }

    #[test]
    fn test_add_empty_requirement() {
        let requirements = Requirements::new()
            .with_requirement(RequirementCategory::new("CS246", "LEC"), [("CS246", "LEC 001")])
            .with_requirement(
                RequirementCategory::new("CS246", "LAB"),
                Vec::<SectionId>::new(),
            );
        assert_eq!(requirements.len(), 2);
        assert_eq!(requirements.possibility_space(), 0);
    }

    #[test]
    fn test_add_requirement_extends_and_dedups() {
        let cat = RequirementCategory::new("CS246", "LEC");
        let mut requirements = Requirements::new();
        requirements.add_requirement(cat.clone(), [("CS246", "LEC 001"), ("CS246", "LEC 002")]);
        requirements.add_requirement(cat.clone(), [("CS246", "LEC 002"), ("CS246", "LEC 003")]);
        assert_eq!(requirements.len(), 1);
        assert_eq!(requirements.get(&cat).unwrap().sections.len(), 3);
        assert_eq!(
            requirements.category_of(&SectionId::new("CS246", "LEC 003")),
            Some(&cat)
        );
    }
}
