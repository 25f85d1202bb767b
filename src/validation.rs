//! Input validation for section data.
//!
//! Checks structural integrity of the upstream section mapping before
//! scheduling. Detects:
//! - Malformed meeting blocks (`start >= end`)
//! - Duplicate `(course_id, section_label)` identifiers
//! - Empty course ids or section labels
//!
//! Unsorted block lists are not an error here; ingestion re-sorts them.
//! Sections with no blocks are valid and never conflict.

use crate::models::Section;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A meeting block does not satisfy `start < end`.
    MalformedTimeBlock,
    /// Two sections share the same identifier.
    DuplicateSection,
    /// A course id or section label is empty.
    EmptyIdentifier,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates section data for a scheduling run.
///
/// Checks:
/// 1. Every course id and section label is non-empty
/// 2. No duplicate `(course_id, section_label)` pairs
/// 3. Every block satisfies `start_ms < end_ms`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_sections(sections: &[Section]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for section in sections {
        let id = &section.id;

        if id.course_id.trim().is_empty() || id.section_label.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyIdentifier,
                format!("Section '{id}' has an empty course id or section label"),
            ));
        }

        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSection,
                format!("Duplicate section: {id}"),
            ));
        }

        for block in &section.blocks {
            if !block.is_well_formed() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MalformedTimeBlock,
                    format!(
                        "Section '{}' has a meeting block ending at or before its start [{}, {})",
                        id, block.start_ms, block.end_ms
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
