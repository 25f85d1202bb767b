//! Section ↔ variable bookkeeping.

use std::collections::HashMap;

use super::Var;
use crate::error::{Result, ScheduleError};
use crate::models::SectionId;

/// Bijective mapping between sections and boolean variables.
///
/// Variables are dense and numbered from 1 in registration order.
/// Registration is idempotent. A registry lives for one scheduling run
/// and is never shared between runs.
///
/// # Example
/// ```
/// use u_timetable::cnf::VariableRegistry;
/// use u_timetable::models::SectionId;
///
/// let mut registry = VariableRegistry::new();
/// let lec = SectionId::new("CS246", "LEC 001");
/// let v = registry.register(&lec);
/// assert_eq!(v.index(), 1);
/// assert_eq!(registry.register(&lec), v);
/// assert_eq!(registry.lookup(v).unwrap(), &lec);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    by_section: HashMap<SectionId, Var>,
    sections: Vec<SectionId>,
}

impl VariableRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the variable for `section`, assigning the next one on first sight.
    pub fn register(&mut self, section: &SectionId) -> Var {
        if let Some(&var) = self.by_section.get(section) {
            return var;
        }
        self.sections.push(section.clone());
        let var = Var::from_position(self.sections.len());
        self.by_section.insert(section.clone(), var);
        var
    }

    /// Variable of an already registered section.
    pub fn get(&self, section: &SectionId) -> Option<Var> {
        self.by_section.get(section).copied()
    }

    /// Section of a registered variable.
    ///
    /// # Errors
    /// [`ScheduleError::UnknownVariable`] if `var` was never handed out by
    /// this registry.
    pub fn lookup(&self, var: Var) -> Result<&SectionId> {
        (var.index() as usize)
            .checked_sub(1)
            .and_then(|i| self.sections.get(i))
            .ok_or(ScheduleError::UnknownVariable(var))
    }

    /// Number of registered variables.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterates `(variable, section)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (Var, &SectionId)> {
        self.sections
            .iter()
            .enumerate()
            .map(|(i, s)| (Var::from_position(i + 1), s))
    }
}
