//! CNF formula types and scheduling constraint encoding.
//!
//! # Encoding
//!
//! - **Exactly-one** per requirement category with variables `v1..vn`:
//!   one clause `[v1, ..., vn]` (at least one) plus `[-vi, -vj]` for every
//!   `i < j` (at most one).
//! - **At-most-one** per conflicting section pair: `[-a, -b]`.
//!
//! Clause order does not affect the solution set.
//!
//! # Reference
//! Biere et al. (2009), "Handbook of Satisfiability", Ch. 2 (CNF encodings)

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::ops::Not;

use super::VariableRegistry;
use crate::conflict::Conflict;
use crate::models::{Requirement, SectionId};

/// A boolean variable, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Var(u32);

impl Var {
    /// Creates a variable from its 1-based index. Returns `None` for 0 or
    /// indices that do not fit a signed literal.
    pub fn new(index: u32) -> Option<Self> {
        if index == 0 || index > i32::MAX as u32 {
            None
        } else {
            Some(Self(index))
        }
    }

    pub(crate) fn from_position(position: usize) -> Self {
        debug_assert!(
            position != 0 && position <= i32::MAX as usize,
            "variable position {position} out of literal range"
        );
        Self(position as u32)
    }

    /// 1-based index.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }

    /// Literal asserting this variable true.
    #[inline]
    pub fn positive(self) -> Lit {
        Lit(self.0 as i32)
    }

    /// Literal asserting this variable false.
    #[inline]
    pub fn negative(self) -> Lit {
        Lit(-(self.0 as i32))
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signed variable reference (DIMACS convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Lit(i32);

impl Lit {
    /// Parses a DIMACS literal. Returns `None` for 0.
    pub fn from_dimacs(value: i32) -> Option<Self> {
        if value == 0 || value == i32::MIN {
            None
        } else {
            Some(Self(value))
        }
    }

    /// DIMACS form: positive for true, negative for false.
    #[inline]
    pub fn to_dimacs(self) -> i32 {
        self.0
    }

    /// Referenced variable.
    #[inline]
    pub fn var(self) -> Var {
        Var(self.0.unsigned_abs())
    }

    /// Whether the literal asserts its variable true.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl Not for Lit {
    type Output = Lit;

    fn not(self) -> Lit {
        Lit(-self.0)
    }
}

/// A disjunction of literals.
///
/// The empty clause is unsatisfiable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause(Vec<Lit>);

impl Clause {
    /// Creates a clause.
    pub fn new(lits: Vec<Lit>) -> Self {
        Self(lits)
    }

    /// Literals in order.
    pub fn lits(&self) -> &[Lit] {
        &self.0
    }

    /// Number of literals.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the empty (unsatisfiable) clause.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Lit> for Clause {
    fn from_iter<I: IntoIterator<Item = Lit>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A conjunction of clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CnfFormula {
    clauses: Vec<Clause>,
    num_vars: u32,
}

impl CnfFormula {
    /// Creates an empty (trivially satisfiable) formula.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a clause.
    pub fn add_clause(&mut self, clause: Clause) {
        if let Some(max) = clause.lits().iter().map(|l| l.var().index()).max() {
            self.num_vars = self.num_vars.max(max);
        }
        self.clauses.push(clause);
    }

    /// Clauses in insertion order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether the formula has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Highest variable index referenced.
    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    /// Whether the formula contains the empty clause (trivially unsatisfiable).
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// Renders the formula in DIMACS CNF.
    pub fn to_dimacs(&self) -> String {
        let mut out = format!("p cnf {} {}\n", self.num_vars, self.clauses.len());
        for clause in &self.clauses {
            for lit in clause.lits() {
                let _ = write!(out, "{} ", lit.to_dimacs());
            }
            out.push_str("0\n");
        }
        out
    }
}

/// Clauses forcing exactly one of `vars` true.
///
/// An empty `vars` yields the single empty clause.
pub fn exactly_one(vars: &[Var]) -> Vec<Clause> {
    let mut clauses = Vec::with_capacity(1 + vars.len() * vars.len().saturating_sub(1) / 2);
    clauses.push(vars.iter().map(|v| v.positive()).collect());
    clauses.extend(at_most_one(vars));
    clauses
}

/// Pairwise clauses forbidding two of `vars` from both being true.
pub fn at_most_one(vars: &[Var]) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for (i, a) in vars.iter().enumerate() {
        for b in &vars[i + 1..] {
            clauses.push(Clause::new(vec![a.negative(), b.negative()]));
        }
    }
    clauses
}

/// Builds the scheduling formula and its variable registry together.
///
/// Registry and formula always share one variable space, so every literal
/// in the formula decodes to a section.
///
/// # Example
/// ```
/// use u_timetable::cnf::ConstraintBuilder;
/// use u_timetable::models::SectionId;
///
/// let lecs = [SectionId::new("CS246", "LEC 001"), SectionId::new("CS246", "LEC 002")];
/// let (formula, registry) = ConstraintBuilder::new()
///     .with_exactly_one(&lecs)
///     .build();
/// assert_eq!(formula.len(), 2); // [1, 2] and [-1, -2]
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstraintBuilder {
    registry: VariableRegistry,
    formula: CnfFormula,
}

impl ConstraintBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes every requirement and conflict.
    pub fn from_parts<'a>(
        requirements: impl IntoIterator<Item = &'a Requirement>,
        conflicts: impl IntoIterator<Item = &'a Conflict>,
    ) -> Self {
        let mut builder = Self::new();
        for requirement in requirements {
            builder.add_requirement(requirement);
        }
        for conflict in conflicts {
            builder.add_conflict(conflict);
        }
        builder
    }

    /// Requires exactly one of `sections` to be selected.
    pub fn add_exactly_one(&mut self, sections: &[SectionId]) {
        let vars = self.register_all(sections);
        for clause in exactly_one(&vars) {
            self.formula.add_clause(clause);
        }
    }

    /// Builder form of [`add_exactly_one`](Self::add_exactly_one).
    pub fn with_exactly_one(mut self, sections: &[SectionId]) -> Self {
        self.add_exactly_one(sections);
        self
    }

    /// Forbids selecting more than one of `sections`.
    pub fn add_at_most_one(&mut self, sections: &[SectionId]) {
        let vars = self.register_all(sections);
        for clause in at_most_one(&vars) {
            self.formula.add_clause(clause);
        }
    }

    /// Encodes a requirement category (exactly one of its sections).
    pub fn add_requirement(&mut self, requirement: &Requirement) {
        self.add_exactly_one(&requirement.sections);
    }

    /// Encodes a conflicting pair (never both).
    pub fn add_conflict(&mut self, conflict: &Conflict) {
        let a = self.registry.register(&conflict.first);
        let b = self.registry.register(&conflict.second);
        self.formula
            .add_clause(Clause::new(vec![a.negative(), b.negative()]));
    }

    /// Builder form of [`add_conflict`](Self::add_conflict).
    pub fn with_conflict(mut self, conflict: &Conflict) -> Self {
        self.add_conflict(conflict);
        self
    }

    /// Formula built so far.
    pub fn formula(&self) -> &CnfFormula {
        &self.formula
    }

    /// Registry built so far.
    pub fn registry(&self) -> &VariableRegistry {
        &self.registry
    }

    /// Finishes building.
    pub fn build(self) -> (CnfFormula, VariableRegistry) {
        (self.formula, self.registry)
    }

    fn register_all(&mut self, sections: &[SectionId]) -> Vec<Var> {
        sections.iter().map(|s| self.registry.register(s)).collect()
    }
}
