//! Satisfiability backends for model enumeration.
//!
//! The scheduler depends only on the [`ModelSource`] capability: given a
//! CNF formula, produce a lazy, finite sequence of distinct satisfying
//! assignments. Any all-solutions SAT solver can implement it.
//!
//! # Backends
//!
//! - [`VarisatSource`]: pure-Rust CDCL solver (`varisat`), enumerating
//!   models with blocking clauses.

mod varisat_source;

pub use varisat_source::{VarisatModels, VarisatSource};

use serde::{Deserialize, Serialize};

use crate::cnf::{CnfFormula, Lit, Var};
use crate::error::Result;

/// A satisfying assignment.
///
/// Holds one literal per variable of the formula: positive when the
/// variable is true, negative when false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    lits: Vec<Lit>,
}

impl Model {
    /// Creates a model from its literals.
    pub fn new(lits: Vec<Lit>) -> Self {
        Self { lits }
    }

    /// All literals.
    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    /// Variables assigned true, in literal order.
    pub fn true_vars(&self) -> impl Iterator<Item = Var> + '_ {
        self.lits
            .iter()
            .filter(|l| l.is_positive())
            .map(|l| l.var())
    }

    /// Clause excluding exactly this assignment.
    pub fn blocking_clause(&self) -> Vec<Lit> {
        self.lits.iter().map(|&l| !l).collect()
    }
}

/// Capability: enumerate every model of a CNF formula.
///
/// # Contract
/// - The sequence is lazy: no search happens until the first `next()`.
/// - It is finite and never yields the same model twice.
/// - Each model assigns every variable that appears in the formula.
/// - An unsatisfiable formula yields nothing; that is not an error.
/// - Dropping the iterator releases all search state.
pub trait ModelSource {
    /// Lazy model sequence.
    type Models: Iterator<Item = Result<Model>>;

    /// Starts enumerating models of `formula`.
    fn models(&self, formula: &CnfFormula) -> Self::Models;
}
