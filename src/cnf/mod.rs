//! Boolean encoding of the timetabling problem.
//!
//! Each section becomes one boolean variable ("this section is selected").
//! Requirement categories and time conflicts become CNF clauses over those
//! variables, ready for any satisfiability backend.
//!
//! # Submodules
//!
//! - `registry`: [`VariableRegistry`], the section ↔ variable bijection
//! - `formula`: [`Var`], [`Lit`], [`Clause`], [`CnfFormula`], [`ConstraintBuilder`]

mod formula;
mod registry;

pub use formula::{at_most_one, exactly_one, Clause, CnfFormula, ConstraintBuilder, Lit, Var};
pub use registry::VariableRegistry;
