//! `varisat`-backed model enumeration.
//!
//! # Algorithm
//! Solve; on success report the model, then add its blocking clause (the
//! disjunction of every negated literal) so the next solve must differ in
//! at least one variable. Stop when the solver reports unsatisfiable.
//!
//! # Reference
//! Toda & Soh (2016), "Implementing Efficient All Solutions SAT Solvers"

use varisat::{ExtendFormula, Solver};

use super::{Model, ModelSource};
use crate::cnf::{CnfFormula, Lit};
use crate::error::{Result, ScheduleError};

/// [`ModelSource`] backed by the `varisat` CDCL solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct VarisatSource;

impl VarisatSource {
    /// Creates the backend.
    pub fn new() -> Self {
        Self
    }
}

impl ModelSource for VarisatSource {
    type Models = VarisatModels;

    fn models(&self, formula: &CnfFormula) -> VarisatModels {
        VarisatModels::new(formula)
    }
}

/// Lazy model sequence owning one solver instance.
///
/// Search state lives inside the solver between calls, so one sequence must
/// be consumed sequentially. Dropping it drops the solver.
pub struct VarisatModels {
    solver: Solver<'static>,
    exhausted: bool,
    found: usize,
}

impl VarisatModels {
    fn new(formula: &CnfFormula) -> Self {
        let mut solver = Solver::new();

        // The empty clause makes the formula unsatisfiable; skip the solver.
        let exhausted = formula.has_empty_clause();
        if !exhausted {
            for clause in formula.clauses() {
                let lits: Vec<varisat::Lit> = clause.lits().iter().map(|&l| to_varisat(l)).collect();
                solver.add_clause(&lits);
            }
        }

        Self {
            solver,
            exhausted,
            found: 0,
        }
    }

    /// Models produced so far.
    pub fn found(&self) -> usize {
        self.found
    }
}

impl Iterator for VarisatModels {
    type Item = Result<Model>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        match self.solver.solve() {
            Ok(true) => {
                let lits = self.solver.model().unwrap_or_default();
                if lits.is_empty() {
                    // Formula with no variables: exactly one (empty) model.
                    self.exhausted = true;
                } else {
                    let blocking: Vec<varisat::Lit> = lits.iter().map(|&l| !l).collect();
                    self.solver.add_clause(&blocking);
                }
                self.found += 1;
                Some(Ok(Model::new(lits.into_iter().filter_map(from_varisat).collect())))
            }
            Ok(false) => {
                log::debug!("model enumeration finished after {} models", self.found);
                self.exhausted = true;
                None
            }
            Err(err) => {
                self.exhausted = true;
                Some(Err(ScheduleError::Solver(err.to_string())))
            }
        }
    }
}

fn to_varisat(lit: Lit) -> varisat::Lit {
    varisat::Lit::from_dimacs(lit.to_dimacs() as isize)
}

fn from_varisat(lit: varisat::Lit) -> Option<Lit> {
    Lit::from_dimacs(lit.to_dimacs() as i32)
}
