//! Lazy schedule enumeration.
//!
//! Pulls models from a [`ModelSource`], keeps the variables assigned true,
//! and decodes them through the run's [`VariableRegistry`]. Validity is
//! guaranteed by the encoding, so decoded schedules are not re-checked.

use crate::cnf::{CnfFormula, VariableRegistry};
use crate::error::Result;
use crate::models::Schedule;
use crate::solver::{Model, ModelSource};

/// Iterator of decoded schedules, capped at a limit.
///
/// Owns the registry and the model sequence; dropping it releases both.
/// After the first error the iterator is fused.
pub struct ScheduleEnumerator<M> {
    models: Option<M>,
    registry: VariableRegistry,
    limit: usize,
    produced: usize,
    truncated: Option<bool>,
}

impl<M> ScheduleEnumerator<M>
where
    M: Iterator<Item = Result<Model>>,
{
    /// Schedules produced so far.
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Whether the limit cut enumeration short.
    ///
    /// Below the limit this is `false` without touching the source. At the
    /// limit, pulls one more model to tell a cut-short run from one that
    /// ended exactly at the limit, then releases the source. With
    /// `limit == 0` the source is never started and the answer is `true`.
    ///
    /// # Errors
    /// Propagates a backend failure on the extra pull.
    pub fn truncated(&mut self) -> Result<bool> {
        if self.produced < self.limit {
            return Ok(false);
        }
        if let Some(known) = self.truncated {
            return Ok(known);
        }
        let more = match self.models.take() {
            Some(mut models) => models.next().transpose()?.is_some(),
            None => true,
        };
        self.truncated = Some(more);
        Ok(more)
    }

    /// Registry used for decoding.
    pub fn registry(&self) -> &VariableRegistry {
        &self.registry
    }
}

impl<M> Iterator for ScheduleEnumerator<M>
where
    M: Iterator<Item = Result<Model>>,
{
    type Item = Result<Schedule>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.produced >= self.limit {
            return None;
        }

        let next = self.models.as_mut()?.next();
        match next {
            Some(Ok(model)) => match decode_model(&model, &self.registry) {
                Ok(schedule) => {
                    self.produced += 1;
                    Some(Ok(schedule))
                }
                Err(err) => {
                    self.models = None;
                    Some(Err(err))
                }
            },
            Some(Err(err)) => {
                self.models = None;
                Some(Err(err))
            }
            None => {
                self.models = None;
                None
            }
        }
    }
}

/// Enumerates up to `limit` schedules satisfying `formula`.
///
/// With `limit == 0` the model source is never started. An unsatisfiable
/// formula yields an empty sequence.
///
/// # Example
/// ```
/// use u_timetable::cnf::ConstraintBuilder;
/// use u_timetable::models::SectionId;
/// use u_timetable::scheduler::enumerate_schedules;
/// use u_timetable::solver::VarisatSource;
///
/// let lecs = [SectionId::new("CS246", "LEC 001"), SectionId::new("CS246", "LEC 002")];
/// let (formula, registry) = ConstraintBuilder::new().with_exactly_one(&lecs).build();
///
/// let schedules: Vec<_> = enumerate_schedules(&formula, registry, &VarisatSource, 10)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(schedules.len(), 2);
/// ```
pub fn enumerate_schedules<S: ModelSource>(
    formula: &CnfFormula,
    registry: VariableRegistry,
    source: &S,
    limit: usize,
) -> ScheduleEnumerator<S::Models> {
    let models = if limit == 0 {
        None
    } else {
        Some(source.models(formula))
    };
    ScheduleEnumerator {
        models,
        registry,
        limit,
        produced: 0,
        truncated: None,
    }
}

/// Decodes the true variables of a model into a schedule.
///
/// # Errors
/// [`ScheduleError::UnknownVariable`](crate::error::ScheduleError::UnknownVariable)
/// if the model references a variable the registry never issued.
pub fn decode_model(model: &Model, registry: &VariableRegistry) -> Result<Schedule> {
    model
        .true_vars()
        .map(|var| registry.lookup(var).cloned())
        .collect()
}
