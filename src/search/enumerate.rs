//! Exhaustive enumeration of the catalog Cartesian product.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{Result, SearchError};

use super::constraints::{Constraint, ConstraintEvaluator};
use super::types::{Candidate, Solution};

/// How many candidates each constraint rejected.
///
/// A candidate is counted against the first constraint it violates only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RejectionStats {
    pub design_window: usize,
    pub low_extreme_window: usize,
    pub high_extreme_window: usize,
    pub frequency_spread: usize,
    pub minimum_interval: usize,
    pub discharge_current: usize,
    pub duty_ratio: usize,
}

impl RejectionStats {
    /// Count one rejection.
    pub fn record(&mut self, constraint: Constraint) {
        *self.slot(constraint) += 1;
    }

    /// Rejections attributed to `constraint`.
    pub fn count(&self, constraint: Constraint) -> usize {
        match constraint {
            Constraint::DesignWindow => self.design_window,
            Constraint::LowExtremeWindow => self.low_extreme_window,
            Constraint::HighExtremeWindow => self.high_extreme_window,
            Constraint::FrequencySpread => self.frequency_spread,
            Constraint::MinimumInterval => self.minimum_interval,
            Constraint::DischargeCurrent => self.discharge_current,
            Constraint::DutyRatio => self.duty_ratio,
        }
    }

    /// Total number of rejected candidates.
    pub fn total(&self) -> usize {
        Constraint::ALL.iter().map(|&c| self.count(c)).sum()
    }

    fn merge(&mut self, other: &RejectionStats) {
        for constraint in Constraint::ALL {
            *self.slot(constraint) += other.count(constraint);
        }
    }

    fn slot(&mut self, constraint: Constraint) -> &mut usize {
        match constraint {
            Constraint::DesignWindow => &mut self.design_window,
            Constraint::LowExtremeWindow => &mut self.low_extreme_window,
            Constraint::HighExtremeWindow => &mut self.high_extreme_window,
            Constraint::FrequencySpread => &mut self.frequency_spread,
            Constraint::MinimumInterval => &mut self.minimum_interval,
            Constraint::DischargeCurrent => &mut self.discharge_current,
            Constraint::DutyRatio => &mut self.duty_ratio,
        }
    }
}

/// Result of a full enumeration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Feasible solutions in enumeration order
    pub solutions: Vec<Solution>,
    /// Number of candidates evaluated
    pub evaluated: usize,
    pub rejections: RejectionStats,
}

impl SearchOutcome {
    /// Append a later slice of the enumeration.
    fn extend(&mut self, other: SearchOutcome) {
        self.solutions.extend(other.solutions);
        self.evaluated += other.evaluated;
        self.rejections.merge(&other.rejections);
    }
}

/// Walks potentiometer x R_A x R_B x capacitor, in that nesting order.
///
/// R_A and R_B are drawn independently from the same resistor catalog, so
/// both orderings of a pair and equal pairs are all visited.
pub struct Enumerator<'a> {
    evaluator: &'a ConstraintEvaluator,
    catalog: &'a Catalog,
}

impl<'a> Enumerator<'a> {
    /// Create an enumerator. Every catalog must be non-empty.
    pub fn new(evaluator: &'a ConstraintEvaluator, catalog: &'a Catalog) -> Result<Self> {
        let lists = [
            ("resistor", &catalog.resistors),
            ("capacitor", &catalog.capacitors),
            ("potentiometer", &catalog.potentiometers),
        ];
        for (name, values) in lists {
            if values.is_empty() {
                return Err(SearchError::EmptyCatalog { catalog: name });
            }
        }
        Ok(Self { evaluator, catalog })
    }

    /// Evaluate every candidate and collect the feasible ones.
    ///
    /// With the `parallel` feature the potentiometer dimension is split
    /// across rayon workers; slices are joined in potentiometer order, so
    /// the outcome is identical to the sequential one.
    pub fn run(&self) -> SearchOutcome {
        tracing::debug!(
            "Enumerating {} candidates ({} pots x {} resistors^2 x {} capacitors)",
            self.catalog.combinations(),
            self.catalog.potentiometers.len(),
            self.catalog.resistors.len(),
            self.catalog.capacitors.len()
        );

        #[cfg(feature = "parallel")]
        let slices: Vec<SearchOutcome> = (0..self.catalog.potentiometers.len())
            .into_par_iter()
            .map(|i| self.scan_potentiometer(i))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let slices: Vec<SearchOutcome> = (0..self.catalog.potentiometers.len())
            .map(|i| self.scan_potentiometer(i))
            .collect();

        let mut outcome = SearchOutcome::default();
        for slice in slices {
            outcome.extend(slice);
        }

        tracing::debug!(
            "Enumeration finished: {} evaluated, {} feasible",
            outcome.evaluated,
            outcome.solutions.len()
        );
        outcome
    }

    /// Enumerate every candidate using the potentiometer at `pot_index`.
    fn scan_potentiometer(&self, pot_index: usize) -> SearchOutcome {
        let Catalog {
            resistors,
            capacitors,
            potentiometers,
        } = self.catalog;
        let pot = potentiometers[pot_index];
        let stride = resistors.len() * resistors.len() * capacitors.len();
        let duty_ratio = self.evaluator.config().duty_ratio;

        let mut outcome = SearchOutcome::default();
        let mut index = pot_index * stride;

        for &r_a in resistors {
            for &r_b in resistors {
                for &c in capacitors {
                    let candidate = Candidate::new(r_a, pot, r_b, c);
                    let evaluation = self.evaluator.evaluate(&candidate);
                    match self.evaluator.first_violation(&evaluation) {
                        None => {
                            let solution = Solution::from_evaluation(index, &evaluation, duty_ratio);
                            tracing::trace!(
                                "Accepted #{}: {} (deviation {})",
                                index,
                                candidate,
                                solution.duty_deviation
                            );
                            outcome.solutions.push(solution);
                        }
                        Some(constraint) => outcome.rejections.record(constraint),
                    }
                    outcome.evaluated += 1;
                    index += 1;
                }
            }
        }

        tracing::debug!(
            "Potentiometer {} ohms: {} feasible of {}",
            pot,
            outcome.solutions.len(),
            outcome.evaluated
        );
        outcome
    }
}
