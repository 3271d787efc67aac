//! Design-space search over standard component values.
//!
//! The pipeline is strictly one-way:
//!
//! ```text
//! Catalog -> Enumerator -> (StageTiming x2, ConstraintEvaluator) -> Selector
//! ```
//!
//! For every tuple (VR, R_A, R_B, C) the [`timing`] model computes the
//! charge interval (through R_A + R_B) and the discharge interval (through
//! R_B), both with the potentiometer at zero and at full scale, at nominal
//! values and at the two tolerance extremes. The [`constraints`] evaluator
//! turns those into frequency windows, discharge currents and a duty-ratio
//! estimate, and accepts the tuple only when every check passes. The
//! selector then picks the best survivor.

mod constraints;
mod enumerate;
mod select;
mod timing;
mod types;

pub use constraints::{
    discharge_current, Constraint, ConstraintEvaluator, DischargeCurrents, DutyEstimate, Evaluation,
    FrequencyBounds,
};
pub use enumerate::{Enumerator, RejectionStats, SearchOutcome};
pub use select::{rank, select, select_by, Objective};
pub use timing::{LogRatios, Stage, StageTiming};
pub use types::{Candidate, Solution};

use crate::catalog::Catalog;
use crate::config::DesignConfig;
use crate::error::Result;

/// Validate `config` and enumerate every candidate of `catalog`.
pub fn search(config: &DesignConfig, catalog: &Catalog) -> Result<SearchOutcome> {
    config.validate()?;
    let evaluator = ConstraintEvaluator::new(config)?;
    let outcome = Enumerator::new(&evaluator, catalog)?.run();
    Ok(outcome)
}

/// Run the full pipeline and return the best solution under `objective`.
pub fn design(config: &DesignConfig, catalog: &Catalog, objective: Objective) -> Result<Solution> {
    let outcome = search(config, catalog)?;
    select(&outcome.solutions, objective, outcome.evaluated).copied()
}
