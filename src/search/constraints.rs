//! Feasibility checks for a candidate.
//!
//! The evaluator derives, from both stage timings:
//! - Six frequency bounds `f = 1 / (t3 + t4)`: the shortest intervals give
//!   the maximum frequency of a corner, the longest intervals the minimum
//! - Three discharge-pin currents (design and both tolerance extremes)
//! - A closed-form duty estimate at the potentiometer setting that hits the
//!   target frequency with nominal comparator levels
//!
//! A candidate is feasible when the target frequency lies inside the design,
//! low-frequency and high-frequency windows, the design window is narrow
//! enough, every interval is long enough, every current is small enough and
//! the estimated duty ratio is close enough to the wanted one.

use std::fmt;

use serde::Serialize;

use crate::config::DesignConfig;
use crate::error::Result;

use super::timing::{LogRatios, StageTiming};
use super::types::Candidate;

/// Frequency bounds of a candidate in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyBounds {
    pub max_design: f64,
    pub min_design: f64,
    pub max_low: f64,
    pub min_low: f64,
    pub max_high: f64,
    pub min_high: f64,
}

impl FrequencyBounds {
    /// Pair the bounds of both stages.
    pub fn from_stages(charge: &StageTiming, discharge: &StageTiming) -> Self {
        let f = |t3: f64, t4: f64| 1.0 / (t3 + t4);
        Self {
            max_design: f(charge.min_design, discharge.min_design),
            min_design: f(charge.max_design, discharge.max_design),
            max_low: f(charge.min_low, discharge.min_low),
            min_low: f(charge.max_low, discharge.max_low),
            max_high: f(charge.min_high, discharge.min_high),
            min_high: f(charge.max_high, discharge.max_high),
        }
    }

    /// Width of the design window.
    pub fn spread(&self) -> f64 {
        self.max_design - self.min_design
    }
}

/// Current sunk by the discharge pin while the capacitor discharges.
///
/// The supply feeds the pin through `r_a` and the capacitor, sitting at
/// `control_voltage`, discharges through `r_b`. Both resistors are scaled
/// by `1 + tolerance`.
pub fn discharge_current(
    supply_voltage: f64,
    control_voltage: f64,
    r_a: f64,
    r_b: f64,
    tolerance: f64,
) -> f64 {
    let scale = 1.0 + tolerance;
    supply_voltage / (r_a * scale) + control_voltage / (r_b * scale)
}

/// Discharge-pin current bounds in amperes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DischargeCurrents {
    /// Nominal resistors, nominal threshold
    pub design: f64,
    /// Resistors high by the tolerance, threshold at its maximum
    pub low: f64,
    /// Resistors low by the tolerance, threshold at its minimum
    pub high: f64,
}

impl DischargeCurrents {
    /// Largest of the three currents.
    pub fn max(&self) -> f64 {
        self.design.max(self.low).max(self.high)
    }
}

/// Estimated intervals at the potentiometer setting that hits the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DutyEstimate {
    /// Potentiometer resistance in circuit (may fall outside `0..=VR`)
    pub pot_setting: f64,
    /// Estimated charge interval t3 (s)
    pub charge_time: f64,
    /// Estimated discharge interval t4 (s)
    pub discharge_time: f64,
}

impl DutyEstimate {
    /// Ratio t3 / t4.
    pub fn ratio(&self) -> f64 {
        self.charge_time / self.discharge_time
    }
}

/// A feasibility predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Constraint {
    /// Target inside the nominal frequency window
    DesignWindow,
    /// Target inside the window at the low-frequency tolerance extreme
    LowExtremeWindow,
    /// Target inside the window at the high-frequency tolerance extreme
    HighExtremeWindow,
    /// Design window no wider than the spread ceiling
    FrequencySpread,
    /// Every interval strictly longer than the minimum
    MinimumInterval,
    /// Every discharge current within the ceiling
    DischargeCurrent,
    /// Estimated duty ratio within the band
    DutyRatio,
}

impl Constraint {
    /// All constraints in checking order.
    pub const ALL: [Constraint; 7] = [
        Constraint::DesignWindow,
        Constraint::LowExtremeWindow,
        Constraint::HighExtremeWindow,
        Constraint::FrequencySpread,
        Constraint::MinimumInterval,
        Constraint::DischargeCurrent,
        Constraint::DutyRatio,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Constraint::DesignWindow => "design_window",
            Constraint::LowExtremeWindow => "low_extreme_window",
            Constraint::HighExtremeWindow => "high_extreme_window",
            Constraint::FrequencySpread => "frequency_spread",
            Constraint::MinimumInterval => "minimum_interval",
            Constraint::DischargeCurrent => "discharge_current",
            Constraint::DutyRatio => "duty_ratio",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything derived for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub candidate: Candidate,
    pub charge: StageTiming,
    pub discharge: StageTiming,
    pub frequencies: FrequencyBounds,
    pub currents: DischargeCurrents,
    pub duty: DutyEstimate,
}

/// Evaluates candidates against one configuration.
#[derive(Debug, Clone)]
pub struct ConstraintEvaluator {
    config: DesignConfig,
    charge: LogRatios,
    discharge: LogRatios,
}

impl ConstraintEvaluator {
    /// Create an evaluator, precomputing the log factors of both stages.
    pub fn new(config: &DesignConfig) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            charge: LogRatios::charge(config)?,
            discharge: LogRatios::discharge(config)?,
        })
    }

    /// The configuration candidates are checked against.
    pub fn config(&self) -> &DesignConfig {
        &self.config
    }

    /// Derive timings, frequencies, currents and the duty estimate.
    pub fn evaluate(&self, candidate: &Candidate) -> Evaluation {
        let cfg = &self.config;
        let Candidate {
            r_a,
            pot,
            r_b,
            capacitance: c,
        } = *candidate;
        let (r_tol, c_tol) = (cfg.resistor_tolerance, cfg.capacitor_tolerance);

        let charge = StageTiming::compute(r_a + r_b, c, pot, r_tol, c_tol, &self.charge);
        let discharge = StageTiming::compute(r_b, c, pot, r_tol, c_tol, &self.discharge);
        let frequencies = FrequencyBounds::from_stages(&charge, &discharge);

        let vs = cfg.supply_voltage;
        let currents = DischargeCurrents {
            design: discharge_current(vs, cfg.threshold.nominal, r_a, r_b, 0.0),
            low: discharge_current(vs, cfg.threshold.max, r_a, r_b, r_tol),
            high: discharge_current(vs, cfg.threshold.min, r_a, r_b, -r_tol),
        };

        // ln((Vs - Vtr) / (Vs - Vth)) and ln(Vth / Vtr) at nominal levels
        let a = self.charge.design();
        let b = self.discharge.design();
        let pot_setting = (1.0 / (cfg.target_frequency * c) - r_a * a) / (a + b) - r_b;
        let duty = DutyEstimate {
            pot_setting,
            charge_time: (r_a + r_b + pot_setting) * c * a,
            discharge_time: (r_b + pot_setting) * c * b,
        };

        Evaluation {
            candidate: *candidate,
            charge,
            discharge,
            frequencies,
            currents,
            duty,
        }
    }

    /// First constraint the evaluation violates, in checking order.
    pub fn first_violation(&self, evaluation: &Evaluation) -> Option<Constraint> {
        Constraint::ALL
            .into_iter()
            .find(|&constraint| !self.satisfies(evaluation, constraint))
    }

    /// Whether the evaluation satisfies every constraint.
    pub fn is_feasible(&self, evaluation: &Evaluation) -> bool {
        self.first_violation(evaluation).is_none()
    }

    /// Check a single constraint.
    pub fn satisfies(&self, evaluation: &Evaluation, constraint: Constraint) -> bool {
        let cfg = &self.config;
        let target = cfg.target_frequency;
        let f = &evaluation.frequencies;

        match constraint {
            Constraint::DesignWindow => f.min_design <= target && target <= f.max_design,
            Constraint::LowExtremeWindow => f.min_low <= target && f.max_low >= target,
            Constraint::HighExtremeWindow => f.min_high <= target && f.max_high >= target,
            Constraint::FrequencySpread => f.spread() <= cfg.max_frequency_spread,
            Constraint::MinimumInterval => {
                evaluation.charge.shortest() > cfg.min_interval
                    && evaluation.discharge.shortest() > cfg.min_interval
            }
            Constraint::DischargeCurrent => evaluation.currents.max() <= cfg.max_discharge_current,
            Constraint::DutyRatio => {
                let d = &evaluation.duty;
                d.charge_time >= (cfg.duty_ratio - cfg.duty_ratio_band) * d.discharge_time
                    && d.charge_time <= (cfg.duty_ratio + cfg.duty_ratio_band) * d.discharge_time
            }
        }
    }
}
