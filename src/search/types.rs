//! Core types for candidate and solution representation.

use std::fmt;

use serde::Serialize;

use crate::format::EngNumber;

use super::constraints::Evaluation;

/// One circuit instantiation under test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    /// Fixed resistor between supply and discharge pin (R7)
    pub r_a: f64,
    /// Potentiometer full-scale value (VR2)
    pub pot: f64,
    /// Fixed resistor between discharge pin and capacitor (R6)
    pub r_b: f64,
    /// Timing capacitor (C5)
    pub capacitance: f64,
}

impl Candidate {
    /// Create a new candidate.
    pub fn new(r_a: f64, pot: f64, r_b: f64, capacitance: f64) -> Self {
        Self {
            r_a,
            pot,
            r_b,
            capacitance,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R7 = {:<5} VR2 = {:<5} R6 = {:<5} C5 = {:<5}",
            EngNumber(self.r_a).to_string(),
            EngNumber(self.pot).to_string(),
            EngNumber(self.r_b).to_string(),
            EngNumber(self.capacitance).to_string(),
        )
    }
}

/// A candidate that passed every constraint, with its derived metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Solution {
    /// Position in the sequential enumeration order
    pub index: usize,
    pub candidate: Candidate,
    /// `frequency_max - frequency_min` at nominal values (Hz)
    pub frequency_spread: f64,
    /// Highest design frequency, wiper at zero (Hz)
    pub frequency_max: f64,
    /// Lowest design frequency, wiper at full scale (Hz)
    pub frequency_min: f64,
    /// Discharge-pin current at nominal values (A)
    pub discharge_design: f64,
    /// Discharge-pin current at the low-frequency extreme (A)
    pub discharge_low: f64,
    /// `|t3 / t4 - duty_ratio|` of the estimate, rounded to 3 decimals
    pub duty_deviation: f64,
    /// Potentiometer setting that hits the target frequency at nominal values (ohms)
    pub pot_setting: f64,
}

impl Solution {
    /// Record an accepted evaluation.
    pub fn from_evaluation(index: usize, evaluation: &Evaluation, duty_ratio: f64) -> Self {
        let f = &evaluation.frequencies;
        Self {
            index,
            candidate: evaluation.candidate,
            frequency_spread: f.spread(),
            frequency_max: f.max_design,
            frequency_min: f.min_design,
            discharge_design: evaluation.currents.design,
            discharge_low: evaluation.currents.low,
            duty_deviation: round_to_thousandths(evaluation.duty.ratio() - duty_ratio).abs(),
            pot_setting: evaluation.duty.pot_setting,
        }
    }
}

fn round_to_thousandths(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
