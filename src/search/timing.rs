//! RC interval bounds for one timing stage.
//!
//! A stage charges or discharges the timing capacitor between the trigger
//! and threshold levels, giving `t = -ln(x) * R * C` for a stage-specific
//! voltage ratio `x`. The potentiometer adds `0..=VR` ohms to the stage
//! resistance, so every corner yields a minimum (wiper at zero) and a
//! maximum (wiper at full scale) interval.
//!
//! Corners are named after the oscillation frequency they produce:
//! `low` combines the tolerance extremes giving the LOWEST frequency,
//! `high` those giving the HIGHEST frequency.

use serde::Serialize;

use crate::config::DesignConfig;
use crate::error::{Result, SearchError};

/// The two RC intervals of one oscillation period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    /// Capacitor charging through R_A + R_B + VR (t3)
    Charge,
    /// Capacitor discharging through R_B + VR (t4)
    Discharge,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Charge => "charge",
            Stage::Discharge => "discharge",
        }
    }
}

/// Precomputed `-ln(x)` factors of a stage for the three corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogRatios {
    design: f64,
    low: f64,
    high: f64,
}

impl LogRatios {
    /// Create the factors from raw log arguments.
    ///
    /// Every argument must be finite and strictly positive.
    pub fn new(stage: Stage, design: f64, low: f64, high: f64) -> Result<Self> {
        Ok(Self {
            design: neg_ln(stage, "design", design)?,
            low: neg_ln(stage, "low", low)?,
            high: neg_ln(stage, "high", high)?,
        })
    }

    /// Charge stage ratios `(Vs - Vth) / (Vs - Vtr)`.
    pub fn charge(config: &DesignConfig) -> Result<Self> {
        let vs = config.supply_voltage;
        let (th, tr) = (&config.threshold, &config.trigger);
        Self::new(
            Stage::Charge,
            (vs - th.nominal) / (vs - tr.nominal),
            (vs - th.max) / (vs - tr.max),
            (vs - th.min) / (vs - tr.min),
        )
    }

    /// Discharge stage ratios `Vtr / Vth`.
    pub fn discharge(config: &DesignConfig) -> Result<Self> {
        let (th, tr) = (&config.threshold, &config.trigger);
        Self::new(
            Stage::Discharge,
            tr.nominal / th.nominal,
            tr.max / th.max,
            tr.min / th.min,
        )
    }

    /// `-ln` of the design argument.
    pub fn design(&self) -> f64 {
        self.design
    }

    /// `-ln` of the low-frequency argument.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// `-ln` of the high-frequency argument.
    pub fn high(&self) -> f64 {
        self.high
    }
}

fn neg_ln(stage: Stage, corner: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(-value.ln())
    } else {
        Err(SearchError::InvalidLogArgument {
            stage: stage.name(),
            corner,
            value,
        })
    }
}

/// Interval bounds of one stage of one candidate, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageTiming {
    pub min_low: f64,
    pub min_high: f64,
    pub max_low: f64,
    pub max_high: f64,
    pub min_design: f64,
    pub max_design: f64,
}

impl StageTiming {
    /// Compute the six bounds.
    ///
    /// # Arguments
    /// * `r` - Fixed resistance in the stage path
    /// * `c` - Timing capacitance
    /// * `vr` - Potentiometer full-scale value
    /// * `r_tol` - Resistor tolerance fraction
    /// * `c_tol` - Capacitor tolerance fraction
    /// * `ratios` - The stage's log factors
    pub fn compute(r: f64, c: f64, vr: f64, r_tol: f64, c_tol: f64, ratios: &LogRatios) -> Self {
        let slow = (1.0 + r_tol) * c * (1.0 + c_tol);
        let fast = (1.0 - r_tol) * c * (1.0 - c_tol);
        let r_max = r + vr;

        Self {
            min_low: ratios.low * r * slow,
            min_high: ratios.high * r * fast,
            max_low: ratios.low * r_max * slow,
            max_high: ratios.high * r_max * fast,
            min_design: ratios.design * r * c,
            max_design: ratios.design * r_max * c,
        }
    }

    /// Shortest of the six intervals.
    pub fn shortest(&self) -> f64 {
        [
            self.min_low,
            self.min_high,
            self.max_low,
            self.max_high,
            self.min_design,
            self.max_design,
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_ratios_match_literals() {
        let config = DesignConfig::default();
        let charge = LogRatios::charge(&config).unwrap();
        let discharge = LogRatios::discharge(&config).unwrap();

        assert_relative_eq!(charge.design(), -(170.0f64 / 333.0).ln(), max_relative = 1e-12);
        assert_relative_eq!(charge.low(), -(2.0f64 / 7.0).ln(), max_relative = 1e-12);
        assert_relative_eq!(charge.high(), -(2.0f64 / 3.0).ln(), max_relative = 1e-12);
        assert_relative_eq!(discharge.design(), -(167.0f64 / 330.0).ln(), max_relative = 1e-12);
        assert_relative_eq!(discharge.low(), -(11.0f64 / 21.0).ln(), max_relative = 1e-12);
        assert_relative_eq!(discharge.high(), -(11.0f64 / 24.0).ln(), max_relative = 1e-12);
    }

    #[test]
    fn test_non_positive_argument_rejected() {
        let err = LogRatios::new(Stage::Charge, 0.5, 0.0, 0.5).unwrap_err();
        assert_eq!(
            err,
            SearchError::InvalidLogArgument {
                stage: "charge",
                corner: "low",
                value: 0.0
            }
        );
        assert!(LogRatios::new(Stage::Discharge, -0.1, 0.5, 0.5).is_err());
    }

    #[test]
    fn test_design_bounds() {
        let ratios = LogRatios::new(Stage::Charge, 0.5, 0.5, 0.5).unwrap();
        let t = StageTiming::compute(1000.0, 1e-6, 4000.0, 0.0, 0.0, &ratios);

        // ln(2) * 1k * 1u and ln(2) * 5k * 1u
        assert_relative_eq!(t.min_design, 2.0f64.ln() * 1e-3, max_relative = 1e-12);
        assert_relative_eq!(t.max_design, 2.0f64.ln() * 5e-3, max_relative = 1e-12);
        // No tolerance: every corner collapses onto the design values
        assert_relative_eq!(t.min_low, t.min_design, max_relative = 1e-12);
        assert_relative_eq!(t.max_high, t.max_design, max_relative = 1e-12);
    }

    #[test]
    fn test_corner_ordering() {
        let config = DesignConfig::default();
        for ratios in [
            LogRatios::charge(&config).unwrap(),
            LogRatios::discharge(&config).unwrap(),
        ] {
            for &(r, c, vr) in &[(1.0, 1e-11, 500.0), (2200.0, 4.7e-9, 5000.0), (1.5e6, 6.8e-7, 100_000.0)] {
                let t = StageTiming::compute(r, c, vr, 0.01, 0.1, &ratios);
                assert!(t.min_design <= t.max_design);
                assert!(t.min_low >= t.min_high);
                assert!(t.max_low >= t.max_high);
                assert!(t.shortest() <= t.min_design);
            }
        }
    }
}
