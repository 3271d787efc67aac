//! Design constants for the astable search.
//!
//! All voltages are in volts, resistances in ohms, capacitances in farads,
//! times in seconds and currents in amperes.

use serde::Serialize;

use crate::error::{Result, SearchError};

/// Default supply voltage.
pub const DEFAULT_SUPPLY_VOLTAGE: f64 = 5.0;

/// Default target oscillation frequency in Hz.
pub const DEFAULT_TARGET_FREQUENCY: f64 = 38_000.0;

/// Default ratio between the charge and discharge intervals.
pub const DEFAULT_DUTY_RATIO: f64 = 1.7;

/// A comparator level given as its nominal value and tolerance extremes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoltageSpread {
    pub nominal: f64,
    pub min: f64,
    pub max: f64,
}

impl VoltageSpread {
    /// Create a new spread.
    pub fn new(nominal: f64, min: f64, max: f64) -> Self {
        Self { nominal, min, max }
    }
}

/// Constants of one design run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignConfig {
    /// Supply voltage (Vs)
    pub supply_voltage: f64,
    /// Upper comparator threshold (Vth)
    pub threshold: VoltageSpread,
    /// Lower comparator trigger level (Vtr)
    pub trigger: VoltageSpread,
    /// Resistor tolerance as a fraction (0.01 = 1%)
    pub resistor_tolerance: f64,
    /// Capacitor tolerance as a fraction
    pub capacitor_tolerance: f64,
    /// Frequency that must be reachable across the whole tolerance envelope
    pub target_frequency: f64,
    /// Ceiling on the span of design frequencies covered by the potentiometer
    pub max_frequency_spread: f64,
    /// Every charge or discharge interval must be strictly longer than this
    pub min_interval: f64,
    /// Ceiling on the current sunk by the discharge pin
    pub max_discharge_current: f64,
    /// Wanted ratio of charge time to discharge time
    pub duty_ratio: f64,
    /// Allowed absolute deviation from `duty_ratio`
    pub duty_ratio_band: f64,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            supply_voltage: DEFAULT_SUPPLY_VOLTAGE,
            threshold: VoltageSpread::new(3.3, 2.4, 4.2),
            trigger: VoltageSpread::new(1.67, 1.1, 2.2),
            resistor_tolerance: 0.01,
            capacitor_tolerance: 0.1,
            target_frequency: DEFAULT_TARGET_FREQUENCY,
            max_frequency_spread: 50_000.0,
            min_interval: 600e-9,
            max_discharge_current: 10e-3,
            duty_ratio: DEFAULT_DUTY_RATIO,
            duty_ratio_band: 0.06,
        }
    }
}

impl DesignConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target frequency (Hz).
    pub fn with_target_frequency(mut self, frequency: f64) -> Self {
        self.target_frequency = frequency;
        self
    }

    /// Set the supply voltage.
    pub fn with_supply_voltage(mut self, volts: f64) -> Self {
        self.supply_voltage = volts;
        self
    }

    /// Set the threshold and trigger comparator levels.
    pub fn with_comparator_levels(mut self, threshold: VoltageSpread, trigger: VoltageSpread) -> Self {
        self.threshold = threshold;
        self.trigger = trigger;
        self
    }

    /// Set resistor and capacitor tolerances (fractions).
    pub fn with_tolerances(mut self, resistor: f64, capacitor: f64) -> Self {
        self.resistor_tolerance = resistor;
        self.capacitor_tolerance = capacitor;
        self
    }

    /// Set the frequency spread ceiling (Hz).
    pub fn with_max_frequency_spread(mut self, spread: f64) -> Self {
        self.max_frequency_spread = spread;
        self
    }

    /// Set the minimum charge/discharge interval (s).
    pub fn with_min_interval(mut self, seconds: f64) -> Self {
        self.min_interval = seconds;
        self
    }

    /// Set the discharge-pin current ceiling (A).
    pub fn with_max_discharge_current(mut self, amps: f64) -> Self {
        self.max_discharge_current = amps;
        self
    }

    /// Set the wanted charge/discharge ratio and its allowed deviation.
    pub fn with_duty_ratio(mut self, ratio: f64, band: f64) -> Self {
        self.duty_ratio = ratio;
        self.duty_ratio_band = band;
        self
    }

    /// Check that the constants describe a physically meaningful circuit.
    ///
    /// Checks:
    /// - Supply voltage is positive and finite
    /// - Tolerances lie in [0, 1)
    /// - Comparator levels are ordered `0 < min <= nominal <= max < supply`
    /// - Each trigger level sits below the matching threshold level
    /// - Constraint limits have the right sign
    pub fn validate(&self) -> Result<()> {
        if !(self.supply_voltage.is_finite() && self.supply_voltage > 0.0) {
            return Err(SearchError::invalid_config(
                "supply_voltage",
                "must be a positive finite voltage",
            ));
        }

        check_tolerance("resistor_tolerance", self.resistor_tolerance)?;
        check_tolerance("capacitor_tolerance", self.capacitor_tolerance)?;

        check_spread("threshold", &self.threshold, self.supply_voltage)?;
        check_spread("trigger", &self.trigger, self.supply_voltage)?;

        let pairs = [
            ("nominal", self.trigger.nominal, self.threshold.nominal),
            ("min", self.trigger.min, self.threshold.min),
            ("max", self.trigger.max, self.threshold.max),
        ];
        for (corner, trigger, threshold) in pairs {
            if trigger >= threshold {
                return Err(SearchError::invalid_config(
                    "trigger",
                    format!("{corner} trigger level {trigger} V must be below threshold {threshold} V"),
                ));
            }
        }

        check_positive("target_frequency", self.target_frequency)?;
        check_positive("max_discharge_current", self.max_discharge_current)?;
        check_positive("duty_ratio", self.duty_ratio)?;
        check_non_negative("max_frequency_spread", self.max_frequency_spread)?;
        check_non_negative("min_interval", self.min_interval)?;
        check_non_negative("duty_ratio_band", self.duty_ratio_band)?;

        Ok(())
    }
}

fn check_tolerance(param: &str, value: f64) -> Result<()> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(SearchError::invalid_config(param, format!("{value} is outside [0, 1)")))
    }
}

fn check_spread(param: &str, spread: &VoltageSpread, supply: f64) -> Result<()> {
    let ordered = 0.0 < spread.min
        && spread.min <= spread.nominal
        && spread.nominal <= spread.max
        && spread.max < supply;
    if ordered {
        Ok(())
    } else {
        Err(SearchError::invalid_config(
            param,
            format!(
                "levels must satisfy 0 < min <= nominal <= max < {supply} V (got {} / {} / {})",
                spread.min, spread.nominal, spread.max
            ),
        ))
    }
}

fn check_positive(param: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SearchError::invalid_config(param, format!("{value} must be positive")))
    }
}

fn check_non_negative(param: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SearchError::invalid_config(param, format!("{value} must not be negative")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DesignConfig::default().validate().is_ok());
    }

    #[test]
    fn test_tolerance_out_of_range() {
        let config = DesignConfig::new().with_tolerances(1.0, 0.1);
        match config.validate() {
            Err(SearchError::InvalidConfig { param, .. }) => assert_eq!(param, "resistor_tolerance"),
            other => panic!("expected invalid tolerance, got {:?}", other),
        }
    }

    #[test]
    fn test_threshold_above_supply() {
        let config = DesignConfig::new().with_supply_voltage(4.0);
        match config.validate() {
            Err(SearchError::InvalidConfig { param, .. }) => assert_eq!(param, "threshold"),
            other => panic!("expected invalid threshold, got {:?}", other),
        }
    }

    #[test]
    fn test_trigger_must_sit_below_threshold() {
        let config = DesignConfig::new().with_comparator_levels(
            VoltageSpread::new(2.0, 1.5, 2.5),
            VoltageSpread::new(2.1, 1.0, 2.4),
        );
        match config.validate() {
            Err(SearchError::InvalidConfig { param, message }) => {
                assert_eq!(param, "trigger");
                assert!(message.contains("nominal"));
            }
            other => panic!("expected trigger ordering error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_target_rejected() {
        let config = DesignConfig::new().with_target_frequency(-1.0);
        assert!(config.validate().is_err());
    }
}
