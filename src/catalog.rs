//! Standard component value catalogs.
//!
//! - Resistors: E12 series over six decades (1 Ω to 820 kΩ) plus 1 MΩ and 1.5 MΩ
//! - Capacitors: E6 series from 10 pF to 680 nF
//! - Potentiometers: common stock values from 500 Ω to 100 kΩ
//!
//! Catalogs are plain value lists. Duplicates produced by decade scaling are
//! kept, and order follows generation order.

/// E12 significands for the fixed resistors.
pub const E12_SIGNIFICANDS: [f64; 12] = [1.0, 1.2, 1.5, 1.8, 2.2, 2.7, 3.3, 3.9, 4.7, 5.6, 6.8, 8.2];

/// Decade exponents covered by the E12 resistor series.
pub const RESISTOR_DECADES: std::ops::RangeInclusive<i32> = 0..=5;

/// Megohm values appended after the E12 decades.
pub const LARGE_RESISTORS: [f64; 2] = [1.0e6, 1.5e6];

/// E6 significands for the timing capacitor, scaled by `10^exponent`.
pub const E6_SIGNIFICANDS: [f64; 6] = [10.0, 15.0, 22.0, 33.0, 47.0, 68.0];

/// Decade exponents covered by the capacitor series.
pub const CAPACITOR_DECADES: std::ops::RangeInclusive<i32> = -12..=-8;

/// Stocked potentiometer values.
pub const POTENTIOMETERS: [f64; 8] = [500.0, 1000.0, 2000.0, 5000.0, 10_000.0, 20_000.0, 50_000.0, 100_000.0];

/// The three value lists searched by the enumerator.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub resistors: Vec<f64>,
    pub capacitors: Vec<f64>,
    pub potentiometers: Vec<f64>,
}

impl Catalog {
    /// The standard catalogs.
    pub fn standard() -> Self {
        Self {
            resistors: resistor_series(),
            capacitors: capacitor_series(),
            potentiometers: potentiometer_series(),
        }
    }

    /// Build a catalog from explicit value lists.
    pub fn new(resistors: Vec<f64>, capacitors: Vec<f64>, potentiometers: Vec<f64>) -> Self {
        Self {
            resistors,
            capacitors,
            potentiometers,
        }
    }

    /// Number of candidate tuples in the full Cartesian product.
    pub fn combinations(&self) -> usize {
        self.potentiometers.len() * self.resistors.len() * self.resistors.len() * self.capacitors.len()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// E12 resistor values, rounded to 0.1 Ω.
pub fn resistor_series() -> Vec<f64> {
    let mut values: Vec<f64> = RESISTOR_DECADES
        .flat_map(|n| {
            let multiplier = 10f64.powi(n);
            E12_SIGNIFICANDS
                .into_iter()
                .map(move |r| round_to_decimals(r * multiplier, 1))
        })
        .collect();
    values.extend(LARGE_RESISTORS.iter().map(|&r| round_to_decimals(r, 1)));
    values
}

/// E6 capacitor values, rounded to three significant figures.
pub fn capacitor_series() -> Vec<f64> {
    CAPACITOR_DECADES
        .flat_map(|n| {
            let multiplier = 10f64.powi(n);
            E6_SIGNIFICANDS
                .into_iter()
                .map(move |c| round_to_significant(c * multiplier, 3))
        })
        .collect()
}

/// Potentiometer values.
pub fn potentiometer_series() -> Vec<f64> {
    POTENTIOMETERS.to_vec()
}

fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Rounds through the decimal representation so that e.g. `47 * 10^-10`
/// becomes exactly the literal `4.7e-9`.
fn round_to_significant(value: f64, figures: usize) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let text = format!("{:.*e}", figures.saturating_sub(1), value);
    text.parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resistor_series_length() {
        let r = resistor_series();
        assert_eq!(r.len(), 6 * 12 + 2);
        assert_eq!(r[0], 1.0);
        assert_eq!(r[1], 1.2);
        assert_eq!(r[12], 10.0);
        assert_eq!(r[71], 820_000.0);
        assert_eq!(r[72], 1.0e6);
        assert_eq!(r[73], 1.5e6);
    }

    #[test]
    fn test_resistor_values_are_clean() {
        let r = resistor_series();
        // 1.2 * 100 is 120.00000000000001 before rounding
        assert!(r.contains(&120.0));
        assert!(r.contains(&2200.0));
        assert!(r.contains(&4700.0));
        assert!(r.contains(&5600.0));
    }

    #[test]
    fn test_capacitor_series() {
        let c = capacitor_series();
        assert_eq!(c.len(), 5 * 6);
        assert_eq!(c[0], 10e-12);
        assert_eq!(c[29], 6.8e-7);
        assert!(c.contains(&4.7e-9));
        assert!(c.contains(&3.3e-10));
    }

    #[test]
    fn test_series_are_sorted() {
        for series in [resistor_series(), capacitor_series(), potentiometer_series()] {
            assert!(series.windows(2).all(|w| w[0] <= w[1]));
            assert!(series.iter().all(|&v| v > 0.0));
        }
    }

    #[test]
    fn test_generation_is_repeatable() {
        assert_eq!(Catalog::standard(), Catalog::standard());
    }

    #[test]
    fn test_combinations() {
        let catalog = Catalog::new(vec![1000.0, 4700.0], vec![4.7e-8], vec![10_000.0]);
        assert_eq!(catalog.combinations(), 4);
        assert_eq!(Catalog::standard().combinations(), 8 * 74 * 74 * 30);
    }
}
