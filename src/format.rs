//! Engineering notation with SI magnitude prefixes.
//!
//! ```text
//! 4700     -> 4.7k
//! 5000     -> 5k
//! 4.7e-9   -> 4.7n
//! 0.005023 -> 5.02m
//! ```

use std::fmt;

use crate::error::{Result, SearchError};

/// SI prefixes from 1e-24 to 1e24 in steps of 1000.
const PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "u", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Index of the empty prefix in [`PREFIXES`].
const UNITY: i32 = 8;

/// Default number of decimals printed after scaling.
pub const DEFAULT_PRECISION: usize = 2;

/// A value displayed in engineering notation.
///
/// The mantissa is rounded to [`DEFAULT_PRECISION`] decimals (or the
/// formatter's precision) and trailing zeros are trimmed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngNumber(pub f64);

impl fmt::Display for EngNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format_eng(self.0, f.precision().unwrap_or(DEFAULT_PRECISION));
        // `Formatter::pad` would treat the precision as a truncation length
        match (f.width(), f.align()) {
            (Some(width), Some(fmt::Alignment::Right)) => write!(f, "{text:>width$}"),
            (Some(width), Some(fmt::Alignment::Center)) => write!(f, "{text:^width$}"),
            (Some(width), _) => write!(f, "{text:<width$}"),
            (None, _) => f.write_str(&text),
        }
    }
}

/// Format `value` with an SI prefix and `precision` decimals.
pub fn format_eng(value: f64, precision: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return trim_zeros(format!("{:.*}", precision, value));
    }

    let mut group = (value.abs().log10() / 3.0).floor() as i32;
    group = group.clamp(-UNITY, UNITY);

    let scale = 10f64.powi(precision as i32);
    let mut mantissa = round_to(value / 10f64.powi(group * 3), scale);
    // Rounding (or an inexact log10) can carry the mantissa into the next group
    if mantissa.abs() >= 1000.0 && group < UNITY {
        group += 1;
        mantissa = round_to(value / 10f64.powi(group * 3), scale);
    } else if mantissa.abs() < 1.0 && group > -UNITY {
        let lower = round_to(value / 10f64.powi((group - 1) * 3), scale);
        if lower.abs() < 1000.0 {
            group -= 1;
            mantissa = lower;
        }
    }

    let prefix = PREFIXES[(group + UNITY) as usize];
    format!("{}{}", trim_zeros(format!("{:.*}", precision, mantissa)), prefix)
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}

fn trim_zeros(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Parse a number string with optional unit suffix.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(last) = text.chars().last() {
        let mult = match last {
            'p' => 1e-12,
            'n' => 1e-9,
            'u' | 'µ' => 1e-6,
            'm' => 1e-3,
            'k' | 'K' => 1e3,
            'M' => 1e6,
            'G' => 1e9,
            _ => 1.0,
        };
        if mult != 1.0 {
            (&text[..text.len() - last.len_utf8()], mult)
        } else {
            (text, 1.0)
        }
    } else {
        (text, 1.0)
    };

    num_str.parse::<f64>().ok().map(|v| v * multiplier)
}

/// [`parse_value`] with an error for unparseable input.
pub fn parse_si(text: &str) -> Result<f64> {
    parse_value(text).ok_or_else(|| SearchError::invalid_value(text))
}
