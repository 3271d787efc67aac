//! # Astable Search
//!
//! Standard-value component selection for a 555-timer astable oscillator.
//!
//! This library provides:
//! - E12/E6 catalogs of fixed resistors, capacitors and potentiometers
//! - A worst-case timing model of the charge and discharge intervals
//! - Feasibility checks on frequency, interval length, discharge current
//!   and duty ratio across the full tolerance envelope
//! - An exhaustive enumerator and a configurable selector
//!
//! ## Architecture
//!
//! - [`catalog`] - Standard value catalogs
//! - [`config`] - Design constants and their validation
//! - [`search`] - Timing model, constraint evaluator, enumerator, selector
//! - [`format`] - Engineering notation for output and SI-suffixed input
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! astable --target 38k --format json
//! ```
//!
//! ### Library
//!
//! ```no_run
//! use astable_search::{design, Catalog, DesignConfig, Objective};
//!
//! let config = DesignConfig::default();
//! let solution = design(&config, &Catalog::standard(), Objective::DutyDeviation).unwrap();
//! println!("{}", solution.candidate);
//! ```
//!
//! ## Circuit
//!
//! The potentiometer VR sits in series with R_B. The capacitor charges
//! through R_A + R_B + VR from the trigger level to the threshold level and
//! discharges through R_B + VR back to the trigger level:
//!
//! ```text
//! t3 = -ln((Vs - Vth) / (Vs - Vtr)) * (R_A + R_B + VR) * C
//! t4 = -ln(Vtr / Vth) * (R_B + VR) * C
//! f  = 1 / (t3 + t4)
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod search;

// Re-export main types for convenience
pub use catalog::Catalog;
pub use config::{DesignConfig, VoltageSpread};
pub use error::{Result, SearchError};
pub use format::EngNumber;
pub use search::{design, search, Candidate, Objective, SearchOutcome, Solution};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        design, search, Candidate, Catalog, DesignConfig, EngNumber, Objective, SearchError,
        SearchOutcome, Solution, VoltageSpread,
    };
}

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::design_timer;
