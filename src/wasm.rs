//! WASM bindings for Astable Search.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { design_timer } from 'astable_search';
//!
//! await init();
//!
//! const solution = JSON.parse(design_timer(38000));
//! console.log(solution.candidate.r_a, solution.candidate.pot);
//! ```

use wasm_bindgen::prelude::*;

use crate::catalog::Catalog;
use crate::config::DesignConfig;
use crate::search::{design, Objective};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Search the standard catalogs for `target_frequency` (Hz) with default
/// constraints.
///
/// # Returns
/// The selected solution serialised as JSON, or an error string when no
/// combination is feasible.
#[wasm_bindgen]
pub fn design_timer(target_frequency: f64) -> Result<String, JsValue> {
    let config = DesignConfig::new().with_target_frequency(target_frequency);
    let solution = design(&config, &Catalog::standard(), Objective::DutyDeviation)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&solution).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
