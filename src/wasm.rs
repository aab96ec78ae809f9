//! WASM bindings for the reaction balancer.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { balance_equation, balance_coefficients } from 'reaction_balancer';
//!
//! await init();
//!
//! balance_equation("H2 + O2 -> H2O");      // "2H2 + O2 -> 2H2O"
//! balance_coefficients("H2 + O2 -> H2O");  // BigUint64Array [2, 1, 2]
//! ```

use wasm_bindgen::prelude::*;

use crate::{balance_with, BalanceOptions, BalancedEquation};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn balance_js(equation: &str) -> Result<BalancedEquation, JsValue> {
    balance_with(equation, &BalanceOptions::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Balance an equation and return it rendered, e.g. `"2H2 + O2 -> 2H2O"`.
///
/// Throws the diagnostic message if the equation cannot be balanced.
#[wasm_bindgen]
pub fn balance_equation(equation: &str) -> Result<String, JsValue> {
    Ok(balance_js(equation)?.to_string())
}

/// Balance an equation and return its coefficients in compound order.
#[wasm_bindgen]
pub fn balance_coefficients(equation: &str) -> Result<Vec<u64>, JsValue> {
    Ok(balance_js(equation)?.coefficients().to_vec())
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
