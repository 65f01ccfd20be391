// crates/dgb-rpc/src/handlers/mod.rs
//
// Handler modules for all RPC endpoints.
// Each module defines request/response types and handler functions
// for a specific API group.

pub mod chain;
pub mod node;
pub mod reward;

use dgb_economics::{Dgb, Sats};

/// Render a sats amount in whole DGB for JSON output.
///
/// Exact whole amounts become JSON integers (`72000`). Fractional amounts
/// become fixed eight-decimal strings (`"0.00000001"`) so no digit passes
/// through a binary float. The exact value is always the accompanying
/// integer sats field.
pub fn amount_value(sats: Sats) -> serde_json::Value {
    let amount = Dgb::from_sats(sats);
    if amount.is_whole() {
        serde_json::Value::from(amount.whole())
    } else {
        serde_json::Value::String(amount.to_fixed_string())
    }
}
