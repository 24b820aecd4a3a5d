//! `CanBeHeldWeakly`: which values may be the key, member, target or token
//! of a weak primitive.
//!
//! Objects always qualify. Symbols qualify unless they came out of the
//! [`GlobalSymbolRegistry`]: any code that knows the key string can recreate
//! a registered symbol, so it behaves like an interned string rather than an
//! unforgeable reference. Every other value is rejected.

use crate::symbol::{GlobalSymbolRegistry, Symbol, WellKnownSymbol};
use crate::value::{Identity, Value};

// Eligibility of the engine-defined symbols, indexed by `WellKnownSymbol`.
// They never enter the registry, so their answer is a fixed policy.
const WELL_KNOWN_HELD_WEAKLY: [bool; WellKnownSymbol::COUNT] = [true; WellKnownSymbol::COUNT];

pub fn can_be_held_weakly(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Symbol(symbol) => symbol_can_be_held_weakly(*symbol),
        _ => false,
    }
}

pub fn symbol_can_be_held_weakly(symbol: Symbol) -> bool {
    match symbol.as_well_known() {
        Some(well_known) => WELL_KNOWN_HELD_WEAKLY[well_known as usize],
        None => !GlobalSymbolRegistry::global().contains(symbol),
    }
}

/// The identity to hold weakly for `value`, or `None` when the classifier
/// rejects it.
pub fn weak_identity(value: &Value) -> Option<Identity> {
    if can_be_held_weakly(value) {
        value.as_identity()
    } else {
        None
    }
}
