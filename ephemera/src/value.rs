//! Values handled by the weak-holding primitives.
//!
//! Only two kinds of value carry an identity: objects, which live in an
//! agent's heap, and symbols. Everything else compares by content and can
//! never be held weakly.

use core::fmt;
use std::rc::Rc;

use crate::alloc::SlotId;
use crate::symbol::Symbol;

/// A handle to an object in an agent's heap.
///
/// Handles are plain indices and do not keep their object alive. Hold on to
/// an object across a collection by rooting it (see [`crate::Agent::root`])
/// or by storing it somewhere the collector traces.
///
/// A handle names the heap it was allocated in. Handed to another agent it
/// behaves like a stale handle: never equal to that agent's objects and never
/// resolved by its heap.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Object {
    pub(crate) heap: u64,
    pub(crate) slot: SlotId,
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Object({}:{}v{})",
            self.heap, self.slot.index, self.slot.generation
        )
    }
}

/// An identity-bearing value: something compared by production rather than
/// by content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    Object(Object),
    Symbol(Symbol),
}

impl Identity {
    pub fn to_value(self) -> Value {
        match self {
            Self::Object(object) => Value::Object(object),
            Self::Symbol(symbol) => Value::Symbol(symbol),
        }
    }
}

impl From<Object> for Identity {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl From<Symbol> for Identity {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

/// A language value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(Rc<str>),
    Symbol(Symbol),
    Object(Object),
}

impl Value {
    pub fn string(s: &str) -> Self {
        Self::String(Rc::from(s))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub fn as_object(&self) -> Option<Object> {
        match self {
            Self::Object(object) => Some(*object),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<Symbol> {
        match self {
            Self::Symbol(symbol) => Some(*symbol),
            _ => None,
        }
    }

    /// The identity carried by this value, if it has one.
    ///
    /// This says nothing about weak eligibility; see
    /// [`crate::classifier::can_be_held_weakly`].
    pub fn as_identity(&self) -> Option<Identity> {
        match self {
            Self::Object(object) => Some(Identity::Object(*object)),
            Self::Symbol(symbol) => Some(Identity::Symbol(*symbol)),
            _ => None,
        }
    }

    /// `SameValue`: NaN equals NaN, `+0` and `-0` differ, strings compare by
    /// content and objects and symbols by identity.
    pub fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => {
                if a.is_nan() {
                    b.is_nan()
                } else {
                    a.to_bits() == b.to_bits()
                }
            }
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Object(_) => "object",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same_value(other)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<Identity> for Value {
    fn from(identity: Identity) -> Self {
        identity.to_value()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}
