//! Value-level entry points for the weak-holding builtins.
//!
//! These take the receiver as an arbitrary [`Value`], the way an engine
//! dispatches a method call, and check it before doing anything else.
//! Results are language values: absent lookups are `undefined`.

use crate::agent::Agent;
use crate::collectors::mark_sweep::{FinalizationRegistry, WeakMap, WeakRef, WeakSet};
use crate::error::{Error, TypeErrorKind};
use crate::value::Value;

/// How a constructor was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// A plain call, without `new`.
    Call,
    Construct,
}

impl Invocation {
    fn require_construct(self) -> Result<(), TypeErrorKind> {
        match self {
            Self::Construct => Ok(()),
            Self::Call => Err(TypeErrorKind::ConstructorWithoutNew),
        }
    }
}

// ==== WeakMap ====

pub fn weak_map_constructor(agent: &mut Agent, invocation: Invocation) -> Result<Value, Error> {
    invocation.require_construct()?;
    Ok(WeakMap::new(agent)?.into())
}

/// Returns the receiver.
pub fn weak_map_set(
    agent: &mut Agent,
    this: &Value,
    key: &Value,
    value: Value,
) -> Result<Value, TypeErrorKind> {
    let map = WeakMap::from_value(agent, this)?;
    Ok(map.set(agent, key, value)?.into())
}

pub fn weak_map_get(agent: &Agent, this: &Value, key: &Value) -> Result<Value, TypeErrorKind> {
    let map = WeakMap::from_value(agent, this)?;
    Ok(map.get(agent, key)?.unwrap_or_default())
}

pub fn weak_map_has(agent: &Agent, this: &Value, key: &Value) -> Result<Value, TypeErrorKind> {
    let map = WeakMap::from_value(agent, this)?;
    Ok(map.has(agent, key)?.into())
}

pub fn weak_map_delete(
    agent: &mut Agent,
    this: &Value,
    key: &Value,
) -> Result<Value, TypeErrorKind> {
    let map = WeakMap::from_value(agent, this)?;
    Ok(map.delete(agent, key)?.into())
}

// ==== WeakSet ====

pub fn weak_set_constructor(agent: &mut Agent, invocation: Invocation) -> Result<Value, Error> {
    invocation.require_construct()?;
    Ok(WeakSet::new(agent)?.into())
}

/// Returns the receiver.
pub fn weak_set_add(agent: &mut Agent, this: &Value, member: &Value) -> Result<Value, TypeErrorKind> {
    let set = WeakSet::from_value(agent, this)?;
    Ok(set.add(agent, member)?.into())
}

pub fn weak_set_has(agent: &Agent, this: &Value, member: &Value) -> Result<Value, TypeErrorKind> {
    let set = WeakSet::from_value(agent, this)?;
    Ok(set.has(agent, member)?.into())
}

pub fn weak_set_delete(
    agent: &mut Agent,
    this: &Value,
    member: &Value,
) -> Result<Value, TypeErrorKind> {
    let set = WeakSet::from_value(agent, this)?;
    Ok(set.delete(agent, member)?.into())
}

// ==== WeakRef ====

pub fn weak_ref_constructor(
    agent: &mut Agent,
    invocation: Invocation,
    target: &Value,
) -> Result<Value, Error> {
    invocation.require_construct()?;
    Ok(WeakRef::new(agent, target)?.into())
}

/// The target, or `undefined` once it has been collected.
pub fn weak_ref_deref(agent: &mut Agent, this: &Value) -> Result<Value, TypeErrorKind> {
    let weak_ref = WeakRef::from_value(agent, this)?;
    Ok(weak_ref.deref(agent)?.unwrap_or_default())
}

// ==== FinalizationRegistry ====

pub fn finalization_registry_constructor(
    agent: &mut Agent,
    invocation: Invocation,
    cleanup: impl FnMut(&mut Agent, Value) + 'static,
) -> Result<Value, Error> {
    invocation.require_construct()?;
    Ok(FinalizationRegistry::new(agent, cleanup)?.into())
}

/// Returns `undefined`.
pub fn finalization_registry_register(
    agent: &mut Agent,
    this: &Value,
    target: &Value,
    held_value: Value,
    unregister_token: Option<&Value>,
) -> Result<Value, TypeErrorKind> {
    let registry = FinalizationRegistry::from_value(agent, this)?;
    registry.register(agent, target, held_value, unregister_token)?;
    Ok(Value::Undefined)
}

pub fn finalization_registry_unregister(
    agent: &mut Agent,
    this: &Value,
    token: &Value,
) -> Result<Value, TypeErrorKind> {
    let registry = FinalizationRegistry::from_value(agent, this)?;
    Ok(registry.unregister(agent, token)?.into())
}
