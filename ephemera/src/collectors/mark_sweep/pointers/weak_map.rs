use crate::agent::Agent;
use crate::collectors::mark_sweep::object::ObjectData;
use crate::collectors::mark_sweep::pointers::weak_entry_store::WeakEntryStore;
use crate::error::{Error, TypeErrorKind};
use crate::value::{Object, Value};

/// A map whose keys are held weakly.
///
/// An entry never keeps its key alive. Its value stays alive while both the
/// map and the key are alive, and no longer than that unless something else
/// references it.
///
/// Keys are tracked by this agent's heap. An object or a fresh symbol that
/// came from another agent is never alive here, so an entry keyed by one is
/// dropped at the next collection even while its own agent keeps it alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeakMap(Object);

impl WeakMap {
    pub fn new(agent: &mut Agent) -> Result<Self, Error> {
        let object = agent
            .heap
            .alloc_object(ObjectData::WeakMap(WeakEntryStore::default()))?;
        Ok(Self(object))
    }

    /// Checks that `value` is a weak map.
    pub fn from_value(agent: &Agent, value: &Value) -> Result<Self, TypeErrorKind> {
        let map = Self(value.as_object().ok_or(TypeErrorKind::InvalidReceiver)?);
        map.store(agent)?;
        Ok(map)
    }

    pub fn as_object(self) -> Object {
        self.0
    }

    fn store(self, agent: &Agent) -> Result<&WeakEntryStore<Value>, TypeErrorKind> {
        agent
            .heap
            .object(self.0)
            .and_then(|cell| cell.data().as_weak_map())
            .ok_or(TypeErrorKind::InvalidReceiver)
    }

    fn store_mut(self, agent: &mut Agent) -> Result<&mut WeakEntryStore<Value>, TypeErrorKind> {
        agent
            .heap
            .object_mut(self.0)
            .and_then(|cell| cell.data_mut().as_weak_map_mut())
            .ok_or(TypeErrorKind::InvalidReceiver)
    }

    /// Associates `value` with `key`, overwriting any previous value.
    ///
    /// Fails with [`TypeErrorKind::InvalidWeakKey`] when `key` cannot be held
    /// weakly.
    pub fn set(self, agent: &mut Agent, key: &Value, value: Value) -> Result<Self, TypeErrorKind> {
        self.store_mut(agent)?.set(key, value)?;
        Ok(self)
    }

    /// The value stored under `key`. A key that cannot be held weakly is
    /// simply absent.
    pub fn get(self, agent: &Agent, key: &Value) -> Result<Option<Value>, TypeErrorKind> {
        Ok(self.store(agent)?.get(key).cloned())
    }

    pub fn has(self, agent: &Agent, key: &Value) -> Result<bool, TypeErrorKind> {
        Ok(self.store(agent)?.has(key))
    }

    pub fn delete(self, agent: &mut Agent, key: &Value) -> Result<bool, TypeErrorKind> {
        Ok(self.store_mut(agent)?.delete(key))
    }

    /// Entries currently stored, including ones whose key is dead but not yet
    /// collected.
    pub fn len(self, agent: &Agent) -> Result<usize, TypeErrorKind> {
        Ok(self.store(agent)?.len())
    }
}

impl From<WeakMap> for Value {
    fn from(map: WeakMap) -> Self {
        Self::Object(map.0)
    }
}
