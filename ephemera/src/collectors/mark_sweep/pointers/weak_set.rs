use crate::agent::Agent;
use crate::collectors::mark_sweep::object::ObjectData;
use crate::collectors::mark_sweep::pointers::weak_entry_store::WeakEntryStore;
use crate::error::{Error, TypeErrorKind};
use crate::value::{Object, Value};

/// A set whose members are held weakly.
///
/// Like [`WeakMap`](super::WeakMap) keys, members that came from another
/// agent are dropped at the next collection of this agent's heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeakSet(Object);

impl WeakSet {
    pub fn new(agent: &mut Agent) -> Result<Self, Error> {
        let object = agent
            .heap
            .alloc_object(ObjectData::WeakSet(WeakEntryStore::default()))?;
        Ok(Self(object))
    }

    /// Checks that `value` is a weak set.
    pub fn from_value(agent: &Agent, value: &Value) -> Result<Self, TypeErrorKind> {
        let set = Self(value.as_object().ok_or(TypeErrorKind::InvalidReceiver)?);
        set.store(agent)?;
        Ok(set)
    }

    pub fn as_object(self) -> Object {
        self.0
    }

    fn store(self, agent: &Agent) -> Result<&WeakEntryStore<()>, TypeErrorKind> {
        agent
            .heap
            .object(self.0)
            .and_then(|cell| cell.data().as_weak_set())
            .ok_or(TypeErrorKind::InvalidReceiver)
    }

    fn store_mut(self, agent: &mut Agent) -> Result<&mut WeakEntryStore<()>, TypeErrorKind> {
        agent
            .heap
            .object_mut(self.0)
            .and_then(|cell| cell.data_mut().as_weak_set_mut())
            .ok_or(TypeErrorKind::InvalidReceiver)
    }

    /// Adds `member`; adding it again is a no-op.
    pub fn add(self, agent: &mut Agent, member: &Value) -> Result<Self, TypeErrorKind> {
        self.store_mut(agent)?.set(member, ())?;
        Ok(self)
    }

    pub fn has(self, agent: &Agent, member: &Value) -> Result<bool, TypeErrorKind> {
        Ok(self.store(agent)?.has(member))
    }

    pub fn delete(self, agent: &mut Agent, member: &Value) -> Result<bool, TypeErrorKind> {
        Ok(self.store_mut(agent)?.delete(member))
    }

    pub fn len(self, agent: &Agent) -> Result<usize, TypeErrorKind> {
        Ok(self.store(agent)?.len())
    }
}

impl From<WeakSet> for Value {
    fn from(set: WeakSet) -> Self {
        Self::Object(set.0)
    }
}
