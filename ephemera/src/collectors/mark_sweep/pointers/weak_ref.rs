use crate::agent::Agent;
use crate::classifier::weak_identity;
use crate::collectors::mark_sweep::object::ObjectData;
use crate::error::{Error, TypeErrorKind};
use crate::value::{Identity, Object, Value};

#[derive(Debug)]
pub(crate) struct WeakRefData {
    // `None` once the collector emptied the reference; never refilled
    target: Option<Identity>,
}

impl WeakRefData {
    pub(crate) fn target(&self) -> Option<Identity> {
        self.target
    }

    pub(crate) fn clear_dead(&mut self, is_dead: impl Fn(&Identity) -> bool) -> bool {
        if self.target.as_ref().is_some_and(is_dead) {
            self.target = None;
            return true;
        }
        false
    }
}

/// A weak reference to a single target.
///
/// The target is kept alive until the end of the job that created the
/// reference (and of any job that dereferenced it), so a fresh reference can
/// always be dereferenced at least once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeakRef(Object);

impl WeakRef {
    /// Fails with [`TypeErrorKind::InvalidWeakTarget`] when `target` cannot be
    /// held weakly.
    pub fn new(agent: &mut Agent, target: &Value) -> Result<Self, Error> {
        let target = weak_identity(target).ok_or(TypeErrorKind::InvalidWeakTarget)?;
        let object = agent.heap.alloc_object(ObjectData::WeakRef(WeakRefData {
            target: Some(target),
        }))?;
        agent.kept_alive.add(target);
        Ok(Self(object))
    }

    /// Checks that `value` is a weak reference.
    pub fn from_value(agent: &Agent, value: &Value) -> Result<Self, TypeErrorKind> {
        let weak_ref = Self(value.as_object().ok_or(TypeErrorKind::InvalidReceiver)?);
        weak_ref.data(agent)?;
        Ok(weak_ref)
    }

    pub fn as_object(self) -> Object {
        self.0
    }

    fn data(self, agent: &Agent) -> Result<&WeakRefData, TypeErrorKind> {
        agent
            .heap
            .object(self.0)
            .and_then(|cell| cell.data().as_weak_ref())
            .ok_or(TypeErrorKind::InvalidReceiver)
    }

    /// The target, or `None` once it has been collected.
    pub fn deref(self, agent: &mut Agent) -> Result<Option<Value>, TypeErrorKind> {
        let target = self.data(agent)?.target();
        if let Some(target) = target {
            agent.kept_alive.add(target);
        }
        Ok(target.map(Value::from))
    }
}

impl From<WeakRef> for Value {
    fn from(weak_ref: WeakRef) -> Self {
        Self::Object(weak_ref.0)
    }
}
