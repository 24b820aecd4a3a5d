//! Finalization registries: cleanup callbacks for collected targets.
//!
//! The collector only empties cells. Delivery happens later, in a cleanup
//! job run from the agent's job queue, so a callback never observes a heap
//! in the middle of a collection.

use core::fmt;

use crate::agent::Agent;
use crate::classifier::weak_identity;
use crate::collectors::mark_sweep::object::ObjectData;
use crate::collectors::mark_sweep::{Trace, Tracer};
use crate::error::{Error, TypeErrorKind};
use crate::value::{Identity, Object, Value};

/// Called once per collected registration with its held value.
pub type CleanupCallback = Box<dyn FnMut(&mut Agent, Value)>;

#[derive(Debug)]
pub(crate) struct FinalizationCell {
    // emptied by the collector once the target is dead
    target: Option<Identity>,
    held_value: Value,
    unregister_token: Option<Identity>,
}

pub(crate) struct FinalizationRegistryData {
    cells: Vec<FinalizationCell>,
    // taken out while the callback runs
    cleanup: Option<CleanupCallback>,
    cleanup_scheduled: bool,
}

impl fmt::Debug for FinalizationRegistryData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinalizationRegistryData")
            .field("cells", &self.cells)
            .field("cleanup_scheduled", &self.cleanup_scheduled)
            .finish_non_exhaustive()
    }
}

impl FinalizationRegistryData {
    fn new(cleanup: CleanupCallback) -> Self {
        Self {
            cells: Vec::new(),
            cleanup: Some(cleanup),
            cleanup_scheduled: false,
        }
    }

    pub(crate) fn trace_held_values(&self, tracer: &mut Tracer<'_>) {
        for cell in &self.cells {
            cell.held_value.trace(tracer);
        }
    }

    pub(crate) fn weak_edges(&self, out: &mut Vec<Identity>) {
        for cell in &self.cells {
            out.extend(cell.target);
            out.extend(cell.unregister_token);
        }
    }

    // Returns the number of cells emptied and of tokens cleared.
    pub(crate) fn clear_dead(&mut self, is_dead: impl Fn(&Identity) -> bool) -> (usize, usize) {
        let mut emptied = 0;
        let mut tokens = 0;
        for cell in &mut self.cells {
            if cell.target.as_ref().is_some_and(&is_dead) {
                cell.target = None;
                emptied += 1;
            }
            if cell.unregister_token.as_ref().is_some_and(&is_dead) {
                cell.unregister_token = None;
                tokens += 1;
            }
        }
        (emptied, tokens)
    }

    // Marks the registry as having a pending cleanup job. Returns true only
    // when a new job has to be enqueued.
    pub(crate) fn schedule_cleanup(&mut self) -> bool {
        if self.cleanup_scheduled || !self.cells.iter().any(|cell| cell.target.is_none()) {
            return false;
        }
        self.cleanup_scheduled = true;
        true
    }

    fn take_emptied(&mut self) -> Vec<Value> {
        let (emptied, live): (Vec<_>, Vec<_>) = core::mem::take(&mut self.cells)
            .into_iter()
            .partition(|cell| cell.target.is_none());
        self.cells = live;
        emptied.into_iter().map(|cell| cell.held_value).collect()
    }
}

/// A registry delivering held values to its cleanup callback after their
/// targets are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FinalizationRegistry(Object);

impl FinalizationRegistry {
    pub fn new(
        agent: &mut Agent,
        cleanup: impl FnMut(&mut Agent, Value) + 'static,
    ) -> Result<Self, Error> {
        let data = FinalizationRegistryData::new(Box::new(cleanup));
        let object = agent
            .heap
            .alloc_object(ObjectData::FinalizationRegistry(data))?;
        Ok(Self(object))
    }

    /// Checks that `value` is a finalization registry.
    pub fn from_value(agent: &Agent, value: &Value) -> Result<Self, TypeErrorKind> {
        let registry = Self(value.as_object().ok_or(TypeErrorKind::InvalidReceiver)?);
        registry.data(agent)?;
        Ok(registry)
    }

    pub fn as_object(self) -> Object {
        self.0
    }

    pub(crate) fn from_object(object: Object) -> Self {
        Self(object)
    }

    fn data(self, agent: &Agent) -> Result<&FinalizationRegistryData, TypeErrorKind> {
        agent
            .heap
            .object(self.0)
            .and_then(|cell| cell.data().as_finalization_registry())
            .ok_or(TypeErrorKind::InvalidReceiver)
    }

    fn data_mut(self, agent: &mut Agent) -> Result<&mut FinalizationRegistryData, TypeErrorKind> {
        agent
            .heap
            .object_mut(self.0)
            .and_then(|cell| cell.data_mut().as_finalization_registry_mut())
            .ok_or(TypeErrorKind::InvalidReceiver)
    }

    /// Registers `target` so that `held_value` is delivered to the cleanup
    /// callback once `target` is collected.
    ///
    /// An `unregister_token` of `None` or `undefined` means the registration
    /// cannot be cancelled.
    pub fn register(
        self,
        agent: &mut Agent,
        target: &Value,
        held_value: Value,
        unregister_token: Option<&Value>,
    ) -> Result<(), TypeErrorKind> {
        self.data(agent)?;
        let target_identity = weak_identity(target).ok_or(TypeErrorKind::InvalidWeakTarget)?;
        if target.same_value(&held_value) {
            return Err(TypeErrorKind::SelfReferentialFinalization);
        }
        let unregister_token = match unregister_token {
            Some(token) if !token.is_undefined() => {
                Some(weak_identity(token).ok_or(TypeErrorKind::InvalidUnregisterToken)?)
            }
            _ => None,
        };

        self.data_mut(agent)?.cells.push(FinalizationCell {
            target: Some(target_identity),
            held_value,
            unregister_token,
        });
        Ok(())
    }

    /// Removes every registration made with `token`, including ones whose
    /// target already died but whose held value was not delivered yet.
    pub fn unregister(self, agent: &mut Agent, token: &Value) -> Result<bool, TypeErrorKind> {
        let data = self.data_mut(agent)?;
        let token = weak_identity(token).ok_or(TypeErrorKind::InvalidUnregisterToken)?;
        let before = data.cells.len();
        data.cells
            .retain(|cell| cell.unregister_token != Some(token));
        Ok(data.cells.len() != before)
    }

    /// Registrations not yet delivered or unregistered.
    pub fn cell_count(self, agent: &Agent) -> Result<usize, TypeErrorKind> {
        Ok(self.data(agent)?.cells.len())
    }

    // Runs the cleanup callback for every emptied cell. Returns the number of
    // held values delivered.
    pub(crate) fn cleanup(self, agent: &mut Agent) -> usize {
        let Ok(data) = self.data_mut(agent) else {
            return 0;
        };
        data.cleanup_scheduled = false;
        let Some(mut callback) = data.cleanup.take() else {
            // re-entrant cleanup from inside the callback; emptied cells
            // wait for the next collection to schedule them again
            return 0;
        };
        let held_values = data.take_emptied();

        let registry = Identity::Object(self.0);
        agent.heap.inc_roots(registry);
        for held in held_values.iter().filter_map(Value::as_identity) {
            agent.heap.inc_roots(held);
        }

        let delivered = held_values.len();
        for held in held_values {
            let identity = held.as_identity();
            callback(agent, held);
            if let Some(identity) = identity {
                agent.heap.dec_roots(identity);
            }
        }

        if let Ok(data) = self.data_mut(agent) {
            data.cleanup = Some(callback);
        }
        agent.heap.dec_roots(registry);
        tracing::trace!(registry = ?self.0, delivered, "finalization cleanup ran");
        delivered
    }
}

impl From<FinalizationRegistry> for Value {
    fn from(registry: FinalizationRegistry) -> Self {
        Self::Object(registry.0)
    }
}
