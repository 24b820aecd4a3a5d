//! What an object cell holds, and which of its edges are weak.

use core::any::Any;
use core::fmt;

use crate::collectors::mark_sweep::pointers::finalization_registry::FinalizationRegistryData;
use crate::collectors::mark_sweep::pointers::weak_entry_store::WeakEntryStore;
use crate::collectors::mark_sweep::pointers::weak_ref::WeakRefData;
use crate::collectors::mark_sweep::{CollectionStats, Trace, Tracer};
use crate::value::{Identity, Value};

/// A typed payload stored in a host object.
///
/// Implemented for every `'static` type that implements [`Trace`]; derive
/// `Trace` and `Finalize` to get it.
pub trait HostObject: Trace + Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Trace + Any> HostObject for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Ordinary,
    Host,
    WeakMap,
    WeakSet,
    WeakRef,
    FinalizationRegistry,
}

pub(crate) enum ObjectData {
    Ordinary(Vec<Value>),
    Host(Box<dyn HostObject>),
    WeakMap(WeakEntryStore<Value>),
    WeakSet(WeakEntryStore<()>),
    WeakRef(WeakRefData),
    FinalizationRegistry(FinalizationRegistryData),
}

impl fmt::Debug for ObjectData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordinary(fields) => f.debug_tuple("Ordinary").field(fields).finish(),
            Self::Host(_) => f.write_str("Host(..)"),
            Self::WeakMap(store) => f.debug_tuple("WeakMap").field(store).finish(),
            Self::WeakSet(store) => f.debug_tuple("WeakSet").field(store).finish(),
            Self::WeakRef(data) => f.debug_tuple("WeakRef").field(data).finish(),
            Self::FinalizationRegistry(data) => {
                f.debug_tuple("FinalizationRegistry").field(data).finish()
            }
        }
    }
}

impl ObjectData {
    pub(crate) fn kind(&self) -> ObjectKind {
        match self {
            Self::Ordinary(_) => ObjectKind::Ordinary,
            Self::Host(_) => ObjectKind::Host,
            Self::WeakMap(_) => ObjectKind::WeakMap,
            Self::WeakSet(_) => ObjectKind::WeakSet,
            Self::WeakRef(_) => ObjectKind::WeakRef,
            Self::FinalizationRegistry(_) => ObjectKind::FinalizationRegistry,
        }
    }

    pub(crate) fn holds_weakly(&self) -> bool {
        !matches!(self, Self::Ordinary(_) | Self::Host(_))
    }

    // Reports the strong edges only. Weak map keys and values, weak set
    // members, weak reference targets and finalization targets and tokens
    // are left to the sweep; weak map values go through ephemeron
    // resolution instead.
    pub(crate) fn trace(&self, tracer: &mut Tracer<'_>) {
        match self {
            Self::Ordinary(fields) => fields.trace(tracer),
            Self::Host(data) => {
                let data: &dyn HostObject = &**data;
                data.trace(tracer);
            }
            Self::FinalizationRegistry(registry) => registry.trace_held_values(tracer),
            Self::WeakMap(_) | Self::WeakSet(_) | Self::WeakRef(_) => {}
        }
    }

    pub(crate) fn weak_edges(&self, out: &mut Vec<Identity>) {
        match self {
            Self::WeakMap(store) => out.extend(store.keys()),
            Self::WeakSet(store) => out.extend(store.keys()),
            Self::WeakRef(data) => out.extend(data.target()),
            Self::FinalizationRegistry(registry) => registry.weak_edges(out),
            Self::Ordinary(_) | Self::Host(_) => {}
        }
    }

    // Forgets every weakly held identity the collector found dead. Returns
    // whether a finalization cleanup job has to be scheduled for this cell.
    pub(crate) fn clear_dead(
        &mut self,
        is_dead: impl Fn(&Identity) -> bool,
        stats: &mut CollectionStats,
    ) -> bool {
        match self {
            Self::WeakMap(store) => stats.entries_pruned += store.prune(is_dead),
            Self::WeakSet(store) => stats.entries_pruned += store.prune(is_dead),
            Self::WeakRef(data) => {
                if data.clear_dead(is_dead) {
                    stats.weak_refs_cleared += 1;
                }
            }
            Self::FinalizationRegistry(registry) => {
                let (emptied, tokens) = registry.clear_dead(is_dead);
                stats.cells_emptied += emptied;
                stats.tokens_cleared += tokens;
                return registry.schedule_cleanup();
            }
            Self::Ordinary(_) | Self::Host(_) => {}
        }
        false
    }

    pub(crate) fn run_finalizer(&self) {
        if let Self::Host(data) = self {
            let data: &dyn HostObject = &**data;
            data.run_finalizer();
        }
    }

    pub(crate) fn as_ordinary(&self) -> Option<&[Value]> {
        match self {
            Self::Ordinary(fields) => Some(fields),
            _ => None,
        }
    }

    pub(crate) fn as_ordinary_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::Ordinary(fields) => Some(fields),
            _ => None,
        }
    }

    pub(crate) fn as_host(&self) -> Option<&dyn HostObject> {
        match self {
            Self::Host(data) => Some(&**data),
            _ => None,
        }
    }

    pub(crate) fn as_host_mut(&mut self) -> Option<&mut dyn HostObject> {
        match self {
            Self::Host(data) => Some(&mut **data),
            _ => None,
        }
    }

    pub(crate) fn as_weak_map(&self) -> Option<&WeakEntryStore<Value>> {
        match self {
            Self::WeakMap(store) => Some(store),
            _ => None,
        }
    }

    pub(crate) fn as_weak_map_mut(&mut self) -> Option<&mut WeakEntryStore<Value>> {
        match self {
            Self::WeakMap(store) => Some(store),
            _ => None,
        }
    }

    pub(crate) fn as_weak_set(&self) -> Option<&WeakEntryStore<()>> {
        match self {
            Self::WeakSet(store) => Some(store),
            _ => None,
        }
    }

    pub(crate) fn as_weak_set_mut(&mut self) -> Option<&mut WeakEntryStore<()>> {
        match self {
            Self::WeakSet(store) => Some(store),
            _ => None,
        }
    }

    pub(crate) fn as_weak_ref(&self) -> Option<&WeakRefData> {
        match self {
            Self::WeakRef(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn as_finalization_registry(&self) -> Option<&FinalizationRegistryData> {
        match self {
            Self::FinalizationRegistry(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn as_finalization_registry_mut(
        &mut self,
    ) -> Option<&mut FinalizationRegistryData> {
        match self {
            Self::FinalizationRegistry(data) => Some(data),
            _ => None,
        }
    }
}
