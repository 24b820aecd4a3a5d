//! Handles to the weak-holding objects.

pub(crate) mod finalization_registry;
pub(crate) mod weak_entry_store;
pub(crate) mod weak_map;
pub(crate) mod weak_ref;
pub(crate) mod weak_set;

pub use finalization_registry::{CleanupCallback, FinalizationRegistry};
pub use weak_map::WeakMap;
pub use weak_ref::WeakRef;
pub use weak_set::WeakSet;
