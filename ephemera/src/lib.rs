//! Weak references for a garbage collected language runtime.
//!
//! Provides weak maps and weak sets keyed by identity, weak references,
//! finalization registries and the classifier deciding which values may be
//! held weakly, on top of a mark sweep collector that treats those
//! references as weak edges.
//!
//! Everything hangs off an [`Agent`], which owns a heap, the set of targets
//! kept alive for the current job, and a job queue on which finalization
//! cleanup is delivered.

extern crate self as ephemera;

pub mod alloc;
pub mod builtins;
pub mod collectors;

mod agent;
mod classifier;
mod config;
mod error;
mod job;
mod kept_alive;
mod symbol;
mod value;

pub use crate::agent::Agent;
pub use crate::classifier::{can_be_held_weakly, symbol_can_be_held_weakly, weak_identity};
pub use crate::collectors::mark_sweep::{
    CleanupCallback, CollectionStats, Finalize, FinalizationRegistry, HostObject,
    MarkSweepGarbageCollector, ObjectKind, Trace, TraceColor, Tracer, WeakMap, WeakRef, WeakSet,
};
pub use crate::config::GcConfig;
pub use crate::error::{Error, Result, TypeErrorKind};
pub use crate::kept_alive::KeptAliveSet;
pub use crate::symbol::{GlobalSymbolRegistry, Symbol, WellKnownSymbol};
pub use crate::value::{Identity, Object, Value};
pub use ephemera_derive::{Finalize, Trace};
