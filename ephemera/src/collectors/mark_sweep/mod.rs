//! A mark sweep collector that understands weak edges.
//!
//! Marking starts from rooted cells and any extra roots the agent supplies
//! (its kept-alive set and registries with pending cleanup jobs), follows
//! strong edges only, and resolves weak map entries as ephemerons. The sweep
//! then clears every weakly held identity that was not marked before freeing
//! the dead cells.

use core::sync::atomic::{AtomicU64, Ordering};

use hashbrown::{HashMap, HashSet};
use rustc_hash::FxBuildHasher;

use crate::alloc::{ArenaAllocError, SlotArena, SlotId};
use crate::collectors::mark_sweep::internals::{EphemeronQueue, GcBox, SymbolBox};
use crate::collectors::mark_sweep::object::ObjectData;
use crate::config::GcConfig;
use crate::symbol::{GlobalSymbolRegistry, Symbol};
use crate::value::{Identity, Object};

pub(crate) mod internals;
pub(crate) mod object;
pub(crate) mod pointers;
pub(crate) mod trace;

#[cfg(test)]
mod tests;

pub use object::{HostObject, ObjectKind};
pub use pointers::{CleanupCallback, FinalizationRegistry, WeakMap, WeakRef, WeakSet};
pub use trace::{Finalize, Trace, TraceColor, Tracer};

// every heap stamps its id into the object handles it hands out
static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

/// What a single collection did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionStats {
    /// One-based index of the collection within its heap.
    pub cycle: u64,
    pub objects_swept: usize,
    pub symbols_swept: usize,
    /// Weak map and weak set entries removed because their key died.
    pub entries_pruned: usize,
    pub weak_refs_cleared: usize,
    /// Finalization cells whose target died during this collection.
    pub cells_emptied: usize,
    pub tokens_cleared: usize,
    pub live_objects: usize,
}

#[derive(Debug, Default)]
pub(crate) struct CollectionOutcome {
    pub(crate) stats: CollectionStats,
    // registries that need a cleanup job
    pub(crate) cleanup: Vec<Object>,
}

#[derive(Debug)]
pub struct MarkSweepGarbageCollector {
    id: u64,
    config: GcConfig,
    objects: SlotArena<GcBox>,
    // symbols created by this agent; registered and well-known symbols are
    // never stored here
    symbols: HashMap<Symbol, SymbolBox, FxBuildHasher>,
    // current trace color epoch, flips each cycle
    trace_color: TraceColor,
    // true if the heap crossed its threshold, triggers a deferred collection
    collect_needed: bool,
    cycles: u64,
}

impl Default for MarkSweepGarbageCollector {
    fn default() -> Self {
        Self::new(GcConfig::default())
    }
}

impl MarkSweepGarbageCollector {
    pub fn new(config: GcConfig) -> Self {
        Self {
            id: NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed),
            objects: SlotArena::with_capacity(config.arena_capacity, config.max_heap_objects),
            symbols: HashMap::with_hasher(FxBuildHasher),
            trace_color: TraceColor::default(),
            collect_needed: false,
            cycles: 0,
            config,
        }
    }

    pub fn config(&self) -> &GcConfig {
        &self.config
    }

    pub(crate) fn set_config(&mut self, config: GcConfig) {
        self.objects.set_max_live(config.max_heap_objects);
        self.config = config;
    }

    pub fn live_objects(&self) -> usize {
        self.objects.live()
    }

    pub fn live_symbols(&self) -> usize {
        self.symbols.len()
    }

    pub fn trace_color(&self) -> TraceColor {
        self.trace_color
    }

    pub fn collect_needed(&self) -> bool {
        self.collect_needed
    }

    pub(crate) fn alloc_object(&mut self, data: ObjectData) -> Result<Object, ArenaAllocError> {
        let id = self
            .objects
            .try_alloc(GcBox::new_in(data, self.trace_color))?;
        // flag for a deferred collection if the heap crossed its threshold
        if !self.config.is_below_threshold(self.objects.live()) {
            self.collect_needed = true;
        }
        Ok(self.handle(id))
    }

    pub(crate) fn alloc_symbol(&mut self, description: Option<&str>) -> Symbol {
        let symbol = Symbol::fresh();
        self.symbols
            .insert(symbol, SymbolBox::new_in(description, self.trace_color));
        symbol
    }

    fn handle(&self, slot: SlotId) -> Object {
        Object {
            heap: self.id,
            slot,
        }
    }

    // A handle from another heap resolves to nothing, like a stale one.
    pub(crate) fn object(&self, object: Object) -> Option<&GcBox> {
        if object.heap != self.id {
            return None;
        }
        self.objects.get(object.slot)
    }

    pub(crate) fn object_mut(&mut self, object: Object) -> Option<&mut GcBox> {
        if object.heap != self.id {
            return None;
        }
        self.objects.get_mut(object.slot)
    }

    /// The description of a symbol created by this heap.
    pub(crate) fn symbol_description(&self, symbol: Symbol) -> Option<&str> {
        self.symbols.get(&symbol)?.description()
    }

    /// Whether `identity` still refers to something. Registered and
    /// well-known symbols always do.
    pub fn contains(&self, identity: Identity) -> bool {
        match identity {
            Identity::Object(object) => self.object(object).is_some(),
            Identity::Symbol(symbol) => {
                is_permanent(symbol) || self.symbols.contains_key(&symbol)
            }
        }
    }

    // Root counting is a no-op for stale handles and permanent symbols.
    pub(crate) fn inc_roots(&self, identity: Identity) {
        match identity {
            Identity::Object(object) => {
                if let Some(cell) = self.object(object) {
                    cell.header.inc_roots();
                }
            }
            Identity::Symbol(symbol) => {
                if let Some(cell) = self.symbols.get(&symbol) {
                    cell.header.inc_roots();
                }
            }
        }
    }

    pub(crate) fn dec_roots(&self, identity: Identity) {
        match identity {
            Identity::Object(object) => {
                if let Some(cell) = self.object(object) {
                    cell.header.dec_roots();
                }
            }
            Identity::Symbol(symbol) => {
                if let Some(cell) = self.symbols.get(&symbol) {
                    cell.header.dec_roots();
                }
            }
        }
    }

    pub(crate) fn is_marked(&self, identity: Identity, color: TraceColor) -> bool {
        match identity {
            Identity::Object(object) => self
                .object(object)
                .is_some_and(|cell| cell.is_reachable(color)),
            Identity::Symbol(symbol) => match self.symbols.get(&symbol) {
                Some(cell) => cell.is_reachable(color),
                // a symbol this agent did not create is either permanent or
                // belongs to another agent, whose heap never reports it
                None => is_permanent(symbol),
            },
        }
    }

    // Paints `identity` with `color`. Returns whether it was unmarked before.
    fn mark(&self, identity: Identity, color: TraceColor) -> bool {
        match identity {
            Identity::Object(object) => match self.object(object) {
                Some(cell) if !cell.is_reachable(color) => {
                    cell.mark(color);
                    true
                }
                _ => false,
            },
            Identity::Symbol(symbol) => match self.symbols.get(&symbol) {
                Some(cell) if !cell.is_reachable(color) => {
                    cell.mark(color);
                    true
                }
                _ => false,
            },
        }
    }
}

fn is_permanent(symbol: Symbol) -> bool {
    symbol.as_well_known().is_some() || GlobalSymbolRegistry::global().contains(symbol)
}

// ==== Collection methods ====

impl MarkSweepGarbageCollector {
    /// Runs a full collection cycle.
    ///
    /// `extra_roots` are marked alongside every rooted cell. Cleanup
    /// callbacks are not run here; the returned outcome lists the registries
    /// that need a cleanup job.
    pub(crate) fn collect(&mut self, extra_roots: &[Identity]) -> CollectionOutcome {
        self.cycles += 1;
        let color = self.trace_color;

        let weak_holders = self.run_mark_phase(color, extra_roots);
        let mut outcome = CollectionOutcome {
            stats: CollectionStats {
                cycle: self.cycles,
                ..CollectionStats::default()
            },
            cleanup: Vec::new(),
        };
        self.clear_weak_edges(color, weak_holders, &mut outcome);
        self.run_sweep_phase(color, &mut outcome.stats);

        // flip the trace color epoch so survivors are unmarked for the next cycle
        self.trace_color = color.flip();
        self.collect_needed = false;
        if !self.config.is_below_threshold(self.objects.live()) {
            self.config.increase_threshold();
        }
        outcome.stats.live_objects = self.objects.live();

        let stats = &outcome.stats;
        tracing::debug!(
            cycle = stats.cycle,
            objects_swept = stats.objects_swept,
            symbols_swept = stats.symbols_swept,
            entries_pruned = stats.entries_pruned,
            weak_refs_cleared = stats.weak_refs_cleared,
            cells_emptied = stats.cells_emptied,
            tokens_cleared = stats.tokens_cleared,
            live_objects = stats.live_objects,
            cleanup_jobs = outcome.cleanup.len(),
            "collection finished"
        );
        outcome
    }

    // Marks everything reachable and returns the marked cells that hold
    // something weakly.
    fn run_mark_phase(&self, color: TraceColor, extra_roots: &[Identity]) -> Vec<Object> {
        let mut grey: Vec<Identity> = self
            .objects
            .iter()
            .filter(|(_, cell)| cell.is_rooted())
            .map(|(id, _)| Identity::Object(self.handle(id)))
            .collect();
        grey.extend(
            self.symbols
                .iter()
                .filter(|(_, cell)| cell.is_rooted())
                .map(|(symbol, _)| Identity::Symbol(*symbol)),
        );
        grey.extend_from_slice(extra_roots);

        let mut ephemerons = EphemeronQueue::default();
        let mut weak_holders = Vec::new();
        loop {
            self.drain_grey(&mut grey, color, &mut ephemerons, &mut weak_holders);
            // values of entries whose key turned out live may reach further keys
            if !ephemerons.settle(self, color, &mut grey) {
                break;
            }
        }
        tracing::trace!(
            weak_holders = weak_holders.len(),
            weak_maps = ephemerons.len(),
            "mark phase finished"
        );
        weak_holders
    }

    fn drain_grey(
        &self,
        grey: &mut Vec<Identity>,
        color: TraceColor,
        ephemerons: &mut EphemeronQueue,
        weak_holders: &mut Vec<Object>,
    ) {
        while let Some(identity) = grey.pop() {
            if !self.mark(identity, color) {
                continue;
            }
            // symbols have no outgoing edges
            let Identity::Object(object) = identity else {
                continue;
            };
            let Some(cell) = self.object(object) else {
                continue;
            };
            let data = cell.data();
            if data.holds_weakly() {
                weak_holders.push(object);
                if data.as_weak_map().is_some() {
                    ephemerons.push(object);
                }
            }
            data.trace(&mut Tracer::new(grey));
        }
    }

    fn clear_weak_edges(
        &mut self,
        color: TraceColor,
        weak_holders: Vec<Object>,
        outcome: &mut CollectionOutcome,
    ) {
        let mut edges = Vec::new();
        for holder in &weak_holders {
            if let Some(cell) = self.object(*holder) {
                cell.data().weak_edges(&mut edges);
            }
        }
        let dead: HashSet<Identity, FxBuildHasher> = edges
            .into_iter()
            .filter(|identity| !self.is_marked(*identity, color))
            .collect();

        for holder in weak_holders {
            let Some(cell) = self.object_mut(holder) else {
                continue;
            };
            if cell
                .data_mut()
                .clear_dead(|identity| dead.contains(identity), &mut outcome.stats)
            {
                tracing::trace!(registry = ?holder, "finalization cleanup scheduled");
                outcome.cleanup.push(holder);
            }
        }
    }

    fn run_sweep_phase(&mut self, color: TraceColor, stats: &mut CollectionStats) {
        let droppables: Vec<SlotId> = self
            .objects
            .iter()
            .filter(|(_, cell)| !cell.is_reachable(color))
            .map(|(id, _)| id)
            .collect();
        for id in droppables {
            if let Some(cell) = self.objects.free_slot(id) {
                cell.into_data().run_finalizer();
                stats.objects_swept += 1;
            }
        }

        let before = self.symbols.len();
        self.symbols.retain(|_, cell| cell.is_reachable(color));
        stats.symbols_swept = before - self.symbols.len();
    }
}

impl Drop for MarkSweepGarbageCollector {
    fn drop(&mut self) {
        // the heap is going away with the agent; every payload still gets its
        // finalizer
        for (_, cell) in self.objects.iter() {
            cell.data().run_finalizer();
        }
    }
}
