//! The agent: one heap, its kept-alive set and its job queue.

use core::fmt;

use crate::collectors::mark_sweep::object::ObjectData;
use crate::collectors::mark_sweep::{
    CollectionStats, FinalizationRegistry, HostObject, MarkSweepGarbageCollector, ObjectKind,
    Trace,
};
use crate::config::GcConfig;
use crate::error::Error;
use crate::job::{Job, JobQueue};
use crate::kept_alive::KeptAliveSet;
use crate::symbol::{GlobalSymbolRegistry, Symbol};
use crate::value::{Identity, Object, Value};

/// A single-threaded execution context owning a garbage collected heap.
///
/// Collections only happen when [`Agent::collect`] is called or at a job
/// boundary after the heap crossed its threshold. Object handles do not root
/// their object: anything the host holds across a collection has to be
/// rooted with [`Agent::root`] or reachable from something rooted.
#[derive(Default)]
pub struct Agent {
    pub(crate) heap: MarkSweepGarbageCollector,
    pub(crate) kept_alive: KeptAliveSet,
    jobs: JobQueue,
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("live_objects", &self.heap.live_objects())
            .field("kept_alive", &self.kept_alive.len())
            .field("pending_jobs", &self.jobs.len())
            .finish()
    }
}

impl Agent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GcConfig) -> Self {
        Self {
            heap: MarkSweepGarbageCollector::new(config),
            kept_alive: KeptAliveSet::default(),
            jobs: JobQueue::default(),
        }
    }

    pub fn with_heap_threshold(mut self, heap_threshold: usize) -> Self {
        let config = self.config().clone().with_heap_threshold(heap_threshold);
        self.heap.set_config(config);
        self
    }

    pub fn with_arena_capacity(mut self, arena_capacity: usize) -> Self {
        let config = self.config().clone().with_arena_capacity(arena_capacity);
        self.heap.set_config(config);
        self
    }

    pub fn with_max_heap_objects(mut self, max_heap_objects: usize) -> Self {
        let config = self.config().clone().with_max_heap_objects(max_heap_objects);
        self.heap.set_config(config);
        self
    }

    pub fn config(&self) -> &GcConfig {
        self.heap.config()
    }

    // ==== Objects ====

    /// Allocates an ordinary object whose fields are strong edges.
    pub fn create_object(&mut self, fields: Vec<Value>) -> Result<Object, Error> {
        Ok(self.heap.alloc_object(ObjectData::Ordinary(fields))?)
    }

    /// Allocates an object carrying a typed host payload. The payload's
    /// [`Trace`] impl reports its strong edges.
    pub fn create_host_object<T: Trace + 'static>(&mut self, data: T) -> Result<Object, Error> {
        Ok(self.heap.alloc_object(ObjectData::Host(Box::new(data)))?)
    }

    /// The fields of an ordinary object, `None` for other kinds and stale
    /// handles.
    pub fn fields(&self, object: Object) -> Option<&[Value]> {
        self.heap.object(object)?.data().as_ordinary()
    }

    pub fn fields_mut(&mut self, object: Object) -> Option<&mut Vec<Value>> {
        self.heap.object_mut(object)?.data_mut().as_ordinary_mut()
    }

    pub fn host_data<T: 'static>(&self, object: Object) -> Option<&T> {
        let data: &dyn HostObject = self.heap.object(object)?.data().as_host()?;
        data.as_any().downcast_ref()
    }

    pub fn host_data_mut<T: 'static>(&mut self, object: Object) -> Option<&mut T> {
        let data: &mut dyn HostObject = self.heap.object_mut(object)?.data_mut().as_host_mut()?;
        data.as_any_mut().downcast_mut()
    }

    pub fn object_kind(&self, object: Object) -> Option<ObjectKind> {
        Some(self.heap.object(object)?.data().kind())
    }

    // ==== Symbols ====

    /// Creates a fresh, unregistered symbol owned by this agent's heap.
    pub fn create_symbol(&mut self, description: Option<&str>) -> Symbol {
        self.heap.alloc_symbol(description)
    }

    /// The registered symbol for `key`, shared by every agent in the process.
    pub fn symbol_for(&self, key: &str) -> Symbol {
        GlobalSymbolRegistry::global().symbol_for(key)
    }

    pub fn key_for(&self, symbol: Symbol) -> Option<String> {
        GlobalSymbolRegistry::global().key_for(symbol)
    }

    pub fn symbol_description(&self, symbol: Symbol) -> Option<String> {
        if let Some(well_known) = symbol.as_well_known() {
            return Some(well_known.description().to_owned());
        }
        if let Some(key) = self.key_for(symbol) {
            return Some(key);
        }
        self.heap.symbol_description(symbol).map(str::to_owned)
    }

    // ==== Roots ====

    /// Keeps `value` alive across collections until a matching
    /// [`Agent::unroot`]. Values without an identity are ignored.
    pub fn root(&mut self, value: &Value) {
        if let Some(identity) = value.as_identity() {
            self.heap.inc_roots(identity);
        }
    }

    pub fn unroot(&mut self, value: &Value) {
        if let Some(identity) = value.as_identity() {
            self.heap.dec_roots(identity);
        }
    }

    /// Whether `identity` has not been collected.
    pub fn is_allocated(&self, identity: Identity) -> bool {
        self.heap.contains(identity)
    }

    pub fn live_objects(&self) -> usize {
        self.heap.live_objects()
    }

    // ==== Collection and jobs ====

    /// Runs a collection now.
    ///
    /// Registries with newly emptied cells get a cleanup job; their
    /// callbacks run from [`Agent::run_jobs`], never from here.
    pub fn collect(&mut self) -> CollectionStats {
        let roots: Vec<Identity> = self.kept_alive.iter().chain(self.jobs.roots()).collect();
        let outcome = self.heap.collect(&roots);
        for registry in outcome.cleanup {
            self.jobs
                .push(Job::FinalizationCleanup(FinalizationRegistry::from_object(registry)));
        }
        outcome.stats
    }

    /// Forgets every target kept alive by weak reference creation or
    /// dereference during the current job.
    pub fn clear_kept_objects(&mut self) {
        self.kept_alive.clear();
    }

    pub fn kept_alive(&self) -> &KeptAliveSet {
        &self.kept_alive
    }

    /// Ends the current job: clears the kept-alive set, then runs the
    /// deferred collection if the heap crossed its threshold.
    pub fn job_boundary(&mut self) -> Option<CollectionStats> {
        self.clear_kept_objects();
        if self.heap.collect_needed() {
            return Some(self.collect());
        }
        None
    }

    pub fn enqueue_job(&mut self, job: impl FnOnce(&mut Agent) + 'static) {
        self.jobs.push(Job::Host(Box::new(job)));
    }

    pub fn pending_jobs(&self) -> usize {
        self.jobs.len()
    }

    /// Runs queued jobs until the queue is empty, including jobs enqueued
    /// along the way. Returns the number of jobs run.
    pub fn run_jobs(&mut self) -> usize {
        let mut ran = 0;
        while let Some(job) = self.jobs.pop() {
            match job {
                Job::FinalizationCleanup(registry) => {
                    registry.cleanup(self);
                }
                Job::Host(job) => job(self),
            }
            ran += 1;
            self.job_boundary();
        }
        tracing::trace!(ran, "job queue drained");
        ran
    }
}
