//! Heap sizing knobs.

const DEFAULT_ARENA_CAPACITY: usize = 256;
const DEFAULT_HEAP_THRESHOLD: usize = 4096;

/// Collector configuration.
///
/// Sizes are counted in objects, not bytes: the heap is a slot arena and
/// every object takes exactly one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcConfig {
    /// Live object count above which the next job boundary runs a
    /// collection.
    pub heap_threshold: usize,
    /// Slots reserved up front, also the step the threshold grows by.
    pub arena_capacity: usize,
    /// Hard cap on live objects; allocation past it fails.
    pub max_heap_objects: usize,
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            heap_threshold: DEFAULT_HEAP_THRESHOLD,
            arena_capacity: DEFAULT_ARENA_CAPACITY,
            max_heap_objects: u32::MAX as usize,
        }
    }
}

impl GcConfig {
    pub fn with_heap_threshold(mut self, heap_threshold: usize) -> Self {
        self.heap_threshold = heap_threshold;
        self
    }

    pub fn with_arena_capacity(mut self, arena_capacity: usize) -> Self {
        self.arena_capacity = arena_capacity;
        self
    }

    pub fn with_max_heap_objects(mut self, max_heap_objects: usize) -> Self {
        self.max_heap_objects = max_heap_objects;
        self
    }

    pub fn is_below_threshold(&self, live_objects: usize) -> bool {
        // keep 25% headroom so a collection is requested before the threshold is hit
        let margin = self.heap_threshold / 4;
        live_objects <= self.heap_threshold.saturating_sub(margin)
    }

    pub fn increase_threshold(&mut self) {
        self.heap_threshold += self.arena_capacity.max(1) * 4;
    }
}
