//! Ephemeron resolution for weak maps.
//!
//! A weak map entry is an ephemeron: its value is reachable only when both
//! the map and the key are. A value discovered that way may in turn make
//! other keys reachable, so resolution repeats until nothing new turns up.

use crate::collectors::mark_sweep::{MarkSweepGarbageCollector, TraceColor};
use crate::value::{Identity, Object};

#[derive(Debug, Default)]
pub(crate) struct EphemeronQueue {
    maps: Vec<Object>,
}

impl EphemeronQueue {
    // a map is queued once, when the mark phase first reaches it
    pub(crate) fn push(&mut self, map: Object) {
        self.maps.push(map);
    }

    pub(crate) fn len(&self) -> usize {
        self.maps.len()
    }

    // Pushes onto `grey` every unmarked value whose key is marked. Returns
    // whether anything was pushed, i.e. whether another drain is needed.
    pub(crate) fn settle(
        &self,
        heap: &MarkSweepGarbageCollector,
        color: TraceColor,
        grey: &mut Vec<Identity>,
    ) -> bool {
        let before = grey.len();
        for map in &self.maps {
            let Some(store) = heap.object(*map).and_then(|cell| cell.data().as_weak_map()) else {
                continue;
            };
            for (key, value) in store.iter() {
                if !heap.is_marked(*key, color) {
                    continue;
                }
                if let Some(identity) = value.as_identity() {
                    if !heap.is_marked(identity, color) {
                        grey.push(identity);
                    }
                }
            }
        }
        grey.len() > before
    }
}
