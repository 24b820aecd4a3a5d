//! The slot arena backing the object heap.
//!
//! Every object occupies exactly one slot. Freed slots go on a free list and
//! bump their generation, so a stale handle to the previous occupant never
//! resolves to the new one. A slot whose generation is exhausted is retired
//! instead of reused.

mod slot;

pub(crate) use slot::Slot;
pub use slot::SlotId;


#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArenaAllocError {
    #[error("heap exhausted: limit of {limit} live objects reached")]
    OutOfMemory { limit: usize },
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    live: usize,
    max_live: usize,
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::with_capacity(0, u32::MAX as usize)
    }
}

impl<T> SlotArena<T> {
    pub fn with_capacity(capacity: usize, max_live: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live: 0,
            max_live,
        }
    }

    // live slot count
    pub fn live(&self) -> usize {
        self.live
    }

    // occupied plus free slots
    pub fn slots_len(&self) -> usize {
        self.slots.len()
    }

    pub fn set_max_live(&mut self, max_live: usize) {
        self.max_live = max_live;
    }

    pub fn try_alloc(&mut self, value: T) -> Result<SlotId, ArenaAllocError> {
        if self.live >= self.max_live {
            return Err(ArenaAllocError::OutOfMemory {
                limit: self.max_live,
            });
        }

        // reuse a freed slot before growing
        let id = match self.free_list.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                let generation = slot.occupy(value);
                SlotId { index, generation }
            }
            None => {
                let index =
                    u32::try_from(self.slots.len()).map_err(|_| ArenaAllocError::OutOfMemory {
                        limit: self.max_live,
                    })?;
                self.slots.push(Slot::new(value));
                SlotId {
                    index,
                    generation: 0,
                }
            }
        };
        self.live += 1;
        Ok(id)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.index as usize)?.get(id.generation)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.index as usize)?.get_mut(id.generation)
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    // vacate the slot and hand back its value, `None` for a stale id
    pub fn free_slot(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index as usize)?;
        let value = slot.vacate(id.generation)?;
        if !slot.is_retired() {
            self.free_list.push(id.index);
        }
        self.live -= 1;
        Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let value = slot.get(slot.generation())?;
            Some((
                SlotId {
                    index: index as u32,
                    generation: slot.generation(),
                },
                value,
            ))
        })
    }
}
