/// Index and generation of an arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

// a slot is either occupied by the value of its current generation or free
#[derive(Debug)]
pub(crate) struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

impl<T> Slot<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            generation: 0,
            value: Some(value),
        }
    }

    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }

    pub(crate) fn occupy(&mut self, value: T) -> u32 {
        debug_assert!(self.value.is_none(), "occupying a slot that is still live");
        self.value = Some(value);
        self.generation
    }

    pub(crate) fn get(&self, generation: u32) -> Option<&T> {
        if self.generation == generation {
            self.value.as_ref()
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, generation: u32) -> Option<&mut T> {
        if self.generation == generation {
            self.value.as_mut()
        } else {
            None
        }
    }

    pub(crate) fn vacate(&mut self, generation: u32) -> Option<T> {
        if self.generation != generation {
            return None;
        }
        let value = self.value.take()?;
        // an exhausted slot keeps its last generation and stays empty
        if let Some(next) = self.generation.checked_add(1) {
            self.generation = next;
        }
        Some(value)
    }

    // no generation is left to tell a new occupant from the last one
    pub(crate) fn is_retired(&self) -> bool {
        self.generation == u32::MAX && self.value.is_none()
    }

    #[cfg(test)]
    pub(crate) fn set_generation(&mut self, generation: u32) {
        self.generation = generation;
    }
}
