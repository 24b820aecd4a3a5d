//! Storage for heap cells.

mod slots;

pub use slots::{ArenaAllocError, SlotArena, SlotId};
