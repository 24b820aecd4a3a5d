//! Garbage collectors.

pub mod mark_sweep;
