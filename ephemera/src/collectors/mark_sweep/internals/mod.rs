mod ephemeron;
mod gc_box;
mod gc_header;

pub(crate) use ephemeron::EphemeronQueue;
pub(crate) use gc_box::{GcBox, SymbolBox};
