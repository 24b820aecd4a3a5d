//! Heap cells: the header plus whatever the cell holds.

use crate::collectors::mark_sweep::internals::gc_header::GcHeader;
use crate::collectors::mark_sweep::object::ObjectData;
use crate::collectors::mark_sweep::TraceColor;

#[derive(Debug)]
pub(crate) struct GcBox {
    pub(crate) header: GcHeader,
    data: ObjectData,
}

impl GcBox {
    pub(crate) fn new_in(data: ObjectData, color: TraceColor) -> Self {
        Self {
            header: GcHeader::new_unmarked(color),
            data,
        }
    }

    pub(crate) fn data(&self) -> &ObjectData {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut ObjectData {
        &mut self.data
    }

    pub(crate) fn into_data(self) -> ObjectData {
        self.data
    }

    pub(crate) fn is_reachable(&self, color: TraceColor) -> bool {
        self.header.is_marked(color)
    }

    pub(crate) fn mark(&self, color: TraceColor) {
        self.header.mark(color);
    }

    pub(crate) fn is_rooted(&self) -> bool {
        self.header.is_rooted()
    }
}

// Symbols have no outgoing edges, so their cell is just a header and the
// optional description.
#[derive(Debug)]
pub(crate) struct SymbolBox {
    pub(crate) header: GcHeader,
    description: Option<Box<str>>,
}

impl SymbolBox {
    pub(crate) fn new_in(description: Option<&str>, color: TraceColor) -> Self {
        Self {
            header: GcHeader::new_unmarked(color),
            description: description.map(Box::from),
        }
    }

    pub(crate) fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn is_reachable(&self, color: TraceColor) -> bool {
        self.header.is_marked(color)
    }

    pub(crate) fn mark(&self, color: TraceColor) {
        self.header.mark(color);
    }

    pub(crate) fn is_rooted(&self) -> bool {
        self.header.is_rooted()
    }
}
