use core::{cell::Cell, fmt};

use crate::collectors::mark_sweep::TraceColor;

// NOTE on current approach: the two color bits are either all clear (white)
// or all set (black). The trace color alternates between cycles, so "marked"
// means "painted with the current trace color".
const WHITE_MARK_BITS: u8 = 0b0000_0000;
const BLACK_MARK_BITS: u8 = 0b0000_0011;

#[derive(Debug, Clone, Copy)]
pub struct HeaderFlags(pub(crate) u8);

impl HeaderFlags {
    pub const fn new_white() -> Self {
        Self(WHITE_MARK_BITS)
    }

    pub const fn new_black() -> Self {
        Self(BLACK_MARK_BITS)
    }

    pub const fn is_white(self) -> bool {
        self.0 & BLACK_MARK_BITS == WHITE_MARK_BITS
    }

    pub const fn is_black(self) -> bool {
        self.0 & BLACK_MARK_BITS == BLACK_MARK_BITS
    }

    pub const fn mark_black(self) -> Self {
        Self(self.0 | BLACK_MARK_BITS)
    }

    pub const fn mark_white(self) -> Self {
        // clear the color bits while preserving any other flag bits
        Self(self.0 & !BLACK_MARK_BITS)
    }

    pub const fn has_color(self, color: TraceColor) -> bool {
        match color {
            TraceColor::White => self.is_white(),
            TraceColor::Black => self.is_black(),
        }
    }
}

/// Mark state and root count shared by every heap cell.
pub struct GcHeader {
    pub(crate) flags: Cell<HeaderFlags>,
    root_count: Cell<u32>,
}

impl fmt::Debug for GcHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GcHeader {{ flags: {:08b}, roots: {} }} ",
            self.flags.get().0,
            self.root_count.get()
        )
    }
}

impl GcHeader {
    pub const fn new_white() -> Self {
        Self {
            flags: Cell::new(HeaderFlags::new_white()),
            root_count: Cell::new(0),
        }
    }

    pub const fn new_black() -> Self {
        Self {
            flags: Cell::new(HeaderFlags::new_black()),
            root_count: Cell::new(0),
        }
    }

    /// A header that is unmarked with respect to `color`.
    pub const fn new_unmarked(color: TraceColor) -> Self {
        // NOTE: we inverse the color when initializing the header, a cell born
        // during a white epoch starts black and only turns white once traced
        match color {
            TraceColor::White => Self::new_black(),
            TraceColor::Black => Self::new_white(),
        }
    }

    pub fn inc_roots(&self) {
        // crash on overflow rather than silently unrooting
        self.root_count.set(
            self.root_count
                .get()
                .checked_add(1)
                .expect("root count overflow: more than u32::MAX roots on a single cell"),
        );
    }

    pub fn dec_roots(&self) {
        // an unbalanced unroot must not wrap into a huge root count
        self.root_count.set(self.root_count.get().saturating_sub(1));
    }

    pub fn is_rooted(&self) -> bool {
        self.root_count.get() > 0
    }

    pub fn roots(&self) -> u32 {
        self.root_count.get()
    }

    pub fn mark(&self, color: TraceColor) {
        match color {
            TraceColor::White => self.flags.set(self.flags.get().mark_white()),
            TraceColor::Black => self.flags.set(self.flags.get().mark_black()),
        }
    }

    pub fn is_marked(&self, color: TraceColor) -> bool {
        self.flags.get().has_color(color)
    }

    pub const fn is_white(&self) -> bool {
        self.flags.get().is_white()
    }

    pub const fn is_black(&self) -> bool {
        self.flags.get().is_black()
    }
}
