//! Tracing and finalization hooks for host payloads.

use core::sync::atomic::{
    AtomicBool, AtomicI8, AtomicI16, AtomicI32, AtomicI64, AtomicIsize, AtomicU8, AtomicU16,
    AtomicU32, AtomicU64, AtomicUsize,
};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::symbol::Symbol;
use crate::value::{Identity, Object, Value};

/// The color live cells are painted with during the current cycle.
///
/// The meaning of the two colors flips after every collection, so the
/// survivors of one cycle are automatically unmarked for the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraceColor {
    #[default]
    White,
    Black,
}

impl TraceColor {
    pub fn flip(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

/// Receives the strong edges of a traced value.
pub struct Tracer<'a> {
    grey: &'a mut Vec<Identity>,
}

impl<'a> Tracer<'a> {
    pub(crate) fn new(grey: &'a mut Vec<Identity>) -> Self {
        Self { grey }
    }

    /// Records a strong edge to `value`. Values without an identity are
    /// ignored.
    pub fn edge(&mut self, value: &Value) {
        if let Some(identity) = value.as_identity() {
            self.grey.push(identity);
        }
    }

    pub fn identity(&mut self, identity: Identity) {
        self.grey.push(identity);
    }
}

/// Cleanup run on a payload right before its slot is reclaimed.
///
/// Finalizers have no access to the heap, so they cannot resurrect anything.
pub trait Finalize {
    fn finalize(&self) {}
}

/// Enumerates the heap references a payload keeps alive.
///
/// Anything not reported to the [`Tracer`] is invisible to the collector: an
/// object reachable only through an untraced field is collected, and its
/// handle goes stale.
pub trait Trace: Finalize {
    fn trace(&self, tracer: &mut Tracer<'_>);

    fn run_finalizer(&self) {
        Finalize::finalize(self);
    }
}

macro_rules! simple_empty_finalize_trace {
    ($($T:ty),*) => {
        $(
            impl Finalize for $T {}

            impl Trace for $T {
                #[inline]
                fn trace(&self, _tracer: &mut Tracer<'_>) {}
            }
        )*
    }
}

simple_empty_finalize_trace![
    (),
    bool,
    isize,
    usize,
    i8,
    u8,
    i16,
    u16,
    i32,
    u32,
    i64,
    u64,
    i128,
    u128,
    f32,
    f64,
    char,
    String,
    Rc<str>,
    AtomicBool,
    AtomicIsize,
    AtomicUsize,
    AtomicI8,
    AtomicU8,
    AtomicI16,
    AtomicU16,
    AtomicI32,
    AtomicU32,
    AtomicI64,
    AtomicU64
];

impl Finalize for Value {}

impl Trace for Value {
    fn trace(&self, tracer: &mut Tracer<'_>) {
        tracer.edge(self);
    }
}

impl Finalize for Identity {}

impl Trace for Identity {
    fn trace(&self, tracer: &mut Tracer<'_>) {
        tracer.identity(*self);
    }
}

impl Finalize for Object {}

impl Trace for Object {
    fn trace(&self, tracer: &mut Tracer<'_>) {
        tracer.identity(Identity::Object(*self));
    }
}

impl Finalize for Symbol {}

impl Trace for Symbol {
    fn trace(&self, tracer: &mut Tracer<'_>) {
        tracer.identity(Identity::Symbol(*self));
    }
}

impl<T: Trace> Finalize for Option<T> {}

impl<T: Trace> Trace for Option<T> {
    fn trace(&self, tracer: &mut Tracer<'_>) {
        if let Some(value) = self {
            value.trace(tracer);
        }
    }

    fn run_finalizer(&self) {
        if let Some(value) = self {
            value.run_finalizer();
        }
    }
}

impl<T: Trace> Finalize for Box<T> {}

impl<T: Trace> Trace for Box<T> {
    fn trace(&self, tracer: &mut Tracer<'_>) {
        (**self).trace(tracer);
    }

    fn run_finalizer(&self) {
        (**self).run_finalizer();
    }
}

impl<T: Trace> Finalize for Vec<T> {}

impl<T: Trace> Trace for Vec<T> {
    fn trace(&self, tracer: &mut Tracer<'_>) {
        for value in self {
            value.trace(tracer);
        }
    }

    fn run_finalizer(&self) {
        for value in self {
            value.run_finalizer();
        }
    }
}

impl<T: Trace> Finalize for VecDeque<T> {}

impl<T: Trace> Trace for VecDeque<T> {
    fn trace(&self, tracer: &mut Tracer<'_>) {
        for value in self {
            value.trace(tracer);
        }
    }

    fn run_finalizer(&self) {
        for value in self {
            value.run_finalizer();
        }
    }
}

impl<A: Trace, B: Trace> Finalize for (A, B) {}

impl<A: Trace, B: Trace> Trace for (A, B) {
    fn trace(&self, tracer: &mut Tracer<'_>) {
        self.0.trace(tracer);
        self.1.trace(tracer);
    }

    fn run_finalizer(&self) {
        self.0.run_finalizer();
        self.1.run_finalizer();
    }
}
