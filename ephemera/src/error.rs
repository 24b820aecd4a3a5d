//! Errors raised by the weak primitives and the heap.

use crate::alloc::ArenaAllocError;

/// The fixed classification of a synchronous `TypeError`.
///
/// A registered symbol rejected as a key fails with exactly the same kind as
/// a string or a number would, so callers cannot probe registry membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum TypeErrorKind {
    /// `set`/`add` on a weak map or weak set with a key the classifier rejects.
    #[error("invalid value used as weak map key or weak set member")]
    InvalidWeakKey,
    /// Weak reference construction or `register` with a rejected target.
    #[error("invalid value used as weak reference or finalization target")]
    InvalidWeakTarget,
    /// `register` where the target and the held value are the same value.
    #[error("finalization target and held value must not be the same")]
    SelfReferentialFinalization,
    /// `register`/`unregister` with a provided token the classifier rejects.
    #[error("invalid value used as unregister token")]
    InvalidUnregisterToken,
    /// The receiver is not an instance of the expected weak primitive.
    #[error("receiver is not an instance of the expected weak primitive")]
    InvalidReceiver,
    /// A weak primitive constructor invoked as a plain call.
    #[error("constructor requires 'new'")]
    ConstructorWithoutNew,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("TypeError: {0}")]
    Type(#[from] TypeErrorKind),
    #[error(transparent)]
    Alloc(#[from] ArenaAllocError),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
