//! The empty-slot sentinel.
//!
//! A [`SyncResult`](crate::SyncResult) always carries two slots, one for the
//! success value and one for the error. The slot that is not in use holds the
//! [`Empty`] token instead of a payload. `Empty` is its own type with a private
//! field, so it can never be mistaken for caller data (including `()` or
//! `None`, which are perfectly good payloads).

use std::fmt;

use crate::error::{ContractViolation, SlotKind};

/// Marker occupying the unused slot of a result.
///
/// Only this crate can construct it; callers can observe it through
/// [`Slot::Empty`] but never forge one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Empty {
    _private: (),
}

/// The single sentinel instance.
pub(crate) const EMPTY: Empty = Empty { _private: () };

impl fmt::Debug for Empty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<empty>")
    }
}

/// One of the two payload slots of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot<T> {
    /// The slot holds a payload.
    Filled(T),
    /// The slot holds the sentinel.
    Empty(Empty),
}

impl<T> Slot<T> {
    pub(crate) fn filled(value: T) -> Self {
        Slot::Filled(value)
    }

    pub(crate) fn empty() -> Self {
        Slot::Empty(EMPTY)
    }

    /// Whether the slot holds the sentinel.
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty(_))
    }

    /// Borrow the payload, if any.
    pub fn as_ref(&self) -> Slot<&T> {
        match self {
            Slot::Filled(value) => Slot::Filled(value),
            Slot::Empty(empty) => Slot::Empty(*empty),
        }
    }

    /// Convert into an `Option`, dropping the sentinel.
    pub fn into_option(self) -> Option<T> {
        match self {
            Slot::Filled(value) => Some(value),
            Slot::Empty(_) => None,
        }
    }

    /// Take the payload out of a slot that must be filled.
    ///
    /// Reading the sentinel means the status and the slots disagree, which
    /// only a bug in this crate can cause. That is raised as a
    /// [`ContractViolation::EmptySlot`] panic.
    pub(crate) fn take(self, kind: SlotKind) -> T {
        match self {
            Slot::Filled(value) => value,
            Slot::Empty(_) => ContractViolation::EmptySlot(kind).raise(),
        }
    }
}

impl<T> From<Option<T>> for Slot<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Slot::filled(value),
            None => Slot::empty(),
        }
    }
}
