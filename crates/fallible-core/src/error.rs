//! Usage-contract violations.
//!
//! Domain errors live in the `E` slot of a result and are never inspected
//! here. The errors in this module are different: they mean the calling code
//! (or this crate) broke the container's contract, so they are raised as
//! panics instead of being folded into a result.

use std::fmt;

use crate::panic::Panic;

/// Which of the two payload slots an operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Ok,
    Err,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKind::Ok => f.write_str("ok"),
            SlotKind::Err => f.write_str("err"),
        }
    }
}

/// A broken invariant or misuse of a result container.
#[derive(Debug, thiserror::Error)]
pub enum ContractViolation {
    /// The discriminant pointed at a slot holding the empty sentinel.
    #[error("attempted to read the empty {0} slot of a result")]
    EmptySlot(SlotKind),

    /// A tee callback panicked instead of returning.
    #[error("side-effect callback must not fail: {source}")]
    SideEffectPanicked {
        #[source]
        source: Panic,
    },

    /// A result was assembled with both slots filled, or both empty.
    #[error("a result must hold exactly one of a value or an error")]
    AmbiguousSlots,
}

impl ContractViolation {
    /// Raise the violation through the panic channel.
    ///
    /// The payload is the violation itself, so code that catches the unwind
    /// can downcast it back to a `ContractViolation`.
    pub(crate) fn raise(self) -> ! {
        tracing::error!(violation = %self, "result contract violated");
        std::panic::panic_any(self)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_violation_messages() {
        assert_eq!(
            ContractViolation::EmptySlot(SlotKind::Err).to_string(),
            "attempted to read the empty err slot of a result"
        );
        assert_eq!(
            ContractViolation::AmbiguousSlots.to_string(),
            "a result must hold exactly one of a value or an error"
        );
    }

    #[test]
    fn test_side_effect_violation_keeps_cause() {
        let violation = ContractViolation::SideEffectPanicked {
            source: Panic::new(Box::new("tee blew up")),
        };
        assert!(violation.to_string().contains("tee blew up"));

        let cause = violation.source().expect("cause should be retained");
        assert_eq!(cause.to_string(), "tee blew up");
    }
}
