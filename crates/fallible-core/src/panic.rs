//! Captured panics.

use std::any::Any;
use std::fmt;
use std::panic;
use std::sync::{Mutex, PoisonError};

use crate::error::ContractViolation;

/// A panic caught at a safe execution boundary.
///
/// Holds the raw payload handed to the unwinder together with a rendered
/// message. The payload sits behind a mutex so that `Panic` is `Sync` and can
/// travel inside `anyhow::Error` and friends.
#[derive(thiserror::Error)]
#[error("{message}")]
pub struct Panic {
    message: String,
    payload: Mutex<Box<dyn Any + Send>>,
}

impl Panic {
    /// Wrap a payload as returned by `std::panic::catch_unwind`.
    pub fn new(payload: Box<dyn Any + Send>) -> Self {
        let message = render_payload(&*payload);
        Self {
            message,
            payload: Mutex::new(payload),
        }
    }

    /// The panic message, or a placeholder for payloads that carry none.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the raw payload is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.payload
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is::<T>()
    }

    /// Recover the raw payload.
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Try to recover the payload as a `T`, handing `self` back on mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.into_payload().downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(payload) => Err(Panic::new(payload)),
        }
    }

    /// Continue unwinding with the original payload.
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.into_payload())
    }
}

fn render_payload(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(violation) = payload.downcast_ref::<ContractViolation>() {
        violation.to_string()
    } else {
        "Box<dyn Any>".to_string()
    }
}

impl From<Box<dyn Any + Send>> for Panic {
    fn from(payload: Box<dyn Any + Send>) -> Self {
        Panic::new(payload)
    }
}

impl fmt::Debug for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panic")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Run `f`, turning an unwind into a [`Panic`].
///
/// The closure is asserted unwind-safe: whatever it captured is handed back
/// to the caller only through the returned error, never reused behind its
/// back.
pub(crate) fn catch<T>(f: impl FnOnce() -> T) -> Result<T, Panic> {
    panic::catch_unwind(panic::AssertUnwindSafe(f)).map_err(Panic::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_str_and_string() {
        let caught = catch(|| panic!("static message")).unwrap_err();
        assert_eq!(caught.message(), "static message");

        let code = 7;
        let caught = catch(|| panic!("formatted {code}")).unwrap_err();
        assert_eq!(caught.message(), "formatted 7");
    }

    #[test]
    fn test_downcast_custom_payload() {
        #[derive(Debug, PartialEq)]
        struct Custom(u8);

        let caught = catch(|| panic::panic_any(Custom(3))).unwrap_err();
        assert_eq!(caught.message(), "Box<dyn Any>");
        assert!(caught.is::<Custom>());

        let caught = caught.downcast::<String>().unwrap_err();
        assert_eq!(caught.downcast::<Custom>().unwrap(), Custom(3));
    }

    #[test]
    fn test_catch_passes_through_value() {
        assert_eq!(catch(|| 42).unwrap(), 42);
    }

    #[test]
    fn test_resume_rethrows_original_payload() {
        let caught = catch(|| panic!("again")).unwrap_err();
        let rethrown = catch(move || caught.resume()).unwrap_err();
        assert_eq!(rethrown.message(), "again");
    }

    #[test]
    fn test_display_and_error_source() {
        use std::error::Error;

        let caught = catch(|| panic!("rendered")).unwrap_err();
        assert_eq!(caught.to_string(), "rendered");
        assert!(caught.source().is_none());
    }

    #[test]
    fn test_panic_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<Panic>();
    }
}
