//! Dual-track result container.
//!
//! [`SyncResult`] holds either a success value or an error and is consumed
//! through chaining (`map`, `and_then`, `or_else`, tees) instead of panics.
//! [`safe_try_sync`] is the one place where a panic is turned into an error
//! value. Misusing the container itself is reported as a
//! [`ContractViolation`] panic, never folded into a result.
//!
//! [`IntoDeferred`] lets the async layer accept ready results and futures of
//! results interchangeably.

mod deferred;
mod empty;
mod error;
mod infer;
mod panic;
#[cfg(feature = "serde")]
mod serialize;
mod sync_result;

pub use deferred::IntoDeferred;
pub use either::Either;
pub use empty::{Empty, Slot};
pub use error::{ContractViolation, SlotKind};
pub use infer::{infer_sync, ErrOf, InferFn, OkOf, ResultLike, ReturnErr, ReturnOk};
pub use panic::Panic;
pub use sync_result::{err_sync, ok_sync, safe_try_sync, safe_try_sync_with, Status, SyncResult};
