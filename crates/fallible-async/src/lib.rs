//! Deferred counterpart of [`fallible_core::SyncResult`].
//!
//! An [`AsyncResult`] wraps a future that eventually yields a `SyncResult`
//! and exposes the same combinators. Chaining never polls anything; the
//! work happens when the final container is awaited.
//!
//! ```
//! use fallible_async::{ok, ok_sync};
//!
//! # futures::executor::block_on(async {
//! let doubled = ok::<_, String>(5).and_then(|v| ok_sync(v * 2));
//! assert_eq!(doubled.unwrap().await, 10);
//! # });
//! ```

mod async_result;
mod constructors;
mod shared;

pub use async_result::AsyncResult;
pub use constructors::{err, from_try_future, infer, ok, safe_try, safe_try_with, to_async};
pub use shared::SharedAsyncResult;

pub use fallible_core::{
    err_sync, infer_sync, ok_sync, safe_try_sync, safe_try_sync_with, ContractViolation, Either,
    ErrOf, IntoDeferred, OkOf, Panic, ResultLike, Status, SyncResult,
};
