//! Entry points into the async track.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use fallible_core::{err_sync, ok_sync, InferFn, Panic, SyncResult};
use futures::{FutureExt, TryFuture, TryFutureExt};

use crate::async_result::AsyncResult;

/// An async result already settled on the success track.
pub fn ok<O, E>(value: O) -> AsyncResult<O, E>
where
    O: Send + 'static,
    E: Send + 'static,
{
    to_async(ok_sync(value))
}

/// An async result already settled on the error track.
pub fn err<O, E>(error: E) -> AsyncResult<O, E>
where
    O: Send + 'static,
    E: Send + 'static,
{
    to_async(err_sync(error))
}

/// Lift a computed [`SyncResult`] into an immediately ready [`AsyncResult`].
pub fn to_async<O, E>(result: SyncResult<O, E>) -> AsyncResult<O, E>
where
    O: Send + 'static,
    E: Send + 'static,
{
    tracing::trace!(ok = result.is_ok(), "lifting a settled result");
    AsyncResult::new(futures::future::ready(result))
}

/// Adapt a future of a standard `Result`.
///
/// This is how fallible async code written with `?` enters the container:
/// an `Err` output lands on the error track as is.
pub fn from_try_future<Fut>(future: Fut) -> AsyncResult<Fut::Ok, Fut::Error>
where
    Fut: TryFuture + Send + 'static,
    Fut::Ok: Send + 'static,
    Fut::Error: Send + 'static,
{
    tracing::trace!("adapting a fallible future");
    AsyncResult::new(TryFutureExt::into_future(future).map(SyncResult::from))
}

/// Run an async operation, capturing panics as errors.
///
/// Both a panic while calling `f` and a panic while the returned future is
/// polled end up on the error track as a [`Panic`].
///
/// The future's output always lands on the success track, so a future
/// resolving to `Result<T, E>` yields `AsyncResult<Result<T, E>, Panic>`. Use
/// [`from_try_future`] when `Err` outputs belong on the error track.
pub fn safe_try<O, Fut>(f: impl FnOnce() -> Fut) -> AsyncResult<O, Panic>
where
    Fut: Future<Output = O> + Send + 'static,
    O: Send + 'static,
{
    safe_try_with(f, |panic| panic)
}

/// Like [`safe_try`], passing a captured panic through `map_error`.
pub fn safe_try_with<O, E, Fut>(
    f: impl FnOnce() -> Fut,
    map_error: impl FnOnce(Panic) -> E + Send + 'static,
) -> AsyncResult<O, E>
where
    Fut: Future<Output = O> + Send + 'static,
    O: Send + 'static,
    E: Send + 'static,
{
    let future = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(future) => future,
        Err(payload) => {
            let caught = Panic::new(payload);
            tracing::debug!(panic = %caught, "safe_try captured a panic while starting");
            return err(map_error(caught));
        }
    };

    AsyncResult::new(async move {
        match AssertUnwindSafe(future).catch_unwind().await {
            Ok(value) => ok_sync(value),
            Err(payload) => {
                let caught = Panic::new(payload);
                tracing::debug!(panic = %caught, "safe_try captured a panic while polling");
                err_sync(map_error(caught))
            }
        }
    })
}

/// Identity on functions returning a result-like value, including
/// [`AsyncResult`].
pub fn infer<Args, F>(f: F) -> F
where
    F: InferFn<Args>,
{
    f
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use fallible_core::OkOf;
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn test_ok_err_to_async() {
        assert_eq!(block_on(ok::<_, ()>(5)), ok_sync(5));
        assert_eq!(block_on(err::<(), _>("e")), err_sync("e"));
        assert_eq!(block_on(to_async(ok_sync::<_, ()>('x'))), ok_sync('x'));
    }

    #[test]
    fn test_from_try_future() {
        let good = from_try_future(async { Ok::<_, String>(3) });
        assert_eq!(block_on(good), ok_sync(3));

        let bad = from_try_future(async { "x".parse::<u8>() });
        assert!(block_on(bad).is_err());
    }

    #[test]
    fn test_safe_try_value() {
        let result = safe_try(|| async { 10 });
        assert_eq!(block_on(result.unwrap()), 10);
    }

    #[test]
    fn test_safe_try_panic_while_starting() {
        let result = safe_try(|| -> futures::future::Ready<u8> { panic!("before future") });
        let caught = block_on(result.unwrap_err());
        assert_eq!(caught.message(), "before future");
    }

    async fn explode(message: &'static str) -> u8 {
        panic!("{message}")
    }

    #[test]
    fn test_safe_try_panic_while_polling() {
        let result = safe_try(|| explode("inside future"));
        let caught = block_on(result.unwrap_err());
        assert_eq!(caught.message(), "inside future");
    }

    #[test]
    fn test_safe_try_with_maps_error() {
        let wrap = |p: Panic| format!("wrapped: {}", p.message());
        let result = safe_try_with(|| explode("boom"), wrap);
        assert_eq!(block_on(result), err_sync("wrapped: boom".to_string()));

        let mapped = Arc::new(AtomicBool::new(false));
        let flag = mapped.clone();
        let result = safe_try_with(
            || async { 2u8 },
            move |_| {
                flag.store(true, Ordering::SeqCst);
            },
        );
        assert_eq!(block_on(result), ok_sync(2));
        assert!(!mapped.load(Ordering::SeqCst));
    }

    #[test]
    fn test_safe_try_with_maps_panic_while_starting() {
        #[derive(Debug, PartialEq)]
        enum StartError {
            Refused(String),
        }

        let result = safe_try_with(
            || -> futures::future::Ready<u8> { panic!("no connection") },
            |p| StartError::Refused(p.message().to_string()),
        );
        let error = block_on(result.unwrap_err());
        assert_eq!(error, StartError::Refused("no connection".to_string()));
    }

    #[test]
    fn test_safe_try_keeps_result_output_on_success_track() {
        let result = safe_try(|| async { "x".parse::<u8>() });
        let inner = block_on(result.unwrap());
        assert!(inner.is_err());
    }

    #[test]
    fn test_infer_over_async_results() {
        let fetch = infer(|id: u32| -> AsyncResult<String, u32> {
            if id == 0 {
                err(id)
            } else {
                ok(format!("user-{id}"))
            }
        });
        let name: OkOf<AsyncResult<String, u32>> = block_on(fetch(7).unwrap());
        assert_eq!(name, "user-7");
        assert!(block_on(fetch(0).is_err()));
    }
}
