//! The deferred result container.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use either::Either;
use fallible_core::{err_sync, ok_sync, IntoDeferred, ResultLike, SyncResult};
use futures::future::BoxFuture;
use futures::FutureExt;

use crate::shared::SharedAsyncResult;

/// A result whose outcome is produced by a future.
///
/// Combinators attach a continuation and return immediately; nothing runs
/// until the container (or something built from it) is awaited. Awaiting an
/// `AsyncResult` yields the settled [`SyncResult`].
#[must_use = "an AsyncResult does nothing unless awaited"]
pub struct AsyncResult<O, E> {
    inner: BoxFuture<'static, SyncResult<O, E>>,
}

impl<O, E> AsyncResult<O, E>
where
    O: Send + 'static,
    E: Send + 'static,
{
    /// Wrap a future that resolves to a result.
    pub fn new<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = SyncResult<O, E>> + Send + 'static,
    {
        Self {
            inner: future.boxed(),
        }
    }

    /// Derive a new container by transforming the settled result.
    ///
    /// `f` runs synchronously, once, as soon as the underlying result is
    /// available.
    fn then_sync<U, F>(
        self,
        f: impl FnOnce(SyncResult<O, E>) -> SyncResult<U, F> + Send + 'static,
    ) -> AsyncResult<U, F>
    where
        U: Send + 'static,
        F: Send + 'static,
    {
        AsyncResult::new(self.inner.map(f))
    }

    pub async fn is_ok(self) -> bool {
        self.await.is_ok()
    }

    pub async fn is_err(self) -> bool {
        self.await.is_err()
    }

    /// Resolve to the success value.
    ///
    /// # Panics
    ///
    /// Panics with the held error when the result settles on the error track.
    pub async fn unwrap(self) -> O
    where
        E: fmt::Debug,
    {
        self.await.unwrap()
    }

    pub async fn unwrap_err(self) -> E
    where
        O: fmt::Debug,
    {
        self.await.unwrap_err()
    }

    pub async fn unwrap_or(self, fallback: O) -> O {
        self.await.unwrap_or(fallback)
    }

    pub async fn match_with<R>(self, on_ok: impl FnOnce(O) -> R, on_err: impl FnOnce(E) -> R) -> R {
        self.await.match_with(on_ok, on_err)
    }

    /// Resolve to a standard `Result`.
    pub async fn into_result(self) -> Result<O, E> {
        self.await.into_result()
    }

    pub fn map<U>(self, f: impl FnOnce(O) -> U + Send + 'static) -> AsyncResult<U, E>
    where
        U: Send + 'static,
    {
        self.then_sync(move |result| result.map(f))
    }

    pub fn map_err<F>(self, f: impl FnOnce(E) -> F + Send + 'static) -> AsyncResult<O, F>
    where
        F: Send + 'static,
    {
        self.then_sync(move |result| result.map_err(f))
    }

    /// Chain a step sharing this error type.
    ///
    /// `f` may return a [`SyncResult`], another `AsyncResult`, or any future
    /// resolving to a `SyncResult`.
    pub fn and_then<R>(self, f: impl FnOnce(O) -> R + Send + 'static) -> AsyncResult<R::Ok, E>
    where
        R: IntoDeferred<Err = E>,
    {
        AsyncResult::new(async move {
            match self.await.into_result() {
                Ok(value) => f(value).into_deferred().await,
                Err(error) => err_sync(error),
            }
        })
    }

    /// Chain a step with its own error type, widening the error track to
    /// `Either<E, R::Err>`.
    pub fn and_then_widen<R>(
        self,
        f: impl FnOnce(O) -> R + Send + 'static,
    ) -> AsyncResult<R::Ok, Either<E, R::Err>>
    where
        R: IntoDeferred,
    {
        AsyncResult::new(async move {
            match self.await.into_result() {
                Ok(value) => f(value).into_deferred().await.map_err(Either::Right),
                Err(error) => err_sync(Either::Left(error)),
            }
        })
    }

    /// Recover from an error with a step that may fail differently.
    pub fn or_else<R>(self, f: impl FnOnce(E) -> R + Send + 'static) -> AsyncResult<O, R::Err>
    where
        R: IntoDeferred<Ok = O>,
    {
        AsyncResult::new(async move {
            match self.await.into_result() {
                Ok(value) => ok_sync(value),
                Err(error) => f(error).into_deferred().await,
            }
        })
    }

    /// Recover with a step whose success type differs, widening the success
    /// track to `Either<O, R::Ok>`.
    pub fn or_else_widen<R>(
        self,
        f: impl FnOnce(E) -> R + Send + 'static,
    ) -> AsyncResult<Either<O, R::Ok>, R::Err>
    where
        R: IntoDeferred,
    {
        AsyncResult::new(async move {
            match self.await.into_result() {
                Ok(value) => ok_sync(Either::Left(value)),
                Err(error) => f(error).into_deferred().await.map(Either::Right),
            }
        })
    }

    /// Observe the success value once it settles.
    ///
    /// # Panics
    ///
    /// A panicking `f` makes the awaiting task panic with
    /// [`ContractViolation::SideEffectPanicked`](fallible_core::ContractViolation).
    pub fn and_tee(self, f: impl FnOnce(&O) + Send + 'static) -> Self {
        self.then_sync(move |result| result.and_tee(f))
    }

    /// Observe the error once it settles. Same contract as
    /// [`and_tee`](Self::and_tee).
    pub fn or_tee(self, f: impl FnOnce(&E) + Send + 'static) -> Self {
        self.then_sync(move |result| result.or_tee(f))
    }

    /// Widen the error type at the call site.
    pub fn widen_err<W>(self) -> AsyncResult<O, W>
    where
        E: Into<W>,
        W: Send + 'static,
    {
        self.map_err(Into::into)
    }

    /// Turn this container into a cloneable handle whose forks all observe
    /// the same single outcome.
    pub fn shared(self) -> SharedAsyncResult<O, E>
    where
        O: Clone + Sync,
        E: Clone + Sync,
    {
        SharedAsyncResult::new(self)
    }
}

impl<O, E> Future for AsyncResult<O, E> {
    type Output = SyncResult<O, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl<O, E> ResultLike for AsyncResult<O, E> {
    type Ok = O;
    type Err = E;
}

impl<O, E> fmt::Debug for AsyncResult<O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncResult").finish_non_exhaustive()
    }
}
