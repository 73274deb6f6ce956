//! Fan-out over a single async result.

use std::fmt;

use futures::future::Shared;
use futures::FutureExt;

use crate::async_result::AsyncResult;

/// A cloneable handle to one in-flight [`AsyncResult`].
///
/// The wrapped computation runs once, driven by whichever fork is polled
/// first; every fork then observes a clone of the same settled result.
#[derive(Clone)]
pub struct SharedAsyncResult<O, E>
where
    O: Clone,
    E: Clone,
{
    inner: Shared<AsyncResult<O, E>>,
}

impl<O, E> SharedAsyncResult<O, E>
where
    O: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(result: AsyncResult<O, E>) -> Self {
        Self {
            inner: FutureExt::shared(result),
        }
    }

    /// A new [`AsyncResult`] observing the shared outcome.
    pub fn fork(&self) -> AsyncResult<O, E> {
        AsyncResult::new(self.inner.clone())
    }

    /// Number of live handles (forks that are still pending included).
    pub fn strong_count(&self) -> Option<usize> {
        self.inner.strong_count()
    }
}

impl<O: Clone, E: Clone> fmt::Debug for SharedAsyncResult<O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedAsyncResult")
            .field("settled", &self.inner.peek().is_some())
            .finish()
    }
}
