//! Normalizing continuations into futures.
//!
//! An async chain step may hand back a ready [`SyncResult`] or any future
//! that resolves to one. [`IntoDeferred`] folds both shapes into a single
//! boxed future so chaining code only deals with one kind of value.

use std::future::Future;

use futures::future::{self, BoxFuture};
use futures::FutureExt;

use crate::sync_result::SyncResult;

/// A value that can be turned into a future of a [`SyncResult`].
pub trait IntoDeferred {
    type Ok: Send + 'static;
    type Err: Send + 'static;

    fn into_deferred(self) -> BoxFuture<'static, SyncResult<Self::Ok, Self::Err>>;
}

impl<O, E> IntoDeferred for SyncResult<O, E>
where
    O: Send + 'static,
    E: Send + 'static,
{
    type Ok = O;
    type Err = E;

    fn into_deferred(self) -> BoxFuture<'static, SyncResult<O, E>> {
        future::ready(self).boxed()
    }
}

impl<Fut, O, E> IntoDeferred for Fut
where
    Fut: Future<Output = SyncResult<O, E>> + Send + 'static,
    O: Send + 'static,
    E: Send + 'static,
{
    type Ok = O;
    type Err = E;

    fn into_deferred(self) -> BoxFuture<'static, SyncResult<O, E>> {
        self.boxed()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::sync_result::{err_sync, ok_sync};

    #[test]
    fn test_ready_result() {
        let deferred = ok_sync::<_, ()>(1).into_deferred();
        assert_eq!(block_on(deferred), ok_sync(1));
    }

    #[test]
    fn test_future_of_result() {
        let deferred = async { err_sync::<u8, _>("late") }.into_deferred();
        assert_eq!(block_on(deferred), err_sync("late"));
    }
}
