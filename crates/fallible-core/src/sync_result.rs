//! The synchronous result container.

use std::fmt;

use either::Either;

use crate::empty::Slot;
use crate::error::{ContractViolation, SlotKind};
use crate::panic::{self, Panic};

/// Which track a result is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Err,
}

/// An immutable container holding exactly one of a success value or an error.
///
/// The discriminant is fixed at construction. The slot that is not in use
/// holds the [`Empty`](crate::Empty) sentinel, so `()` and `None` remain
/// valid payloads on either track. Every combinator consumes the container
/// and returns a new one.
#[must_use = "this result may hold an error that should be handled"]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SyncResult<O, E> {
    status: Status,
    ok: Slot<O>,
    err: Slot<E>,
}

/// Build a result on the success track.
pub fn ok_sync<O, E>(value: O) -> SyncResult<O, E> {
    SyncResult {
        status: Status::Ok,
        ok: Slot::filled(value),
        err: Slot::empty(),
    }
}

/// Build a result on the error track.
pub fn err_sync<O, E>(error: E) -> SyncResult<O, E> {
    SyncResult {
        status: Status::Err,
        ok: Slot::empty(),
        err: Slot::filled(error),
    }
}

impl<O, E> SyncResult<O, E> {
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub fn is_err(&self) -> bool {
        self.status == Status::Err
    }

    /// Read view of the success slot.
    pub fn ok_slot(&self) -> Slot<&O> {
        self.ok.as_ref()
    }

    /// Read view of the error slot.
    pub fn err_slot(&self) -> Slot<&E> {
        self.err.as_ref()
    }

    /// Convert into a standard `Result`, reading whichever slot the status
    /// points at.
    ///
    /// Every other operation goes through here, so a status/slot mismatch is
    /// detected in one place.
    pub fn into_result(self) -> Result<O, E> {
        match self.status {
            Status::Ok => Ok(self.ok.take(SlotKind::Ok)),
            Status::Err => Err(self.err.take(SlotKind::Err)),
        }
    }

    pub fn as_ref(&self) -> SyncResult<&O, &E> {
        SyncResult {
            status: self.status,
            ok: self.ok.as_ref(),
            err: self.err.as_ref(),
        }
    }

    /// The success value, if any.
    pub fn ok(self) -> Option<O> {
        self.into_result().ok()
    }

    /// The error, if any.
    pub fn err(self) -> Option<E> {
        self.into_result().err()
    }

    /// Return the success value, panicking with the held error otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the result is on the error track. The panic message carries
    /// the error's `Debug` rendering.
    #[track_caller]
    pub fn unwrap(self) -> O
    where
        E: fmt::Debug,
    {
        match self.into_result() {
            Ok(value) => value,
            Err(error) => unwrap_failed("called `SyncResult::unwrap()` on an error", &error),
        }
    }

    /// Like [`unwrap`](Self::unwrap), with a caller-supplied panic message.
    #[track_caller]
    pub fn expect(self, msg: &str) -> O
    where
        E: fmt::Debug,
    {
        match self.into_result() {
            Ok(value) => value,
            Err(error) => unwrap_failed(msg, &error),
        }
    }

    /// Return the error, panicking with the held value otherwise.
    #[track_caller]
    pub fn unwrap_err(self) -> E
    where
        O: fmt::Debug,
    {
        match self.into_result() {
            Ok(value) => unwrap_failed("called `SyncResult::unwrap_err()` on a value", &value),
            Err(error) => error,
        }
    }

    pub fn unwrap_or(self, fallback: O) -> O {
        self.into_result().unwrap_or(fallback)
    }

    pub fn unwrap_or_else(self, f: impl FnOnce(E) -> O) -> O {
        self.into_result().unwrap_or_else(f)
    }

    /// Call exactly one of `on_ok` or `on_err` with the populated payload.
    pub fn match_with<R>(self, on_ok: impl FnOnce(O) -> R, on_err: impl FnOnce(E) -> R) -> R {
        match self.into_result() {
            Ok(value) => on_ok(value),
            Err(error) => on_err(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(O) -> U) -> SyncResult<U, E> {
        match self.into_result() {
            Ok(value) => ok_sync(f(value)),
            Err(error) => err_sync(error),
        }
    }

    pub fn map_err<F>(self, f: impl FnOnce(E) -> F) -> SyncResult<O, F> {
        match self.into_result() {
            Ok(value) => ok_sync(value),
            Err(error) => err_sync(f(error)),
        }
    }

    /// Chain a fallible step that shares this result's error type.
    pub fn and_then<U>(self, f: impl FnOnce(O) -> SyncResult<U, E>) -> SyncResult<U, E> {
        match self.into_result() {
            Ok(value) => f(value),
            Err(error) => err_sync(error),
        }
    }

    /// Chain a fallible step with its own error type.
    ///
    /// The error track becomes the union of both error types: `Left` for an
    /// error already held here, `Right` for one produced by `f`.
    pub fn and_then_widen<U, F>(
        self,
        f: impl FnOnce(O) -> SyncResult<U, F>,
    ) -> SyncResult<U, Either<E, F>> {
        match self.into_result() {
            Ok(value) => f(value).map_err(Either::Right),
            Err(error) => err_sync(Either::Left(error)),
        }
    }

    /// Recover from an error with a step that may fail differently.
    pub fn or_else<F>(self, f: impl FnOnce(E) -> SyncResult<O, F>) -> SyncResult<O, F> {
        match self.into_result() {
            Ok(value) => ok_sync(value),
            Err(error) => f(error),
        }
    }

    /// Recover with a step whose success type differs from this one.
    pub fn or_else_widen<U, F>(
        self,
        f: impl FnOnce(E) -> SyncResult<U, F>,
    ) -> SyncResult<Either<O, U>, F> {
        match self.into_result() {
            Ok(value) => ok_sync(Either::Left(value)),
            Err(error) => f(error).map(Either::Right),
        }
    }

    /// Observe the success value without changing the result.
    ///
    /// # Panics
    ///
    /// `f` must not panic. If it does, this panics with
    /// [`ContractViolation::SideEffectPanicked`] carrying the original panic.
    pub fn and_tee(self, f: impl FnOnce(&O)) -> Self {
        if let Slot::Filled(value) = self.ok_slot() {
            run_side_effect(|| f(value));
        }
        self
    }

    /// Observe the error without changing the result.
    ///
    /// # Panics
    ///
    /// Same contract as [`and_tee`](Self::and_tee).
    pub fn or_tee(self, f: impl FnOnce(&E)) -> Self {
        if let Slot::Filled(error) = self.err_slot() {
            run_side_effect(|| f(error));
        }
        self
    }

    /// Widen the error type at the call site, e.g. into an application-wide
    /// error enum.
    pub fn widen_err<W>(self) -> SyncResult<O, W>
    where
        E: Into<W>,
    {
        self.map_err(Into::into)
    }
}

impl<O, A, B> SyncResult<O, Either<A, B>> {
    /// Collapse a widened error into one type both sides convert into.
    pub fn flatten_err<W>(self) -> SyncResult<O, W>
    where
        A: Into<W>,
        B: Into<W>,
    {
        self.map_err(Either::either_into)
    }
}

impl<O, E> SyncResult<SyncResult<O, E>, E> {
    pub fn flatten(self) -> SyncResult<O, E> {
        self.and_then(|inner| inner)
    }
}

fn run_side_effect(f: impl FnOnce()) {
    if let Err(source) = panic::catch(f) {
        ContractViolation::SideEffectPanicked { source }.raise();
    }
}

#[track_caller]
fn unwrap_failed(msg: &str, payload: &dyn fmt::Debug) -> ! {
    panic!("{msg}: {payload:?}")
}

impl<O, E> From<Result<O, E>> for SyncResult<O, E> {
    fn from(result: Result<O, E>) -> Self {
        match result {
            Ok(value) => ok_sync(value),
            Err(error) => err_sync(error),
        }
    }
}

impl<O, E> From<SyncResult<O, E>> for Result<O, E> {
    fn from(result: SyncResult<O, E>) -> Self {
        result.into_result()
    }
}

impl<O, E> TryFrom<(Option<O>, Option<E>)> for SyncResult<O, E> {
    type Error = ContractViolation;

    /// Assemble a result from two optional slots, exactly one of which must
    /// be populated.
    fn try_from((ok, err): (Option<O>, Option<E>)) -> Result<Self, Self::Error> {
        match (ok, err) {
            (Some(value), None) => Ok(ok_sync(value)),
            (None, Some(error)) => Ok(err_sync(error)),
            _ => Err(ContractViolation::AmbiguousSlots),
        }
    }
}

impl<O: fmt::Debug, E: fmt::Debug> fmt::Debug for SyncResult<O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.ok_slot(), self.err_slot()) {
            (Slot::Filled(value), _) if self.is_ok() => f.debug_tuple("Ok").field(value).finish(),
            (_, Slot::Filled(error)) if self.is_err() => f.debug_tuple("Err").field(error).finish(),
            (ok, err) => f
                .debug_struct("SyncResult")
                .field("status", &self.status)
                .field("ok", &ok)
                .field("err", &err)
                .finish(),
        }
    }
}

/// Run `f`, capturing a panic as an error.
///
/// This is the boundary between panicking code and result-based code: a
/// normal return lands on the success track, a panic on the error track as a
/// [`Panic`].
pub fn safe_try_sync<O>(f: impl FnOnce() -> O) -> SyncResult<O, Panic> {
    safe_try_sync_with(f, |panic| panic)
}

/// Like [`safe_try_sync`], passing a captured panic through `map_error`.
pub fn safe_try_sync_with<O, E>(
    f: impl FnOnce() -> O,
    map_error: impl FnOnce(Panic) -> E,
) -> SyncResult<O, E> {
    match panic::catch(f) {
        Ok(value) => ok_sync(value),
        Err(caught) => {
            tracing::debug!(panic = %caught, "safe_try_sync captured a panic");
            err_sync(map_error(caught))
        }
    }
}
