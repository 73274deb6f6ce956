//! Compile-time projections over result types.
//!
//! Nothing here exists at runtime. The traits let generic code (and the
//! async crate's chaining signatures) name the success and error types of a
//! result, or of a function returning one, without spelling them out.

use crate::sync_result::SyncResult;

/// A type with a success track and an error track.
pub trait ResultLike {
    type Ok;
    type Err;
}

impl<O, E> ResultLike for SyncResult<O, E> {
    type Ok = O;
    type Err = E;
}

impl<O, E> ResultLike for Result<O, E> {
    type Ok = O;
    type Err = E;
}

/// The success type of a result-like type.
pub type OkOf<R> = <R as ResultLike>::Ok;

/// The error type of a result-like type.
pub type ErrOf<R> = <R as ResultLike>::Err;

/// A function whose return type is result-like.
///
/// `Args` is the tuple of argument types; it only exists so that impls for
/// different arities do not overlap.
pub trait InferFn<Args> {
    type Output: ResultLike;
}

macro_rules! impl_infer_fn {
    ($($arg:ident),*) => {
        impl<Func, Ret, $($arg),*> InferFn<($($arg,)*)> for Func
        where
            Func: FnOnce($($arg),*) -> Ret,
            Ret: ResultLike,
        {
            type Output = Ret;
        }
    };
}

impl_infer_fn!();
impl_infer_fn!(A);
impl_infer_fn!(A, B);
impl_infer_fn!(A, B, C);
impl_infer_fn!(A, B, C, D);

/// Success type returned by `F` when called with `Args`.
pub type ReturnOk<F, Args> = OkOf<<F as InferFn<Args>>::Output>;

/// Error type returned by `F` when called with `Args`.
pub type ReturnErr<F, Args> = ErrOf<<F as InferFn<Args>>::Output>;

/// Identity on functions returning a result.
///
/// Returns `f` untouched. Wrapping a closure in `infer_sync` pins its
/// return type to a result-like type at the definition site, so the success
/// and error types can be read back with [`ReturnOk`] and [`ReturnErr`].
pub fn infer_sync<Args, F>(f: F) -> F
where
    F: InferFn<Args>,
{
    f
}
