//! Helpers to build steps from plain functions.
//!
//! `map*` wrap a function returning a bare value into a successful result;
//! `try_map*` take functions that already return a `Result`. The
//! `*_or_recover` variants also install an error handler.

use std::future::Future;

use futures::FutureExt;

use super::{AsyncStep, Step};

/// Step that maps the success value.
///
/// ```
/// use pipe_core::*;
///
/// let pipe = empty::<String, ()>().next(map(|v: String| v.len()));
/// assert_eq!(pipe.run("test".into()).unwrap(), Ok(4));
/// ```
pub fn map<TIn, TOut, TErr, F>(f: F) -> Step<TIn, TOut, TErr>
    where F: Fn(TIn) -> TOut + Send + Sync + 'static
{
    Step::new(move |value| Ok(f(value)))
}

/// Like [`map`], recovering upstream failures into a success value.
pub fn map_or_recover<TIn, TOut, TErr, F, R>(f: F, recover: R) -> Step<TIn, TOut, TErr>
    where F: Fn(TIn) -> TOut + Send + Sync + 'static,
          R: Fn(TErr) -> TOut + Send + Sync + 'static
{
    map(f).with_error(move |error| Ok(recover(error)))
}

pub fn try_map<TIn, TOut, TErr, F>(f: F) -> Step<TIn, TOut, TErr>
    where F: Fn(TIn) -> Result<TOut, TErr> + Send + Sync + 'static
{
    Step::new(f)
}

pub fn try_map_or_recover<TIn, TOut, TErr, F, R>(f: F, recover: R) -> Step<TIn, TOut, TErr>
    where F: Fn(TIn) -> Result<TOut, TErr> + Send + Sync + 'static,
          R: Fn(TErr) -> Result<TOut, TErr> + Send + Sync + 'static
{
    Step::new(f).with_error(recover)
}

/// Async step that maps the success value.
pub fn map_async<TIn, TOut, TErr, F, Fut>(f: F) -> AsyncStep<TIn, TOut, TErr>
    where TOut: Send + 'static,
          TErr: Send + 'static,
          F: Fn(TIn) -> Fut + Send + Sync + 'static,
          Fut: Future<Output = TOut> + Send + 'static
{
    AsyncStep::new(move |value| f(value).map(Ok))
}

pub fn map_async_or_recover<TIn, TOut, TErr, F, Fut, R, RFut>(f: F, recover: R) -> AsyncStep<TIn, TOut, TErr>
    where TOut: Send + 'static,
          TErr: Send + 'static,
          F: Fn(TIn) -> Fut + Send + Sync + 'static,
          Fut: Future<Output = TOut> + Send + 'static,
          R: Fn(TErr) -> RFut + Send + Sync + 'static,
          RFut: Future<Output = TOut> + Send + 'static
{
    map_async(f).with_error(move |error| recover(error).map(Ok))
}

pub fn try_map_async<TIn, TOut, TErr, F, Fut>(f: F) -> AsyncStep<TIn, TOut, TErr>
    where F: Fn(TIn) -> Fut + Send + Sync + 'static,
          Fut: Future<Output = Result<TOut, TErr>> + Send + 'static
{
    AsyncStep::new(f)
}

pub fn try_map_async_or_recover<TIn, TOut, TErr, F, Fut, R, RFut>(f: F, recover: R) -> AsyncStep<TIn, TOut, TErr>
    where F: Fn(TIn) -> Fut + Send + Sync + 'static,
          Fut: Future<Output = Result<TOut, TErr>> + Send + 'static,
          R: Fn(TErr) -> RFut + Send + Sync + 'static,
          RFut: Future<Output = Result<TOut, TErr>> + Send + 'static
{
    AsyncStep::new(f).with_error(recover)
}
