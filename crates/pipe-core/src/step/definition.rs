use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

pub(crate) type ReadyFn<A, TOut, TErr> = Arc<dyn Fn(A) -> Result<TOut, TErr> + Send + Sync>;
pub(crate) type DeferredFn<A, TOut, TErr> = Arc<dyn Fn(A) -> BoxFuture<'static, Result<TOut, TErr>> + Send + Sync>;

/// A step handler that either answers right away or returns a pending result.
pub(crate) enum Handler<A, TOut, TErr> {
    Ready(ReadyFn<A, TOut, TErr>),
    Deferred(DeferredFn<A, TOut, TErr>),
}

impl<A, TOut, TErr> Clone for Handler<A, TOut, TErr> {
    fn clone(&self) -> Self {
        match self {
            Self::Ready(f) => Self::Ready(Arc::clone(f)),
            Self::Deferred(f) => Self::Deferred(Arc::clone(f)),
        }
    }
}

/// Synchronous step: a success handler plus an optional error handler.
///
/// Without an error handler a failure reaching this step passes through
/// unchanged to the next one.
pub struct Step<TIn, TOut, TErr> {
    pub(crate) on_value: ReadyFn<TIn, TOut, TErr>,
    pub(crate) on_error: Option<ReadyFn<TErr, TOut, TErr>>,
}

impl<TIn, TOut, TErr> Clone for Step<TIn, TOut, TErr> {
    fn clone(&self) -> Self {
        Self { on_value: Arc::clone(&self.on_value),
               on_error: self.on_error.clone() }
    }
}

impl<TIn, TOut, TErr> Step<TIn, TOut, TErr> {
    pub fn new<F>(on_value: F) -> Self
        where F: Fn(TIn) -> Result<TOut, TErr> + Send + Sync + 'static
    {
        Self { on_value: Arc::new(on_value),
               on_error: None }
    }

    /// Attaches (or replaces) the error handler, turning the step into a
    /// recovery point for failures produced upstream.
    pub fn with_error<G>(mut self, on_error: G) -> Self
        where G: Fn(TErr) -> Result<TOut, TErr> + Send + Sync + 'static
    {
        self.on_error = Some(Arc::new(on_error));
        self
    }

    pub fn on_value(&self, value: TIn) -> Result<TOut, TErr> {
        (self.on_value)(value)
    }

    /// `None` when the step has no error handler.
    pub fn on_error(&self, error: TErr) -> Option<Result<TOut, TErr>> {
        self.on_error.as_ref().map(|h| h(error))
    }

    pub fn has_error_handler(&self) -> bool {
        self.on_error.is_some()
    }
}

/// Step whose handlers may return a pending result.
///
/// A synchronous [`Step`] converts into an `AsyncStep` without wrapping its
/// handlers in futures; async pipes run such steps without suspending.
pub struct AsyncStep<TIn, TOut, TErr> {
    pub(crate) on_value: Handler<TIn, TOut, TErr>,
    pub(crate) on_error: Option<Handler<TErr, TOut, TErr>>,
}

impl<TIn, TOut, TErr> Clone for AsyncStep<TIn, TOut, TErr> {
    fn clone(&self) -> Self {
        Self { on_value: self.on_value.clone(),
               on_error: self.on_error.clone() }
    }
}

impl<TIn, TOut, TErr> AsyncStep<TIn, TOut, TErr> {
    pub fn new<F, Fut>(on_value: F) -> Self
        where F: Fn(TIn) -> Fut + Send + Sync + 'static,
              Fut: Future<Output = Result<TOut, TErr>> + Send + 'static
    {
        Self { on_value: Handler::Deferred(Arc::new(move |value| on_value(value).boxed())),
               on_error: None }
    }

    pub fn with_error<G, Fut>(mut self, on_error: G) -> Self
        where G: Fn(TErr) -> Fut + Send + Sync + 'static,
              Fut: Future<Output = Result<TOut, TErr>> + Send + 'static
    {
        self.on_error = Some(Handler::Deferred(Arc::new(move |error| on_error(error).boxed())));
        self
    }

    pub async fn on_value(&self, value: TIn) -> Result<TOut, TErr> {
        match &self.on_value {
            Handler::Ready(f) => f(value),
            Handler::Deferred(f) => f(value).await,
        }
    }

    /// `None` when the step has no error handler.
    pub async fn on_error(&self, error: TErr) -> Option<Result<TOut, TErr>> {
        match self.on_error.as_ref()? {
            Handler::Ready(f) => Some(f(error)),
            Handler::Deferred(f) => Some(f(error).await),
        }
    }

    pub fn has_error_handler(&self) -> bool {
        self.on_error.is_some()
    }

    /// `true` when the success handler returns a pending result.
    pub fn is_deferred(&self) -> bool {
        matches!(self.on_value, Handler::Deferred(_))
    }
}

impl<TIn, TOut, TErr> From<Step<TIn, TOut, TErr>> for AsyncStep<TIn, TOut, TErr> {
    fn from(step: Step<TIn, TOut, TErr>) -> Self {
        Self { on_value: Handler::Ready(step.on_value),
               on_error: step.on_error.map(Handler::Ready) }
    }
}

/// Anything an async pipe can append: a [`Step`] or an [`AsyncStep`].
pub trait IntoAsyncStep<TIn, TOut, TErr> {
    fn into_async_step(self) -> AsyncStep<TIn, TOut, TErr>;
}

impl<TIn, TOut, TErr> IntoAsyncStep<TIn, TOut, TErr> for Step<TIn, TOut, TErr> {
    fn into_async_step(self) -> AsyncStep<TIn, TOut, TErr> {
        self.into()
    }
}

impl<TIn, TOut, TErr> IntoAsyncStep<TIn, TOut, TErr> for AsyncStep<TIn, TOut, TErr> {
    fn into_async_step(self) -> AsyncStep<TIn, TOut, TErr> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_without_error_handler_reports_none() {
        let step: Step<i32, i32, String> = Step::new(|v: i32| Ok(v * 2));
        assert_eq!(step.on_value(4), Ok(8));
        assert!(!step.has_error_handler());
        assert_eq!(step.on_error("e".into()), None);
    }

    #[test]
    fn with_error_turns_step_into_recovery_point() {
        let step: Step<i32, i32, String> = Step::new(|v: i32| Ok(v)).with_error(|e: String| Ok(e.len() as i32));
        assert!(step.has_error_handler());
        assert_eq!(step.on_error("four".into()), Some(Ok(4)));
    }

    #[test]
    fn sync_step_converts_without_deferring() {
        let step: Step<i32, i32, ()> = Step::new(|v: i32| Ok(v + 1)).with_error(|_: ()| Ok(0));
        let async_step: AsyncStep<i32, i32, ()> = step.into();
        assert!(!async_step.is_deferred());
        assert!(async_step.has_error_handler());
        assert_eq!(tokio_test::block_on(async_step.on_value(1)), Ok(2));
        assert_eq!(tokio_test::block_on(async_step.on_error(())), Some(Ok(0)));
    }

    #[test]
    fn deferred_step_resolves_through_future() {
        let step: AsyncStep<&'static str, usize, ()> = AsyncStep::new(|s: &'static str| async move { Ok(s.len()) });
        assert!(step.is_deferred());
        assert_eq!(tokio_test::block_on(step.on_value("abc")), Ok(3));
        assert_eq!(tokio_test::block_on(step.on_error(())), None);
    }
}
