use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use im::Vector;
use log::debug;

use super::exec::run_steps_async;
use super::{FaultHandler, LazyPipe, PipeKind};
use crate::errors::{Fault, PipeError, UnhandledError};
use crate::step::erased::{from_any, into_any, AsyncStepDefinition};
use crate::step::{AsyncStep, IntoAsyncStep, Step};

/// Pipe async. Acepta tanto `Step` como `AsyncStep`; los steps se esperan
/// estrictamente uno detrás de otro.
pub struct PipeAsync<TIn, TOut, TErr> {
    steps: Vector<AsyncStepDefinition<TErr>>,
    fault_handler: Option<FaultHandler<TErr>>,
    _io: PhantomData<fn(TIn) -> TOut>,
}

impl<TIn, TOut, TErr> Clone for PipeAsync<TIn, TOut, TErr> {
    fn clone(&self) -> Self {
        Self { steps: self.steps.clone(),
               fault_handler: self.fault_handler.clone(),
               _io: PhantomData }
    }
}

impl<TIn, TOut, TErr> fmt::Debug for PipeAsync<TIn, TOut, TErr> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipeAsync")
         .field("steps", &self.steps.len())
         .field("fault_handler", &self.fault_handler.is_some())
         .finish()
    }
}

impl<TIn, TOut, TErr> PipeAsync<TIn, TOut, TErr>
    where TIn: Send + 'static,
          TOut: Send + 'static,
          TErr: Send + 'static
{
    pub(crate) fn from_parts(steps: Vector<AsyncStepDefinition<TErr>>,
                             fault_handler: Option<FaultHandler<TErr>>)
                             -> Self {
        Self { steps,
               fault_handler,
               _io: PhantomData }
    }

    pub(crate) fn into_parts(self) -> (Vector<AsyncStepDefinition<TErr>>, Option<FaultHandler<TErr>>) {
        (self.steps, self.fault_handler)
    }

    /// Añade un step de cualquiera de los dos tipos.
    pub fn then<T, S>(&self, step: S) -> PipeAsync<TIn, T, TErr>
        where T: Send + 'static,
              S: IntoAsyncStep<TOut, T, TErr>
    {
        let mut steps = self.steps.clone();
        steps.push_back(step.into_async_step().erase());
        PipeAsync::from_parts(steps, self.fault_handler.clone())
    }

    pub fn next<T>(&self, step: Step<TOut, T, TErr>) -> PipeAsync<TIn, T, TErr>
        where T: Send + 'static
    {
        self.then(step)
    }

    pub fn next_async<T>(&self, step: AsyncStep<TOut, T, TErr>) -> PipeAsync<TIn, T, TErr>
        where T: Send + 'static
    {
        self.then(step)
    }

    /// Registra el fault handler, reemplazando el anterior si lo hubiera.
    pub fn catch<F>(&self, handler: F) -> Self
        where F: Fn(&Fault) -> TErr + Send + Sync + 'static
    {
        Self::from_parts(self.steps.clone(), Some(Arc::new(handler)))
    }

    pub async fn run(&self, input: TIn) -> Result<Result<TOut, TErr>, UnhandledError> {
        debug!("running async pipe ({} steps)", self.steps.len());
        let outcome = run_steps_async(&self.steps, self.fault_handler.as_ref(), into_any(input)).await?;
        debug!("async pipe finished on the {} path", if outcome.is_ok() { "value" } else { "error" });
        Ok(outcome.map(from_any::<TOut>))
    }

    pub async fn maybe(&self, input: TIn) -> Option<TOut> {
        self.run(input).await.ok().and_then(Result::ok)
    }

    pub async fn force(&self, input: TIn) -> Result<TOut, PipeError<TErr>> {
        self.run(input).await?.map_err(PipeError::Failed)
    }

    pub fn has_fault_handler(&self) -> bool {
        self.fault_handler.is_some()
    }
}

impl<TIn, TOut, TErr> LazyPipe for PipeAsync<TIn, TOut, TErr>
    where TIn: Send + 'static,
          TOut: Send + 'static,
          TErr: Send + 'static
{
    type Input = TIn;
    type Output = TOut;
    type Error = TErr;

    fn kind(&self) -> PipeKind {
        PipeKind::Async
    }

    fn len(&self) -> usize {
        self.steps.len()
    }

    fn fault_handler(&self) -> Option<&FaultHandler<TErr>> {
        self.fault_handler.as_ref()
    }

    fn with_fault_handler(&self, fault_handler: Option<FaultHandler<TErr>>) -> Self {
        Self::from_parts(self.steps.clone(), fault_handler)
    }

    fn into_async(self) -> PipeAsync<TIn, TOut, TErr> {
        self
    }
}
