use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use im::Vector;
use log::debug;

use super::exec::run_steps;
use super::{FaultHandler, LazyPipe, PipeAsync, PipeKind};
use crate::errors::{Fault, PipeError, UnhandledError};
use crate::step::erased::{from_any, into_any, StepDefinition};
use crate::step::{AsyncStep, Step};

/// Pipe síncrono: `TIn` entra, `Result<TOut, TErr>` sale.
///
/// Cada llamada estructural devuelve un pipe nuevo; el original sigue siendo
/// válido y ejecutable. `run` puede llamarse tantas veces como se quiera,
/// también desde varios hilos a la vez.
pub struct Pipe<TIn, TOut, TErr> {
    steps: Vector<StepDefinition<TErr>>,
    fault_handler: Option<FaultHandler<TErr>>,
    _io: PhantomData<fn(TIn) -> TOut>,
}

impl<TIn, TOut, TErr> Clone for Pipe<TIn, TOut, TErr> {
    fn clone(&self) -> Self {
        Self { steps: self.steps.clone(),
               fault_handler: self.fault_handler.clone(),
               _io: PhantomData }
    }
}

impl<TIn, TOut, TErr> fmt::Debug for Pipe<TIn, TOut, TErr> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe")
         .field("steps", &self.steps.len())
         .field("fault_handler", &self.fault_handler.is_some())
         .finish()
    }
}

impl<TIn, TOut, TErr> Pipe<TIn, TOut, TErr>
    where TIn: Send + 'static,
          TOut: Send + 'static,
          TErr: Send + 'static
{
    pub(crate) fn from_parts(steps: Vector<StepDefinition<TErr>>, fault_handler: Option<FaultHandler<TErr>>) -> Self {
        Self { steps,
               fault_handler,
               _io: PhantomData }
    }

    pub(crate) fn into_parts(self) -> (Vector<StepDefinition<TErr>>, Option<FaultHandler<TErr>>) {
        (self.steps, self.fault_handler)
    }

    /// Añade un step al final. La entrada del step debe coincidir con la
    /// salida actual del pipe; el compilador lo comprueba en la llamada.
    pub fn next<T>(&self, step: Step<TOut, T, TErr>) -> Pipe<TIn, T, TErr>
        where T: Send + 'static
    {
        let mut steps = self.steps.clone();
        steps.push_back(step.erase());
        Pipe::from_parts(steps, self.fault_handler.clone())
    }

    /// Añade un step async; el resultado es un `PipeAsync`.
    pub fn next_async<T>(&self, step: AsyncStep<TOut, T, TErr>) -> PipeAsync<TIn, T, TErr>
        where T: Send + 'static
    {
        self.clone().into_async().next_async(step)
    }

    /// Registra el fault handler, reemplazando el anterior si lo hubiera.
    pub fn catch<F>(&self, handler: F) -> Self
        where F: Fn(&Fault) -> TErr + Send + Sync + 'static
    {
        Self::from_parts(self.steps.clone(), Some(Arc::new(handler)))
    }

    /// Ejecuta el pipe. El `Err` externo indica un fault que nadie convirtió.
    pub fn run(&self, input: TIn) -> Result<Result<TOut, TErr>, UnhandledError> {
        debug!("running sync pipe ({} steps)", self.steps.len());
        let outcome = run_steps(&self.steps, self.fault_handler.as_ref(), into_any(input))?;
        debug!("sync pipe finished on the {} path", if outcome.is_ok() { "value" } else { "error" });
        Ok(outcome.map(from_any::<TOut>))
    }

    /// `Some` sólo si la ejecución termina con éxito.
    pub fn maybe(&self, input: TIn) -> Option<TOut> {
        self.run(input).ok().and_then(Result::ok)
    }

    /// Valor de éxito, o el fallo tipado / fault sin convertir como error.
    pub fn force(&self, input: TIn) -> Result<TOut, PipeError<TErr>> {
        self.run(input)?.map_err(PipeError::Failed)
    }

    pub fn has_fault_handler(&self) -> bool {
        self.fault_handler.is_some()
    }

    /// Mismos steps y fault handler dentro de un engine async.
    pub fn into_async(self) -> PipeAsync<TIn, TOut, TErr> {
        let steps = self.steps.into_iter().map(AsyncStep::from).collect();
        PipeAsync::from_parts(steps, self.fault_handler)
    }
}

impl<TIn, TOut, TErr> LazyPipe for Pipe<TIn, TOut, TErr>
    where TIn: Send + 'static,
          TOut: Send + 'static,
          TErr: Send + 'static
{
    type Input = TIn;
    type Output = TOut;
    type Error = TErr;

    fn kind(&self) -> PipeKind {
        PipeKind::Sync
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
        Pipe::into_async(self)
    }
}
