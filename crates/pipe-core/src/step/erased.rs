//! Representación neutra de los steps.
//!
//! El engine no conoce los tipos intermedios de un pipe: cada step se guarda
//! como `Step<AnyValue, AnyValue, E>` (o su variante async) y la alineación
//! de tipos entre steps adyacentes se garantiza en `next`/`next_async`.

use std::any::{type_name, Any};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use super::definition::{AsyncStep, Handler, ReadyFn, Step};
use crate::errors::{intercept, Fault};

/// Valor intermedio opaco que circula entre steps.
pub(crate) type AnyValue = Box<dyn Any + Send>;

/// Estado corriente de una ejecución.
pub(crate) type Outcome<E> = Result<AnyValue, E>;

pub(crate) type StepDefinition<E> = Step<AnyValue, AnyValue, E>;
pub(crate) type AsyncStepDefinition<E> = AsyncStep<AnyValue, AnyValue, E>;

pub(crate) fn into_any<T: Send + 'static>(value: T) -> AnyValue {
    Box::new(value)
}

/// Recupera el valor tipado. Un fallo aquí significa que la alineación de
/// tipos de `next` fue violada.
pub(crate) fn from_any<T: 'static>(value: AnyValue) -> T {
    match value.downcast::<T>() {
        Ok(v) => *v,
        Err(_) => panic!("pipe step received a value that is not a {}", type_name::<T>()),
    }
}

impl<TIn, TOut, TErr> Step<TIn, TOut, TErr>
    where TIn: Send + 'static,
          TOut: Send + 'static,
          TErr: Send + 'static
{
    pub(crate) fn erase(self) -> StepDefinition<TErr> {
        let on_value = self.on_value;
        let on_error = self.on_error.map(erase_ready);
        Step { on_value: Arc::new(move |value: AnyValue| on_value(from_any::<TIn>(value)).map(into_any)),
               on_error }
    }
}

impl<TIn, TOut, TErr> AsyncStep<TIn, TOut, TErr>
    where TIn: Send + 'static,
          TOut: Send + 'static,
          TErr: Send + 'static
{
    pub(crate) fn erase(self) -> AsyncStepDefinition<TErr> {
        AsyncStep { on_value: self.on_value.erase_output().erase_input(),
                    on_error: self.on_error.map(Handler::erase_output) }
    }
}

fn erase_ready<A, T, E>(f: ReadyFn<A, T, E>) -> ReadyFn<A, AnyValue, E>
    where A: 'static,
          T: Send + 'static,
          E: 'static
{
    Arc::new(move |arg| f(arg).map(into_any))
}

impl<A, T, E> Handler<A, T, E>
    where A: Send + 'static,
          T: Send + 'static,
          E: Send + 'static
{
    fn erase_output(self) -> Handler<A, AnyValue, E> {
        match self {
            Handler::Ready(f) => Handler::Ready(erase_ready(f)),
            Handler::Deferred(f) => Handler::Deferred(Arc::new(move |arg| f(arg).map(|res| res.map(into_any)).boxed())),
        }
    }
}

impl<A, E> Handler<A, AnyValue, E>
    where A: Send + 'static,
          E: Send + 'static
{
    fn erase_input(self) -> Handler<AnyValue, AnyValue, E> {
        match self {
            Handler::Ready(f) => Handler::Ready(Arc::new(move |value| f(from_any::<A>(value)))),
            Handler::Deferred(f) => Handler::Deferred(Arc::new(move |value| f(from_any::<A>(value)))),
        }
    }
}

impl<A, T, E> Handler<A, T, E> {
    /// Invoca el handler interceptando pánicos tanto al crear el resultado
    /// pendiente como al esperarlo.
    async fn invoke(&self, arg: A) -> Result<Result<T, E>, Fault> {
        match self {
            Handler::Ready(f) => intercept(|| f(arg)),
            Handler::Deferred(f) => {
                let pending = intercept(|| f(arg))?;
                AssertUnwindSafe(pending).catch_unwind().await.map_err(Fault::from_panic)
            }
        }
    }
}

impl<E> StepDefinition<E> {
    /// Aplica el step sobre el estado corriente. `Err` lleva el fault
    /// interceptado; un fallo sin `on_error` pasa sin cambios.
    pub(crate) fn apply(&self, state: Outcome<E>) -> Result<Outcome<E>, Fault> {
        match state {
            Ok(value) => intercept(|| (self.on_value)(value)),
            Err(error) => match &self.on_error {
                Some(on_error) => intercept(|| on_error(error)),
                None => Ok(Err(error)),
            },
        }
    }
}

impl<E> AsyncStepDefinition<E> {
    pub(crate) async fn apply(&self, state: Outcome<E>) -> Result<Outcome<E>, Fault> {
        match state {
            Ok(value) => self.on_value.invoke(value).await,
            Err(error) => match &self.on_error {
                Some(on_error) => on_error.invoke(error).await,
                None => Ok(Err(error)),
            },
        }
    }
}
