//! Fábricas de pipes vacíos y builders usados por `for_steps!` /
//! `for_steps_async!`.
//!
//! ```
//! use pipe_core::*;
//!
//! let pipe = for_steps!(map(|v: i32| v + 1), map(|v: i32| v.to_string()))
//!     .catch_default("an error")
//!     .create();
//! assert_eq!(pipe.run(1).unwrap(), Ok("2".to_string()));
//! ```

use std::sync::Arc;

use im::Vector;

use super::{FaultHandler, Pipe, PipeAsync};
use crate::errors::Fault;

/// Pipe sin steps: devuelve su entrada tal cual.
pub fn empty<T, E>() -> Pipe<T, T, E>
    where T: Send + 'static,
          E: Send + 'static
{
    Pipe::from_parts(Vector::new(), None)
}

/// Como [`empty`], con un fault handler por defecto.
pub fn empty_with<T, E, F>(handler: F) -> Pipe<T, T, E>
    where T: Send + 'static,
          E: Send + 'static,
          F: Fn(&Fault) -> E + Send + Sync + 'static
{
    Pipe::from_parts(Vector::new(), Some(Arc::new(handler)))
}

pub fn empty_async<T, E>() -> PipeAsync<T, T, E>
    where T: Send + 'static,
          E: Send + 'static
{
    PipeAsync::from_parts(Vector::new(), None)
}

pub fn empty_async_with<T, E, F>(handler: F) -> PipeAsync<T, T, E>
    where T: Send + 'static,
          E: Send + 'static,
          F: Fn(&Fault) -> E + Send + Sync + 'static
{
    PipeAsync::from_parts(Vector::new(), Some(Arc::new(handler)))
}

fn constant_handler<E>(error: E) -> FaultHandler<E>
    where E: Clone + Send + Sync + 'static
{
    Arc::new(move |_: &Fault| error.clone())
}

/// Builder de un `Pipe` a partir de una secuencia de steps ya encadenada.
#[derive(Debug)]
pub struct PipeBuilder<TIn, TOut, TErr> {
    pipe: Pipe<TIn, TOut, TErr>,
}

impl<TIn, TOut, TErr> PipeBuilder<TIn, TOut, TErr>
    where TIn: Send + 'static,
          TOut: Send + 'static,
          TErr: Send + 'static
{
    pub fn new(pipe: Pipe<TIn, TOut, TErr>) -> Self {
        Self { pipe }
    }

    /// Fault handler que siempre devuelve `error`.
    pub fn catch_default(self, error: TErr) -> Self
        where TErr: Clone + Sync
    {
        let (steps, _) = self.pipe.into_parts();
        Self { pipe: Pipe::from_parts(steps, Some(constant_handler(error))) }
    }

    pub fn catch<F>(self, handler: F) -> Self
        where F: Fn(&Fault) -> TErr + Send + Sync + 'static
    {
        Self { pipe: self.pipe.catch(handler) }
    }

    pub fn create(self) -> Pipe<TIn, TOut, TErr> {
        self.pipe
    }
}

/// Variante async de [`PipeBuilder`].
#[derive(Debug)]
pub struct PipeBuilderAsync<TIn, TOut, TErr> {
    pipe: PipeAsync<TIn, TOut, TErr>,
}

impl<TIn, TOut, TErr> PipeBuilderAsync<TIn, TOut, TErr>
    where TIn: Send + 'static,
          TOut: Send + 'static,
          TErr: Send + 'static
{
    pub fn new(pipe: PipeAsync<TIn, TOut, TErr>) -> Self {
        Self { pipe }
    }

    pub fn catch_default(self, error: TErr) -> Self
        where TErr: Clone + Sync
    {
        let (steps, _) = self.pipe.into_parts();
        Self { pipe: PipeAsync::from_parts(steps, Some(constant_handler(error))) }
    }

    pub fn catch<F>(self, handler: F) -> Self
        where F: Fn(&Fault) -> TErr + Send + Sync + 'static
    {
        Self { pipe: self.pipe.catch(handler) }
    }

    pub fn create(self) -> PipeAsync<TIn, TOut, TErr> {
        self.pipe
    }
}
