//! Pipes: secuencias inmutables de steps más un fault handler opcional.
//!
//! - `Pipe`: engine síncrono, sólo contiene steps síncronos.
//! - `PipeAsync`: engine async; acepta steps síncronos y diferidos.
//! - `LazyPipe`: lo común a ambos, usado por los combinadores.
//!
//! Toda operación estructural (`next`, `next_async`, `catch`) devuelve un
//! pipe nuevo; la lista de steps es un `im::Vector` compartido
//! estructuralmente, por lo que derivar un pipe no altera a su ancestro.

pub mod async_pipe;
pub mod builder;
pub(crate) mod exec;
pub mod sync_pipe;

use std::sync::Arc;

use crate::errors::Fault;

pub use async_pipe::PipeAsync;
pub use builder::{empty, empty_async, empty_async_with, empty_with, PipeBuilder, PipeBuilderAsync};
pub use sync_pipe::Pipe;

/// Convierte un fault interceptado en un error tipado del pipe.
pub type FaultHandler<E> = Arc<dyn Fn(&Fault) -> E + Send + Sync>;

/// Sincronía de un pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeKind {
    Sync,
    Async,
}

/// Interfaz común de `Pipe` y `PipeAsync`.
pub trait LazyPipe: Clone + Send + Sync + 'static {
    type Input: Send + 'static;
    type Output: Send + 'static;
    type Error: Send + 'static;

    fn kind(&self) -> PipeKind;

    /// Número de steps.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn fault_handler(&self) -> Option<&FaultHandler<Self::Error>>;

    /// Mismo pipe con el fault handler reemplazado.
    fn with_fault_handler(&self, fault_handler: Option<FaultHandler<Self::Error>>) -> Self;

    fn into_async(self) -> PipeAsync<Self::Input, Self::Output, Self::Error>;
}
