//! Unión de dos pipes extremo a extremo: los steps de `entry` seguidos de
//! los de `exit`, en un único pipe plano.

use im::Vector;

use crate::pipeline::{FaultHandler, LazyPipe, Pipe, PipeAsync};

/// Pipes que pueden continuar con `Rhs`. La entrada de `Rhs` debe ser la
/// salida de `Self`. El fault handler resultante es el de `Self` o, si no
/// tiene, el de `Rhs`.
pub trait Merge<Rhs: LazyPipe>: LazyPipe {
    type Merged: LazyPipe<Error = Self::Error>;

    fn merge(self, rhs: Rhs) -> Self::Merged;
}

fn merge_async<A, B, C, E>(entry: PipeAsync<A, B, E>, exit: PipeAsync<B, C, E>) -> PipeAsync<A, C, E>
    where A: Send + 'static,
          B: Send + 'static,
          C: Send + 'static,
          E: Send + 'static
{
    let (entry_steps, entry_handler) = entry.into_parts();
    let (exit_steps, exit_handler) = exit.into_parts();
    PipeAsync::from_parts(splice(entry_steps, exit_steps), pick_handler(entry_handler, exit_handler))
}

fn splice<S: Clone>(mut entry: Vector<S>, exit: Vector<S>) -> Vector<S> {
    entry.append(exit);
    entry
}

fn pick_handler<E>(entry: Option<FaultHandler<E>>, exit: Option<FaultHandler<E>>) -> Option<FaultHandler<E>> {
    entry.or(exit)
}

impl<A, B, C, E> Merge<Pipe<B, C, E>> for Pipe<A, B, E>
    where A: Send + 'static,
          B: Send + 'static,
          C: Send + 'static,
          E: Send + 'static
{
    type Merged = Pipe<A, C, E>;

    fn merge(self, rhs: Pipe<B, C, E>) -> Self::Merged {
        let (entry_steps, entry_handler) = self.into_parts();
        let (exit_steps, exit_handler) = rhs.into_parts();
        Pipe::from_parts(splice(entry_steps, exit_steps), pick_handler(entry_handler, exit_handler))
    }
}

impl<A, B, C, E> Merge<PipeAsync<B, C, E>> for Pipe<A, B, E>
    where A: Send + 'static,
          B: Send + 'static,
          C: Send + 'static,
          E: Send + 'static
{
    type Merged = PipeAsync<A, C, E>;

    fn merge(self, rhs: PipeAsync<B, C, E>) -> Self::Merged {
        merge_async(self.into_async(), rhs)
    }
}

impl<A, B, C, E> Merge<Pipe<B, C, E>> for PipeAsync<A, B, E>
    where A: Send + 'static,
          B: Send + 'static,
          C: Send + 'static,
          E: Send + 'static
{
    type Merged = PipeAsync<A, C, E>;

    fn merge(self, rhs: Pipe<B, C, E>) -> Self::Merged {
        merge_async(self, rhs.into_async())
    }
}

impl<A, B, C, E> Merge<PipeAsync<B, C, E>> for PipeAsync<A, B, E>
    where A: Send + 'static,
          B: Send + 'static,
          C: Send + 'static,
          E: Send + 'static
{
    type Merged = PipeAsync<A, C, E>;

    fn merge(self, rhs: PipeAsync<B, C, E>) -> Self::Merged {
        merge_async(self, rhs)
    }
}

/// Une `entry` y `exit` en un pipe plano.
pub fn merge<L, R>(entry: L, exit: R) -> L::Merged
    where L: Merge<R>,
          R: LazyPipe
{
    entry.merge(exit)
}
