//! Concatenación de pipes: un pipe de un solo step que recibe una tupla,
//! ejecuta cada sub-pipe con su componente y devuelve la tupla de salidas.
//!
//! El pipe izquierdo se ejecuta primero; si falla, el derecho no se ejecuta.
//! Un fault que un sub-pipe no convirtió se relanza dentro del step de la
//! concatenación, donde el fault handler de ésta (si existe) lo recoge.

use std::sync::Arc;

use log::debug;

use crate::errors::{Fault, UnhandledError};
use crate::pipeline::{empty, empty_async, LazyPipe, Pipe, PipeAsync};
use crate::step::{AsyncStep, Step};

/// Pipes que pueden concatenarse con `Rhs`. El resultado es síncrono sólo
/// si ambos lados lo son.
pub trait Concat<Rhs: LazyPipe>: LazyPipe {
    type Joined: LazyPipe<Error = Self::Error>;

    fn concat(self, rhs: Rhs) -> Self::Joined;
}

fn reraise<T, E>(run: Result<Result<T, E>, UnhandledError>) -> Result<T, E> {
    match run {
        Ok(outcome) => outcome,
        Err(unhandled) => {
            debug!("re-raising sub-pipe fault inside concat: {}", unhandled.fault());
            unhandled.resume()
        }
    }
}

async fn run_pair<A1, B1, A2, B2, E>(left: &PipeAsync<A1, B1, E>,
                                     right: &PipeAsync<A2, B2, E>,
                                     a: A1,
                                     b: A2)
                                     -> Result<(B1, B2), E>
    where A1: Send + 'static,
          B1: Send + 'static,
          A2: Send + 'static,
          B2: Send + 'static,
          E: Send + 'static
{
    let left_out = reraise(left.run(a).await)?;
    let right_out = reraise(right.run(b).await)?;
    Ok((left_out, right_out))
}

fn concat_async<A1, B1, A2, B2, E>(left: PipeAsync<A1, B1, E>,
                                   right: PipeAsync<A2, B2, E>)
                                   -> PipeAsync<(A1, A2), (B1, B2), E>
    where A1: Send + 'static,
          B1: Send + 'static,
          A2: Send + 'static,
          B2: Send + 'static,
          E: Send + 'static
{
    let glue: AsyncStep<(A1, A2), (B1, B2), E> = AsyncStep::new(move |(a, b)| {
        let left = left.clone();
        let right = right.clone();
        async move { run_pair(&left, &right, a, b).await }
    });
    empty_async().next_async(glue)
}

impl<A1, B1, A2, B2, E> Concat<Pipe<A2, B2, E>> for Pipe<A1, B1, E>
    where A1: Send + 'static,
          B1: Send + 'static,
          A2: Send + 'static,
          B2: Send + 'static,
          E: Send + 'static
{
    type Joined = Pipe<(A1, A2), (B1, B2), E>;

    fn concat(self, rhs: Pipe<A2, B2, E>) -> Self::Joined {
        let glue: Step<(A1, A2), (B1, B2), E> = Step::new(move |(a, b)| {
            let left_out = reraise(self.run(a))?;
            let right_out = reraise(rhs.run(b))?;
            Ok((left_out, right_out))
        });
        empty().next(glue)
    }
}

impl<A1, B1, A2, B2, E> Concat<PipeAsync<A2, B2, E>> for Pipe<A1, B1, E>
    where A1: Send + 'static,
          B1: Send + 'static,
          A2: Send + 'static,
          B2: Send + 'static,
          E: Send + 'static
{
    type Joined = PipeAsync<(A1, A2), (B1, B2), E>;

    fn concat(self, rhs: PipeAsync<A2, B2, E>) -> Self::Joined {
        concat_async(self.into_async(), rhs)
    }
}

impl<A1, B1, A2, B2, E> Concat<Pipe<A2, B2, E>> for PipeAsync<A1, B1, E>
    where A1: Send + 'static,
          B1: Send + 'static,
          A2: Send + 'static,
          B2: Send + 'static,
          E: Send + 'static
{
    type Joined = PipeAsync<(A1, A2), (B1, B2), E>;

    fn concat(self, rhs: Pipe<A2, B2, E>) -> Self::Joined {
        concat_async(self, rhs.into_async())
    }
}

impl<A1, B1, A2, B2, E> Concat<PipeAsync<A2, B2, E>> for PipeAsync<A1, B1, E>
    where A1: Send + 'static,
          B1: Send + 'static,
          A2: Send + 'static,
          B2: Send + 'static,
          E: Send + 'static
{
    type Joined = PipeAsync<(A1, A2), (B1, B2), E>;

    fn concat(self, rhs: PipeAsync<A2, B2, E>) -> Self::Joined {
        concat_async(self, rhs)
    }
}

/// Concatena `left` y `right` sin fault handler propio.
pub fn concat<L, R>(left: L, right: R) -> L::Joined
    where L: Concat<R>,
          R: LazyPipe
{
    left.concat(right)
}

/// Como [`concat`], con un fault handler para los faults del step de
/// concatenación.
pub fn concat_with<L, R, F>(left: L, right: R, handler: F) -> L::Joined
    where L: Concat<R>,
          R: LazyPipe,
          F: Fn(&Fault) -> L::Error + Send + Sync + 'static
{
    left.concat(right).with_fault_handler(Some(Arc::new(handler)))
}
