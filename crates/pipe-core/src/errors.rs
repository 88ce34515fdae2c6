//! Errores del motor de pipes.
//!
//! - `Fault`: pánico interceptado en la frontera de un step.
//! - `UnhandledError`: fault sin `fault_handler` registrado; escapa de `run`.
//! - `PipeError`: error devuelto por `force` (fallo tipado o fault no manejado).

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

/// A panic raised by a step handler and intercepted at the step boundary.
///
/// The original panic payload is kept so fault handlers can inspect it, and
/// so combinators can re-raise it with [`Fault::resume`].
pub struct Fault {
    payload: Box<dyn Any + Send>,
}

impl Fault {
    /// Wraps a payload obtained from `catch_unwind`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        Self { payload }
    }

    /// Builds a fault carrying a plain message, as `panic!("{message}")` would.
    pub fn msg(message: impl Into<String>) -> Self {
        Self { payload: Box::new(message.into()) }
    }

    /// Panic message when the payload is a `&str` or a `String`.
    pub fn message(&self) -> Option<&str> {
        if let Some(s) = self.payload.downcast_ref::<&'static str>() {
            return Some(s);
        }
        self.payload.downcast_ref::<String>().map(String::as_str)
    }

    /// Payload raised with `std::panic::panic_any`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }

    /// Re-raises the fault. The enclosing step boundary intercepts it again.
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.payload)
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fault")
         .field("message", &self.message().unwrap_or("<non-string payload>"))
         .finish()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().unwrap_or("<non-string panic payload>"))
    }
}

/// Fault that escaped a run because the pipe has no fault handler.
#[derive(Debug, Error)]
#[error("unhandled fault: {fault}")]
pub struct UnhandledError {
    fault: Fault,
}

impl UnhandledError {
    pub fn new(fault: Fault) -> Self {
        Self { fault }
    }

    /// The original intercepted fault.
    pub fn fault(&self) -> &Fault {
        &self.fault
    }

    pub fn into_fault(self) -> Fault {
        self.fault
    }

    /// Re-raises the wrapped fault as a panic.
    pub fn resume(self) -> ! {
        self.fault.resume()
    }
}

/// Error returned by `force`.
#[derive(Debug, Error)]
pub enum PipeError<E> {
    /// The run raised a fault and no fault handler was registered.
    #[error(transparent)]
    Unhandled(#[from] UnhandledError),
    /// The run completed with a typed failure.
    #[error("pipe finished with a failure: {0:?}")]
    Failed(E),
}

impl<E> PipeError<E> {
    pub fn is_unhandled(&self) -> bool {
        matches!(self, Self::Unhandled(_))
    }

    /// Typed failure, if that is what the run produced.
    pub fn failure(self) -> Option<E> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Unhandled(_) => None,
        }
    }
}

/// Runs `f` and turns a panic into a `Fault`.
pub(crate) fn intercept<T>(f: impl FnOnce() -> T) -> Result<T, Fault> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(Fault::from_panic)
}
