//! Algoritmo de ejecución compartido por `Pipe` y `PipeAsync`.
//!
//! Ambos engines recorren sus steps en orden con el mismo estado corriente
//! (`Outcome`) y la misma regla para los faults: si hay fault handler el
//! fault se convierte en fallo tipado, si no la ejecución termina con
//! `UnhandledError`. El engine async sólo añade el `await` de los steps
//! diferidos.

use im::Vector;
use log::{debug, trace, warn};

use super::FaultHandler;
use crate::config::PIPE_CONFIG;
use crate::errors::{intercept, Fault, UnhandledError};
use crate::step::erased::{AnyValue, AsyncStepDefinition, Outcome, StepDefinition};

/// Resuelve el resultado de aplicar el step `index`.
pub(crate) fn settle<E>(applied: Result<Outcome<E>, Fault>,
                        fault_handler: Option<&FaultHandler<E>>,
                        index: usize)
                        -> Result<Outcome<E>, UnhandledError> {
    match applied {
        Ok(outcome) => Ok(outcome),
        Err(fault) => match fault_handler {
            Some(handler) => {
                if PIPE_CONFIG.log_faults {
                    warn!("fault at step {index} converted by fault handler: {fault}");
                }
                match intercept(|| handler(&fault)) {
                    Ok(converted) => Ok(Err(converted)),
                    Err(handler_fault) => {
                        warn!("fault handler panicked at step {index}: {handler_fault}");
                        Err(UnhandledError::new(handler_fault))
                    }
                }
            }
            None => {
                debug!("unhandled fault at step {index}: {fault}");
                Err(UnhandledError::new(fault))
            }
        },
    }
}

fn trace_step<E>(index: usize, state: &Outcome<E>) {
    if PIPE_CONFIG.trace_steps {
        let path = if state.is_ok() { "value" } else { "error" };
        trace!("step {index}: {path} path");
    }
}

pub(crate) fn run_steps<E>(steps: &Vector<StepDefinition<E>>,
                           fault_handler: Option<&FaultHandler<E>>,
                           input: AnyValue)
                           -> Result<Outcome<E>, UnhandledError> {
    let mut state: Outcome<E> = Ok(input);
    for (index, step) in steps.iter().enumerate() {
        trace_step(index, &state);
        state = settle(step.apply(state), fault_handler, index)?;
    }
    Ok(state)
}

pub(crate) async fn run_steps_async<E>(steps: &Vector<AsyncStepDefinition<E>>,
                                       fault_handler: Option<&FaultHandler<E>>,
                                       input: AnyValue)
                                       -> Result<Outcome<E>, UnhandledError> {
    let mut state: Outcome<E> = Ok(input);
    // Indexed access: no iterator is held across the await points.
    for index in 0..steps.len() {
        trace_step(index, &state);
        let applied = steps[index].apply(state).await;
        state = settle(applied, fault_handler, index)?;
    }
    Ok(state)
}
