//! Constantes del motor de pipes.
//!
//! Nombres de las variables de entorno leídas por `config::PipeConfig`.

/// Emite un `trace!` por cada step ejecutado (`1`/`true`/`yes`/`on`).
pub const TRACE_STEPS_ENV: &str = "LAZYPIPE_TRACE_STEPS";

/// Emite un `warn!` cuando un `fault_handler` convierte un fault en error tipado.
pub const LOG_FAULTS_ENV: &str = "LAZYPIPE_LOG_FAULTS";
