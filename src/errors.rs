use thiserror::Error;

use crate::config::ConfigError;
use pipe_core::PipeError;

/// Errores de la aplicación demo.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(#[from] ConfigError),
    #[error("Error del pipe: {0}")]
    Pipe(#[from] PipeError<String>),
    #[error("Error JSON: {0}")]
    Json(#[from] serde_json::Error),
}
