//! Configuración del motor cargada desde variables de entorno.
//!
//! Sigue la convención del resto del workspace: el archivo `.env` se carga
//! una sola vez (si existe) y la configuración resultante es inmutable.

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::constants::{LOG_FAULTS_ENV, TRACE_STEPS_ENV};

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Configuración global del motor, evaluada una sola vez.
pub static PIPE_CONFIG: Lazy<PipeConfig> = Lazy::new(PipeConfig::from_env);

/// Ajustes de observabilidad del motor. No cambian la semántica de ejecución.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeConfig {
    /// Log `trace!` de cada step (índice y camino value/error).
    pub trace_steps: bool,
    /// Log `warn!` cuando un fault es convertido por el fault handler.
    pub log_faults: bool,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self { trace_steps: false,
               log_faults: true }
    }
}

impl PipeConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda
    /// (útil para tests sin tocar el entorno del proceso). Valores no
    /// reconocidos caen en el default.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| lookup(key).and_then(|v| parse_flag(&v)).unwrap_or(default);
        Self { trace_steps: flag(TRACE_STEPS_ENV, defaults.trace_steps),
               log_faults: flag(LOG_FAULTS_ENV, defaults.log_faults) }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
