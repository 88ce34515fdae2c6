//! Configuración de la aplicación demo.
//! Carga variables de entorno (.env) y expone una estructura inmutable
//! (`AppConfig`). La configuración del motor vive en `pipe_core::config`.
use std::env;

use log::LevelFilter;
use thiserror::Error;

/// Variable con el nivel de log (`error`, `warn`, `info`, `debug`, `trace`, `off`).
pub const LOG_LEVEL_ENV: &str = "LAZYPIPE_LOG";
/// Variable con el pedido JSON que procesa el demo.
pub const DEMO_INPUT_ENV: &str = "LAZYPIPE_DEMO_INPUT";

/// Pedido usado cuando `LAZYPIPE_DEMO_INPUT` no está definido.
pub const DEFAULT_DEMO_INPUT: &str =
    r#"{"id":"A-100","items":[{"name":"tornillo","quantity":4,"unit_price":0.25},{"name":"tuerca","quantity":4,"unit_price":0.1}]}"#;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("nivel de log inválido en {key}: {value}")]
    InvalidLogLevel { key: &'static str, value: String },
    #[error("{0} está definido pero vacío")]
    Empty(&'static str),
}

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_level: LevelFilter,
    /// Entrada JSON del demo.
    pub demo_input: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        pipe_core::config::init_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let log_level = match lookup(LOG_LEVEL_ENV) {
            Some(value) => value.trim()
                                .parse::<LevelFilter>()
                                .map_err(|_| ConfigError::InvalidLogLevel { key: LOG_LEVEL_ENV, value })?,
            None => LevelFilter::Info,
        };
        let demo_input = match lookup(DEMO_INPUT_ENV) {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::Empty(DEMO_INPUT_ENV)),
            Some(value) => value,
            None => DEFAULT_DEMO_INPUT.to_string(),
        };
        Ok(Self { log_level,
                  demo_input })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.log_level, LevelFilter::Info);
        assert_eq!(cfg.demo_input, DEFAULT_DEMO_INPUT);
    }

    #[test]
    fn parses_log_level_case_insensitive() {
        let cfg = AppConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "DEBUG")])).unwrap();
        assert_eq!(cfg.log_level, LevelFilter::Debug);
    }

    #[test]
    fn rejects_bad_values() {
        let err = AppConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "loud")])).unwrap_err();
        assert_eq!(err,
                   ConfigError::InvalidLogLevel { key: LOG_LEVEL_ENV,
                                                  value: "loud".into() });

        let err = AppConfig::from_lookup(lookup_from(&[(DEMO_INPUT_ENV, "  ")])).unwrap_err();
        assert_eq!(err.to_string(), "LAZYPIPE_DEMO_INPUT está definido pero vacío");
    }
}
