//! LazyPipe Rust Library
//!
//! Fachada del workspace:
//! - Re-exporta `pipe_core` (pipes, steps, combinadores y errores).
//! - Expone `config` y `errors` de la aplicación demo.
//! - Expone `orders`, pipes de ejemplo usados por `main-demo` y los tests.

pub mod config;
pub mod errors;
pub mod orders;

pub use pipe_core::*;
