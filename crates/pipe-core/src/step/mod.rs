//! Definiciones relacionadas a Steps.
//!
//! Un Step es la unidad atómica de un pipe: un handler de éxito y un handler
//! de error opcional. Este módulo define:
//! - `Step` / `AsyncStep`: interfaz tipada usada al construir pipes.
//! - la representación neutra (`erased`) que guarda y ejecuta el engine.
//! - helpers `map*` / `try_map*` y las macros `for_steps!` / `for_steps_async!`.

pub mod definition;
pub(crate) mod erased;
pub mod macros;
pub mod map;

pub use definition::{AsyncStep, IntoAsyncStep, Step};
pub use map::{map, map_async, map_async_or_recover, map_or_recover, try_map, try_map_async, try_map_async_or_recover,
              try_map_or_recover};
