//! Macros de conveniencia para construir pipes a partir de una lista de steps.
//!
//! `for_steps!(s1, s2, ...)` equivale a `empty().next(s1).next(s2)...` y
//! devuelve un `PipeBuilder`, sobre el que se puede fijar un fault handler
//! (`catch` / `catch_default`) antes de `create()`.
//!
//! `for_steps_async!` hace lo mismo sobre un pipe async y acepta tanto
//! `Step` como `AsyncStep` en cualquier posición.
//!
//! ```
//! use pipe_core::*;
//!
//! let pipe = for_steps!(
//!     map(|v: i32| i64::from(v) + 1),
//!     map(|v: i64| v.to_string()),
//! ).catch_default("an error").create();
//! assert_eq!(pipe.run(1).unwrap(), Ok("2".to_string()));
//! ```

#[macro_export]
macro_rules! for_steps {
    ($first:expr $(, $rest:expr)* $(,)?) => {
        $crate::PipeBuilder::new($crate::empty().next($first)$(.next($rest))*)
    };
}

#[macro_export]
macro_rules! for_steps_async {
    ($first:expr $(, $rest:expr)* $(,)?) => {
        $crate::PipeBuilderAsync::new($crate::empty_async().then($first)$(.then($rest))*)
    };
}
