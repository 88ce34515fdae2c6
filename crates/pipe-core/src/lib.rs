//! pipe-core: pipes perezosos de steps con resultados explícitos
pub mod config;
pub mod constants;
pub mod errors;
pub mod ops;
pub mod pipeline;
pub mod step;

pub use config::{PipeConfig, PIPE_CONFIG};
pub use errors::{Fault, PipeError, UnhandledError};
pub use ops::{concat, concat_with, merge, Concat, Merge};
pub use pipeline::{empty, empty_async, empty_async_with, empty_with, FaultHandler, LazyPipe, Pipe, PipeAsync,
                   PipeBuilder, PipeBuilderAsync, PipeKind};
pub use step::{map, map_async, map_async_or_recover, map_or_recover, try_map, try_map_async, try_map_async_or_recover,
               try_map_or_recover, AsyncStep, IntoAsyncStep, Step};
