//! Combinadores estructurales sobre pipes completos.

pub mod concat;
pub mod merge;

pub use concat::{concat, concat_with, Concat};
pub use merge::{merge, Merge};
