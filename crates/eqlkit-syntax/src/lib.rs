//! eqlkit syntax - Core types for the EdgeQL concrete syntax tree
//!
//! This crate defines spans, node kinds, the arena-backed syntax tree and
//! the generic queries the analyses run over it.

mod error;
mod kind;
mod query;
mod span;
mod tree;

pub use error::*;
pub use kind::*;
pub use query::*;
pub use span::*;
pub use tree::*;
