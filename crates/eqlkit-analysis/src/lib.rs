//! eqlkit analysis - Derived analyses over parsed EdgeQL scripts
//!
//! - statement splitting with positional parameter rewriting
//! - end-of-statement detection for REPL submission
//! - query parameter extraction and resolution against a scalar catalogue
//!
//! Every entry point parses the whole buffer from scratch. A hard parse
//! failure is never surfaced to the caller; each analysis degrades to its
//! documented fallback instead.

mod eos;
mod error;
mod params;
mod scalar;
mod split;

pub use eos::*;
pub use error::*;
pub use params::*;
pub use scalar::*;
pub use split::*;
