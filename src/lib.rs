//! eqlkit - EdgeQL lexical and syntax analysis
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use eqlkit_analysis as analysis;
pub use eqlkit_lexer as lexer;
pub use eqlkit_parser as parser;
pub use eqlkit_syntax as syntax;

pub use eqlkit_analysis::{extract_query_parameters, is_end_of_statement, split_statements};
pub use eqlkit_parser::parse;
