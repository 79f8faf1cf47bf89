//! eqlkit parser - Recursive descent parser for EdgeQL scripts
//!
//! Parses source text into a concrete syntax tree. Parsing never fails on
//! malformed input: such regions become error nodes and the rest of the
//! script is still parsed. Key parsing decisions:
//! - statements are split on `;` outside of brackets
//! - `<` in operand position opens a type cast, elsewhere it is a comparison
//! - a cast directly followed by `$name` forms a `QueryParameter`

mod error;
mod parser;

pub use error::*;
pub use parser::*;

use eqlkit_lexer::tokenize;
use eqlkit_syntax::SyntaxTree;
use tracing::trace;

/// Parse a source string into a syntax tree
pub fn parse(source: &str) -> Result<SyntaxTree, ParseError> {
    if u32::try_from(source.len()).is_err() {
        return Err(ParseError::InputTooLarge { len: source.len() });
    }
    let tokens = tokenize(source);
    let parser = Parser::new(source, tokens);
    let tree = parser.parse_script()?;
    trace!(
        len = source.len(),
        nodes = tree.len(),
        errors = tree.errors().len(),
        "parsed script"
    );
    Ok(tree)
}
