//! End-of-statement detection
//!
//! Decides whether pressing Enter in the REPL should submit the buffer.

use eqlkit_parser::parse;
use eqlkit_syntax::resolve_inner;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A selection in the editor; `anchor == head` is a caret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub anchor: usize,
    pub head: usize,
}

impl SelectionRange {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn caret(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }
}

/// Whether the cursor sits right after a complete statement.
///
/// Requires a single caret, a `;` as the last non-blank text before it,
/// nothing but whitespace after it, and no unfinished construct such as an
/// open string, bracket or cast around it.
pub fn is_end_of_statement(source: &str, selection: &[SelectionRange]) -> bool {
    let [range] = selection else {
        return false;
    };
    if !range.is_empty() {
        return false;
    }

    let cursor = range.head;
    let (Some(before), Some(after)) = (source.get(..cursor), source.get(cursor..)) else {
        return false;
    };
    if !before.trim_end().ends_with(';') || !after.trim().is_empty() {
        return false;
    }

    match parse(source) {
        Ok(tree) => {
            let node = resolve_inner(&tree, cursor, -1);
            trace!(cursor, node = ?node, "resolved cursor");
            node.is_root()
        }
        Err(err) => {
            debug!(%err, "parse failed, not an end of statement");
            false
        }
    }
}
