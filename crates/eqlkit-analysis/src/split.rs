//! Statement splitting
//!
//! Breaks a script into independently executable statements. Positional
//! parameters restart at `$0` in every statement once it is sent on its
//! own, so `$<digits>` references are rewritten to unique named ones.

use std::borrow::Cow;

use eqlkit_parser::parse;
use eqlkit_syntax::{get_all_children, get_node_text, SyntaxKind, SyntaxNode};
use serde::Serialize;
use tracing::{debug, trace};

/// One statement of a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    /// Verbatim statement text, trimmed
    pub display_expression: String,
    /// Text to execute, with positional parameters renamed
    pub expression: String,
    /// Parameter names as written, without `$`, one per occurrence
    pub params: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savepoint_name: Option<String>,
}

impl Statement {
    /// The whole input as a single statement, left for the server to reject
    fn opaque(source: &str) -> Self {
        Self {
            display_expression: source.to_string(),
            expression: source.to_string(),
            params: Vec::new(),
            transaction_type: None,
            savepoint_name: None,
        }
    }
}

/// Transaction control statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    StartTransaction,
    Commit,
    Rollback,
    DeclareSavepoint,
    ReleaseSavepoint,
    RollbackToSavepoint,
}

/// Split a script into statements.
///
/// Empty statements are dropped. If the script cannot be parsed at all it is
/// returned whole as one statement with no parameters.
pub fn split_statements(source: &str) -> Vec<Statement> {
    let tree = match parse(source) {
        Ok(tree) => tree,
        Err(err) => {
            debug!(%err, "parse failed, keeping script as one statement");
            return vec![Statement::opaque(source)];
        }
    };

    let statements: Vec<Statement> = tree
        .root()
        .children()
        .filter(|node| node.kind() == SyntaxKind::Statement)
        .filter_map(|node| split_statement(source, node))
        .collect();
    debug!(count = statements.len(), "split script");
    statements
}

fn split_statement(source: &str, node: SyntaxNode<'_>) -> Option<Statement> {
    let display_expression = get_node_text(source, node).trim().to_string();
    let params = get_all_children(node, SyntaxKind::QueryParameterName);

    let expression = if params.is_empty() {
        display_expression.clone()
    } else {
        let mut expression = String::new();
        let mut last = node.from();
        for param in &params {
            expression.push_str(&source[last..param.from()]);
            let text = get_node_text(source, *param);
            match positional_index(text) {
                Some(index) => {
                    expression.push_str("$p");
                    expression.push_str(index);
                }
                None => expression.push_str(text),
            }
            last = param.to();
        }
        expression.push_str(&source[last..node.to()]);
        expression
    };

    if expression.trim().is_empty() {
        return None;
    }

    let params: Vec<String> = params
        .iter()
        .map(|param| {
            let text = get_node_text(source, *param);
            text.strip_prefix('$').unwrap_or(text).to_string()
        })
        .collect();
    let transaction = classify_transaction(source, node);
    trace!(params = params.len(), ?transaction, "split statement");

    Some(Statement {
        display_expression,
        expression,
        params,
        transaction_type: transaction.as_ref().map(|(kind, _)| *kind),
        savepoint_name: transaction.and_then(|(_, name)| name),
    })
}

/// The digits of a positional parameter such as `$12`
fn positional_index(text: &str) -> Option<&str> {
    let digits = text.strip_prefix('$')?;
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
}

/// Name a parameter from [`Statement::params`] goes by in
/// [`Statement::expression`]
pub fn expression_param_name(param: &str) -> Cow<'_, str> {
    if !param.is_empty() && param.bytes().all(|b| b.is_ascii_digit()) {
        Cow::Owned(format!("p{param}"))
    } else {
        Cow::Borrowed(param)
    }
}

/// Recognize transaction control statements by their leading words
fn classify_transaction(
    source: &str,
    node: SyntaxNode<'_>,
) -> Option<(TransactionType, Option<String>)> {
    let items: Vec<SyntaxNode<'_>> = node
        .children()
        .filter(|child| child.kind() != SyntaxKind::Comment)
        .collect();
    let words: Vec<String> = items
        .iter()
        .map(|item| match item.kind() {
            SyntaxKind::Keyword => item.text(source).to_ascii_lowercase(),
            _ => String::new(),
        })
        .collect();
    let words: Vec<&str> = words.iter().map(String::as_str).collect();

    let savepoint = |index: usize| {
        let item = items.get(index)?;
        let named = matches!(item.kind(), SyntaxKind::Name | SyntaxKind::Keyword);
        (named && items.len() == index + 1)
            .then(|| item.text(source).to_string())
    };

    match words.as_slice() {
        ["start", "transaction", ..] => Some((TransactionType::StartTransaction, None)),
        ["commit"] => Some((TransactionType::Commit, None)),
        ["rollback"] => Some((TransactionType::Rollback, None)),
        ["rollback", "to", "savepoint", _] => savepoint(3)
            .map(|name| (TransactionType::RollbackToSavepoint, Some(name))),
        ["declare", "savepoint", _] => {
            savepoint(2).map(|name| (TransactionType::DeclareSavepoint, Some(name)))
        }
        ["release", "savepoint", _] => {
            savepoint(2).map(|name| (TransactionType::ReleaseSavepoint, Some(name)))
        }
        _ => None,
    }
}
