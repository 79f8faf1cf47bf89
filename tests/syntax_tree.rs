//! Integration tests for the tokenizer and parser working together

mod common;

use common::*;
use eqlkit::lexer::{tokenize, TokenKind};
use eqlkit::syntax::{get_all_children, resolve_inner, SyntaxKind, ERROR_NODE_NAME};

#[test]
fn fixtures_parse_cleanly() {
    let fixtures = script_fixtures();
    assert!(!fixtures.is_empty(), "No fixtures found");

    for name in fixtures {
        let source = load_fixture(&name);
        let tree = assert_parses_cleanly(&source);
        assert_spans_reconstruct(tree.root(), &source);
    }
}

#[test]
fn malformed_input_keeps_spans_consistent() {
    for source in [
        "select User { name, friends: { name }",
        "select ) ] }; select 1;",
        "select 'unterminated; select 2;",
        "select <array<str $x; select <str>$y;",
        "select <str; select 1; # trailing",
        "select $body$ text; select 2;",
        "select ~ 1 ` 2",
        "# only a comment",
        "",
    ] {
        let tree = assert_parses(source);
        assert_spans_reconstruct(tree.root(), source);
    }
}

#[test]
fn error_nodes_are_marked() {
    let source = "select (1, 2; select 3;";
    let tree = assert_parses(source);
    let errors = get_all_children(tree.root(), SyntaxKind::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].name(), ERROR_NODE_NAME);
    assert_eq!(tree.errors().len(), 1);
}

#[test]
fn parsing_is_deterministic() {
    let source = load_fixture("params.edgeql");
    let first = assert_parses(&source);
    let second = assert_parses(&source);
    assert_eq!(first.outline(&source), second.outline(&source));
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[test]
fn tree_serializes_with_node_names() {
    let source = "select <str>$x;";
    let tree = assert_parses(source);
    let json = serde_json::to_value(&tree).unwrap();
    let statement = &json["root"]["children"][0];
    assert_eq!(json["root"]["name"], "Script");
    assert_eq!(statement["name"], "Statement");
    assert_eq!(statement["children"][1]["name"], "QueryParameter");
    assert_eq!(statement["to"], 14);
}

#[test]
fn dollar_quoted_strings() {
    let tokens = tokenize("$tag$hello $tag$");
    assert_eq!(tokens[0].kind, TokenKind::DollarString);
    assert_eq!((tokens[0].span.start, tokens[0].span.end), (0, 16));

    let tokens = tokenize("$tag$broken$other$");
    assert!(tokens.iter().all(|t| t.kind != TokenKind::DollarString));
    assert_eq!(tokens[0].kind, TokenKind::UnterminatedDollarString);
    assert_eq!(tokens[0].span.end, 18);
}

#[test]
fn big_number_postfix_needs_adjacent_number() {
    let kinds = |source: &str| -> Vec<TokenKind> { tokenize(source).iter().map(|t| t.kind).collect() };
    assert_eq!(
        kinds("12345n"),
        vec![TokenKind::Number, TokenKind::BigNumberPostfix, TokenKind::Eof]
    );
    assert_eq!(
        kinds("12345 n"),
        vec![TokenKind::Number, TokenKind::Ident, TokenKind::Eof]
    );
}

#[test]
fn resolve_inner_finds_innermost_node() {
    let source = "select User { name };";
    let tree = assert_parses(source);

    assert_eq!(resolve_inner(&tree, 16, 0).kind(), SyntaxKind::Name);
    assert_eq!(resolve_inner(&tree, 18, -1).kind(), SyntaxKind::Name);
    assert_eq!(resolve_inner(&tree, 18, 1).kind(), SyntaxKind::Shape);
    assert_eq!(resolve_inner(&tree, 21, -1).kind(), SyntaxKind::Script);
}
