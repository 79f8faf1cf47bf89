use eqlkit::syntax::{get_node_text, SyntaxNode, SyntaxTree};

/// Assert that parsing succeeds and returns the tree
pub fn assert_parses(source: &str) -> SyntaxTree {
    eqlkit::parse(source)
        .unwrap_or_else(|e| panic!("Expected source to parse successfully: {}", e))
}

/// Assert that parsing succeeds without any error nodes
pub fn assert_parses_cleanly(source: &str) -> SyntaxTree {
    let tree = assert_parses(source);
    assert!(
        !tree.has_errors(),
        "Expected no syntax errors, found: {:?}",
        tree.errors()
    );
    tree
}

/// Assert that every node's direct children lie inside it, in order and
/// without overlapping, and that only anonymous text (whitespace and
/// punctuation) sits between them
pub fn assert_spans_reconstruct(node: SyntaxNode<'_>, source: &str) {
    let mut cursor = node.from();
    for child in node.children() {
        assert!(
            child.from() >= cursor && child.to() <= node.to(),
            "{:?} is out of place inside {:?}",
            child,
            node
        );
        let gap = &source[cursor..child.from()];
        assert!(
            !gap.chars()
                .any(|c| c.is_alphanumeric() || matches!(c, '$' | '\'' | '"' | '#')),
            "text {:?} before {:?} is not covered by any node",
            gap,
            child
        );
        assert_eq!(get_node_text(source, child), &source[child.from()..child.to()]);
        cursor = child.to();
        assert_spans_reconstruct(child, source);
    }
}
