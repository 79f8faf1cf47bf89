//! Generic tree queries shared by every analysis

use crate::{SyntaxKind, SyntaxNode, SyntaxTree};

/// The source text covered by `node`.
///
/// Returns an empty string when the node's span does not fit `source`, which
/// only happens if the node came from a parse of a different text.
pub fn get_node_text<'s>(source: &'s str, node: SyntaxNode<'_>) -> &'s str {
    source.get(node.span().range()).unwrap_or_default()
}

/// Every descendant of `node` of the given kind, in document order.
///
/// The search is a full depth-first walk of the subtree rooted at `node`; the
/// node itself is never part of the result.
pub fn get_all_children<'t>(node: SyntaxNode<'t>, kind: SyntaxKind) -> Vec<SyntaxNode<'t>> {
    let mut found = Vec::new();
    let mut stack: Vec<SyntaxNode<'t>> = node.children().rev().collect();
    while let Some(current) = stack.pop() {
        if current.kind() == kind {
            found.push(current);
        }
        stack.extend(current.children().rev());
    }
    found
}

/// The innermost node covering `pos`.
///
/// `side` decides how nodes that merely touch `pos` are treated: with a
/// negative side a node ending at `pos` is entered and one starting there is
/// not, with a positive side the reverse, and with zero the node must extend
/// past `pos` on both sides. Falls back to the root when no child qualifies.
pub fn resolve_inner(tree: &SyntaxTree, pos: usize, side: i8) -> SyntaxNode<'_> {
    let enters = |node: &SyntaxNode<'_>| {
        let (from, to) = (node.from(), node.to());
        if side < 0 {
            from < pos && pos <= to
        } else if side > 0 {
            from <= pos && pos < to
        } else {
            from < pos && pos < to
        }
    };

    let mut current = tree.root();
    while let Some(child) = current.children().find(|child| enters(child)) {
        current = child;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Span, TreeBuilder};

    /// `{a}; b` as Script[Statement[Shape[Name]], Statement[Name]]
    fn sample() -> SyntaxTree {
        let mut builder = TreeBuilder::new(6);
        builder.start_node(SyntaxKind::Statement, 0);
        builder.start_node(SyntaxKind::Shape, 0);
        builder.token(SyntaxKind::Name, Span::new(1, 2));
        builder.finish_node(3);
        builder.finish_node(3);
        builder.start_node(SyntaxKind::Statement, 5);
        builder.token(SyntaxKind::Name, Span::new(5, 6));
        builder.finish_node(6);
        builder.finish(6)
    }

    #[test]
    fn test_get_all_children_is_deep_and_ordered() {
        let tree = sample();
        let names = get_all_children(tree.root(), SyntaxKind::Name);
        let spans: Vec<_> = names.iter().map(|n| n.span()).collect();
        assert_eq!(spans, vec![Span::new(1, 2), Span::new(5, 6)]);
    }

    #[test]
    fn test_get_all_children_stays_in_subtree() {
        let tree = sample();
        let second = tree.root().last_child().unwrap();
        let names = get_all_children(second, SyntaxKind::Name);
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].span(), Span::new(5, 6));
        assert!(get_all_children(names[0], SyntaxKind::Name).is_empty());
    }

    #[test]
    fn test_get_all_children_excludes_self() {
        let tree = sample();
        let statement = tree.root().first_child().unwrap();
        let statements = get_all_children(statement, SyntaxKind::Statement);
        assert!(statements.is_empty());
    }

    #[test]
    fn test_get_node_text() {
        let source = "{a}; b";
        let tree = sample();
        let statement = tree.root().first_child().unwrap();
        assert_eq!(get_node_text(source, statement), "{a}");
        assert_eq!(get_node_text("", statement), "");
    }

    #[test]
    fn test_resolve_inner_sides() {
        let tree = sample();
        // Right after `}`: the shape ends here
        assert_eq!(resolve_inner(&tree, 3, -1).kind(), SyntaxKind::Shape);
        assert!(resolve_inner(&tree, 3, 1).is_root());
        // Inside the shape
        assert_eq!(resolve_inner(&tree, 1, 1).kind(), SyntaxKind::Name);
        assert_eq!(resolve_inner(&tree, 1, -1).kind(), SyntaxKind::Shape);
        assert_eq!(resolve_inner(&tree, 1, 0).kind(), SyntaxKind::Shape);
        // Between statements
        assert!(resolve_inner(&tree, 4, -1).is_root());
        // End of input
        assert_eq!(resolve_inner(&tree, 6, -1).kind(), SyntaxKind::Name);
    }
}
