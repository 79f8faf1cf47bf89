//! Arena-backed concrete syntax tree

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::{Span, SyntaxError, SyntaxKind};

/// Index of a node inside its [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: SyntaxKind,
    span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The result of one parse.
///
/// Node 0 is always the `Script` root. Nodes are immutable once the tree is
/// built; consumers navigate them through [`SyntaxNode`] handles.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    errors: Vec<SyntaxError>,
}

impl SyntaxTree {
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Diagnostics for every error node, in the order they were produced
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Indented outline of the tree, with the text of leaf nodes
    pub fn outline(&self, source: &str) -> String {
        let mut out = String::new();
        write_outline(&mut out, self.root(), Some(source), 0);
        out
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_outline(&mut out, self.root(), None, 0);
        f.write_str(&out)
    }
}

fn write_outline(out: &mut String, node: SyntaxNode<'_>, source: Option<&str>, depth: usize) {
    let span = node.span();
    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!("{} {}..{}", node.name(), span.start, span.end));
    if let (Some(source), None) = (source, node.first_child()) {
        if let Some(text) = source.get(span.range()) {
            out.push_str(&format!(" {:?}", text));
        }
    }
    out.push('\n');
    for child in node.children() {
        write_outline(out, child, source, depth + 1);
    }
}

/// A borrowed handle to one node of a [`SyntaxTree`]
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> SyntaxNode<'t> {
    fn data(&self) -> &'t NodeData {
        self.tree.data(self.id)
    }

    fn with_id(&self, id: NodeId) -> SyntaxNode<'t> {
        SyntaxNode {
            tree: self.tree,
            id,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn span(&self) -> Span {
        self.data().span
    }

    pub fn from(&self) -> usize {
        self.data().span.start
    }

    pub fn to(&self) -> usize {
        self.data().span.end
    }

    pub fn is_root(&self) -> bool {
        self.data().parent.is_none()
    }

    pub fn parent(&self) -> Option<SyntaxNode<'t>> {
        self.data().parent.map(|id| self.with_id(id))
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = SyntaxNode<'t>> + 't {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| SyntaxNode { tree, id })
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    pub fn first_child(&self) -> Option<SyntaxNode<'t>> {
        self.data().children.first().map(|&id| self.with_id(id))
    }

    pub fn last_child(&self) -> Option<SyntaxNode<'t>> {
        self.data().children.last().map(|&id| self.with_id(id))
    }

    pub fn next_sibling(&self) -> Option<SyntaxNode<'t>> {
        let siblings = &self.tree.data(self.data().parent?).children;
        let index = siblings.iter().position(|&id| id == self.id)?;
        siblings.get(index + 1).map(|&id| self.with_id(id))
    }

    pub fn prev_sibling(&self) -> Option<SyntaxNode<'t>> {
        let siblings = &self.tree.data(self.data().parent?).children;
        let index = siblings.iter().position(|&id| id == self.id)?;
        index.checked_sub(1).map(|i| self.with_id(siblings[i]))
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// The text this node covers in `source`
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        crate::get_node_text(source, *self)
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = self.span();
        write!(f, "{}@{}..{}", self.name(), span.start, span.end)
    }
}

impl Serialize for SyntaxNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let children: Vec<SyntaxNode<'_>> = self.children().collect();
        let mut state = serializer.serialize_struct("SyntaxNode", 4)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("from", &self.from())?;
        state.serialize_field("to", &self.to())?;
        state.serialize_field("children", &children)?;
        state.end()
    }
}

impl Serialize for SyntaxTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SyntaxTree", 2)?;
        state.serialize_field("root", &self.root())?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

/// Position in the child list of the currently open node, used to wrap
/// already-built siblings into a new parent after the fact.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint(usize);

/// Builds a [`SyntaxTree`] top-down.
///
/// Nodes are opened with [`start_node`](Self::start_node) and closed with
/// [`finish_node`](Self::finish_node); leaves are added with
/// [`token`](Self::token). A closed node's end is never before the end of its
/// last child.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
    errors: Vec<SyntaxError>,
}

impl TreeBuilder {
    /// Start a tree whose `Script` root spans `0..source_len`
    pub fn new(source_len: usize) -> Self {
        Self {
            nodes: vec![NodeData {
                kind: SyntaxKind::Script,
                span: Span::new(0, source_len),
                parent: None,
                children: Vec::new(),
            }],
            stack: vec![NodeId(0)],
            errors: Vec::new(),
        }
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(NodeId(0))
    }

    fn push(&mut self, kind: SyntaxKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let parent = self.current();
        self.nodes.push(NodeData {
            kind,
            span,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Open a node starting at `start`; following nodes become its children
    pub fn start_node(&mut self, kind: SyntaxKind, start: usize) {
        let id = self.push(kind, Span::empty(start));
        self.stack.push(id);
    }

    /// Close the innermost open node at `end`
    pub fn finish_node(&mut self, end: usize) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(id) = self.stack.pop() else {
            return;
        };
        let last_end = self.nodes[id.index()]
            .children
            .last()
            .map(|child| self.nodes[child.index()].span.end)
            .unwrap_or(0);
        let span = &mut self.nodes[id.index()].span;
        span.end = end.max(last_end).max(span.start);
    }

    /// Add a leaf to the innermost open node
    pub fn token(&mut self, kind: SyntaxKind, span: Span) -> NodeId {
        self.push(kind, span)
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.nodes[self.current().index()].children.len())
    }

    /// Open a node that adopts every sibling added since `checkpoint`
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        let parent = self.current();
        let siblings = &mut self.nodes[parent.index()].children;
        let at = checkpoint.0.min(siblings.len());
        let adopted = siblings.split_off(at);
        let start = match adopted.first() {
            Some(first) => self.nodes[first.index()].span.start,
            None => self.nodes[parent.index()]
                .children
                .last()
                .map(|last| self.nodes[last.index()].span.end)
                .unwrap_or(self.nodes[parent.index()].span.start),
        };

        let id = NodeId(self.nodes.len() as u32);
        for child in &adopted {
            self.nodes[child.index()].parent = Some(id);
        }
        self.nodes.push(NodeData {
            kind,
            span: Span::empty(start),
            parent: Some(parent),
            children: adopted,
        });
        self.nodes[parent.index()].children.push(id);
        self.stack.push(id);
    }

    /// Add an error node covering `span` together with its diagnostic
    pub fn error(&mut self, message: impl Into<String>, span: Span) {
        self.token(SyntaxKind::Error, span);
        self.errors.push(SyntaxError::new(message, span));
    }

    /// Close any node left open at `end` and return the tree
    pub fn finish(mut self, end: usize) -> SyntaxTree {
        while self.stack.len() > 1 {
            self.finish_node(end);
        }
        SyntaxTree {
            nodes: self.nodes,
            errors: self.errors,
        }
    }
}
