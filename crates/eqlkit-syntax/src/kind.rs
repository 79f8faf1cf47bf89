//! Node kinds of the EdgeQL syntax tree

use serde::{Serialize, Serializer};

/// Name given to error nodes
pub const ERROR_NODE_NAME: &str = "⚠";

/// The kind of a syntax tree node.
///
/// Punctuation (`;`, `,`, `.`, `::`, `:=`, `->` and the bracket pairs) has no
/// kind: it is consumed by the parser but never becomes a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    // === Structure ===
    /// Root of every tree, spans the whole input
    Script,
    /// One top-level statement, without its terminating `;`
    Statement,
    /// `{ ... }`
    Shape,
    /// `( ... )`
    Parens,
    /// `[ ... ]`
    Brackets,

    // === Casts and parameters ===
    /// `<type>`
    Cast,
    /// A cast applied to a parameter: `<str>$name`
    QueryParameter,
    /// A cast applied to any other operand: `<str>(1 + 2)`
    TypeCast,
    /// `$name` or `$0`
    QueryParameterName,

    // === Leaves ===
    Keyword,
    /// Plain, backtick-quoted or `::`-qualified identifier
    Name,
    BuiltinName,
    Bool,
    Number,
    BigNumberPostfix,
    String,
    ByteString,
    RawStringPrefix,
    ByteStringPrefix,
    StringEscape,
    Operator,
    /// `<` used as a comparison operator
    Less,
    /// `>` used as a comparison operator
    Greater,
    Comment,

    /// Malformed input
    Error,
}

impl SyntaxKind {
    /// The node name as exposed to consumers of the tree
    pub fn name(self) -> &'static str {
        match self {
            SyntaxKind::Script => "Script",
            SyntaxKind::Statement => "Statement",
            SyntaxKind::Shape => "Shape",
            SyntaxKind::Parens => "Parens",
            SyntaxKind::Brackets => "Brackets",
            SyntaxKind::Cast => "Cast",
            SyntaxKind::QueryParameter => "QueryParameter",
            SyntaxKind::TypeCast => "TypeCast",
            SyntaxKind::QueryParameterName => "QueryParameterName",
            SyntaxKind::Keyword => "Keyword",
            SyntaxKind::Name => "Name",
            SyntaxKind::BuiltinName => "BuiltinName",
            SyntaxKind::Bool => "Bool",
            SyntaxKind::Number => "Number",
            SyntaxKind::BigNumberPostfix => "BigNumberPostfix",
            SyntaxKind::String => "String",
            SyntaxKind::ByteString => "ByteString",
            SyntaxKind::RawStringPrefix => "RawStringPrefix",
            SyntaxKind::ByteStringPrefix => "ByteStringPrefix",
            SyntaxKind::StringEscape => "StringEscape",
            SyntaxKind::Operator => "Operator",
            SyntaxKind::Less => "Less",
            SyntaxKind::Greater => "Greater",
            SyntaxKind::Comment => "Comment",
            SyntaxKind::Error => ERROR_NODE_NAME,
        }
    }

    /// Look a kind up by its node name
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_KINDS.iter().copied().find(|kind| kind.name() == name)
    }

    pub fn is_error(self) -> bool {
        self == SyntaxKind::Error
    }
}

const ALL_KINDS: &[SyntaxKind] = &[
    SyntaxKind::Script,
    SyntaxKind::Statement,
    SyntaxKind::Shape,
    SyntaxKind::Parens,
    SyntaxKind::Brackets,
    SyntaxKind::Cast,
    SyntaxKind::QueryParameter,
    SyntaxKind::TypeCast,
    SyntaxKind::QueryParameterName,
    SyntaxKind::Keyword,
    SyntaxKind::Name,
    SyntaxKind::BuiltinName,
    SyntaxKind::Bool,
    SyntaxKind::Number,
    SyntaxKind::BigNumberPostfix,
    SyntaxKind::String,
    SyntaxKind::ByteString,
    SyntaxKind::RawStringPrefix,
    SyntaxKind::ByteStringPrefix,
    SyntaxKind::StringEscape,
    SyntaxKind::Operator,
    SyntaxKind::Less,
    SyntaxKind::Greater,
    SyntaxKind::Comment,
    SyntaxKind::Error,
];

impl Serialize for SyntaxKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
