//! Token definitions for EdgeQL

use logos::Logos;

/// Token kinds.
///
/// Variants without a logos attribute are never produced by the generic
/// tokenizer: they come from the external probes or from identifier
/// specialization.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"#[^\n]*")]
    Comment,

    // === Identifiers ===
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"`([^`]|``)*`")]
    QuotedIdent,

    /// Specialized identifiers
    ReservedKeyword,
    UnreservedKeyword,
    BuiltinName,
    Bool,

    // === Parameters ===
    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_]*")]
    #[regex(r"\$[0-9]+")]
    QueryParameterName,

    // === Literals ===
    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?")]
    Number,

    /// `n` suffix of an arbitrary-precision literal
    BigNumberPostfix,

    #[regex(r#"'([^'\\]|\\(.|\n))*'"#)]
    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    String,

    /// A string literal that runs to the end of input
    #[regex(r#"'([^'\\]|\\(.|\n))*\\?"#)]
    #[regex(r#""([^"\\]|\\(.|\n))*\\?"#)]
    UnterminatedString,

    /// String literal following a `b` prefix
    ByteString,
    /// `$tag$ ... $tag$`
    DollarString,
    /// A `$tag$` opener without its closing delimiter, running to end of input
    UnterminatedDollarString,
    RawStringPrefix,
    ByteStringPrefix,

    // === Operators ===
    #[token("<")]
    Less,
    #[token(">")]
    Greater,

    #[token("+")]
    #[token("*")]
    #[token("/")]
    #[token("//")]
    #[token("%")]
    #[token("^")]
    #[token("=")]
    #[token("!=")]
    #[token("?=")]
    #[token("?!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("++")]
    #[token("??")]
    #[token("|")]
    #[token("&")]
    #[token("+=")]
    Operator,

    /// A lone `-`, split off before the generic tokenizer so that it can never
    /// be confused with `->`
    OperatorHack,

    // === Punctuation ===
    #[token("->")]
    Arrow,
    #[token("::")]
    ColonColon,
    #[token(":=")]
    Assign,
    #[token(".<")]
    DotLess,
    #[token(".>")]
    DotGreater,
    #[token("@")]
    At,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,

    // === Special ===
    Error,
    Eof,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::ReservedKeyword | TokenKind::UnreservedKeyword)
    }

    /// Tokens that can name something: identifiers, keywords used as names
    /// and builtins
    pub fn is_name_like(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::QuotedIdent
                | TokenKind::ReservedKeyword
                | TokenKind::UnreservedKeyword
                | TokenKind::BuiltinName
        )
    }

    /// The closing delimiter matching an opening one
    pub fn closer(&self) -> Option<TokenKind> {
        match self {
            TokenKind::LParen => Some(TokenKind::RParen),
            TokenKind::LBrace => Some(TokenKind::RBrace),
            TokenKind::LBracket => Some(TokenKind::RBracket),
            _ => None,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::Ident => "identifier",
            TokenKind::QuotedIdent => "quoted identifier",
            TokenKind::ReservedKeyword => "reserved keyword",
            TokenKind::UnreservedKeyword => "keyword",
            TokenKind::BuiltinName => "builtin name",
            TokenKind::Bool => "boolean",
            TokenKind::QueryParameterName => "query parameter",
            TokenKind::Number => "number",
            TokenKind::BigNumberPostfix => "'n'",
            TokenKind::String => "string",
            TokenKind::UnterminatedString => "unterminated string",
            TokenKind::ByteString => "byte string",
            TokenKind::DollarString => "dollar-quoted string",
            TokenKind::UnterminatedDollarString => "unterminated dollar-quoted string",
            TokenKind::RawStringPrefix => "'r'",
            TokenKind::ByteStringPrefix => "'b'",
            TokenKind::Less => "'<'",
            TokenKind::Greater => "'>'",
            TokenKind::Operator => "operator",
            TokenKind::OperatorHack => "'-'",
            TokenKind::Arrow => "'->'",
            TokenKind::ColonColon => "'::'",
            TokenKind::Assign => "':='",
            TokenKind::DotLess => "'.<'",
            TokenKind::DotGreater => "'.>'",
            TokenKind::At => "'@'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Dot => "'.'",
            TokenKind::Error => "error",
            TokenKind::Eof => "end of file",
        }
    }
}
