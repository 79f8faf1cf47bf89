//! Recursive descent parser implementation

use eqlkit_lexer::{string_escapes, Token, TokenKind};
use eqlkit_syntax::{Span, SyntaxKind, SyntaxTree, TreeBuilder};

use crate::ParseError;

/// Deepest nesting of groups, casts and type arguments the parser accepts
pub const MAX_NESTING_DEPTH: usize = 256;

pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    /// End of the last consumed token
    last_end: usize,
    depth: usize,
    builder: TreeBuilder,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            last_end: 0,
            depth: 0,
            builder: TreeBuilder::new(source.len()),
        }
    }

    // === Utilities ===

    fn token_at(&self, index: usize) -> Token {
        self.tokens
            .get(index)
            .or_else(|| self.tokens.last())
            .copied()
            .unwrap_or(Token {
                kind: TokenKind::Eof,
                span: Span::empty(self.source.len()),
            })
    }

    /// The `n`-th token from the current position, comments skipped
    fn significant(&self, n: usize) -> Token {
        let mut remaining = n;
        let mut index = self.pos;
        loop {
            let token = self.token_at(index);
            if token.kind == TokenKind::Eof {
                return token;
            }
            if token.kind != TokenKind::Comment {
                if remaining == 0 {
                    return token;
                }
                remaining -= 1;
            }
            index += 1;
        }
    }

    fn current(&self) -> Token {
        self.significant(0)
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn peek_ahead(&self, n: usize) -> TokenKind {
        self.significant(n).kind
    }

    /// The `n`-th token from the current position, comments included
    fn peek_raw(&self, n: usize) -> TokenKind {
        self.token_at(self.pos + n).kind
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn text(&self, token: Token) -> &'a str {
        token.text(self.source)
    }

    /// Attach pending comments to the innermost open node
    fn flush_trivia(&mut self) {
        while self.token_at(self.pos).kind == TokenKind::Comment {
            let comment = self.token_at(self.pos);
            self.builder.token(SyntaxKind::Comment, comment.span);
            self.last_end = comment.span.end;
            self.pos += 1;
        }
    }

    /// Consume the next significant token without adding a node for it
    fn advance(&mut self) -> Token {
        self.flush_trivia();
        let token = self.token_at(self.pos);
        if token.kind != TokenKind::Eof {
            self.pos += 1;
            self.last_end = token.span.end;
        }
        token
    }

    /// Consume the next significant token as a leaf node
    fn leaf(&mut self, kind: SyntaxKind) -> Token {
        let token = self.advance();
        self.builder.token(kind, token.span);
        token
    }

    fn enter(&mut self, span: Span) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                span,
            });
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // === Script ===

    pub fn parse_script(mut self) -> Result<SyntaxTree, ParseError> {
        loop {
            match self.peek() {
                TokenKind::Eof => break,
                TokenKind::Semicolon => {
                    self.advance();
                }
                _ => self.parse_statement()?,
            }
        }
        self.flush_trivia();
        Ok(self.builder.finish(self.source.len()))
    }

    fn parse_statement(&mut self) -> Result<(), ParseError> {
        let start = self.current().span.start;
        self.flush_trivia();
        self.builder.start_node(SyntaxKind::Statement, start);
        self.parse_sequence(None)?;
        self.builder.finish_node(self.last_end);
        Ok(())
    }

    /// Items up to `closer`, or up to a `;` at statement level
    fn parse_sequence(&mut self, closer: Option<TokenKind>) -> Result<(), ParseError> {
        let mut expect_operand = true;
        loop {
            let kind = self.peek();
            if kind == TokenKind::Eof
                || Some(kind) == closer
                || (closer.is_none() && kind == TokenKind::Semicolon)
            {
                return Ok(());
            }
            expect_operand = self.parse_item(expect_operand)?;
        }
    }

    /// Parse one item; returns whether an operand is expected next
    fn parse_item(&mut self, expect_operand: bool) -> Result<bool, ParseError> {
        let token = self.current();
        match token.kind {
            TokenKind::Less if expect_operand => {
                self.parse_cast()?;
                Ok(false)
            }
            TokenKind::Less => {
                self.leaf(SyntaxKind::Less);
                Ok(true)
            }
            TokenKind::Greater => {
                self.leaf(SyntaxKind::Greater);
                Ok(true)
            }
            kind if kind.is_name_like() && self.peek_raw_after_current() == TokenKind::ColonColon => {
                self.parse_name();
                Ok(false)
            }
            TokenKind::ReservedKeyword | TokenKind::UnreservedKeyword => {
                self.leaf(SyntaxKind::Keyword);
                Ok(true)
            }
            TokenKind::BuiltinName => {
                self.leaf(SyntaxKind::BuiltinName);
                Ok(false)
            }
            TokenKind::Ident | TokenKind::QuotedIdent => {
                self.parse_name();
                Ok(false)
            }
            TokenKind::Bool => {
                self.leaf(SyntaxKind::Bool);
                Ok(false)
            }
            TokenKind::Number => {
                self.leaf(SyntaxKind::Number);
                if self.peek_raw(0) == TokenKind::BigNumberPostfix {
                    self.leaf(SyntaxKind::BigNumberPostfix);
                }
                Ok(false)
            }
            TokenKind::String
            | TokenKind::ByteString
            | TokenKind::DollarString
            | TokenKind::RawStringPrefix
            | TokenKind::ByteStringPrefix => {
                self.parse_string();
                Ok(false)
            }
            TokenKind::UnterminatedString => {
                let token = self.advance();
                self.builder
                    .error("unterminated string literal", token.span);
                Ok(false)
            }
            TokenKind::UnterminatedDollarString => {
                let token = self.advance();
                self.builder
                    .error("unterminated dollar-quoted string literal", token.span);
                Ok(false)
            }
            TokenKind::QueryParameterName => {
                self.leaf(SyntaxKind::QueryParameterName);
                Ok(false)
            }
            TokenKind::Operator | TokenKind::OperatorHack => {
                self.leaf(SyntaxKind::Operator);
                Ok(true)
            }
            TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => {
                self.parse_group()?;
                Ok(false)
            }
            TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket => {
                let token = self.advance();
                self.builder
                    .error(format!("unexpected {}", token.kind.describe()), token.span);
                Ok(true)
            }
            TokenKind::Error | TokenKind::BigNumberPostfix => {
                let token = self.advance();
                let message = format!("unexpected character `{}`", self.text(token));
                self.builder.error(message, token.span);
                Ok(true)
            }
            _ => {
                self.advance();
                Ok(true)
            }
        }
    }

    /// Raw kind of the token right after the current significant one
    fn peek_raw_after_current(&self) -> TokenKind {
        let mut index = self.pos;
        while self.token_at(index).kind == TokenKind::Comment {
            index += 1;
        }
        self.token_at(index + 1).kind
    }

    /// `name`, `` `quoted` `` or `module::name`, as a single `Name` leaf
    fn parse_name(&mut self) {
        let first = self.advance();
        while self.peek_raw(0) == TokenKind::ColonColon && self.peek_raw(1).is_name_like() {
            self.pos += 2;
            self.last_end = self.token_at(self.pos - 1).span.end;
        }
        self.builder
            .token(SyntaxKind::Name, Span::new(first.span.start, self.last_end));
    }

    fn parse_string(&mut self) {
        let token = self.current();
        match token.kind {
            TokenKind::RawStringPrefix => {
                self.flush_trivia();
                self.builder.start_node(SyntaxKind::String, token.span.start);
                self.leaf(SyntaxKind::RawStringPrefix);
                self.string_body(TokenKind::String, false);
                self.builder.finish_node(self.last_end);
            }
            TokenKind::ByteStringPrefix => {
                self.flush_trivia();
                self.builder
                    .start_node(SyntaxKind::ByteString, token.span.start);
                self.leaf(SyntaxKind::ByteStringPrefix);
                self.string_body(TokenKind::ByteString, true);
                self.builder.finish_node(self.last_end);
            }
            TokenKind::String => {
                self.flush_trivia();
                self.builder.start_node(SyntaxKind::String, token.span.start);
                self.string_body(TokenKind::String, true);
                self.builder.finish_node(self.last_end);
            }
            TokenKind::ByteString => {
                self.leaf(SyntaxKind::ByteString);
            }
            _ => {
                self.leaf(SyntaxKind::String);
            }
        }
    }

    /// The quoted part of a literal, with its escapes as children
    fn string_body(&mut self, expected: TokenKind, escapes: bool) {
        let token = self.current();
        if token.kind == expected && self.peek_raw(0) == expected {
            self.advance();
            if escapes {
                for escape in string_escapes(self.text(token)) {
                    let span = Span::new(
                        token.span.start + escape.start,
                        token.span.start + escape.end,
                    );
                    self.builder.token(SyntaxKind::StringEscape, span);
                }
            }
        } else if token.kind == TokenKind::UnterminatedString {
            self.advance();
            self.builder
                .error("unterminated string literal", token.span);
        } else {
            self.builder.error(
                "expected a string literal after the prefix",
                Span::empty(self.last_end),
            );
        }
    }

    /// `( ... )`, `{ ... }` or `[ ... ]`
    fn parse_group(&mut self) -> Result<(), ParseError> {
        let open = self.current();
        self.enter(open.span)?;
        let kind = match open.kind {
            TokenKind::LParen => SyntaxKind::Parens,
            TokenKind::LBrace => SyntaxKind::Shape,
            _ => SyntaxKind::Brackets,
        };
        let closer = open.kind.closer();

        self.flush_trivia();
        self.builder.start_node(kind, open.span.start);
        self.advance();
        self.parse_sequence(closer)?;

        if closer.is_some_and(|closer| self.at(closer)) {
            let close = self.advance();
            self.builder.finish_node(close.span.end);
        } else {
            let message = format!(
                "expected {} to close {} at offset {}",
                closer.map(|c| c.describe()).unwrap_or("delimiter"),
                open.kind.describe(),
                open.span.start
            );
            self.flush_trivia();
            self.builder.error(message, Span::empty(self.last_end));
            self.builder.finish_node(self.source.len());
        }
        self.exit();
        Ok(())
    }

    // === Casts ===

    /// `<type>` in operand position, wrapped together with what it applies to
    fn parse_cast(&mut self) -> Result<(), ParseError> {
        let open = self.current();
        self.enter(open.span)?;
        self.flush_trivia();
        let checkpoint = self.builder.checkpoint();

        self.builder.start_node(SyntaxKind::Cast, open.span.start);
        self.advance();
        self.parse_cast_type()?;
        if !self.at(TokenKind::Greater) {
            self.builder
                .error("expected '>' to close type cast", Span::empty(self.last_end));
            self.parse_sequence(Some(TokenKind::Greater))?;
        }
        if self.at(TokenKind::Greater) {
            let close = self.advance();
            self.builder.finish_node(close.span.end);
        } else {
            // Unclosed, so the cast owns the rest of the input
            self.flush_trivia();
            self.builder.finish_node(self.source.len());
        }

        match self.peek() {
            TokenKind::QueryParameterName => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::QueryParameter);
                self.leaf(SyntaxKind::QueryParameterName);
                self.builder.finish_node(self.last_end);
            }
            kind if starts_operand(kind) => {
                self.builder.start_node_at(checkpoint, SyntaxKind::TypeCast);
                self.parse_item(true)?;
                self.builder.finish_node(self.last_end);
            }
            _ => {}
        }
        self.exit();
        Ok(())
    }

    /// Contents of a cast: an optional `optional`/`required` modifier and a type
    fn parse_cast_type(&mut self) -> Result<(), ParseError> {
        let token = self.current();
        if token.kind.is_keyword() {
            let modifier = self.text(token).to_ascii_lowercase();
            if modifier == "optional" || modifier == "required" {
                self.leaf(SyntaxKind::Keyword);
                if matches!(self.peek(), TokenKind::Greater | TokenKind::Eof) {
                    self.builder
                        .error("expected a type after the modifier", Span::empty(self.last_end));
                    return Ok(());
                }
            }
        }
        self.parse_type_expr()
    }

    fn parse_type_expr(&mut self) -> Result<(), ParseError> {
        let token = self.current();
        self.enter(token.span)?;
        match token.kind {
            TokenKind::BuiltinName if self.peek_ahead(1) == TokenKind::Less => {
                self.leaf(SyntaxKind::BuiltinName);
                self.advance();
                self.parse_type_args()?;
            }
            TokenKind::ReservedKeyword if self.peek_raw_after_current() != TokenKind::ColonColon => {
                self.leaf(SyntaxKind::Keyword);
            }
            kind if kind.is_name_like() => self.parse_name(),
            _ => {
                self.builder
                    .error("expected a type", Span::empty(token.span.start));
            }
        }
        self.exit();
        Ok(())
    }

    /// `a, b, label: c>` after a generic type's `<`
    fn parse_type_args(&mut self) -> Result<(), ParseError> {
        while !self.at(TokenKind::Greater) && !self.at(TokenKind::Eof) {
            if self.peek().is_name_like() && self.peek_ahead(1) == TokenKind::Colon {
                self.leaf(SyntaxKind::Name);
                self.advance();
            }
            self.parse_type_expr()?;
            if self.at(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }

        if self.at(TokenKind::Greater) {
            self.advance();
        } else {
            self.builder.error(
                "expected '>' to close type arguments",
                Span::empty(self.last_end),
            );
        }
        Ok(())
    }
}

/// Tokens that can begin the operand a cast applies to
fn starts_operand(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Less
            | TokenKind::Ident
            | TokenKind::QuotedIdent
            | TokenKind::BuiltinName
            | TokenKind::Bool
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::ByteString
            | TokenKind::DollarString
            | TokenKind::RawStringPrefix
            | TokenKind::ByteStringPrefix
            | TokenKind::LParen
            | TokenKind::LBrace
            | TokenKind::LBracket
    )
}
