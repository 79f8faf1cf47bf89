//! eqlkit lexer - EdgeQL tokenization using logos
//!
//! The generic tokens come from a logos lexer. A handful of constructs it
//! cannot express are claimed first by external probes:
//! - `b'...'` / `r'...'` string prefixes
//! - `$tag$ ... $tag$` dollar-quoted strings
//! - a lone `-`, kept apart from `->`
//! - the `n` postfix of big-number literals (`12345n`)

mod probes;
mod strings;
mod token;
mod vocab;

pub use probes::*;
pub use strings::*;
pub use token::*;
pub use vocab::*;

use eqlkit_syntax::Span;
use logos::Logos;

/// Tokenize a source string into a vector of tokens.
///
/// Whitespace is dropped, comments are kept, and the last token is always
/// `Eof`.
pub fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::new(source).collect()
}

/// A token with its span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start..self.span.end]
    }
}

/// Streaming tokenizer combining the probes with the logos lexer
pub struct Tokenizer<'s> {
    lexer: logos::Lexer<'s, TokenKind>,
    /// Kind of the previous token, whitespace included
    prev: Option<TokenKind>,
    /// Prefix the next string literal belongs to
    prefix: Option<TokenKind>,
    done: bool,
}

impl<'s> Tokenizer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            lexer: TokenKind::lexer(source),
            prev: None,
            prefix: None,
            done: false,
        }
    }

    fn probe(&self, rest: &str, prefix: Option<TokenKind>) -> Option<(TokenKind, usize)> {
        if prefix == Some(TokenKind::RawStringPrefix) {
            if let Some(literal) = raw_string(rest) {
                return Some(literal);
            }
        }
        string_prefix(rest)
            .or_else(|| dollar_string(rest))
            .or_else(|| operator_hack(rest).map(|len| (TokenKind::OperatorHack, len)))
            .or_else(|| {
                big_number_postfix(rest, self.prev == Some(TokenKind::Number))
                    .map(|len| (TokenKind::BigNumberPostfix, len))
            })
    }

    fn emit(&mut self, kind: TokenKind, start: usize, end: usize) -> Token {
        self.prev = Some(kind);
        if matches!(kind, TokenKind::RawStringPrefix | TokenKind::ByteStringPrefix) {
            self.prefix = Some(kind);
        }
        Token {
            kind,
            span: Span::new(start, end),
        }
    }

    /// Next token, whitespace included
    fn next_raw(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }

        let start = self.lexer.span().end;
        let rest = self.lexer.remainder();
        if rest.is_empty() {
            self.done = true;
            return Some(Token {
                kind: TokenKind::Eof,
                span: Span::empty(start),
            });
        }

        let prefix = self.prefix.take();
        if let Some((kind, len)) = self.probe(rest, prefix) {
            self.lexer.bump(len);
            return Some(self.emit(kind, start, start + len));
        }

        let kind = match self.lexer.next()? {
            Ok(kind) => kind,
            Err(()) => TokenKind::Error,
        };
        let span = self.lexer.span();
        let kind = match kind {
            TokenKind::Ident => classify_ident(self.lexer.slice()),
            TokenKind::String if prefix == Some(TokenKind::ByteStringPrefix) => {
                TokenKind::ByteString
            }
            other => other,
        };
        Some(self.emit(kind, span.start, span.end))
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let token = self.next_raw()?;
            if token.kind != TokenKind::Whitespace {
                return Some(token);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_basic_tokens() {
        let tokens = tokenize("select User { name } filter .id = <uuid>$id;");
        let source = "select User { name } filter .id = <uuid>$id;";
        assert_eq!(tokens[0].kind, TokenKind::ReservedKeyword);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[2].kind, TokenKind::LBrace);
        assert_eq!(tokens[4].kind, TokenKind::RBrace);
        assert_eq!(tokens[5].kind, TokenKind::ReservedKeyword);
        assert_eq!(tokens[6].kind, TokenKind::Dot);
        assert_eq!(tokens[8].kind, TokenKind::Operator);
        assert_eq!(tokens[9].kind, TokenKind::Less);
        assert_eq!(tokens[11].kind, TokenKind::Greater);
        assert_eq!(tokens[12].kind, TokenKind::QueryParameterName);
        assert_eq!(tokens[12].text(source), "$id");
        assert_eq!(tokens[13].kind, TokenKind::Semicolon);
        assert_eq!(tokens[14].kind, TokenKind::Eof);
    }

    #[test]
    fn test_positional_parameter() {
        let source = "select <str>$0";
        let tokens = tokenize(source);
        assert_eq!(tokens[4].kind, TokenKind::QueryParameterName);
        assert_eq!(tokens[4].text(source), "$0");
    }

    #[test]
    fn test_dollar_string_is_one_token() {
        let source = "$tag$hello $tag$";
        let tokens = tokenize(source);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::DollarString);
        assert_eq!(tokens[0].span, Span::new(0, source.len()));
    }

    #[test]
    fn test_unclosed_dollar_string_runs_to_end() {
        let source = "select $tag$broken$other$; select 1;";
        let tokens = tokenize(source);
        assert!(tokens.iter().all(|t| t.kind != TokenKind::DollarString));
        assert_eq!(tokens[1].kind, TokenKind::UnterminatedDollarString);
        assert_eq!(tokens[1].span, Span::new(7, source.len()));
        assert_eq!(tokens[2].kind, TokenKind::Eof);
    }

    #[test]
    fn test_big_number_postfix() {
        let source = "12345n";
        let tokens = tokenize(source);
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text(source), "12345");
        assert_eq!(tokens[1].kind, TokenKind::BigNumberPostfix);
        assert_eq!(tokens[1].span, Span::new(5, 6));
    }

    #[test]
    fn test_separated_n_is_not_a_postfix() {
        let source = "12345 n";
        let tokens = tokenize(source);
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].text(source), "n");
    }

    #[test]
    fn test_operator_hack_vs_arrow() {
        assert_eq!(
            kinds("a - b"),
            vec![TokenKind::Ident, TokenKind::OperatorHack, TokenKind::Ident, TokenKind::Eof]
        );
        assert_eq!(
            kinds("x -> str"),
            vec![TokenKind::Ident, TokenKind::Arrow, TokenKind::BuiltinName, TokenKind::Eof]
        );
        assert_eq!(kinds("-1")[0], TokenKind::OperatorHack);
    }

    #[test]
    fn test_string_prefixes() {
        assert_eq!(
            kinds(r"b'\x00'"),
            vec![TokenKind::ByteStringPrefix, TokenKind::ByteString, TokenKind::Eof]
        );
        assert_eq!(
            kinds(r"r'C:\'"),
            vec![TokenKind::RawStringPrefix, TokenKind::String, TokenKind::Eof]
        );
        assert_eq!(kinds("bar")[0], TokenKind::Ident);
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let source = "select 'abc; select 1;";
        let tokens = tokenize(source);
        assert_eq!(tokens[1].kind, TokenKind::UnterminatedString);
        assert_eq!(tokens[1].span.end, source.len());
        assert_eq!(tokens[2].kind, TokenKind::Eof);
    }

    #[test]
    fn test_comments_are_kept() {
        assert_eq!(
            kinds("select 1 # trailing\n;"),
            vec![
                TokenKind::ReservedKeyword,
                TokenKind::Number,
                TokenKind::Comment,
                TokenKind::Semicolon,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_unknown_character_is_error() {
        let tokens = kinds("select ~");
        assert_eq!(tokens[1], TokenKind::Error);
    }

    #[test]
    fn test_bool_and_quoted_ident() {
        assert_eq!(
            kinds("True `select`"),
            vec![TokenKind::Bool, TokenKind::QuotedIdent, TokenKind::Eof]
        );
    }
}
