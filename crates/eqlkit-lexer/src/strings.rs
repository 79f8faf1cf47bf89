//! String literal helpers

use std::ops::Range;

use crate::TokenKind;

/// Scan a quoted literal that follows a raw prefix.
///
/// Backslashes carry no meaning in raw strings, so the literal simply ends
/// at the next matching quote. Without one the literal runs to the end of
/// the input.
pub fn raw_string(rest: &str) -> Option<(TokenKind, usize)> {
    let quote = rest.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    Some(match rest[1..].find(quote) {
        Some(offset) => (TokenKind::String, offset + 2),
        None => (TokenKind::UnterminatedString, rest.len()),
    })
}

/// Byte ranges of the escape sequences inside a quoted literal, relative to
/// the start of `literal`.
///
/// Recognizes `\xHH`, `\uHHHH`, `\UHHHHHHHH` and single-character escapes
/// (line continuations included). Hex escapes stop at the first non-hex
/// character.
pub fn string_escapes(literal: &str) -> Vec<Range<usize>> {
    let bytes = literal.as_bytes();
    let mut escapes = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        let Some(&marker) = bytes.get(i + 1) else {
            break;
        };
        let digits = match marker {
            b'x' => 2,
            b'u' => 4,
            b'U' => 8,
            _ => 0,
        };
        let mut end = i + 1 + utf8_len(marker);
        let mut taken = 0;
        while taken < digits && bytes.get(end).is_some_and(u8::is_ascii_hexdigit) {
            end += 1;
            taken += 1;
        }
        escapes.push(i..end);
        i = end;
    }
    escapes
}

fn utf8_len(first: u8) -> usize {
    match first {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        _ => 4,
    }
}
