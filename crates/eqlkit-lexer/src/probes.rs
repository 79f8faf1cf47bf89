//! External tokenizer probes.
//!
//! Each probe looks at the input starting at the current position and either
//! claims a token (returning its kind and byte length) or declines, leaving
//! the position to the next probe or the generic tokenizer.

use crate::TokenKind;

/// `b'...'` / `r"..."`: claims only the prefix character
pub fn string_prefix(rest: &str) -> Option<(TokenKind, usize)> {
    let mut chars = rest.chars();
    let kind = match chars.next()? {
        'b' => TokenKind::ByteStringPrefix,
        'r' => TokenKind::RawStringPrefix,
        _ => return None,
    };
    matches!(chars.next(), Some('"' | '\'')).then_some((kind, 1))
}

/// `$tag$ ... $tag$`: claims the whole literal, delimiters included.
///
/// The tag starts with a letter or `_` and may continue with digits. An empty
/// tag is declined. A valid opener without its closing delimiter claims the
/// rest of the input as an unterminated literal.
pub fn dollar_string(rest: &str) -> Option<(TokenKind, usize)> {
    let body = rest.strip_prefix('$')?;
    let mut tag_len = 0;
    for (i, c) in body.char_indices() {
        let valid = if i == 0 {
            c.is_alphabetic() || c == '_'
        } else {
            c.is_alphanumeric() || c == '_'
        };
        if !valid {
            break;
        }
        tag_len = i + c.len_utf8();
    }
    if tag_len == 0 || !body[tag_len..].starts_with('$') {
        return None;
    }

    let delimiter = &rest[..tag_len + 2];
    let content_start = delimiter.len();
    match rest[content_start..].find(delimiter) {
        Some(offset) => Some((
            TokenKind::DollarString,
            content_start + offset + delimiter.len(),
        )),
        None => Some((TokenKind::UnterminatedDollarString, rest.len())),
    }
}

/// A `-` that does not start `->`
pub fn operator_hack(rest: &str) -> Option<usize> {
    let rest = rest.strip_prefix('-')?;
    (!rest.starts_with('>')).then_some(1)
}

/// An `n` glued to the numeric literal right before it
pub fn big_number_postfix(rest: &str, follows_number: bool) -> Option<usize> {
    (follows_number && rest.starts_with('n')).then_some(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_prefix() {
        assert_eq!(string_prefix("b'abc'"), Some((TokenKind::ByteStringPrefix, 1)));
        assert_eq!(string_prefix("r\"abc\""), Some((TokenKind::RawStringPrefix, 1)));
        assert_eq!(string_prefix("bar"), None);
        assert_eq!(string_prefix("r"), None);
        assert_eq!(string_prefix("x'a'"), None);
    }

    #[test]
    fn test_dollar_string_matches_whole_literal() {
        assert_eq!(
            dollar_string("$tag$hello $tag$"),
            Some((TokenKind::DollarString, 16))
        );
        assert_eq!(
            dollar_string("$a$ x $a$ rest"),
            Some((TokenKind::DollarString, 9))
        );
        assert_eq!(dollar_string("$t1$$t1$"), Some((TokenKind::DollarString, 8)));
    }

    #[test]
    fn test_dollar_string_rescans_partial_delimiters() {
        // `$ta` and `$tag` inside the body are plain content
        let source = "$tag$ $ta $tag $tag$";
        assert_eq!(
            dollar_string(source),
            Some((TokenKind::DollarString, source.len()))
        );
    }

    #[test]
    fn test_dollar_string_without_close_runs_to_end() {
        let source = "$tag$broken$other$";
        assert_eq!(
            dollar_string(source),
            Some((TokenKind::UnterminatedDollarString, source.len()))
        );
        assert_eq!(
            dollar_string("$body$ text;"),
            Some((TokenKind::UnterminatedDollarString, 12))
        );
    }

    #[test]
    fn test_dollar_string_declines() {
        assert_eq!(dollar_string("$$ empty tag $$"), None);
        assert_eq!(dollar_string("$1$ digits first $1$"), None);
        assert_eq!(dollar_string("$name + 1"), None);
        assert_eq!(dollar_string("tag$"), None);
    }

    #[test]
    fn test_operator_hack() {
        assert_eq!(operator_hack("-1"), Some(1));
        assert_eq!(operator_hack("- x"), Some(1));
        assert_eq!(operator_hack("->"), None);
        assert_eq!(operator_hack("+"), None);
    }

    #[test]
    fn test_big_number_postfix() {
        assert_eq!(big_number_postfix("n;", true), Some(1));
        assert_eq!(big_number_postfix("n;", false), None);
        assert_eq!(big_number_postfix("x", true), None);
    }
}
