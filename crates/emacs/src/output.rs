//! Reading strings back from what Emacs prints.
//!
//! `emacsclient --eval` prints its result with `prin1`, so a string value
//! arrives as an escaped, double-quoted literal.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::EmacsError;

/// Undo `prin1` escaping of a double-quoted Elisp string literal.
///
/// Emacs only escapes newlines and control characters when
/// `print-escape-newlines` and `print-escape-control-characters` are set;
/// raw control characters are accepted as they are.
pub fn unescape_printed_string(printed: &str) -> Result<String, EmacsError> {
    let malformed = || EmacsError::MalformedOutput(printed.to_string());

    let inner = printed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(malformed)?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => return Err(malformed()),
            '\\' => {
                let escaped = chars.next().ok_or_else(malformed)?;
                if let Some(c) = read_escape(escaped, &mut chars).ok_or_else(malformed)? {
                    out.push(c);
                }
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Decode the escape sequence after a backslash.
///
/// `None` means malformed; `Some(None)` is an escape that stands for nothing.
fn read_escape(c: char, chars: &mut Peekable<Chars<'_>>) -> Option<Option<char>> {
    let decoded = match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'f' => '\x0c',
        'a' => '\x07',
        'b' => '\x08',
        'v' => '\x0b',
        'e' => '\x1b',
        'd' => '\x7f',
        's' => ' ',
        // Line continuation and the separator after a hex escape.
        '\n' | ' ' => return Some(None),
        '0'..='7' => {
            let mut code = c.to_digit(8)?;
            for _ in 0..2 {
                match chars.peek().and_then(|c| c.to_digit(8)) {
                    Some(digit) => {
                        code = code * 8 + digit;
                        chars.next();
                    }
                    None => break,
                }
            }
            char::from_u32(code)?
        }
        'x' => {
            let mut code: u32 = 0;
            let mut digits = 0;
            while let Some(digit) = chars.peek().and_then(|c| c.to_digit(16)) {
                code = code.checked_mul(16)?.checked_add(digit)?;
                digits += 1;
                chars.next();
            }
            if digits == 0 {
                return None;
            }
            char::from_u32(code)?
        }
        'u' => read_hex(chars, 4)?,
        'U' => read_hex(chars, 8)?,
        other => other,
    };
    Some(Some(decoded))
}

fn read_hex(chars: &mut Peekable<Chars<'_>>, len: usize) -> Option<char> {
    let mut code: u32 = 0;
    for _ in 0..len {
        let digit = chars.next()?.to_digit(16)?;
        code = code.checked_mul(16)?.checked_add(digit)?;
    }
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emacs_elisp::escape_string;

    #[test]
    fn test_plain() {
        assert_eq!(unescape_printed_string("\"foobar\"").unwrap(), "foobar");
        assert_eq!(unescape_printed_string("\"\"").unwrap(), "");
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            unescape_printed_string(r#""say \"hi\" \\ bye""#).unwrap(),
            "say \"hi\" \\ bye"
        );
        assert_eq!(unescape_printed_string(r#""a\nb\tc""#).unwrap(), "a\nb\tc");
        assert_eq!(unescape_printed_string(r#""\033[0m""#).unwrap(), "\x1b[0m");
        assert_eq!(unescape_printed_string(r#""\x41\ B""#).unwrap(), "AB");
        assert_eq!(unescape_printed_string(r#""\u00e9\U0001F980""#).unwrap(), "é🦀");
        assert_eq!(unescape_printed_string("\"multi\\\nline\"").unwrap(), "multiline");
    }

    #[test]
    fn test_reads_rendered_literals() {
        for s in ["plain", "quote \" and \\", "ctl \u{1}\u{1f}\u{7f}", "ünï 日本"] {
            assert_eq!(unescape_printed_string(&escape_string(s)).unwrap(), s);
        }
    }

    #[test]
    fn test_malformed() {
        for bad in ["foo", "\"foo", "\"a\"b\"", "\"trailing\\\"", "\"\\x\"", "\"\\u12\""] {
            let err = unescape_printed_string(bad).unwrap_err();
            assert!(matches!(err, EmacsError::MalformedOutput(_)), "{:?}", bad);
        }
    }
}
