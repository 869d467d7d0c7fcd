//! The Tclite Tokenizer
//!
//! Tclite scripts are never parsed ahead of time.  Instead, the evaluator walks the raw
//! script text, asking the tokenizer for one token at a time along with the unconsumed
//! remainder of the script.  A token takes one of four forms, chosen by its first
//! character:
//!
//! * `[script]`: a command substitution.  Brackets nest; the enclosed text is evaluated as
//!   a script and its result becomes the token.
//! * `{text}`: a literal block.  Braces nest; the enclosed text is used verbatim.
//! * `"text"`: a quoted literal, terminated by the next unescaped `"`.  Variable references
//!   are substituted.
//! * A bare word, terminated by whitespace, `NUL`, or `#`.  Variable references are
//!   substituted.
//!
//! A statement ends at a line break or at a `#`, which begins a comment running to the end
//! of the line.
//!
//! The tokenizer only finds token boundaries; the interpreter resolves tokens to values.

use crate::types::Exception;
use std::borrow::Cow;

/// One raw token, as found in the script text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// The text between `[` and its matching `]`.
    Script(&'a str),

    /// The text between `{` and its matching `}`.
    Block(&'a str),

    /// The text between the quotes, with `\"` and `\\` unescaped.
    Quoted(Cow<'a, str>),

    /// A bare word.
    Word(&'a str),
}

/// Blanks separate tokens within a statement.  Line breaks do not count; they end the
/// statement.
pub fn is_blank(c: char) -> bool {
    c == '\0' || (c.is_whitespace() && c != '\n' && c != '\r')
}

fn is_word_end(c: char) -> bool {
    c == '\0' || c == '#' || c.is_whitespace()
}

/// Strips leading whitespace and any number of full-line comments, returning the text of
/// the next statement onward.  Returns the empty string if nothing executable remains.
pub fn skip_preamble(mut text: &str) -> &str {
    loop {
        text = text.trim_start_matches(|c: char| c == '\0' || c.is_whitespace());

        match text.strip_prefix('#') {
            Some(comment) => {
                text = match comment.find(|c: char| c == '\n' || c == '\r') {
                    Some(eol) => &comment[eol..],
                    None => "",
                };
            }
            None => return text,
        }
    }
}

/// Strips the blanks preceding the next token of the current statement.
pub fn skip_blanks(text: &str) -> &str {
    text.trim_start_matches(is_blank)
}

/// Returns true if the (blank-trimmed) text is at the end of the current statement.
pub fn at_statement_end(text: &str) -> bool {
    matches!(text.chars().next(), None | Some('\n' | '\r' | '#'))
}

/// Extracts one token from the head of the text, returning the token and the remainder.
/// The text must already be blank-trimmed and must not be at the end of a statement.
pub fn next_token(text: &str) -> Result<(Token<'_>, &str), Exception> {
    match text.chars().next() {
        Some('[') => {
            let (inner, rest) =
                enclosed(text, '[', ']').ok_or_else(|| Exception::parse("missing close-bracket"))?;
            Ok((Token::Script(inner), rest))
        }
        Some('{') => {
            let (inner, rest) =
                enclosed(text, '{', '}').ok_or_else(|| Exception::parse("missing close-brace"))?;
            Ok((Token::Block(inner), rest))
        }
        Some('"') => quoted(text),
        _ => {
            let end = text.find(is_word_end).unwrap_or(text.len());
            Ok((Token::Word(&text[..end]), &text[end..]))
        }
    }
}

/// Determines whether every statement in the script is syntactically complete, i.e.,
/// has no unmatched bracket, brace, or quote.  Nothing is evaluated.
pub fn is_complete(script: &str) -> bool {
    let mut rest = skip_preamble(script);

    while !rest.is_empty() {
        loop {
            rest = skip_blanks(rest);
            if at_statement_end(rest) {
                break;
            }
            match next_token(rest) {
                Ok((_, remainder)) => rest = remainder,
                Err(_) => return false,
            }
        }
        rest = skip_preamble(rest);
    }

    true
}

// Matches a depth-counted open/close pair.  `text` begins with `open`.
fn enclosed(text: &str, open: char, close: char) -> Option<(&str, &str)> {
    let mut depth = 0usize;

    for (i, c) in text.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some((&text[1..i], &text[i + 1..]));
            }
        }
    }

    None
}

// Parses a quoted literal.  `text` begins with `"`.
fn quoted(text: &str) -> Result<(Token<'_>, &str), Exception> {
    let mut escaped = false;
    let mut has_escapes = false;

    for (i, c) in text.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
            has_escapes = true;
        } else if c == '"' {
            let raw = &text[1..i];
            let value = if has_escapes {
                Cow::Owned(unescape(raw))
            } else {
                Cow::Borrowed(raw)
            };
            return Ok((Token::Quoted(value), &text[i + 1..]));
        }
    }

    Err(Exception::parse("missing \""))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next @ ('"' | '\\')) = chars.peek() {
                out.push(next);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;

    fn token(text: &str) -> (Token<'_>, &str) {
        next_token(text).expect("valid token")
    }

    #[test]
    fn test_bare_word() {
        assert_eq!(token("abc def"), (Token::Word("abc"), " def"));
        assert_eq!(token("abc"), (Token::Word("abc"), ""));
        assert_eq!(token("abc\ndef"), (Token::Word("abc"), "\ndef"));
        assert_eq!(token("abc\r\n"), (Token::Word("abc"), "\r\n"));
        assert_eq!(token("abc#comment"), (Token::Word("abc"), "#comment"));
        assert_eq!(token("a\0b"), (Token::Word("a"), "\0b"));
        assert_eq!(token("$x,$y z"), (Token::Word("$x,$y"), " z"));
    }

    #[test]
    fn test_script() {
        assert_eq!(token("[sum 1 2] x"), (Token::Script("sum 1 2"), " x"));
        assert_eq!(
            token("[a [b [c]]]rest"),
            (Token::Script("a [b [c]]"), "rest")
        );
        assert_eq!(token("[]"), (Token::Script(""), ""));
    }

    #[test]
    fn test_block() {
        assert_eq!(token("{$x} y"), (Token::Block("$x"), " y"));
        assert_eq!(
            token("{ puts {a b} \n}"),
            (Token::Block(" puts {a b} \n"), "")
        );
        // Brackets inside a block are just text.
        assert_eq!(token("{[}"), (Token::Block("["), ""));
    }

    #[test]
    fn test_quoted() {
        assert_eq!(
            token("\"hello world\" x"),
            (Token::Quoted(Cow::Borrowed("hello world")), " x")
        );
        assert_eq!(token("\"\""), (Token::Quoted(Cow::Borrowed("")), ""));
        assert_eq!(
            token(r#""say \"hi\" \\ \n""#),
            (Token::Quoted(Cow::Owned(r#"say "hi" \ \n"#.to_string())), "")
        );
    }

    #[test]
    fn test_unbalanced() {
        for text in ["[", "[a [b]", "{", "{a {b}", "\"abc", "\"abc\\\""] {
            let err = next_token(text).expect_err(text);
            assert_eq!(err.kind(), ErrorKind::Parse, "{}", text);
        }
        assert_eq!(next_token("[").unwrap_err().message(), "missing close-bracket");
        assert_eq!(next_token("{").unwrap_err().message(), "missing close-brace");
        assert_eq!(next_token("\"").unwrap_err().message(), "missing \"");
    }

    #[test]
    fn test_skip_preamble() {
        assert_eq!(skip_preamble("   \n\t set x 1"), "set x 1");
        assert_eq!(skip_preamble("# comment\nset x 1"), "set x 1");
        assert_eq!(skip_preamble("# one\n  # two\n\nputs a"), "puts a");
        assert_eq!(skip_preamble("# only a comment"), "");
        assert_eq!(skip_preamble(" \r\n "), "");
        assert_eq!(skip_preamble("# c\rsum 2"), "sum 2");
        assert_eq!(skip_preamble(""), "");
    }

    #[test]
    fn test_statement_end() {
        assert!(at_statement_end(""));
        assert!(at_statement_end("\nnext"));
        assert!(at_statement_end("\r\nnext"));
        assert!(at_statement_end("# trailing comment"));
        assert!(!at_statement_end("word"));

        assert_eq!(skip_blanks(" \t\0 word"), "word");
        assert_eq!(skip_blanks("  \nword"), "\nword");
    }

    #[test]
    fn test_is_complete() {
        assert!(is_complete(""));
        assert!(is_complete("abc"));
        assert!(is_complete("a {bc} [def] \"ghi\" xyz"));
        assert!(is_complete("proc f {a} {\n  puts $a\n}\nf 1"));
        assert!(is_complete("# unbalanced { in a comment"));

        assert!(!is_complete("a {bc"));
        assert!(!is_complete("a [bc"));
        assert!(!is_complete("a \"bc"));
        assert!(!is_complete("proc f {a} {\n  puts $a\n"));
    }
}
