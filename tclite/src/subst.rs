//! Variable Substitution
//!
//! Replaces `$name` and `${name}` references in a token with the values of the named
//! variables.  The token is scanned once, left to right; each `$` is followed by the
//! longest run of identifier characters (ASCII letters, digits, and `_`), and exactly
//! that name is looked up.  Thus `$foobar` never matches a variable called `foo`, and
//! the result never depends on the order in which variables were defined.
//!
//! A `$` that isn't followed by an identifier (or by a closed `{...}`) is kept as is.
//! Substituted values are not rescanned.

use crate::types::ErrorKind;
use crate::types::Exception;
use std::borrow::Cow;

/// Returns true for the characters that may appear in a `$name` reference.
pub fn is_varname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Substitutes variable references in `text`, resolving each name with `lookup`.
///
/// Returns the text unchanged (and unallocated) if it contains no `$`.  Returns an
/// `UnknownVariable` error if `lookup` finds no value for a referenced name.
pub fn substitute<'a, F>(text: &'a str, lookup: F) -> Result<Cow<'a, str>, Exception>
where
    F: Fn(&str) -> Option<String>,
{
    if !text.contains('$') {
        return Ok(Cow::Borrowed(text));
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];

        match reference(after) {
            Some((name, remainder)) => {
                let value = lookup(name).ok_or_else(|| {
                    Exception::new(
                        ErrorKind::UnknownVariable,
                        format!("can't read \"{}\": no such variable", name),
                    )
                })?;
                out.push_str(&value);
                rest = remainder;
            }
            None => {
                out.push('$');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Ok(Cow::Owned(out))
}

// Parses the variable name following a `$`, returning it and the text after it.
fn reference(text: &str) -> Option<(&str, &str)> {
    if let Some(braced) = text.strip_prefix('{') {
        let close = braced.find('}')?;
        if close == 0 {
            return None;
        }
        return Some((&braced[..close], &braced[close + 1..]));
    }

    let end = text
        .find(|c: char| !is_varname_char(c))
        .unwrap_or(text.len());

    if end == 0 {
        None
    } else {
        Some((&text[..end], &text[end..]))
    }
}
