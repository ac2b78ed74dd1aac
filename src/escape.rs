//! Backslash escaping for literal filter text
//!
//! Any of `\ ( ) & | = ! ~` must be written as `\<char>` to be taken
//! literally inside a condition name or value.

use std::borrow::Cow;

use crate::error::EscapeError;

/// Escape character
pub const ESCAPE_CHARACTER: char = '\\';

/// Characters with a meaning in the filter grammar
pub const SPECIAL_CHARACTERS: [char; 8] = ['\\', '(', ')', '&', '|', '=', '!', '~'];

#[inline]
pub fn is_special(c: char) -> bool {
    SPECIAL_CHARACTERS.contains(&c)
}

/// Escape every special character in `input`
pub fn escape(input: &str) -> Cow<'_, str> {
    if !input.contains(is_special) {
        return Cow::Borrowed(input);
    }

    let mut escaped = String::with_capacity(input.len() * 2);
    for c in input.chars() {
        if is_special(c) {
            escaped.push(ESCAPE_CHARACTER);
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Turn escaped filter text back into its literal form
pub fn unescape(input: &str) -> Result<Cow<'_, str>, EscapeError> {
    if !input.contains(ESCAPE_CHARACTER) {
        return Ok(Cow::Borrowed(input));
    }

    let mut literal = String::with_capacity(input.len());
    let mut chars = input.char_indices();
    while let Some((position, c)) = chars.next() {
        if c != ESCAPE_CHARACTER {
            literal.push(c);
            continue;
        }
        match chars.next() {
            Some((_, next)) if is_special(next) => literal.push(next),
            _ => {
                return Err(EscapeError {
                    input: input.to_string(),
                    position,
                })
            }
        }
    }
    Ok(Cow::Owned(literal))
}
