//! Splits a single condition like `Name!=Value` into name, operator and value

use smallvec::SmallVec;

use crate::escape::ESCAPE_CHARACTER;

/// Tokens of one condition; a well-formed condition has one or three
pub type ConditionTokens = SmallVec<[String; 3]>;

/// Tokenize a condition, keeping escape sequences in the literal tokens
pub fn tokenize(condition: &str) -> ConditionTokens {
    let mut tokens = ConditionTokens::new();
    let mut current = String::new();
    let mut chars = condition.chars().peekable();
    let mut escaping = false;

    while let Some(c) = chars.next() {
        if escaping {
            // `\\` ends here so the next char can't start another escape
            current.push(c);
            escaping = false;
            continue;
        }

        match c {
            ESCAPE_CHARACTER => {
                current.push(c);
                escaping = true;
            }
            '=' | '~' => {
                flush(&mut tokens, &mut current);
                tokens.push(c.to_string());
            }
            '!' => {
                flush(&mut tokens, &mut current);
                match chars.peek() {
                    Some(&next @ ('=' | '~')) => {
                        chars.next();
                        tokens.push(format!("!{}", next));
                    }
                    _ => tokens.push("!".to_string()),
                }
            }
            _ => current.push(c),
        }
    }

    flush(&mut tokens, &mut current);
    tokens
}

fn flush(tokens: &mut ConditionTokens, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}
