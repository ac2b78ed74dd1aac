//! Splits a filter string on `(`, `)`, `&` and `|`, respecting escapes

use crate::escape::ESCAPE_CHARACTER;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Condition text, still escaped and untrimmed
    Condition(String),
    And,
    Or,
    OpenParen,
    CloseParen,
}

pub fn tokenize(filter: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut escaping = false;

    for c in filter.chars() {
        if escaping {
            // Validity of the escape is checked when the condition is unescaped
            current.push(c);
            escaping = false;
            continue;
        }

        let token = match c {
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            '&' => Token::And,
            '|' => Token::Or,
            _ => {
                escaping = c == ESCAPE_CHARACTER;
                current.push(c);
                continue;
            }
        };

        if !current.is_empty() {
            tokens.push(Token::Condition(std::mem::take(&mut current)));
        }
        tokens.push(token);
    }

    if !current.is_empty() {
        tokens.push(Token::Condition(current));
    }

    tokens
}
