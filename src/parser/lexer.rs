//! Crontab Lexer
//!
//! Splits a crontab line into whitespace-separated tokens.
//! Tabs count as spaces and runs of whitespace never produce empty tokens.

/// A token with its byte span in the line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize, // byte offset
    pub end: usize,   // byte offset (exclusive)
}

/// Tokenize a line of a crontab into tokens
///
/// Only ' ' and '\t' separate tokens. Any other character, including a
/// trailing '\r', stays part of the token it touches.
pub fn tokenize_line(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (idx, ch) in line.char_indices() {
        match (ch, start) {
            (' ' | '\t', Some(s)) => {
                tokens.push(Token {
                    text: &line[s..idx],
                    start: s,
                    end: idx,
                });
                start = None;
            }
            (' ' | '\t', None) => continue,
            (_, None) => start = Some(idx),
            (_, Some(_)) => continue,
        }
    }

    if let Some(s) = start {
        tokens.push(Token {
            text: &line[s..],
            start: s,
            end: line.len(),
        });
    }

    tokens
}
