//! Crontab Parser
//!
//! Tokenization and line classification, kept apart from validation.

pub mod ast;
pub mod lexer;

pub use ast::{CronEntry, CronField, CronLine, FieldKind, ParsedLine, SubValue, SCHEDULE_FIELDS};
pub use lexer::{tokenize_line, Token};

/// Parse a single crontab line into structured data
///
/// A zero-length line is `Empty` and a line whose first character is '#'
/// is a `Comment`. Anything else is tokenized, so a line of only spaces is
/// `Malformed`.
pub fn parse_line(line: &str) -> ParsedLine<'_> {
    if line.is_empty() {
        return ParsedLine::Empty;
    }
    if line.starts_with('#') {
        return ParsedLine::Comment(line);
    }

    let tokens = lexer::tokenize_line(line);
    ast::tokens_to_parsed_line(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry() {
        let result = parse_line("*/5 * * * * /bin/true");

        if let ParsedLine::Entry(entry) = result {
            assert_eq!(entry.field(FieldKind::Minute).raw, "*/5");
            assert_eq!(entry.command, "/bin/true");
        } else {
            panic!("Expected entry");
        }
    }

    #[test]
    fn test_parse_comment() {
        assert!(matches!(parse_line("# m h dom mon dow"), ParsedLine::Comment(_)));
    }

    #[test]
    fn test_indented_hash_is_not_a_comment() {
        assert_eq!(parse_line("  # note"), ParsedLine::Malformed { tokens: 2 });
    }

    #[test]
    fn test_parse_empty_line() {
        assert!(matches!(parse_line(""), ParsedLine::Empty));
        assert_eq!(parse_line("   "), ParsedLine::Malformed { tokens: 0 });
    }
}
