//! Crontab Line Structure
//!
//! Plain types describing a classified crontab line.
//! No validation logic lives here.

use std::fmt;
use std::ops::Range;

use crate::parser::lexer::Token;

/// Number of schedule fields preceding the command
pub const SCHEDULE_FIELDS: usize = 5;

/// One line of a crontab file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CronLine<'a> {
    pub text: &'a str,
    /// 1-based line number
    pub number: usize,
    pub source: &'a str,
}

impl<'a> CronLine<'a> {
    /// Split `content` on '\n' into numbered lines.
    ///
    /// A '\r' before the newline is kept in the line text.
    pub fn split(source: &'a str, content: &'a str) -> impl Iterator<Item = CronLine<'a>> {
        content
            .split('\n')
            .enumerate()
            .map(move |(idx, text)| CronLine {
                text,
                number: idx + 1,
                source,
            })
    }
}

/// The five positional schedule fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl FieldKind {
    /// Field kinds in crontab column order
    pub const ALL: [FieldKind; SCHEDULE_FIELDS] = [
        FieldKind::Minute,
        FieldKind::Hour,
        FieldKind::DayOfMonth,
        FieldKind::Month,
        FieldKind::DayOfWeek,
    ];

    /// Label used in error messages
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Minute => "Minute",
            FieldKind::Hour => "Hour",
            FieldKind::DayOfMonth => "Day of month",
            FieldKind::Month => "Month",
            FieldKind::DayOfWeek => "Day of week",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A comma-separated element of a schedule field
#[derive(Debug, Clone, PartialEq)]
pub struct SubValue<'a> {
    /// 0-based position within the field
    pub index: usize,
    pub text: &'a str,
    pub span: Range<usize>,
}

/// A schedule field of a crontab entry, e.g. "1,2,3" in the minute column
#[derive(Debug, Clone, PartialEq)]
pub struct CronField<'a> {
    pub kind: FieldKind,
    pub raw: &'a str,
    pub span: Range<usize>,
}

impl<'a> CronField<'a> {
    fn from_token(kind: FieldKind, token: &Token<'a>) -> Self {
        Self {
            kind,
            raw: token.text,
            span: token.start..token.end,
        }
    }

    /// Sub-values in order, split on ','
    ///
    /// Empty elements are kept so that "1,,2" reports the empty one.
    pub fn values(&self) -> Vec<SubValue<'a>> {
        let mut offset = self.span.start;
        self.raw
            .split(',')
            .enumerate()
            .map(|(index, text)| {
                let value = SubValue {
                    index,
                    text,
                    span: offset..offset + text.len(),
                };
                offset += text.len() + 1;
                value
            })
            .collect()
    }
}

/// A schedule line: five fields followed by the command
#[derive(Debug, Clone, PartialEq)]
pub struct CronEntry<'a> {
    pub fields: [CronField<'a>; SCHEDULE_FIELDS],
    /// Tokens after the fifth field joined with single spaces
    pub command: String,
    /// Byte span of the command in the line, `None` when there is no command
    pub command_span: Option<Range<usize>>,
}

impl<'a> CronEntry<'a> {
    pub fn field(&self, kind: FieldKind) -> &CronField<'a> {
        &self.fields[kind as usize]
    }

    /// Field whose span contains the byte offset, if any
    ///
    /// The end is inclusive so a cursor right after a field still hits it.
    pub fn field_at(&self, offset: usize) -> Option<&CronField<'a>> {
        self.fields
            .iter()
            .find(|f| f.span.start <= offset && offset <= f.span.end)
    }

    /// The five schedule fields as written, joined with single spaces
    pub fn schedule(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.raw)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A classified crontab line
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine<'a> {
    /// A schedule entry
    Entry(CronEntry<'a>),
    /// A line starting with '#'
    Comment(&'a str),
    /// A zero-length line
    Empty,
    /// Fewer than five tokens
    Malformed { tokens: usize },
}

/// Classify a tokenized line
pub fn tokens_to_parsed_line<'a>(tokens: &[Token<'a>]) -> ParsedLine<'a> {
    if tokens.len() < SCHEDULE_FIELDS {
        return ParsedLine::Malformed {
            tokens: tokens.len(),
        };
    }

    let fields = FieldKind::ALL.map(|kind| CronField::from_token(kind, &tokens[kind as usize]));

    let rest = &tokens[SCHEDULE_FIELDS..];
    let command = rest.iter().map(|t| t.text).collect::<Vec<_>>().join(" ");
    let command_span = match (rest.first(), rest.last()) {
        (Some(first), Some(last)) => Some(first.start..last.end),
        _ => None,
    };

    ParsedLine::Entry(CronEntry {
        fields,
        command,
        command_span,
    })
}
