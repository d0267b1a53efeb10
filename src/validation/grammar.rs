//! Field Grammar
//!
//! Pass/fail classification of a single comma-separated sub-value.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::FieldKind;

// `[0-9]` rather than `\d`: the regex crate's `\d` matches every Unicode digit.
static MINUTE_HOUR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:",
        r"\*",
        r"|[0-9]+",
        r"|(?:\*|[0-9]+)-[0-9]+",
        r"|\*/[0-9]+",
        r"|[0-9]+/[0-9]+-[0-9]+",
        r"|[0-9]+-[0-9]+/[0-9]+",
        r")$"
    ))
    .expect("minute/hour grammar is a valid regex")
});

static DAY_OF_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\*|[0-9]+)$").expect("day-of-month grammar is a valid regex"));

static MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\*|[0-9]+)$").expect("month grammar is a valid regex"));

static DAY_OF_WEEK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\*|[0-9]+|[A-Za-z]{3})$").expect("day-of-week grammar is a valid regex")
});

fn grammar(kind: FieldKind) -> &'static Regex {
    match kind {
        FieldKind::Minute | FieldKind::Hour => &*MINUTE_HOUR,
        FieldKind::DayOfMonth => &*DAY_OF_MONTH,
        FieldKind::Month => &*MONTH,
        FieldKind::DayOfWeek => &*DAY_OF_WEEK,
    }
}

/// Check one sub-value against the grammar of its field.
///
/// The whole token must match. Letters are accepted in either case. The
/// token is never normalized.
pub fn validate_token(kind: FieldKind, token: &str) -> bool {
    grammar(kind).is_match(token)
}

/// Accepted token forms for a field, for display
pub fn accepted_forms(kind: FieldKind) -> &'static [&'static str] {
    match kind {
        FieldKind::Minute | FieldKind::Hour => &[
            "*",
            "<n>",
            "<n>-<n>",
            "*-<n>",
            "*/<n>",
            "<n>/<n>-<n>",
            "<n>-<n>/<n>",
        ],
        FieldKind::DayOfMonth | FieldKind::Month => &["*", "<n>"],
        FieldKind::DayOfWeek => &["*", "<n>", "three-letter name (e.g. mon)"],
    }
}

/// True when a command starts with '*'.
///
/// Catches a sixth `*` field spilling into the command column. A leading
/// digit is allowed: `7za` and `2to3` are ordinary programs.
pub fn command_overflows(command: &str) -> bool {
    command.starts_with('*')
}
