//! Placeholder scanning and classification
//!
//! A placeholder is any run of one or more non-`}` characters between `{` and
//! `}`. There is no escaping and no nesting: `{a{b}` yields the placeholder
//! `a{b`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Prefix marking a table reference
pub const TABLE_PREFIX: &str = "csv:";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]+)\}").expect("placeholder pattern must compile"));

/// Pattern matching a full `{...}` token, with the placeholder text in group 1
pub(crate) fn pattern() -> &'static Regex {
    &PLACEHOLDER_RE
}

/// Collect the distinct placeholder texts in a template
///
/// The set is sorted so that sampling order (and therefore seeded output) does
/// not depend on hash iteration order.
pub fn scan(template: &str) -> BTreeSet<String> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// A placeholder classified by what it references
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    /// `csv:<path>:<column>` - one column of a sampled table row
    Table { path: String, column: String },
    /// Plain path - one line of a line-list file
    Line { path: String },
    /// `csv:` prefix without both a path and a column
    Malformed,
}

impl Placeholder {
    /// Classify placeholder text
    ///
    /// For table references the last colon segment is the column and the one
    /// before it is the path. Segments between the `csv` tag and the path are
    /// ignored, so `csv:extra:monster:color` reads `monster`/`color`.
    pub fn parse(text: &str) -> Self {
        if !text.starts_with(TABLE_PREFIX) {
            return Self::Line { path: text.to_string() };
        }

        let parts: Vec<&str> = text.split(':').collect();
        match parts.as_slice() {
            [_, .., path, column] => Self::Table {
                path: path.to_string(),
                column: column.to_string(),
            },
            _ => Self::Malformed,
        }
    }
}
