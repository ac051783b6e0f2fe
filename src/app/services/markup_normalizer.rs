//! Jira wiki markup normalization
//!
//! Rewrites the small subset of Jira wiki markup found in issue descriptions
//! into the Markdown-flavoured text Azure DevOps renders. Rules are applied in
//! a fixed order:
//!
//! 1. `h3.`/`h4.` headings opening an emphasis span become strong spans
//!    (`h3.*Steps:*` → `**Steps:**`)
//! 2. single-asterisk spans become underscore spans (`*word*` → `_word_`)
//! 3. every `#` becomes `-`
//! 4. runs of blank lines collapse to a single line break
//! 5. leading and trailing whitespace is trimmed
//!
//! Rule 3 is a plain character substitution. It turns Jira's `#` list markers
//! into Markdown bullets but also rewrites `#` inside words, URL fragments and
//! issue references (`see #42` → `see -42`). Migrated data has always been
//! produced this way, so the behaviour is kept.

use crate::constants::NO_DESCRIPTION;
use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Heading whose emphasis span closes on the same line
static HEADING_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"h[34]\.\s*\*([^*\n]*)\*").expect("valid regex"));

/// Heading opening an emphasis span that never closes
static HEADING_OPENER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"h[34]\.\s*\*").expect("valid regex"));

/// Strong marker (kept) or single-asterisk span (converted)
static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*|\*([^*\n]*)\*").expect("valid regex"));

/// Two or more line breaks with only whitespace between them
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

/// What to produce for a missing or empty description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MissingText {
    /// Render `No description available.`
    Placeholder,
    /// Render an empty string
    Empty,
}

impl MissingText {
    /// Text substituted for a missing description
    pub fn text(&self) -> &'static str {
        match self {
            MissingText::Placeholder => NO_DESCRIPTION,
            MissingText::Empty => "",
        }
    }
}

/// Normalize Jira wiki markup
pub fn normalize(text: &str) -> String {
    let text = HEADING_SPAN.replace_all(text, "**$1**");
    let text = HEADING_OPENER.replace_all(&text, "**");
    let text = EMPHASIS.replace_all(&text, |caps: &Captures| match caps.get(1) {
        Some(inner) => format!("_{}_", inner.as_str()),
        None => caps[0].to_string(),
    });
    let text = text.replace('#', "-");
    let text = BLANK_LINES.replace_all(&text, "\n");

    text.trim().to_string()
}

/// Normalize a description, substituting the missing-text policy for empty results
pub fn normalize_or_default(text: &str, missing: MissingText) -> String {
    if text.is_empty() {
        return missing.text().to_string();
    }

    let normalized = normalize(text);
    if normalized.is_empty() {
        missing.text().to_string()
    } else {
        normalized
    }
}
