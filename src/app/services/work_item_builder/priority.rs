//! Priority translation tables
//!
//! Jira exports priorities as labels (`Highest` .. `Lowest`); Azure DevOps
//! expects a numeric code from 1 to 4. Two conventions exist for the
//! direction of that scale, both available as a [`PriorityScheme`].

use crate::constants::priority_codes::{CODE_1, CODE_2, CODE_3, CODE_4};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Built-in priority tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PriorityScheme {
    /// `Highest` → 1 ... `Lowest` → 4, unmapped → 3
    #[default]
    Descending,
    /// `Lowest` → 1 ... `Highest` → 4, unmapped → 2
    Ascending,
}

impl PriorityScheme {
    /// Build the table for this scheme
    pub fn table(&self) -> PriorityTable {
        let (entries, default_code) = match self {
            PriorityScheme::Descending => (
                [
                    ("Highest", CODE_1),
                    ("High", CODE_2),
                    ("Medium", CODE_3),
                    ("Low", CODE_4),
                    ("Lowest", CODE_4),
                ],
                CODE_3,
            ),
            PriorityScheme::Ascending => (
                [
                    ("Lowest", CODE_1),
                    ("Low", CODE_1),
                    ("Medium", CODE_2),
                    ("High", CODE_3),
                    ("Highest", CODE_4),
                ],
                CODE_2,
            ),
        };

        let mut table = PriorityTable::new(default_code);
        for (label, code) in entries {
            table.insert(label.to_string(), code.to_string());
        }
        table
    }
}

/// Mapping from Jira priority label to Azure DevOps priority code
///
/// Labels are matched after trimming surrounding whitespace and are
/// case-sensitive. Unmapped and empty labels get the default code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityTable {
    entries: BTreeMap<String, String>,
    default_code: String,
}

impl PriorityTable {
    /// Create an empty table with the given default code
    pub fn new(default_code: impl Into<String>) -> Self {
        Self {
            entries: BTreeMap::new(),
            default_code: default_code.into(),
        }
    }

    /// Add or replace a label
    pub fn insert(&mut self, label: String, code: String) {
        self.entries.insert(label.trim().to_string(), code);
    }

    /// Replace the default code
    pub fn with_default(mut self, default_code: String) -> Self {
        self.default_code = default_code;
        self
    }

    /// Code for a label, `None` when the label is not in the table
    pub fn lookup(&self, label: &str) -> Option<&str> {
        self.entries.get(label.trim()).map(String::as_str)
    }

    /// Code used for unmapped or missing labels
    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    /// Number of mapped labels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table maps no labels
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PriorityTable {
    fn default() -> Self {
        PriorityScheme::default().table()
    }
}
