//! Work item description composition
//!
//! The Azure DevOps description is four Markdown sections in fixed order,
//! separated by blank lines:
//!
//! ```text
//! ### Description
//! <normalized description>
//!
//! ### Environment
//! <environment>
//!
//! ### Original Issue
//! [View in Jira](<base url><issue key>)
//!
//! ### Attachments
//! <one URL per line, or "No Attachments">
//! ```
//!
//! Every section is always present. [`IssueDescription::parse`] reverses
//! [`IssueDescription::render`].

use crate::app::models::render_attachments;
use crate::constants::{NO_ATTACHMENTS, ORIGINAL_ISSUE_LINK_TEXT, sections};

const SECTION_SEPARATOR: &str = "\n\n";

/// The parts of a work item description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDescription {
    pub description: String,
    pub environment: String,
    pub issue_url: String,
    pub attachments: Vec<String>,
}

impl IssueDescription {
    /// Render the four sections
    pub fn render(&self) -> String {
        let link = format!("[{}]({})", ORIGINAL_ISSUE_LINK_TEXT, self.issue_url);
        let attachments = render_attachments(&self.attachments);

        [
            section(sections::DESCRIPTION, &self.description),
            section(sections::ENVIRONMENT, &self.environment),
            section(sections::ORIGINAL_ISSUE, &link),
            section(sections::ATTACHMENTS, &attachments),
        ]
        .join(SECTION_SEPARATOR)
    }

    /// Split a rendered description back into its parts
    ///
    /// Returns `None` when any section heading is missing or out of order.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.strip_prefix(&section_opener(sections::DESCRIPTION, false))?;
        let (description, rest) = split_section(rest, sections::ENVIRONMENT)?;
        let (environment, rest) = split_section(rest, sections::ORIGINAL_ISSUE)?;
        let (link, attachments) = split_section(rest, sections::ATTACHMENTS)?;

        let issue_url = link
            .strip_prefix(&format!("[{}](", ORIGINAL_ISSUE_LINK_TEXT))?
            .strip_suffix(')')?
            .to_string();

        let attachments = if attachments == NO_ATTACHMENTS {
            Vec::new()
        } else {
            attachments.lines().map(str::to_string).collect()
        };

        Some(Self {
            description: description.to_string(),
            environment: environment.to_string(),
            issue_url,
            attachments,
        })
    }

    /// Issue key embedded in the link, given the base URL it was built from
    pub fn issue_key(&self, base_url: &str) -> Option<&str> {
        self.issue_url.strip_prefix(base_url)
    }
}

fn section(heading: &str, body: &str) -> String {
    format!("{}\n{}", heading, body)
}

fn section_opener(heading: &str, separated: bool) -> String {
    if separated {
        format!("{}{}\n", SECTION_SEPARATOR, heading)
    } else {
        format!("{}\n", heading)
    }
}

/// Split `text` at the first occurrence of the next section's opener
fn split_section<'a>(text: &'a str, next_heading: &str) -> Option<(&'a str, &'a str)> {
    let opener = section_opener(next_heading, true);
    let index = text.find(&opener)?;
    Some((&text[..index], &text[index + opener.len()..]))
}
