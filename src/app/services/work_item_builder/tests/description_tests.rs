//! Tests for description rendering and parsing

use crate::app::services::work_item_builder::IssueDescription;

fn sample() -> IssueDescription {
    IssueDescription {
        description: "**Steps:**\nDo X".to_string(),
        environment: "Windows 11".to_string(),
        issue_url: "https://jira.example.com/browse/BUG-1".to_string(),
        attachments: vec![
            "https://x/a.png".to_string(),
            "https://x/b.png".to_string(),
        ],
    }
}

#[test]
fn test_render_sections_in_order() {
    assert_eq!(
        sample().render(),
        "### Description\n**Steps:**\nDo X\n\n\
         ### Environment\nWindows 11\n\n\
         ### Original Issue\n[View in Jira](https://jira.example.com/browse/BUG-1)\n\n\
         ### Attachments\nhttps://x/a.png\nhttps://x/b.png"
    );
}

#[test]
fn test_render_keeps_sections_for_missing_data() {
    let description = IssueDescription {
        description: "No description available.".to_string(),
        environment: String::new(),
        issue_url: "https://jira.example.com/browse/BUG-1".to_string(),
        attachments: Vec::new(),
    };
    let rendered = description.render();
    assert!(rendered.contains("### Environment\n\n### Original Issue"));
    assert!(rendered.ends_with("### Attachments\nNo Attachments"));
}

#[test]
fn test_parse_recovers_parts() {
    let original = sample();
    let parsed = IssueDescription::parse(&original.render()).unwrap();
    assert_eq!(parsed, original);
    assert_eq!(
        parsed.issue_key("https://jira.example.com/browse/"),
        Some("BUG-1")
    );
}

#[test]
fn test_parse_with_empty_sections() {
    let original = IssueDescription {
        description: String::new(),
        environment: String::new(),
        issue_url: "https://j/browse/A-1".to_string(),
        attachments: Vec::new(),
    };
    assert_eq!(IssueDescription::parse(&original.render()), Some(original));
}

#[test]
fn test_parse_multiline_environment() {
    let mut original = sample();
    original.environment = "Chrome 120\nmacOS 14".to_string();
    assert_eq!(IssueDescription::parse(&original.render()), Some(original));
}

#[test]
fn test_parse_rejects_foreign_text() {
    assert_eq!(IssueDescription::parse("just some text"), None);
    assert_eq!(
        IssueDescription::parse("### Description\nx\n\n### Attachments\ny"),
        None
    );
}

#[test]
fn test_issue_key_with_other_base() {
    assert_eq!(sample().issue_key("https://other/browse/"), None);
}
