//! Configuration management and validation.
//!
//! Provides the configuration structures for file locations, the issue link
//! base URL, Jira column names, the priority table, attachment extraction and
//! description handling. Values are layered: built-in defaults, then a TOML
//! file, then command-line overrides applied by the CLI.

use crate::app::models::ColumnNames;
use crate::app::services::attachment_extractor::{AttachmentSource, UrlMatching};
use crate::app::services::markup_normalizer::MissingText;
use crate::app::services::work_item_builder::{PriorityScheme, PriorityTable};
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_ALL_FIELDS_FILE, DEFAULT_ATTACHMENT_COLUMN_PATTERN,
    DEFAULT_ATTACHMENT_DELIMITER, DEFAULT_DEFAULT_FIELDS_FILE, DEFAULT_OUTPUT_FILE,
    DEFAULT_WORK_ITEM_TYPE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Complete migrator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output file locations
    pub paths: PathsConfig,

    /// Work item settings
    pub migration: MigrationConfig,

    /// Jira column names
    pub columns: ColumnNames,

    /// Priority translation
    pub priority: PriorityConfig,

    /// Attachment URL extraction
    pub attachments: AttachmentConfig,

    /// Description normalization
    pub description: DescriptionConfig,
}

/// Input and output file locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Jira export containing all fields (descriptions, environment, attachments)
    pub all_fields: PathBuf,

    /// Jira export containing the default fields
    pub default_fields: PathBuf,

    /// Azure DevOps import file to create
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            all_fields: PathBuf::from(DEFAULT_ALL_FIELDS_FILE),
            default_fields: PathBuf::from(DEFAULT_DEFAULT_FIELDS_FILE),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

/// Work item settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Base URL of the Jira issue browser, e.g. `https://example.atlassian.net/browse/`
    ///
    /// Has no default; conversion refuses to run without it.
    pub issue_base_url: Option<String>,

    /// Azure DevOps work item type written for every row
    pub work_item_type: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            issue_base_url: None,
            work_item_type: DEFAULT_WORK_ITEM_TYPE.to_string(),
        }
    }
}

/// Priority translation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityConfig {
    /// Built-in table to start from
    pub scheme: PriorityScheme,

    /// Extra or replacement entries, Jira label to Azure DevOps code
    pub mapping: BTreeMap<String, String>,

    /// Code for unmapped or missing priorities, defaults to the scheme's Medium
    pub default: Option<String>,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            scheme: PriorityScheme::Descending,
            mapping: BTreeMap::new(),
            default: None,
        }
    }
}

impl PriorityConfig {
    /// Build the effective priority table
    pub fn table(&self) -> PriorityTable {
        let mut table = self.scheme.table();
        for (label, code) in &self.mapping {
            table.insert(label.clone(), code.clone());
        }
        if let Some(default) = &self.default {
            table = table.with_default(default.clone());
        }
        table
    }
}

/// Attachment extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentConfig {
    /// Which columns are scanned
    pub source: AttachmentSource,

    /// How URLs are found inside a cell
    pub matching: UrlMatching,

    /// Separator between entries of a multi-valued cell
    pub delimiter: char,

    /// Header fragment identifying attachment columns
    pub column_pattern: String,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            source: AttachmentSource::AttachmentColumns,
            matching: UrlMatching::Auto,
            delimiter: DEFAULT_ATTACHMENT_DELIMITER,
            column_pattern: DEFAULT_ATTACHMENT_COLUMN_PATTERN.to_string(),
        }
    }
}

/// Description normalization settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptionConfig {
    /// Text used for missing descriptions
    ///
    /// When unset, `convert` renders a placeholder and `clean` leaves the
    /// cell empty.
    pub missing: Option<MissingText>,
}

impl Config {
    /// Default configuration file location
    ///
    /// `<platform config dir>/jira-devops-migrator/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::configuration("Could not determine user configuration directory")
        })?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid configuration: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::configuration(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Load defaults, overlaid with the given file when present
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        Ok(config)
    }

    /// Validate settings that are shared by all commands
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.columns.entries() {
            if value.trim().is_empty() {
                return Err(Error::configuration(format!(
                    "Column name '{}' cannot be empty",
                    name
                )));
            }
        }

        if self.attachments.delimiter.is_whitespace() {
            return Err(Error::configuration(
                "Attachment delimiter cannot be whitespace",
            ));
        }

        if self.attachments.source == AttachmentSource::AttachmentColumns
            && self.attachments.column_pattern.trim().is_empty()
        {
            return Err(Error::configuration(
                "Attachment column pattern cannot be empty",
            ));
        }

        if self.migration.work_item_type.trim().is_empty() {
            return Err(Error::configuration("Work item type cannot be empty"));
        }

        let table = self.priority.table();
        if table.default_code().trim().is_empty() {
            return Err(Error::configuration(
                "Default priority code cannot be empty",
            ));
        }

        if let Some(base_url) = &self.migration.issue_base_url {
            if base_url.trim().is_empty() {
                return Err(Error::configuration("Issue base URL cannot be empty"));
            }
        }

        Ok(())
    }

    /// Issue base URL, trimmed but otherwise used verbatim
    ///
    /// The issue key is appended directly, so query-style prefixes such as
    /// `...?searchString=` work. Conversion needs this value; its absence is
    /// a configuration error.
    pub fn issue_base_url(&self) -> Result<String> {
        let base_url = self
            .migration
            .issue_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                Error::configuration(
                    "Issue base URL is not configured. Pass --base-url or set \
                     migration.issue_base_url in the config file",
                )
            })?;

        Ok(base_url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.paths.output, PathBuf::from("azure_output.csv"));
        assert_eq!(config.columns.issue_key, "Issue key");
        assert_eq!(config.priority.table().default_code(), "3");
    }

    #[test]
    fn test_base_url_required() {
        let config = Config::default();
        assert!(matches!(
            config.issue_base_url(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_base_url_used_verbatim() {
        let mut config = Config::default();
        config.migration.issue_base_url = Some("https://jira.example.com/browse/".to_string());
        assert_eq!(
            config.issue_base_url().unwrap(),
            "https://jira.example.com/browse/"
        );

        config.migration.issue_base_url = Some(
            "  https://jira.example.com/secure/QuickSearch.jspa?searchString=\n".to_string(),
        );
        assert_eq!(
            config.issue_base_url().unwrap(),
            "https://jira.example.com/secure/QuickSearch.jspa?searchString="
        );

        config.migration.issue_base_url = Some("https://jira.example.com/browse".to_string());
        assert_eq!(
            config.issue_base_url().unwrap(),
            "https://jira.example.com/browse"
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [migration]
            issue_base_url = "https://jira.example.com/browse/"

            [priority]
            scheme = "ascending"

            [attachments]
            source = "all-columns"
            matching = "inline"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.migration.issue_base_url.as_deref(),
            Some("https://jira.example.com/browse/")
        );
        assert_eq!(config.migration.work_item_type, "Bug");
        assert_eq!(config.priority.scheme, PriorityScheme::Ascending);
        assert_eq!(config.attachments.source, AttachmentSource::AllColumns);
        assert_eq!(config.attachments.matching, UrlMatching::Inline);
        assert_eq!(config.attachments.delimiter, ';');
        assert_eq!(config.columns.summary, "Summary");
    }

    #[test]
    fn test_priority_mapping_overrides() {
        let config = Config::from_toml_str(
            r#"
            [priority]
            default = "2"

            [priority.mapping]
            Blocker = "1"
            Low = "3"
            "#,
        )
        .unwrap();

        let table = config.priority.table();
        assert_eq!(table.lookup("Blocker"), Some("1"));
        assert_eq!(table.lookup("Low"), Some("3"));
        assert_eq!(table.lookup("Highest"), Some("1"));
        assert_eq!(table.default_code(), "2");
    }

    #[test]
    fn test_custom_column_names() {
        let config = Config::from_toml_str(
            r#"
            [columns]
            issue_key = "Schlüssel"
            "#,
        )
        .unwrap();
        assert_eq!(config.columns.issue_key, "Schlüssel");
        assert_eq!(config.columns.priority, "Priority");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.columns.issue_key = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.attachments.delimiter = ' ';
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.priority.default = Some(String::new());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.migration.issue_base_url = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let result = Config::from_toml_str("[attachments]\nsource = \"sideways\"");
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_load_layered_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[migration]\nwork_item_type = \"Issue\"").unwrap();

        let config = Config::load_layered(Some(file.path())).unwrap();
        assert_eq!(config.migration.work_item_type, "Issue");

        let config = Config::load_layered(None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let result = Config::from_file(Path::new("/definitely/not/here/config.toml"));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }
}
