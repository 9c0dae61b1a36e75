//! Compiler configuration.
//!
//! One `CompilerConfig` is built per compilation run and handed by reference to
//! everything that needs it. All fields have defaults, so a JSON document only
//! has to name what it overrides.

use crate::error::{Result, StachecError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_RENDERABLE_INTERFACE: &str = "stachec.runtime.Renderable";

/// Output format of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFormat {
    /// Escaped output goes through an HTML-escaping writer.
    #[default]
    Html,
    /// No escaping; escaped and unescaped output share one writer.
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log directory, `~/.stachec/logs` when unset
    pub directory: Option<PathBuf>,
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub filter: String,
    pub to_stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            filter: "info".to_string(),
            to_stderr: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CompilerConfig {
    /// FQN of the generic interface whose implementors render themselves
    pub renderable_interface: String,
    pub format: TemplateFormat,
    /// Name of the escaping writer in generated code
    pub writer: String,
    /// Name of the raw writer in generated code
    pub unescaped_writer: String,
    /// Name of the template's root data expression
    pub data_name: String,
    /// Prefix section code with comments naming the scope and its type
    pub debug_comments: bool,
    pub logging: LoggingConfig,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            renderable_interface: DEFAULT_RENDERABLE_INTERFACE.to_string(),
            format: TemplateFormat::Html,
            writer: "writer".to_string(),
            unescaped_writer: "unescapedWriter".to_string(),
            data_name: "data".to_string(),
            debug_comments: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl CompilerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the configuration file a compilation driver is pointed at.
    /// Drivers without a file use `CompilerConfig::default()`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// JSON schema of the configuration document.
    pub fn json_schema() -> Result<serde_json::Value> {
        Ok(serde_json::to_value(schemars::schema_for!(CompilerConfig))?)
    }

    fn validate(&self) -> Result<()> {
        let names = [
            ("renderable_interface", &self.renderable_interface),
            ("writer", &self.writer),
            ("unescaped_writer", &self.unescaped_writer),
            ("data_name", &self.data_name),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(StachecError::Config(format!("'{}' must not be empty", field)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = CompilerConfig::from_json_str(r#"{"format": "text", "debug_comments": false}"#)
            .unwrap();
        assert_eq!(config.format, TemplateFormat::Text);
        assert!(!config.debug_comments);
        assert_eq!(config.writer, "writer");
        assert_eq!(config.renderable_interface, "stachec.runtime.Renderable");
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_empty_names_are_rejected() {
        let err = CompilerConfig::from_json_str(r#"{"writer": "  "}"#).unwrap_err();
        assert!(matches!(err, StachecError::Config(msg) if msg.contains("writer")));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"data_name": "model", "logging": {{"filter": "debug", "to_stderr": true}}}}"#
        )
        .unwrap();

        let config = CompilerConfig::load(file.path()).unwrap();
        assert_eq!(config.data_name, "model");
        assert_eq!(config.logging.filter, "debug");
        assert!(config.logging.to_stderr);
    }

    #[test]
    fn test_malformed_json_is_a_json_error() {
        let err = CompilerConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, StachecError::Json(_)));
    }

    #[test]
    fn test_json_schema_names_fields() {
        let schema = CompilerConfig::json_schema().unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("renderable_interface").is_some());
        assert!(properties.get("debug_comments").is_some());
    }
}
