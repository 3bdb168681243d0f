use crate::source::StylesheetError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SccError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Stylesheet error: {0}")]
    Parse(#[from] StylesheetError),

    #[error("Input too large: {rules} rules exceeds the limit of {limit}")]
    InputTooLarge { rules: usize, limit: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SccError {
    pub fn config(message: impl Into<String>) -> Self {
        SccError::Config(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            SccError::Io(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check file paths/permissions; use `-` to read rules from stdin.",
            ),
            SccError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check that the rule dump is a JSON array of {selector, properties, line} records.",
            ),
            SccError::Toml(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Fix the TOML syntax in the config file (see --config).",
            ),
            SccError::Parse(e) => ErrorPayload::new(
                ErrorCategory::Parse,
                e.to_string(),
                "Fix the reported stylesheet error and re-run the analysis.",
            ),
            SccError::InputTooLarge { limit, .. } => ErrorPayload::new(
                ErrorCategory::Input,
                self.to_string(),
                format!(
                    "Split the stylesheet or raise the ceiling with --max-rules (currently {limit})."
                ),
            ),
            SccError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("max_rules") || lower.contains("max-rules") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set max_rules (or --max-rules) to a positive number.",
                    )
                } else if lower.contains("variable") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Pass variables as --var NAME=VALUE with a non-empty NAME.",
                    )
                } else if lower.contains("input format") || lower.contains("extension") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use a .json/.yaml/.yml rule dump or pass --input-format explicitly.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths and the config file passed with --config.",
                    )
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SccError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Input,
    Parse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
