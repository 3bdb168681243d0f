use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SccError};
use crate::source::Variables;
use crate::types::ConflictAnalysisResult;

/// Rule-count ceiling applied when neither config nor CLI sets one.
pub const DEFAULT_MAX_RULES: usize = 5000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub max_rules: usize,
    pub fail_on: FailOn,
    pub variables: Variables,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_rules: DEFAULT_MAX_RULES,
            fail_on: FailOn::default(),
            variables: Variables::new(),
        }
    }
}

/// Which findings make `scc analyze` exit non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    /// Any property conflict, or a stylesheet parse error.
    #[default]
    Conflicts,
    /// Conflicts, overlaps, specificity issues, or a parse error.
    Issues,
    Never,
}

impl FailOn {
    /// Whether `result` passes under this policy.
    pub fn passes(self, result: &ConflictAnalysisResult) -> bool {
        match self {
            FailOn::Never => true,
            FailOn::Conflicts => result.conflicts.is_empty() && !result.has_parse_errors(),
            FailOn::Issues => {
                let summary = result.summary();
                !summary.has_issues
                    && summary.total_specificity_issues == 0
                    && !result.has_parse_errors()
            }
        }
    }
}

impl Config {
    /// `~/.config/scc/config.toml`, when `HOME` is set.
    pub fn central_config_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("scc")
                .join("config.toml"),
        )
    }

    /// Load from an explicit path, else the central config if it exists,
    /// else defaults. A missing explicit path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::central_config_path() {
                Some(central) if central.is_file() => Self::from_file(&central),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_rules == 0 {
            return Err(SccError::config("max_rules must be greater than zero"));
        }
        if self.variables.keys().any(|name| name.trim().is_empty()) {
            return Err(SccError::config("variable names must not be empty"));
        }
        Ok(())
    }
}
