//! Boundary to the stylesheet parser.
//!
//! The engine never reads raw stylesheet syntax. It consumes [`ParsedRule`]
//! values produced by a [`StylesheetParser`]. [`RuleFileParser`] is the bundled
//! implementation: it loads a rule dump (JSON or YAML) that an upstream
//! stylesheet parser already produced, splitting selector lists and applying
//! the variable-substitution table.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::types::ParsedRule;

/// Variable name (without `$`) to replacement value.
pub type Variables = BTreeMap<String, String>;

/// Position of a parser error, when the parser knows it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorLocation {
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl ErrorLocation {
    pub const fn at(line: u32, column: u32) -> Self {
        Self {
            line: Some(line),
            column: Some(column),
        }
    }

    pub const fn line(line: Option<u32>) -> Self {
        Self { line, column: None }
    }

    pub const fn unknown() -> Self {
        Self {
            line: None,
            column: None,
        }
    }
}

impl fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, " (line {line}, column {column})"),
            (Some(line), None) => write!(f, " (line {line})"),
            _ => Ok(()),
        }
    }
}

/// Errors a stylesheet parser may raise. All three abort an analysis call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StylesheetError {
    #[error("syntax error{location}: {message}")]
    Syntax {
        message: String,
        location: ErrorLocation,
    },

    #[error("declaration error{location}: {message}")]
    Declaration {
        message: String,
        location: ErrorLocation,
    },

    #[error("unresolved variable{location}: {message}")]
    UnresolvedVariable {
        message: String,
        location: ErrorLocation,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylesheetErrorKind {
    Syntax,
    Declaration,
    UnresolvedVariable,
}

impl StylesheetError {
    pub fn syntax(message: impl Into<String>, location: ErrorLocation) -> Self {
        StylesheetError::Syntax {
            message: message.into(),
            location,
        }
    }

    pub fn declaration(message: impl Into<String>, location: ErrorLocation) -> Self {
        StylesheetError::Declaration {
            message: message.into(),
            location,
        }
    }

    pub fn unresolved_variable(message: impl Into<String>, location: ErrorLocation) -> Self {
        StylesheetError::UnresolvedVariable {
            message: message.into(),
            location,
        }
    }

    pub fn kind(&self) -> StylesheetErrorKind {
        match self {
            StylesheetError::Syntax { .. } => StylesheetErrorKind::Syntax,
            StylesheetError::Declaration { .. } => StylesheetErrorKind::Declaration,
            StylesheetError::UnresolvedVariable { .. } => StylesheetErrorKind::UnresolvedVariable,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            StylesheetError::Syntax { message, .. }
            | StylesheetError::Declaration { message, .. }
            | StylesheetError::UnresolvedVariable { message, .. } => message,
        }
    }

    pub fn location(&self) -> ErrorLocation {
        match self {
            StylesheetError::Syntax { location, .. }
            | StylesheetError::Declaration { location, .. }
            | StylesheetError::UnresolvedVariable { location, .. } => *location,
        }
    }
}

/// Turns stylesheet source into rules, one per single selector.
pub trait StylesheetParser {
    fn parse(
        &self,
        source: &str,
        variables: &Variables,
    ) -> Result<Vec<ParsedRule>, StylesheetError>;
}

/// Encoding of a rule dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleFormat {
    #[default]
    Json,
    Yaml,
}

impl RuleFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(RuleFormat::Json),
            "yaml" | "yml" => Some(RuleFormat::Yaml),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RuleRecord {
    selector: String,
    #[serde(default)]
    properties: BTreeMap<String, Value>,
    #[serde(default, alias = "source_line")]
    line: Option<u32>,
}

/// Loads a pre-parsed rule dump.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleFileParser {
    format: RuleFormat,
}

fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl RuleFileParser {
    pub fn new(format: RuleFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> RuleFormat {
        self.format
    }

    fn decode(&self, source: &str) -> Result<Vec<RuleRecord>, StylesheetError> {
        if source.trim().is_empty() {
            return Ok(Vec::new());
        }
        match self.format {
            RuleFormat::Json => serde_json::from_str(source).map_err(|e| {
                let location = ErrorLocation::at(saturate(e.line()), saturate(e.column()));
                StylesheetError::syntax(e.to_string(), location)
            }),
            RuleFormat::Yaml => serde_yaml::from_str(source).map_err(|e| {
                let location = e
                    .location()
                    .map(|loc| ErrorLocation::at(saturate(loc.line()), saturate(loc.column())))
                    .unwrap_or_default();
                StylesheetError::syntax(e.to_string(), location)
            }),
        }
    }
}

impl StylesheetParser for RuleFileParser {
    fn parse(
        &self,
        source: &str,
        variables: &Variables,
    ) -> Result<Vec<ParsedRule>, StylesheetError> {
        let mut rules = Vec::new();

        for record in self.decode(source)? {
            let location = ErrorLocation::line(record.line);
            let mut properties = BTreeMap::new();

            for (name, value) in record.properties {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(StylesheetError::declaration(
                        format!("empty property name in rule '{}'", record.selector),
                        location,
                    ));
                }
                let raw = scalar_to_string(&value).ok_or_else(|| {
                    StylesheetError::declaration(
                        format!("property '{name}' must have a scalar value"),
                        location,
                    )
                })?;
                if raw.trim().is_empty() {
                    return Err(StylesheetError::declaration(
                        format!("property '{name}' has an empty value"),
                        location,
                    ));
                }
                let resolved = substitute_variables(&raw, variables, location)?;
                properties.insert(name, resolved);
            }

            for selector in split_selector_list(&record.selector) {
                rules.push(ParsedRule {
                    selector,
                    properties: properties.clone(),
                    source_line: record.line,
                });
            }
        }

        Ok(rules)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Split a comma-separated selector list into trimmed, non-empty selectors.
pub fn split_selector_list(selector: &str) -> Vec<String> {
    selector
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_variable_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Replace every `$name` in `value` from `variables`.
pub fn substitute_variables(
    value: &str,
    variables: &Variables,
    location: ErrorLocation,
) -> Result<String, StylesheetError> {
    if !value.contains('$') {
        return Ok(value.to_string());
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let mut end = start + 1;
        while let Some(&(idx, next)) = chars.peek() {
            if !is_variable_char(next) {
                break;
            }
            end = idx + next.len_utf8();
            chars.next();
        }
        let name = &value[start + 1..end];
        if name.is_empty() {
            out.push('$');
            continue;
        }
        match variables.get(name) {
            Some(replacement) => out.push_str(replacement),
            None => {
                return Err(StylesheetError::unresolved_variable(
                    format!("reference to undefined variable '${name}'"),
                    location,
                ))
            }
        }
    }

    Ok(out)
}
