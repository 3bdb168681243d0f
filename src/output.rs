use serde::{Deserialize, Serialize};

use crate::analysis::SpecificityReport;
use crate::error::ErrorPayload;
use crate::types::{AnalysisSummary, ConflictAnalysisResult};

/// Schema version for output payloads.
pub const SCC_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum SccOutput {
    Analyze(AnalyzeOutput),
    Selectors(SelectorsOutput),
    Error(ErrorOutput),
}

/// Where the analyzed rules came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDescriptor {
    /// File path, or `-` for stdin.
    pub path: String,
    pub format: String,
    pub rules: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeOutput {
    pub version: String,
    pub input: InputDescriptor,
    pub passed: bool,
    pub summary: AnalysisSummary,
    #[serde(flatten)]
    pub result: ConflictAnalysisResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorsOutput {
    pub version: String,
    #[serde(flatten)]
    pub report: SpecificityReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_rules, specificity_report};
    use crate::error::ErrorCategory;
    use crate::types::ParsedRule;

    #[test]
    fn analyze_output_serializes_result_fields_inline() {
        let result = analyze_rules(&[
            ParsedRule::new("Button", [("color", "red")]),
            ParsedRule::new("Button", [("color", "blue")]),
        ]);
        let output = SccOutput::Analyze(AnalyzeOutput {
            version: SCC_OUTPUT_VERSION.to_string(),
            input: InputDescriptor {
                path: "app.json".into(),
                format: "json".into(),
                rules: 2,
            },
            passed: false,
            summary: result.summary(),
            result,
        });

        let json = serde_json::to_value(&output).expect("serialize analyze output");
        assert_eq!(json["mode"], "analyze");
        assert_eq!(json["passed"], false);
        assert_eq!(json["summary"]["total_conflicts"], 1);
        assert_eq!(json["summary"]["has_issues"], true);
        assert_eq!(json["conflicts"][0]["conflicting_properties"][0], "color");
        assert_eq!(json["overlapping_selectors"][0]["overlap_type"], "exact");
        assert_eq!(json["property_conflicts"]["colors"][0], "color");
        assert!(json["specificity_issues"].as_array().is_some());
    }

    #[test]
    fn selectors_output_serializes() {
        let output = SccOutput::Selectors(SelectorsOutput {
            version: SCC_OUTPUT_VERSION.to_string(),
            report: specificity_report(&["#main .item"]),
        });

        let json = serde_json::to_string(&output).expect("serialize selectors output");
        assert!(json.contains("\"mode\":\"selectors\""));
        assert!(json.contains("\"kind\":\"descendant\""));
        assert!(json.contains("\"max_specificity\":[1,1,1]"));
    }

    #[test]
    fn error_output_serializes() {
        let output = SccOutput::Error(ErrorOutput {
            version: SCC_OUTPUT_VERSION.to_string(),
            message: Some("bad input".into()),
            error: ErrorPayload::new(ErrorCategory::Input, "bad input".into(), "check the path"),
        });

        let json = serde_json::to_string(&output).expect("serialize error output");
        assert!(json.contains("\"mode\":\"error\""));
        assert!(json.contains("\"category\":\"input\""));
        assert!(json.contains("\"remediation\":\"check the path\""));
    }
}
