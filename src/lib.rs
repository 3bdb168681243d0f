//! Style Conflict Checker (SCC) Library
//!
//! Static analysis for TCSS-style stylesheets: finds selectors that overlap,
//! rules whose declarations collide, and selectors whose specificity is
//! likely to cause maintenance trouble. The engine consumes rules that an
//! upstream stylesheet parser already produced.
//!
//! # Module Overview
//!
//! - [`analysis`] - Selector parsing, specificity, overlap and conflict detection
//! - [`source`] - Stylesheet parser seam and the bundled rule-dump loader
//! - [`config`] - Configuration file support
//! - [`types`] - Core data types and analysis results
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```
//! use scc_lib::{ConflictDetector, RuleFileParser, RuleFormat, Variables};
//!
//! let source = r#"[
//!     {"selector": "Button", "properties": {"color": "red"}, "line": 1},
//!     {"selector": "Button", "properties": {"color": "green"}, "line": 5}
//! ]"#;
//! let parser = RuleFileParser::new(RuleFormat::Json);
//! let result = ConflictDetector::new().analyze_source(&parser, source, &Variables::new());
//!
//! assert_eq!(result.summary().total_conflicts, 1);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod output;
pub mod source;
pub mod types;

pub use analysis::{
    analyze_rules, analyze_selector_complexity, specificity_report, AnalysisStage,
    ConflictDetector, SelectorComplexity, SelectorKind, SpecificityReport,
};
pub use config::{Config, FailOn};
pub use error::{ErrorCategory, ErrorPayload, Result, SccError};
pub use output::{
    AnalyzeOutput, ErrorOutput, InputDescriptor, SccOutput, SelectorsOutput, SCC_OUTPUT_VERSION,
};
pub use source::{
    ErrorLocation, RuleFileParser, RuleFormat, StylesheetError, StylesheetErrorKind,
    StylesheetParser, Variables,
};
pub use types::{
    AnalysisSummary, ConflictAnalysisResult, OverlapType, ParsedRule, PropertyCategory,
    SelectorOverlap, SelectorParts, Specificity, SpecificityIssue, StyleConflict,
};
