pub mod core;
pub mod report;

pub use self::core::{ParsedRule, SelectorParts, Specificity};
pub use self::report::{
    AnalysisSummary, ConflictAnalysisResult, OverlapType, PropertyCategory, SelectorOverlap,
    SpecificityIssue, StyleConflict,
};
