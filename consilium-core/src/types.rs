//! Wire-level data model shared by every component.
//!
//! All structs serialize with camelCase field names and all enumerations
//! serialize as their upper-case labels (`"HIGH"`, `"OPTIMAL"`, ...), which is
//! the shape MCP clients see in tool results.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::experts::ExpertDomain;

/// Priority an expert assigns to its own advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How sure an expert (or a code location hint) is about its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority of a synthesized plan. Adds `CRITICAL` on top of the expert scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl OverallPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallPriority::Critical => "CRITICAL",
            OverallPriority::High => "HIGH",
            OverallPriority::Medium => "MEDIUM",
            OverallPriority::Low => "LOW",
        }
    }
}

impl fmt::Display for OverallPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task complexity, derived from how many experts were selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// Rough indicator of how much caller context the selected experts consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContextEfficiency {
    Optimal,
    Moderate,
    /// Part of the closed set but unreachable while selection is capped at three.
    Heavy,
}

/// A single expert's canned answer to a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertResponse {
    /// Tool name of the expert that produced this response.
    pub expert: String,
    /// Classifier category that fired (`general` when nothing matched).
    pub category: String,
    pub priority: Priority,
    pub confidence: Confidence,
    pub core_insight: String,
    pub immediate_actions: Vec<String>,
    pub risks: Vec<String>,
    pub questions: Vec<String>,
}

/// An advisory pointer into a codebase. Never verified against a filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeLocation {
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    pub code_snippet: String,
    pub confidence: Confidence,
    pub relevance: String,
}

/// Several expert responses merged into one ranked plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedResponse {
    pub overall_priority: OverallPriority,
    pub conflict_resolution: String,
    pub unified_plan: Vec<String>,
    pub critical_risks: Vec<String>,
    pub next_steps: Vec<String>,
    pub success_criteria: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_locations: Option<Vec<CodeLocation>>,
}

/// Which experts a query should be routed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAnalysis {
    pub selected_experts: Vec<ExpertDomain>,
    pub complexity: Complexity,
    pub context_efficiency: ContextEfficiency,
    /// One line per selected expert explaining why it was chosen.
    pub reasoning: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enums_serialize_upper_case() {
        assert_eq!(serde_json::to_value(Priority::High).unwrap(), json!("HIGH"));
        assert_eq!(
            serde_json::to_value(OverallPriority::Critical).unwrap(),
            json!("CRITICAL")
        );
        assert_eq!(
            serde_json::to_value(ContextEfficiency::Moderate).unwrap(),
            json!("MODERATE")
        );
        let parsed: Confidence = serde_json::from_value(json!("LOW")).unwrap();
        assert_eq!(parsed, Confidence::Low);
    }

    #[test]
    fn test_enums_reject_values_outside_closed_set() {
        assert!(serde_json::from_value::<Priority>(json!("CRITICAL")).is_err());
        assert!(serde_json::from_value::<Priority>(json!("high")).is_err());
    }

    #[test]
    fn test_code_location_omits_missing_line() {
        let loc = CodeLocation {
            file_path: "src/index.ts".into(),
            line_number: None,
            code_snippet: "main()".into(),
            confidence: Confidence::Low,
            relevance: "entry point".into(),
        };
        let value = serde_json::to_value(&loc).unwrap();
        assert_eq!(value["filePath"], "src/index.ts");
        assert!(value.get("lineNumber").is_none());
    }

    #[test]
    fn test_synthesized_response_camel_case() {
        let resp = SynthesizedResponse {
            overall_priority: OverallPriority::Medium,
            conflict_resolution: "aligned".into(),
            unified_plan: vec!["Write tests".into()],
            critical_risks: vec![],
            next_steps: vec!["Write tests".into()],
            success_criteria: vec!["All tests passing".into()],
            code_locations: None,
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["overallPriority"], "MEDIUM");
        assert_eq!(value["unifiedPlan"][0], "Write tests");
        assert!(value.get("codeLocations").is_none());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Priority::Medium.to_string(), "MEDIUM");
        assert_eq!(Confidence::High.to_string(), "HIGH");
        assert_eq!(OverallPriority::Low.to_string(), "LOW");
    }
}
