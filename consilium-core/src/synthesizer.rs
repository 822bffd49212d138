//! Synthesizer: merges several expert responses into one ranked plan.
//!
//! Input is the raw JSON text a client sends (an array of responses, or an
//! object whose values are responses). Elements are read leniently: a missing
//! or mistyped field simply counts as absent. The only failure is text that
//! does not decode to an array or object, which yields a fixed fallback plan
//! whose `conflictResolution` carries the parse error.

use regex::Regex;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::Result;
use crate::error::ConsiliumError;
use crate::locator::{LocateCode, LocateRequest};
use crate::scoring::{MAX_CRITICAL_RISKS, MAX_PLAN_ACTIONS, Scorer, dedup};
use crate::types::{OverallPriority, SynthesizedResponse};

/// Maximum number of next steps taken from the head of the unified plan.
pub const MAX_NEXT_STEPS: usize = 5;
/// Maximum number of success criteria.
pub const MAX_SUCCESS_CRITERIA: usize = 4;

const BASELINE_CRITERION: &str = "Original issue resolved and verified by the requester";

/// Query keywords that add a success criterion, in evaluation order.
const CRITERIA_RULES: &[(&str, &str)] = &[
    (
        "performance|slow|speed",
        "Response times meet the agreed performance target",
    ),
    (
        "security|auth|login",
        "Security review passes with no critical findings",
    ),
    (
        "user|interface|design",
        "Users complete the affected flow without assistance",
    ),
    (
        "bug|error|fix",
        "No regressions reported in the affected area",
    ),
];

const TRAILING_CRITERIA: &[&str] = &["All tests passing", "Documentation updated"];

const CONFLICT_HIGH_PRIORITY: &str = "Multiple experts flagged HIGH priority concerns. Address security and performance issues first, then continue with feature and design work.";
const CONFLICT_ALIGNED: &str =
    "Expert recommendations are aligned; no conflicting priorities detected.";

/// The fields synthesis reads from one expert response.
#[derive(Debug, Default)]
struct ExpertView {
    high_priority: bool,
    actions: Vec<String>,
    risks: Vec<String>,
}

impl ExpertView {
    fn from_value(value: &Value) -> Self {
        Self {
            high_priority: value.get("priority").and_then(Value::as_str) == Some("HIGH"),
            actions: string_list(value, "immediateActions"),
            risks: string_list(value, "risks"),
        }
    }
}

/// Merges expert outputs into a [`SynthesizedResponse`].
pub struct Synthesizer {
    locator: Arc<dyn LocateCode>,
    actions: Scorer,
    risks: Scorer,
    criteria: Vec<(Regex, &'static str)>,
}

impl Synthesizer {
    pub fn new(locator: Arc<dyn LocateCode>) -> Self {
        let criteria = CRITERIA_RULES
            .iter()
            .filter_map(|&(pattern, criterion)| match Regex::new(pattern) {
                Ok(re) => Some((re, criterion)),
                Err(e) => {
                    warn!(pattern, error = %e, "Skipping success criterion with invalid pattern");
                    None
                }
            })
            .collect();
        Self {
            locator,
            actions: Scorer::for_actions(),
            risks: Scorer::for_risks(),
            criteria,
        }
    }

    /// Merge `expert_responses` (JSON text) for `user_query`.
    pub fn synthesize(
        &self,
        expert_responses: &str,
        user_query: &str,
        include_code_location: bool,
    ) -> SynthesizedResponse {
        let experts = match parse_responses(expert_responses) {
            Ok(experts) => experts,
            Err(e) => {
                warn!(error = %e, "Falling back to generic synthesis");
                return fallback(&e);
            }
        };

        let high_count = experts.iter().filter(|e| e.high_priority).count();
        let overall_priority = overall_priority(experts.len(), high_count);
        let conflict_resolution = conflict_resolution(experts.len(), high_count);

        let unified_plan = self.actions.rank(
            experts.iter().flat_map(|e| e.actions.iter().cloned()),
            MAX_PLAN_ACTIONS,
        );
        let critical_risks = self.risks.rank(
            experts.iter().flat_map(|e| e.risks.iter().cloned()),
            MAX_CRITICAL_RISKS,
        );
        let next_steps = unified_plan.iter().take(MAX_NEXT_STEPS).cloned().collect();
        let success_criteria = self.success_criteria(user_query);

        let code_locations = include_code_location.then(|| {
            self.locator
                .locate(&LocateRequest::new(user_query))
                .locations
        });

        debug!(
            experts = experts.len(),
            high = high_count,
            priority = %overall_priority,
            plan = unified_plan.len(),
            "Synthesized expert responses"
        );

        SynthesizedResponse {
            overall_priority,
            conflict_resolution,
            unified_plan,
            critical_risks,
            next_steps,
            success_criteria,
            code_locations,
        }
    }

    /// Baseline, keyword criteria, then the trailing fixed criteria, cut to four.
    ///
    /// A query hitting three or more keyword groups pushes the trailing
    /// criteria out entirely; that is current, documented behavior.
    fn success_criteria(&self, user_query: &str) -> Vec<String> {
        let query = user_query.to_lowercase();
        let criteria = std::iter::once(BASELINE_CRITERION)
            .chain(
                self.criteria
                    .iter()
                    .filter(|(re, _)| re.is_match(&query))
                    .map(|(_, criterion)| *criterion),
            )
            .chain(TRAILING_CRITERIA.iter().copied())
            .map(str::to_string);
        let mut criteria = dedup(criteria);
        criteria.truncate(MAX_SUCCESS_CRITERIA);
        criteria
    }
}

fn overall_priority(expert_count: usize, high_count: usize) -> OverallPriority {
    match (expert_count, high_count) {
        (_, 0) => OverallPriority::Medium,
        (n, _) if n >= 3 => OverallPriority::Critical,
        _ => OverallPriority::High,
    }
}

fn conflict_resolution(expert_count: usize, high_count: usize) -> String {
    if high_count >= 2 {
        CONFLICT_HIGH_PRIORITY.to_string()
    } else if expert_count >= 3 {
        format!(
            "Multi-expert consensus: {expert_count} perspectives merged; actions are ordered by impact and risk."
        )
    } else {
        CONFLICT_ALIGNED.to_string()
    }
}

fn parse_responses(raw: &str) -> Result<Vec<ExpertView>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ConsiliumError::MalformedResponses {
            message: e.to_string(),
        })?;
    match value {
        Value::Array(items) => Ok(items.iter().map(ExpertView::from_value).collect()),
        Value::Object(map) => Ok(map.values().map(ExpertView::from_value).collect()),
        other => Err(ConsiliumError::MalformedResponses {
            message: format!(
                "expected an array or object of expert responses, got {}",
                json_kind(&other)
            ),
        }),
    }
}

fn fallback(error: &ConsiliumError) -> SynthesizedResponse {
    let message = match error {
        ConsiliumError::MalformedResponses { message } => message.clone(),
        other => other.to_string(),
    };
    let plan: Vec<String> = [
        "Review each expert response manually",
        "Identify the highest-priority actions",
        "Create a step-by-step implementation plan",
    ]
    .map(String::from)
    .to_vec();
    SynthesizedResponse {
        overall_priority: OverallPriority::Medium,
        conflict_resolution: format!("Parsing error: {message}"),
        next_steps: plan.clone(),
        unified_plan: plan,
        critical_risks: vec![
            "Expert responses could not be parsed; recommendations may be incomplete".to_string(),
        ],
        success_criteria: ["Issue resolved", "All tests passing"]
            .map(String::from)
            .to_vec(),
        code_locations: None,
    }
}

fn string_list(value: &Value, field: &str) -> Vec<String> {
    value
        .get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
