//! Expert units: one keyword classifier plus one canned response table per domain.
//!
//! Every domain is pure data (see the per-domain modules) instantiated through
//! the same [`RuleTable`] machinery. An [`Expert`] never fails: unmatched
//! queries land on the domain's `general` answer, and the trailing questions
//! are picked by a single hint-field rule.
//!
//! ```text
//! query --lowercase--> RuleTable::classify --> CannedAnswer
//!                                               + QuestionRule(hint field)
//!                                               = ExpertResponse
//! ```

mod design;
mod devops;
mod edge_cases;
mod engineering;
mod performance;
mod product;
mod qa;
mod security;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::ConsiliumError;
use crate::rules::{CannedAnswer, Rule, RuleTable};
use crate::types::ExpertResponse;

/// Identifier of each expert domain. Serializes as the domain's tool name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpertDomain {
    #[serde(rename = "consult_software_engineer")]
    SoftwareEngineer,
    #[serde(rename = "consult_performance_expert")]
    Performance,
    #[serde(rename = "consult_security_expert")]
    Security,
    #[serde(rename = "consult_ux_designer")]
    UxDesigner,
    #[serde(rename = "consult_devops_engineer")]
    DevOps,
    #[serde(rename = "consult_product_manager")]
    ProductManager,
    #[serde(rename = "consult_qa_engineer")]
    QaEngineer,
    #[serde(rename = "consult_edge_case_hunter")]
    EdgeCaseHunter,
}

impl ExpertDomain {
    /// All domains, in task-selector evaluation order (QA last, never auto-selected).
    pub fn all() -> &'static [ExpertDomain] {
        &[
            ExpertDomain::SoftwareEngineer,
            ExpertDomain::Performance,
            ExpertDomain::Security,
            ExpertDomain::UxDesigner,
            ExpertDomain::DevOps,
            ExpertDomain::ProductManager,
            ExpertDomain::EdgeCaseHunter,
            ExpertDomain::QaEngineer,
        ]
    }

    /// The MCP tool name for this expert.
    pub fn tool_name(&self) -> &'static str {
        match self {
            ExpertDomain::SoftwareEngineer => "consult_software_engineer",
            ExpertDomain::Performance => "consult_performance_expert",
            ExpertDomain::Security => "consult_security_expert",
            ExpertDomain::UxDesigner => "consult_ux_designer",
            ExpertDomain::DevOps => "consult_devops_engineer",
            ExpertDomain::ProductManager => "consult_product_manager",
            ExpertDomain::QaEngineer => "consult_qa_engineer",
            ExpertDomain::EdgeCaseHunter => "consult_edge_case_hunter",
        }
    }

    /// Static definition of the domain: rules, fallback and question rule.
    pub fn profile(&self) -> &'static DomainProfile {
        match self {
            ExpertDomain::SoftwareEngineer => &engineering::PROFILE,
            ExpertDomain::Performance => &performance::PROFILE,
            ExpertDomain::Security => &security::PROFILE,
            ExpertDomain::UxDesigner => &design::PROFILE,
            ExpertDomain::DevOps => &devops::PROFILE,
            ExpertDomain::ProductManager => &product::PROFILE,
            ExpertDomain::QaEngineer => &qa::PROFILE,
            ExpertDomain::EdgeCaseHunter => &edge_cases::PROFILE,
        }
    }
}

impl fmt::Display for ExpertDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tool_name())
    }
}

impl FromStr for ExpertDomain {
    type Err = ConsiliumError;

    /// Accepts the full tool name or the bare domain (`security_expert`, `security`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        let bare = needle.strip_prefix("consult_").unwrap_or(&needle);
        ExpertDomain::all()
            .iter()
            .copied()
            .find(|domain| {
                let name = domain.tool_name().trim_start_matches("consult_");
                name == bare || name.split('_').next() == Some(bare)
            })
            .ok_or_else(|| ConsiliumError::UnknownExpert {
                name: s.to_string(),
            })
    }
}

/// Picks the trailing `questions` of a response.
///
/// When the caller supplied `hint_field`, a single follow-up mentioning its
/// value is asked; otherwise the generic questions are asked.
#[derive(Debug, Clone, Copy)]
pub struct QuestionRule {
    /// camelCase request field that drives the rule.
    pub hint_field: &'static str,
    /// Schema description of the hint field.
    pub hint_description: &'static str,
    /// Question asked when the hint is present; `{hint}` is replaced by its value.
    pub with_hint: &'static str,
    pub without_hint: &'static [&'static str],
}

/// Pure-data definition of one expert domain.
#[derive(Debug)]
pub struct DomainProfile {
    pub title: &'static str,
    pub description: &'static str,
    pub rules: &'static [Rule],
    pub general: CannedAnswer,
    pub questions: QuestionRule,
}

/// Input for a consult call.
///
/// Domain-specific hint fields (`codeContext`, `metrics`, ...) are collected
/// into `hints` so every expert shares the same request type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultRequest {
    pub user_query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(flatten)]
    pub hints: Map<String, Value>,
}

impl ConsultRequest {
    pub fn new(user_query: impl Into<String>) -> Self {
        Self {
            user_query: user_query.into(),
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_hint(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.hints.insert(field.into(), value.into());
        self
    }

    /// Non-empty text value of a hint field. Arrays of strings are joined.
    pub fn hint(&self, field: &str) -> Option<String> {
        if field == "context" {
            return self
                .context
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string);
        }
        let text = match self.hints.get(field)? {
            Value::String(s) => s.trim().to_string(),
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        };
        (!text.is_empty()).then_some(text)
    }
}

/// A stateless classifier + response table for one domain.
pub struct Expert {
    domain: ExpertDomain,
    table: RuleTable,
}

impl Expert {
    pub fn new(domain: ExpertDomain) -> Self {
        let profile = domain.profile();
        Self {
            domain,
            table: RuleTable::compile(profile.rules, &profile.general),
        }
    }

    pub fn domain(&self) -> ExpertDomain {
        self.domain
    }

    /// Classify an already lower-cased query into one of this domain's categories.
    pub fn classify(&self, query: &str) -> &'static str {
        self.table.classify(query).category
    }

    /// Category names in evaluation order.
    pub fn categories(&self) -> Vec<&'static str> {
        self.table.categories()
    }

    /// Answer a query from the canned table.
    pub fn consult(&self, request: &ConsultRequest) -> ExpertResponse {
        let query = request.user_query.to_lowercase();
        let hit = self.table.classify(&query);
        let profile = self.domain.profile();

        debug!(
            expert = %self.domain,
            category = hit.category,
            priority = %hit.answer.priority,
            "Expert classified query"
        );

        let questions = match request.hint(profile.questions.hint_field) {
            Some(value) => vec![profile.questions.with_hint.replace("{hint}", &value)],
            None => to_strings(profile.questions.without_hint),
        };

        ExpertResponse {
            expert: self.domain.tool_name().to_string(),
            category: hit.category.to_string(),
            priority: hit.answer.priority,
            confidence: hit.answer.confidence,
            core_insight: hit.answer.insight.to_string(),
            immediate_actions: to_strings(hit.answer.actions),
            risks: to_strings(hit.answer.risks),
            questions,
        }
    }
}

/// All eight experts, compiled once and shared by the dispatcher.
pub struct ExpertPanel {
    experts: Vec<Expert>,
}

impl ExpertPanel {
    pub fn new() -> Self {
        Self {
            experts: ExpertDomain::all().iter().copied().map(Expert::new).collect(),
        }
    }

    pub fn expert(&self, domain: ExpertDomain) -> &Expert {
        // `new` builds one expert per domain in `ExpertDomain::all()` order.
        let index = ExpertDomain::all()
            .iter()
            .position(|d| *d == domain)
            .unwrap_or_default();
        &self.experts[index]
    }

    pub fn consult(&self, domain: ExpertDomain, request: &ConsultRequest) -> ExpertResponse {
        self.expert(domain).consult(request)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expert> {
        self.experts.iter()
    }
}

impl Default for ExpertPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
