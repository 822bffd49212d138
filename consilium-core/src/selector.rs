//! Task selector: decides which experts a query should be routed to.
//!
//! Primary domains are tested in a fixed order and appended to an ordered,
//! duplicate-free selection. The edge-case hunter is then appended when two
//! or more experts were already picked or when the query itself mentions
//! edge-case trigger words. The selection is finally cut to the first
//! [`MAX_SELECTED_EXPERTS`] entries, so on a busy query the escalated
//! edge-case hunter is the first to be dropped.

use regex::Regex;
use tracing::{debug, warn};

use crate::experts::ExpertDomain;
use crate::types::{Complexity, ContextEfficiency, TaskAnalysis};

/// Hard cap on the number of experts returned for one query.
pub const MAX_SELECTED_EXPERTS: usize = 3;

/// Primary domains in evaluation order, with their trigger pattern and the
/// reason reported when they match.
const PRIMARY_TRIGGERS: &[(ExpertDomain, &str, &str)] = &[
    (
        ExpertDomain::SoftwareEngineer,
        r"\b(code|coding|bugs?|refactor\w*|implement\w*|architecture|system|functions?|class(es)?|modules?|api|features?|login|compil\w*|debug\w*)\b",
        "query touches code, features or system behavior",
    ),
    (
        ExpertDomain::Performance,
        r"\b(slow\w*|fast\w*|speed|performance|latency|optimi[sz]\w*|memory|cpu|bottlenecks?|scal\w*|timeouts?|lag\w*)\b",
        "query mentions speed, latency or resource usage",
    ),
    (
        ExpertDomain::Security,
        r"\b(security|secure|auth\w*|login|passwords?|vulnerab\w*|encrypt\w*|tokens?|xss|csrf|injection|breach\w*|permissions?)\b",
        "query mentions security, authentication or data protection",
    ),
    (
        ExpertDomain::UxDesigner,
        r"\b(users?|ux|ui|interface|design|usability|accessib\w*|layout|onboarding|customers?)\b",
        "query concerns users, interface or design",
    ),
    (
        ExpertDomain::DevOps,
        r"\b(deploy\w*|ci|cd|pipelines?|docker|kubernetes|k8s|infrastructure|servers?|monitoring|production|release\w*|rollback)\b",
        "query concerns deployment, infrastructure or operations",
    ),
    (
        ExpertDomain::ProductManager,
        r"\b(roadmap|priorit\w*|stakeholders?|deadlines?|sprints?|requirements?|mvp|business|backlog|estimat\w*)\b",
        "query concerns scope, priorities or delivery",
    ),
];

const EDGE_CASE_TRIGGERS: &str = r"\b(edge cases?|corner cases?|what if|fail\w*|crash\w*|unexpected|boundar\w*|race conditions?|null|empty|overflow|invalid)\b";

/// Routes queries to experts. Compile once, select many times.
pub struct TaskSelector {
    primaries: Vec<(ExpertDomain, Regex, &'static str)>,
    edge_cases: Option<Regex>,
}

impl TaskSelector {
    pub fn new() -> Self {
        let primaries = PRIMARY_TRIGGERS
            .iter()
            .filter_map(|&(domain, pattern, reason)| match Regex::new(pattern) {
                Ok(re) => Some((domain, re, reason)),
                Err(e) => {
                    warn!(expert = %domain, error = %e, "Skipping selector trigger with invalid pattern");
                    None
                }
            })
            .collect();
        let edge_cases = Regex::new(EDGE_CASE_TRIGGERS)
            .inspect_err(|e| warn!(error = %e, "Edge-case trigger pattern does not compile"))
            .ok();
        Self {
            primaries,
            edge_cases,
        }
    }

    /// Pick up to three experts for `query`.
    pub fn select(&self, query: &str) -> TaskAnalysis {
        let query = query.to_lowercase();
        let mut picked: Vec<(ExpertDomain, String)> = Vec::new();

        for (domain, re, reason) in &self.primaries {
            if re.is_match(&query) && !picked.iter().any(|(d, _)| d == domain) {
                picked.push((*domain, format!("{domain}: {reason}")));
            }
        }

        let mentions_edge_cases = self
            .edge_cases
            .as_ref()
            .is_some_and(|re| re.is_match(&query));
        if picked.len() >= 2 || mentions_edge_cases {
            let reason = if mentions_edge_cases {
                "query mentions failure modes or edge cases"
            } else {
                "several domains involved, escalating to edge-case review"
            };
            let domain = ExpertDomain::EdgeCaseHunter;
            picked.push((domain, format!("{domain}: {reason}")));
        }

        if picked.is_empty() {
            let domain = ExpertDomain::SoftwareEngineer;
            picked.push((
                domain,
                format!("{domain}: no domain keywords matched, defaulting to general engineering"),
            ));
        }

        if picked.len() > MAX_SELECTED_EXPERTS {
            debug!(
                dropped = ?picked[MAX_SELECTED_EXPERTS..].iter().map(|(d, _)| *d).collect::<Vec<_>>(),
                "Selection over the cap, keeping the earliest matches"
            );
            picked.truncate(MAX_SELECTED_EXPERTS);
        }

        let (selected_experts, reasoning): (Vec<_>, Vec<_>) = picked.into_iter().unzip();
        let (complexity, context_efficiency) = rate(selected_experts.len());

        debug!(experts = ?selected_experts, ?complexity, "Selected experts");

        TaskAnalysis {
            selected_experts,
            complexity,
            context_efficiency,
            reasoning,
        }
    }
}

impl Default for TaskSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Complexity and context cost from the number of selected experts.
fn rate(count: usize) -> (Complexity, ContextEfficiency) {
    match count {
        0 | 1 => (Complexity::Low, ContextEfficiency::Optimal),
        2 => (Complexity::Medium, ContextEfficiency::Optimal),
        3 => (Complexity::High, ContextEfficiency::Moderate),
        _ => (Complexity::High, ContextEfficiency::Heavy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_match_defaults_to_software_engineer() {
        let analysis = TaskSelector::new().select("hello there");
        assert_eq!(analysis.selected_experts, vec![ExpertDomain::SoftwareEngineer]);
        assert_eq!(analysis.complexity, Complexity::Low);
        assert_eq!(analysis.context_efficiency, ContextEfficiency::Optimal);
        assert_eq!(analysis.reasoning.len(), 1);
    }

    #[test]
    fn test_single_domain() {
        let analysis = TaskSelector::new().select("Reduce memory usage");
        assert_eq!(analysis.selected_experts, vec![ExpertDomain::Performance]);
        assert_eq!(analysis.complexity, Complexity::Low);
    }

    #[test]
    fn test_two_domains_escalate_to_edge_cases() {
        let analysis = TaskSelector::new().select("Refactor the deploy pipeline");
        assert_eq!(
            analysis.selected_experts,
            vec![
                ExpertDomain::SoftwareEngineer,
                ExpertDomain::DevOps,
                ExpertDomain::EdgeCaseHunter,
            ]
        );
        assert_eq!(analysis.complexity, Complexity::High);
        assert_eq!(analysis.context_efficiency, ContextEfficiency::Moderate);
    }

    #[test]
    fn test_edge_case_words_alone() {
        let analysis = TaskSelector::new().select("What if the input is empty?");
        assert_eq!(analysis.selected_experts, vec![ExpertDomain::EdgeCaseHunter]);
        assert_eq!(analysis.complexity, Complexity::Low);
    }

    #[test]
    fn test_one_domain_plus_edge_case_words() {
        let analysis = TaskSelector::new().select("The deploy failed");
        assert_eq!(
            analysis.selected_experts,
            vec![ExpertDomain::DevOps, ExpertDomain::EdgeCaseHunter]
        );
        assert_eq!(analysis.complexity, Complexity::Medium);
        assert_eq!(analysis.context_efficiency, ContextEfficiency::Optimal);
    }

    // Documented current behavior: once three primaries match, the escalated
    // edge-case hunter is appended fourth and truncated away.
    #[test]
    fn test_login_scenario_truncates_edge_cases() {
        let analysis = TaskSelector::new()
            .select("Our login system is slow and users are complaining about security");
        assert_eq!(
            analysis.selected_experts,
            vec![
                ExpertDomain::SoftwareEngineer,
                ExpertDomain::Performance,
                ExpertDomain::Security,
            ]
        );
        assert_eq!(analysis.complexity, Complexity::High);
        assert_eq!(analysis.reasoning.len(), 3);
    }

    #[test]
    fn test_truncation_keeps_evaluation_order() {
        let analysis = TaskSelector::new().select(
            "deploy the new roadmap feature with better ui and faster api before the deadline",
        );
        assert_eq!(analysis.selected_experts.len(), MAX_SELECTED_EXPERTS);
        let order: Vec<usize> = analysis
            .selected_experts
            .iter()
            .map(|d| ExpertDomain::all().iter().position(|x| x == d).unwrap())
            .collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn test_selection_is_case_insensitive() {
        let selector = TaskSelector::new();
        assert_eq!(
            selector.select("SLOW LOGIN").selected_experts,
            selector.select("slow login").selected_experts
        );
    }

    #[test]
    fn test_rate_table() {
        assert_eq!(rate(1), (Complexity::Low, ContextEfficiency::Optimal));
        assert_eq!(rate(2), (Complexity::Medium, ContextEfficiency::Optimal));
        assert_eq!(rate(3), (Complexity::High, ContextEfficiency::Moderate));
    }

    #[test]
    fn test_analysis_serializes_tool_names() {
        let analysis = TaskSelector::new().select("hello there");
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["selectedExperts"][0], "consult_software_engineer");
        assert_eq!(value["complexity"], "LOW");
        assert_eq!(value["contextEfficiency"], "OPTIMAL");
    }
}
