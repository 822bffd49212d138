//! # Consilium Core
//!
//! Core library for Consilium, a rule-based expert dispatcher.
//! Provides the per-domain rule tables, the eight experts, task selection,
//! code location hints, plan synthesis, configuration and shared types.

pub mod config;
pub mod error;
pub mod experts;
pub mod locator;
pub mod rules;
pub mod scoring;
pub mod selector;
pub mod synthesizer;
pub mod types;

use std::sync::Arc;

// Re-export commonly used types at the crate root.
pub use config::{ConsiliumConfig, LoggingConfig, ServerConfig, SynthesisConfig};
pub use error::ConsiliumError;
pub use experts::{ConsultRequest, Expert, ExpertDomain, ExpertPanel};
pub use locator::{CodeLocator, LocateCode, LocateRequest, LocatorReport, SearchType};
pub use selector::{MAX_SELECTED_EXPERTS, TaskSelector};
pub use synthesizer::Synthesizer;
pub use types::{
    CodeLocation, Complexity, Confidence, ContextEfficiency, ExpertResponse, OverallPriority,
    Priority, SynthesizedResponse, TaskAnalysis,
};

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, ConsiliumError>;

/// Every dispatcher operation behind one value.
///
/// Built once at startup and shared read-only; no call mutates it.
pub struct Dispatcher {
    panel: ExpertPanel,
    selector: TaskSelector,
    locator: Arc<dyn LocateCode>,
    synthesizer: Synthesizer,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::with_locator(Arc::new(CodeLocator::new()))
    }

    /// Build a dispatcher whose locate and synthesize calls use `locator`.
    pub fn with_locator(locator: Arc<dyn LocateCode>) -> Self {
        Self {
            panel: ExpertPanel::new(),
            selector: TaskSelector::new(),
            synthesizer: Synthesizer::new(Arc::clone(&locator)),
            locator,
        }
    }

    pub fn panel(&self) -> &ExpertPanel {
        &self.panel
    }

    pub fn analyze_task(&self, user_query: &str) -> TaskAnalysis {
        self.selector.select(user_query)
    }

    pub fn consult(&self, domain: ExpertDomain, request: &ConsultRequest) -> ExpertResponse {
        self.panel.consult(domain, request)
    }

    pub fn locate(&self, request: &LocateRequest) -> LocatorReport {
        self.locator.locate(request)
    }

    pub fn synthesize(
        &self,
        expert_responses: &str,
        user_query: &str,
        include_code_location: bool,
    ) -> SynthesizedResponse {
        self.synthesizer
            .synthesize(expert_responses, user_query, include_code_location)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLocator;

    impl LocateCode for FixedLocator {
        fn locate(&self, _request: &LocateRequest) -> LocatorReport {
            LocatorReport {
                locations: vec![CodeLocation {
                    file_path: "lib/fixed.rs".into(),
                    line_number: Some(7),
                    code_snippet: "fn fixed()".into(),
                    confidence: Confidence::High,
                    relevance: "fixed".into(),
                }],
                search_strategy: "fixed".into(),
                search_terms: vec![],
                recommendations: vec![],
                next_steps: vec![],
            }
        }
    }

    #[test]
    fn test_full_pipeline() {
        let dispatcher = Dispatcher::new();
        let query = "Our login system is slow and users are complaining about security";
        let analysis = dispatcher.analyze_task(query);

        let responses: Vec<ExpertResponse> = analysis
            .selected_experts
            .iter()
            .map(|d| dispatcher.consult(*d, &ConsultRequest::new(query)))
            .collect();
        let raw = serde_json::to_string(&responses).unwrap();

        let plan = dispatcher.synthesize(&raw, query, true);
        assert_eq!(plan.overall_priority, OverallPriority::Critical);
        assert!(!plan.unified_plan.is_empty());
        assert!(plan.critical_risks.len() <= 3);
        assert!(plan.code_locations.is_some());
    }

    #[test]
    fn test_custom_locator_is_used_by_synthesis() {
        let dispatcher = Dispatcher::with_locator(Arc::new(FixedLocator));
        let plan = dispatcher.synthesize("[]", "anything", true);
        let locations = plan.code_locations.unwrap();
        assert_eq!(locations[0].file_path, "lib/fixed.rs");
        assert_eq!(
            dispatcher.locate(&LocateRequest::new("x")).search_strategy,
            "fixed"
        );
    }
}
