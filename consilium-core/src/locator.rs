//! Code locator: advisory search hints derived from substring triggers.
//!
//! Nothing here touches a filesystem. Paths and snippets are illustrative
//! templates that tell the caller where such code usually lives and what to
//! search for.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{CodeLocation, Confidence};

/// Search strategy, either derived from the query or forced by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Database,
    Api,
    Frontend,
    General,
}

impl SearchType {
    /// Strategy picked from the lower-cased query, in fixed priority order.
    pub fn from_query(query: &str) -> Self {
        if contains_any(query, SORT_TRIGGERS) {
            SearchType::Database
        } else if contains_any(query, API_TRIGGERS) {
            SearchType::Api
        } else if contains_any(query, FRONTEND_TRIGGERS) {
            SearchType::Frontend
        } else {
            SearchType::General
        }
    }

    pub fn strategy(&self) -> &'static str {
        match self {
            SearchType::Database => {
                "Database query analysis - search ORDER BY clauses, sort parameters and the layers that pass them through"
            }
            SearchType::Api => {
                "API layer analysis - trace route definitions to their request handlers and services"
            }
            SearchType::Frontend => {
                "Frontend component analysis - inspect component rendering, props and local state"
            }
            SearchType::General => {
                "General codebase search - start from the entry points and follow the data flow"
            }
        }
    }
}

const SORT_TRIGGERS: &[&str] = &["sort", "order"];
const API_TRIGGERS: &[&str] = &["api", "endpoint"];
const FRONTEND_TRIGGERS: &[&str] = &["component", "ui"];

const SORT_TERMS: &[&str] = &["ORDER BY", "ASC", "DESC", "sort", "orderBy", "sortBy"];
const API_TERMS: &[&str] = &["router", "route", "endpoint", "handler", "controller"];
const FRONTEND_TERMS: &[&str] = &["component", "render", "props", "useState"];

/// Input for a locate call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocateRequest {
    pub user_query: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_extensions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_type: Option<SearchType>,
}

impl LocateRequest {
    pub fn new(user_query: impl Into<String>) -> Self {
        Self {
            user_query: user_query.into(),
            ..Default::default()
        }
    }
}

/// Result of a locate call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorReport {
    pub locations: Vec<CodeLocation>,
    pub search_strategy: String,
    pub search_terms: Vec<String>,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
}

/// Capability to produce code location hints.
///
/// The synthesizer holds one of these so it can attach locations without
/// knowing how they are produced.
pub trait LocateCode: Send + Sync {
    fn locate(&self, request: &LocateRequest) -> LocatorReport;
}

/// The built-in, template-driven locator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeLocator;

impl CodeLocator {
    pub fn new() -> Self {
        Self
    }
}

impl LocateCode for CodeLocator {
    fn locate(&self, request: &LocateRequest) -> LocatorReport {
        let query = request.user_query.to_lowercase();
        let search_type = request
            .search_type
            .unwrap_or_else(|| SearchType::from_query(&query));

        let search_terms = extract_terms(&query, &request.keywords);
        let extensions = normalize_extensions(&request.file_extensions);

        let mut locations: Vec<CodeLocation> = location_templates(search_type)
            .iter()
            .filter(|t| extensions.is_empty() || extensions.iter().any(|e| t.path.ends_with(e.as_str())))
            .map(LocationTemplate::to_location)
            .collect();
        if locations.is_empty() {
            let ext = extensions.first().map(String::as_str).unwrap_or(".ts");
            locations.push(entry_point(ext));
        }

        debug!(
            strategy = ?search_type,
            terms = search_terms.len(),
            locations = locations.len(),
            "Located code hints"
        );

        let mut recommendations =
            vec!["Search the codebase for the extracted terms before changing anything".to_string()];
        let mut next_steps =
            vec!["Open the highest-confidence location and confirm it is relevant".to_string()];
        if search_type == SearchType::Database {
            recommendations.extend(
                [
                    "Check whether sorting happens in the database query or in application code",
                    "Verify the column used for ordering is indexed",
                    "Confirm the sort direction (ASC/DESC) matches the expected behavior",
                ]
                .map(String::from),
            );
            next_steps.extend(
                [
                    "Trace the sort parameter from the API handler down to the query",
                    "Add a test that asserts the expected ordering",
                ]
                .map(String::from),
            );
        }

        LocatorReport {
            locations,
            search_strategy: search_type.strategy().to_string(),
            search_terms,
            recommendations,
            next_steps,
        }
    }
}

struct LocationTemplate {
    path: &'static str,
    line: Option<u32>,
    snippet: &'static str,
    confidence: Confidence,
    relevance: &'static str,
}

impl LocationTemplate {
    fn to_location(&self) -> CodeLocation {
        CodeLocation {
            file_path: self.path.to_string(),
            line_number: self.line,
            code_snippet: self.snippet.to_string(),
            confidence: self.confidence,
            relevance: self.relevance.to_string(),
        }
    }
}

const DATABASE_LOCATIONS: &[LocationTemplate] = &[
    LocationTemplate {
        path: "src/database/queries.ts",
        line: Some(42),
        snippet: "SELECT * FROM items ORDER BY created_at DESC",
        confidence: Confidence::High,
        relevance: "Primary list query; defines the default sort order",
    },
    LocationTemplate {
        path: "src/services/itemService.ts",
        line: Some(118),
        snippet: "items.sort((a, b) => b.createdAt - a.createdAt)",
        confidence: Confidence::Medium,
        relevance: "In-memory sorting applied after the query returns",
    },
    LocationTemplate {
        path: "src/components/ItemList.tsx",
        line: None,
        snippet: "const [sortOrder, setSortOrder] = useState('desc')",
        confidence: Confidence::Low,
        relevance: "UI state that selects the sort order sent to the API",
    },
];

const API_LOCATIONS: &[LocationTemplate] = &[
    LocationTemplate {
        path: "src/routes/index.ts",
        line: Some(15),
        snippet: "router.get('/api/items', itemController.list)",
        confidence: Confidence::High,
        relevance: "Route definition for the endpoint",
    },
    LocationTemplate {
        path: "src/controllers/itemController.ts",
        line: Some(27),
        snippet: "export async function list(req, res) {",
        confidence: Confidence::Medium,
        relevance: "Request handler behind the route",
    },
];

const FRONTEND_LOCATIONS: &[LocationTemplate] = &[
    LocationTemplate {
        path: "src/components/App.tsx",
        line: Some(1),
        snippet: "export default function App() {",
        confidence: Confidence::Medium,
        relevance: "Root component; follow props down to the affected component",
    },
    LocationTemplate {
        path: "src/styles/theme.css",
        line: None,
        snippet: ":root { --primary-color: #2563eb; }",
        confidence: Confidence::Low,
        relevance: "Shared styles that affect component appearance",
    },
];

const GENERAL_LOCATIONS: &[LocationTemplate] = &[LocationTemplate {
    path: "src/index.ts",
    line: Some(1),
    snippet: "main()",
    confidence: Confidence::Low,
    relevance: "Application entry point; trace the data flow from here",
}];

fn location_templates(search_type: SearchType) -> &'static [LocationTemplate] {
    match search_type {
        SearchType::Database => DATABASE_LOCATIONS,
        SearchType::Api => API_LOCATIONS,
        SearchType::Frontend => FRONTEND_LOCATIONS,
        SearchType::General => GENERAL_LOCATIONS,
    }
}

fn entry_point(ext: &str) -> CodeLocation {
    CodeLocation {
        file_path: format!("src/main{ext}"),
        line_number: None,
        code_snippet: "main".to_string(),
        confidence: Confidence::Low,
        relevance: "Entry point for the requested file type; trace the data flow from here"
            .to_string(),
    }
}

fn contains_any(query: &str, triggers: &[&str]) -> bool {
    triggers.iter().any(|t| query.contains(t))
}

/// Terms from every matched trigger group, then caller keywords, without repeats.
fn extract_terms(query: &str, keywords: &[String]) -> Vec<String> {
    let groups = [
        (SORT_TRIGGERS, SORT_TERMS),
        (API_TRIGGERS, API_TERMS),
        (FRONTEND_TRIGGERS, FRONTEND_TERMS),
    ];
    let mut terms: Vec<String> = Vec::new();
    let candidates = groups
        .iter()
        .filter(|(triggers, _)| contains_any(query, triggers))
        .flat_map(|(_, group)| group.iter().map(|t| t.to_string()))
        .chain(
            keywords
                .iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
        );
    for term in candidates {
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .map(|e| {
            if e.starts_with('.') {
                e.to_string()
            } else {
                format!(".{e}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_query_uses_database_strategy() {
        let report = CodeLocator::new().locate(&LocateRequest::new("Items are in the wrong order"));
        assert!(report.search_strategy.starts_with("Database query analysis"));
        assert!(report.search_terms.contains(&"ORDER BY".to_string()));
        assert_eq!(report.locations.len(), 3);
        assert_eq!(report.locations[0].confidence, Confidence::High);
    }

    #[test]
    fn test_sort_takes_priority_over_api() {
        assert_eq!(
            SearchType::from_query("sort order of the api endpoint"),
            SearchType::Database
        );
        assert_eq!(SearchType::from_query("new api endpoint"), SearchType::Api);
        assert_eq!(
            SearchType::from_query("the header component"),
            SearchType::Frontend
        );
        assert_eq!(SearchType::from_query("it is broken"), SearchType::General);
    }

    #[test]
    fn test_explicit_search_type_overrides_query() {
        let mut req = LocateRequest::new("sort the results");
        req.search_type = Some(SearchType::Api);
        let report = CodeLocator::new().locate(&req);
        assert!(report.search_strategy.starts_with("API layer analysis"));
        assert_eq!(report.locations[0].file_path, "src/routes/index.ts");
        // Terms still come from the query text.
        assert!(report.search_terms.contains(&"ASC".to_string()));
    }

    #[test]
    fn test_recommendations_start_generic() {
        let locator = CodeLocator::new();
        let general = locator.locate(&LocateRequest::new("it is broken"));
        assert_eq!(general.recommendations.len(), 1);
        assert_eq!(general.next_steps.len(), 1);

        let sorting = locator.locate(&LocateRequest::new("sort by date"));
        assert_eq!(sorting.recommendations[0], general.recommendations[0]);
        assert_eq!(sorting.next_steps[0], general.next_steps[0]);
        assert!(sorting.recommendations.len() > 1);
        assert!(sorting.next_steps.len() > 1);
    }

    #[test]
    fn test_keywords_appended_without_duplicates() {
        let mut req = LocateRequest::new("sort the list");
        req.keywords = vec!["sort".into(), "createdAt".into(), "  ".into()];
        let report = CodeLocator::new().locate(&req);
        let sort_count = report.search_terms.iter().filter(|t| *t == "sort").count();
        assert_eq!(sort_count, 1);
        assert_eq!(report.search_terms.last().map(String::as_str), Some("createdAt"));
    }

    #[test]
    fn test_file_extensions_filter_locations() {
        let mut req = LocateRequest::new("sort the list");
        req.file_extensions = vec!["tsx".into()];
        let report = CodeLocator::new().locate(&req);
        assert_eq!(report.locations.len(), 1);
        assert_eq!(report.locations[0].file_path, "src/components/ItemList.tsx");
    }

    #[test]
    fn test_unmatched_extension_falls_back_to_entry_point() {
        let mut req = LocateRequest::new("sort the list");
        req.file_extensions = vec![".py".into()];
        let report = CodeLocator::new().locate(&req);
        assert_eq!(report.locations.len(), 1);
        assert_eq!(report.locations[0].file_path, "src/main.py");
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let req: LocateRequest = serde_json::from_value(serde_json::json!({
            "userQuery": "fix endpoint",
            "fileExtensions": [".ts"],
            "searchType": "frontend"
        }))
        .unwrap();
        assert_eq!(req.search_type, Some(SearchType::Frontend));
        assert_eq!(req.file_extensions, vec![".ts".to_string()]);
        assert!(req.keywords.is_empty());
    }
}
