//! The Consilium tools exposed over MCP.
//!
//! Each tool is a thin adapter: deserialize validated arguments, call the
//! shared [`Dispatcher`], serialize the result back to JSON.

use async_trait::async_trait;
use consilium_core::{ConsultRequest, Dispatcher, ExpertDomain, LocateRequest, SynthesisConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::sync::Arc;

use crate::error::ToolError;
use crate::registry::{Tool, ToolRegistry};

pub const ANALYZE_TASK: &str = "analyze_task";
pub const CODE_LOCATOR: &str = "code_locator_expert";
pub const SYNTHESIZE_EXPERTS: &str = "synthesize_experts";

/// Register all eleven Consilium tools on `registry`.
pub fn register_builtin_tools(
    registry: &mut ToolRegistry,
    dispatcher: Arc<Dispatcher>,
    synthesis: &SynthesisConfig,
) -> Result<(), ToolError> {
    registry.register(Arc::new(AnalyzeTaskTool::new(Arc::clone(&dispatcher))))?;
    for domain in ExpertDomain::all() {
        registry.register(Arc::new(ConsultTool::new(*domain, Arc::clone(&dispatcher))))?;
    }
    registry.register(Arc::new(CodeLocatorTool::new(Arc::clone(&dispatcher))))?;
    registry.register(Arc::new(SynthesizeTool::new(
        dispatcher,
        synthesis.include_code_location,
    )))?;
    Ok(())
}

fn user_query_schema() -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "description": "The problem or question to analyze"
    })
}

fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments {
        name: tool.to_string(),
        reason: e.to_string(),
    })
}

fn to_output<T: Serialize>(tool: &str, value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|e| ToolError::ExecutionFailed {
        name: tool.to_string(),
        message: format!("failed to serialize result: {e}"),
    })
}

// ---------------------------------------------------------------------------
// analyze_task
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeArgs {
    user_query: String,
}

/// Picks which experts a query should be routed to.
pub struct AnalyzeTaskTool {
    dispatcher: Arc<Dispatcher>,
}

impl AnalyzeTaskTool {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl Tool for AnalyzeTaskTool {
    fn name(&self) -> &str {
        ANALYZE_TASK
    }

    fn description(&self) -> &str {
        "Analyze a task and select up to three experts to consult, with complexity and reasoning."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "userQuery": user_query_schema() },
            "required": ["userQuery"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: AnalyzeArgs = parse_args(ANALYZE_TASK, args)?;
        to_output(ANALYZE_TASK, &self.dispatcher.analyze_task(&args.user_query))
    }
}

// ---------------------------------------------------------------------------
// consult_*
// ---------------------------------------------------------------------------

/// One `consult_*` tool per expert domain.
pub struct ConsultTool {
    domain: ExpertDomain,
    dispatcher: Arc<Dispatcher>,
}

impl ConsultTool {
    pub fn new(domain: ExpertDomain, dispatcher: Arc<Dispatcher>) -> Self {
        Self { domain, dispatcher }
    }
}

#[async_trait]
impl Tool for ConsultTool {
    fn name(&self) -> &str {
        self.domain.tool_name()
    }

    fn description(&self) -> &str {
        self.domain.profile().description
    }

    fn input_schema(&self) -> Value {
        let questions = &self.domain.profile().questions;
        let mut properties = Map::new();
        properties.insert("userQuery".into(), user_query_schema());
        // The edge-case hunter's hint field is `context` itself, which stays a string.
        let context_is_hint = questions.hint_field == "context";
        let context_description = if context_is_hint {
            questions.hint_description
        } else {
            "Additional context about the situation"
        };
        properties.insert(
            "context".into(),
            json!({ "type": "string", "description": context_description }),
        );
        if !context_is_hint {
            properties.insert(
                questions.hint_field.into(),
                json!({
                    "type": ["string", "number", "boolean", "array"],
                    "items": { "type": "string" },
                    "description": questions.hint_description
                }),
            );
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": ["userQuery"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let request: ConsultRequest = parse_args(self.name(), args)?;
        let response = self.dispatcher.consult(self.domain, &request);
        to_output(self.name(), &response)
    }
}

// ---------------------------------------------------------------------------
// code_locator_expert
// ---------------------------------------------------------------------------

/// Advisory code location hints for a query.
pub struct CodeLocatorTool {
    dispatcher: Arc<Dispatcher>,
}

impl CodeLocatorTool {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl Tool for CodeLocatorTool {
    fn name(&self) -> &str {
        CODE_LOCATOR
    }

    fn description(&self) -> &str {
        "Suggest where in a codebase the problem likely lives, with search terms and next steps. Advisory only; no files are read."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "userQuery": user_query_schema(),
                "keywords": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Extra search terms to include"
                },
                "fileExtensions": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Only suggest files with these extensions, e.g. [\".ts\", \".tsx\"]"
                },
                "searchType": {
                    "type": "string",
                    "enum": ["database", "api", "frontend", "general"],
                    "description": "Force a search strategy instead of deriving it from the query"
                }
            },
            "required": ["userQuery"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let request: LocateRequest = parse_args(CODE_LOCATOR, args)?;
        to_output(CODE_LOCATOR, &self.dispatcher.locate(&request))
    }
}

// ---------------------------------------------------------------------------
// synthesize_experts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeArgs {
    expert_responses: Value,
    user_query: String,
    #[serde(default)]
    include_code_location: Option<bool>,
}

/// Merges expert responses into one prioritized plan.
pub struct SynthesizeTool {
    dispatcher: Arc<Dispatcher>,
    include_code_location_default: bool,
}

impl SynthesizeTool {
    pub fn new(dispatcher: Arc<Dispatcher>, include_code_location_default: bool) -> Self {
        Self {
            dispatcher,
            include_code_location_default,
        }
    }
}

#[async_trait]
impl Tool for SynthesizeTool {
    fn name(&self) -> &str {
        SYNTHESIZE_EXPERTS
    }

    fn description(&self) -> &str {
        "Synthesize several expert responses into one prioritized plan with risks, next steps and success criteria."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "expertResponses": {
                    "type": ["string", "array", "object"],
                    "description": "Expert responses as JSON text, or directly as an array or object of responses"
                },
                "userQuery": user_query_schema(),
                "includeCodeLocation": {
                    "type": "boolean",
                    "description": "Attach code location hints for the query"
                }
            },
            "required": ["userQuery", "expertResponses"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: SynthesizeArgs = parse_args(SYNTHESIZE_EXPERTS, args)?;
        // Structured input is re-encoded so both forms take the same decode path.
        let raw = match args.expert_responses {
            Value::String(text) => text,
            other => other.to_string(),
        };
        let include = args
            .include_code_location
            .unwrap_or(self.include_code_location_default);
        let response = self.dispatcher.synthesize(&raw, &args.user_query, include);
        to_output(SYNTHESIZE_EXPERTS, &response)
    }
}
