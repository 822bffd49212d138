//! Tool registry: registration, argument validation and timed execution.
//!
//! Each tool's input schema is compiled once at registration. Calls are
//! checked against it before the tool runs, so tools can deserialize their
//! arguments knowing required fields are present and well-typed.

use async_trait::async_trait;
use jsonschema::Validator;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::ToolError;
use crate::protocol::McpTool;

/// Default upper bound on a single tool execution.
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait that all tools must implement.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool.
    fn name(&self) -> &str;

    /// Human-readable description of what this tool does.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments.
    fn input_schema(&self) -> Value;

    /// Execute the tool with already-validated arguments.
    async fn execute(&self, args: Value) -> Result<Value, ToolError>;
}

struct RegisteredTool {
    tool: Arc<dyn Tool>,
    validator: Validator,
}

/// Holds all registered tools and handles execution.
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
    timeout: Duration,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TOOL_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            tools: HashMap::new(),
            timeout,
        }
    }

    /// Register a tool. Fails on a duplicate name or a schema that does not compile.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::AlreadyRegistered { name });
        }
        let validator = jsonschema::validator_for(&tool.input_schema()).map_err(|e| {
            ToolError::InvalidArguments {
                name: name.clone(),
                reason: format!("input schema does not compile: {e}"),
            }
        })?;
        debug!(tool = %name, "Registering tool");
        self.tools.insert(name, RegisteredTool { tool, validator });
        Ok(())
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).map(|t| Arc::clone(&t.tool))
    }

    /// Tool descriptors for `tools/list`, sorted by name.
    pub fn list_definitions(&self) -> Vec<McpTool> {
        let mut tools: Vec<McpTool> = self
            .tools
            .values()
            .map(|t| McpTool {
                name: t.tool.name().to_string(),
                description: Some(t.tool.description().to_string()),
                input_schema: t.tool.input_schema(),
            })
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// All registered tool names, sorted.
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Validate `args` against the tool's schema, then execute it with the timeout applied.
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let registered = self.tools.get(name).ok_or_else(|| ToolError::NotFound {
            name: name.to_string(),
        })?;

        let violations: Vec<String> = registered
            .validator
            .iter_errors(&args)
            .map(|e| {
                let path = e.instance_path.to_string();
                if path.is_empty() {
                    e.to_string()
                } else {
                    format!("{path}: {e}")
                }
            })
            .collect();
        if !violations.is_empty() {
            return Err(ToolError::InvalidArguments {
                name: name.to_string(),
                reason: violations.join("; "),
            });
        }

        info!(tool = %name, timeout_secs = self.timeout.as_secs(), "Executing tool");

        match tokio::time::timeout(self.timeout, registered.tool.execute(args)).await {
            Ok(result) => result,
            Err(_) => Err(ToolError::Timeout {
                name: name.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
