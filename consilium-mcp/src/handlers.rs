//! MCP request handlers: routes JSON-RPC methods to the tool registry.

use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::McpError;
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, ListToolsResult,
    MCP_PROTOCOL_VERSION, ServerCapabilities, ServerInfo, ToolsCapability,
};
use crate::registry::ToolRegistry;

/// Handles MCP protocol requests by delegating to the tool registry.
pub struct RequestHandler {
    tool_registry: Arc<ToolRegistry>,
    initialized: bool,
    server_info: ServerInfo,
}

impl RequestHandler {
    pub fn new(tool_registry: Arc<ToolRegistry>, server_name: impl Into<String>) -> Self {
        Self {
            tool_registry,
            initialized: false,
            server_info: ServerInfo {
                name: server_name.into(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Handle the `initialize` request.
    pub fn handle_initialize(&mut self, params: InitializeParams) -> Result<Value, McpError> {
        info!(
            client = %params.client_info.name,
            client_version = ?params.client_info.version,
            protocol_version = %params.protocol_version,
            "MCP client connecting"
        );

        self.initialized = true;

        let result = InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: self.server_info.clone(),
        };

        serde_json::to_value(result).map_err(|e| McpError::InternalError {
            message: format!("Failed to serialize initialize result: {e}"),
        })
    }

    /// Handle the `notifications/initialized` notification.
    pub fn handle_initialized(&self) {
        info!("MCP client initialized successfully");
    }

    /// Handle the `tools/list` request.
    pub fn handle_tools_list(&self) -> Result<Value, McpError> {
        if !self.initialized {
            return Err(McpError::NotInitialized);
        }

        let tools = self.tool_registry.list_definitions();
        debug!(count = tools.len(), "Listing tools");

        serde_json::to_value(ListToolsResult { tools }).map_err(|e| McpError::InternalError {
            message: format!("Failed to serialize tools list: {e}"),
        })
    }

    /// Handle the `tools/call` request.
    ///
    /// Unknown tools are a JSON-RPC error; every failure after that (bad
    /// arguments, execution failure, timeout) is an `isError` tool result.
    pub async fn handle_tools_call(&self, params: CallToolParams) -> Result<Value, McpError> {
        if !self.initialized {
            return Err(McpError::NotInitialized);
        }

        let tool_name = &params.name;
        let arguments = params.arguments.unwrap_or_else(|| json!({}));

        info!(tool = %tool_name, "Calling tool via MCP");
        debug!(tool = %tool_name, args = %arguments, "Tool call arguments");

        if self.tool_registry.get(tool_name).is_none() {
            return Err(McpError::ToolError {
                message: format!("Tool not found: {tool_name}"),
            });
        }

        let result = match self.tool_registry.execute(tool_name, arguments).await {
            Ok(output) => match serde_json::to_string_pretty(&output) {
                Ok(text) => CallToolResult::text(text),
                Err(e) => CallToolResult::error(format!("Error: {e}")),
            },
            Err(e) => {
                warn!(tool = %tool_name, error = %e, "Tool execution failed");
                CallToolResult::error(format!("Error: {e}"))
            }
        };

        serde_json::to_value(result).map_err(|e| McpError::InternalError {
            message: format!("Failed to serialize tool result: {e}"),
        })
    }

    /// Route a JSON-RPC method to the appropriate handler.
    pub async fn route(&mut self, method: &str, params: Value) -> Result<Value, McpError> {
        match method {
            "initialize" => {
                let init_params: InitializeParams =
                    serde_json::from_value(params).map_err(|e| McpError::InvalidParams {
                        message: format!("Invalid initialize params: {e}"),
                    })?;
                self.handle_initialize(init_params)
            }
            "notifications/initialized" => {
                self.handle_initialized();
                Ok(Value::Null)
            }
            "ping" => Ok(json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => {
                let call_params: CallToolParams =
                    serde_json::from_value(params).map_err(|e| McpError::InvalidParams {
                        message: format!("Invalid tools/call params: {e}"),
                    })?;
                self.handle_tools_call(call_params).await
            }
            _ => Err(McpError::MethodNotFound {
                method: method.to_string(),
            }),
        }
    }
}
