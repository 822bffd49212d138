//! # Consilium MCP
//!
//! Model Context Protocol (MCP) server exposing the Consilium experts as tools.
//!
//! ## Architecture
//!
//! ```text
//! Client <-> Transport (stdio/channel) <-> McpServer <-> RequestHandler
//!                                                        +-- ToolRegistry -> Dispatcher
//! ```

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod registry;
pub mod tools;
pub mod transport;

use consilium_core::{ConsiliumConfig, Dispatcher};
use error::{McpError, ToolError};
use handlers::RequestHandler;
use protocol::{IncomingMessage, JsonRpcResponse, RequestId};
use registry::ToolRegistry;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use transport::Transport;

/// The MCP server that processes JSON-RPC messages over a transport.
pub struct McpServer {
    handler: RequestHandler,
}

impl McpServer {
    /// Create a server over an already populated tool registry.
    pub fn new(tool_registry: Arc<ToolRegistry>, server_name: impl Into<String>) -> Self {
        Self {
            handler: RequestHandler::new(tool_registry, server_name),
        }
    }

    /// Create a server with the built-in Consilium tools, configured from `config`.
    pub fn with_config(config: &ConsiliumConfig) -> Result<Self, ToolError> {
        let mut registry =
            ToolRegistry::with_timeout(Duration::from_secs(config.server.tool_timeout_secs));
        tools::register_builtin_tools(
            &mut registry,
            Arc::new(Dispatcher::new()),
            &config.synthesis,
        )?;
        Ok(Self::new(Arc::new(registry), config.server.name.clone()))
    }

    /// Run the server on `transport`, processing messages until EOF or a read error.
    pub async fn run<T: Transport>(&mut self, transport: &mut T) -> Result<(), McpError> {
        info!("MCP server starting");

        loop {
            let message = match transport.read_message().await {
                Ok(Some(msg)) => msg,
                Ok(None) => {
                    info!("Transport closed (EOF), shutting down MCP server");
                    break;
                }
                Err(e @ McpError::ParseError { .. }) => {
                    warn!(error = %e, "Undecodable MCP frame");
                    let response = JsonRpcResponse::from_mcp_error(RequestId::Null, e);
                    transport
                        .write_message(&serde_json::to_string(&response)?)
                        .await?;
                    continue;
                }
                Err(e) => {
                    error!(error = %e, "Transport read error");
                    break;
                }
            };

            if message.trim().is_empty() {
                continue;
            }

            debug!(message = %message, "Received MCP message");

            let response = match self.process_message(&message).await {
                Ok(Some(response)) => response,
                // Notification, nothing to send.
                Ok(None) => continue,
                Err(e) => {
                    warn!(error = %e, "Rejected MCP message");
                    JsonRpcResponse::from_mcp_error(RequestId::Null, e)
                }
            };

            let response_json = serde_json::to_string(&response)?;
            debug!(response = %response_json, "Sending MCP response");
            transport.write_message(&response_json).await?;
        }

        transport.close().await?;
        info!("MCP server stopped");
        Ok(())
    }

    /// Process a single incoming JSON-RPC message.
    ///
    /// Returns `Some(response)` for requests and `None` for notifications.
    /// An `Err` means the message itself was unusable and has no id to answer.
    async fn process_message(&mut self, raw: &str) -> Result<Option<JsonRpcResponse>, McpError> {
        let incoming: IncomingMessage =
            serde_json::from_str(raw).map_err(|e| McpError::ParseError {
                message: format!("Invalid JSON-RPC message: {e}"),
            })?;

        if incoming.jsonrpc != "2.0" {
            let error = McpError::InvalidRequest {
                message: format!("Expected jsonrpc version 2.0, got: {}", incoming.jsonrpc),
            };
            return match incoming.id {
                Some(id) => Ok(Some(JsonRpcResponse::from_mcp_error(id, error))),
                None => Err(error),
            };
        }

        if incoming.is_notification() {
            debug!(method = %incoming.method, "Processing notification");
            if let Err(e) = self.handler.route(&incoming.method, incoming.params).await {
                warn!(method = %incoming.method, error = %e, "Notification handler error");
            }
            return Ok(None);
        }

        let id = incoming.id.unwrap_or(RequestId::Null);
        debug!(method = %incoming.method, "Processing request");

        let response = match self.handler.route(&incoming.method, incoming.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::from_mcp_error(id, e),
        };
        Ok(Some(response))
    }

    /// Check if the server has been initialized by a client.
    pub fn is_initialized(&self) -> bool {
        self.handler.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::MCP_PROTOCOL_VERSION;
    use serde_json::json;

    fn setup_server() -> McpServer {
        McpServer::with_config(&ConsiliumConfig::default()).unwrap()
    }

    fn init_request(id: i64) -> String {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "initialize",
            "params": {
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "1.0"}
            }
        })
        .to_string()
    }

    #[test]
    fn test_mcp_server_creation() {
        assert!(!setup_server().is_initialized());
    }

    #[tokio::test]
    async fn test_process_initialize() {
        let mut server = setup_server();
        let resp = server.process_message(&init_request(1)).await.unwrap().unwrap();
        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], MCP_PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "consilium");
        assert!(server.is_initialized());
    }

    #[tokio::test]
    async fn test_server_name_from_config() {
        let mut config = ConsiliumConfig::default();
        config.server.name = "team-experts".into();
        let mut server = McpServer::with_config(&config).unwrap();
        let resp = server.process_message(&init_request(1)).await.unwrap().unwrap();
        assert_eq!(resp.result.unwrap()["serverInfo"]["name"], "team-experts");
    }

    #[tokio::test]
    async fn test_process_notification() {
        let mut server = setup_server();
        server.process_message(&init_request(1)).await.unwrap();
        let note = json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string();
        assert!(server.process_message(&note).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_notification_is_silent() {
        let mut server = setup_server();
        let note = json!({"jsonrpc": "2.0", "method": "notifications/cancelled"}).to_string();
        assert!(server.process_message(&note).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_process_invalid_json() {
        let mut server = setup_server();
        let err = server.process_message("not json").await.unwrap_err();
        assert_eq!(err.error_code(), -32700);
    }

    #[tokio::test]
    async fn test_process_wrong_jsonrpc_version() {
        let mut server = setup_server();
        let req = json!({"jsonrpc": "1.0", "id": 7, "method": "initialize", "params": {}}).to_string();
        let resp = server.process_message(&req).await.unwrap().unwrap();
        assert_eq!(resp.id, RequestId::Number(7));
        assert_eq!(resp.error.unwrap().code, -32600);

        let note = json!({"jsonrpc": "1.0", "method": "ping"}).to_string();
        let err = server.process_message(&note).await.unwrap_err();
        assert_eq!(err.error_code(), -32600);
    }

    #[tokio::test]
    async fn test_tools_list_not_initialized() {
        let mut server = setup_server();
        let req = json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}).to_string();
        let resp = server.process_message(&req).await.unwrap().unwrap();
        assert_eq!(resp.error.unwrap().code, -32003);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_end_session() {
        use crate::transport::LineTransport;
        use tokio::io::AsyncReadExt;

        let input: &[u8] = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n\
            \xff\xfe garbage\n\
            {\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n";
        let (writer, mut peer) = tokio::io::duplex(4096);
        let mut transport = LineTransport::new(input, writer);
        setup_server().run(&mut transport).await.unwrap();
        drop(transport);

        let mut output = String::new();
        peer.read_to_string(&mut output).await.unwrap();
        let responses: Vec<JsonRpcResponse> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].id, RequestId::Number(1));
        assert_eq!(responses[1].id, RequestId::Null);
        assert_eq!(responses[1].error.as_ref().unwrap().code, -32700);
        assert_eq!(responses[2].id, RequestId::Number(2));
        assert_eq!(responses[2].result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_ping_before_initialize() {
        let mut server = setup_server();
        let req = json!({"jsonrpc": "2.0", "id": "p", "method": "ping"}).to_string();
        let resp = server.process_message(&req).await.unwrap().unwrap();
        assert_eq!(resp.id, RequestId::String("p".into()));
        assert_eq!(resp.result.unwrap(), json!({}));
    }
}
