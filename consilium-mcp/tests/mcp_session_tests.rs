//! End-to-end MCP sessions over `ChannelTransport`.
//!
//! Drives the full analyze -> consult -> synthesize workflow the way an MCP
//! host would, plus the protocol error paths.

use consilium_core::ConsiliumConfig;
use consilium_mcp::McpServer;
use consilium_mcp::protocol::{JsonRpcResponse, MCP_PROTOCOL_VERSION};
use consilium_mcp::transport::{ChannelTransport, Transport};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

fn init_request(id: i64) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "initialize",
        "params": {
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {"name": "session-client", "version": "1.0"}
        }
    })
    .to_string()
}

fn tool_call(id: i64, name: &str, args: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": args}
    })
    .to_string()
}

fn start_server() -> (
    ChannelTransport,
    JoinHandle<Result<(), consilium_mcp::error::McpError>>,
) {
    let mut server = McpServer::with_config(&ConsiliumConfig::default()).unwrap();
    let (client, mut server_transport) = ChannelTransport::pair(32);
    let handle = tokio::spawn(async move { server.run(&mut server_transport).await });
    (client, handle)
}

async fn request(client: &mut ChannelTransport, message: &str) -> JsonRpcResponse {
    client.write_message(message).await.unwrap();
    let resp_str = client.read_message().await.unwrap().unwrap();
    serde_json::from_str(&resp_str).unwrap()
}

async fn init_client(client: &mut ChannelTransport) {
    let resp = request(client, &init_request(1)).await;
    assert!(resp.result.is_some());
    client
        .write_message(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string())
        .await
        .unwrap();
}

/// The tool result text, parsed back into JSON.
fn tool_payload(resp: JsonRpcResponse) -> Value {
    let result = resp.result.expect("tools/call result");
    assert!(result.get("isError").is_none(), "unexpected tool error: {result}");
    let text = result["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn test_full_expert_workflow() {
    let (mut client, handle) = start_server();
    init_client(&mut client).await;

    let query = "Our login system is slow and users are complaining about security";

    let analysis = tool_payload(
        request(&mut client, &tool_call(2, "analyze_task", json!({"userQuery": query}))).await,
    );
    let experts: Vec<String> = analysis["selectedExperts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        experts,
        vec![
            "consult_software_engineer",
            "consult_performance_expert",
            "consult_security_expert",
        ]
    );
    assert_eq!(analysis["complexity"], "HIGH");
    assert_eq!(analysis["contextEfficiency"], "MODERATE");

    let mut responses = Vec::new();
    for (i, expert) in experts.iter().enumerate() {
        let resp = request(
            &mut client,
            &tool_call(10 + i as i64, expert, json!({"userQuery": query})),
        )
        .await;
        let payload = tool_payload(resp);
        assert_eq!(payload["expert"], expert.as_str());
        responses.push(payload);
    }

    let plan = tool_payload(
        request(
            &mut client,
            &tool_call(
                20,
                "synthesize_experts",
                json!({
                    "expertResponses": serde_json::to_string(&responses).unwrap(),
                    "userQuery": query,
                    "includeCodeLocation": true
                }),
            ),
        )
        .await,
    );
    assert_eq!(plan["overallPriority"], "CRITICAL");
    assert!(plan["unifiedPlan"].as_array().unwrap().len() <= 6);
    assert!(plan["criticalRisks"].as_array().unwrap().len() <= 3);
    assert!(plan["successCriteria"].as_array().unwrap().len() <= 4);
    assert!(!plan["codeLocations"].as_array().unwrap().is_empty());

    drop(client);
    assert!(handle.await.unwrap().is_ok());
}

#[tokio::test]
async fn test_tools_list_exposes_eleven_sorted_tools() {
    let (mut client, handle) = start_server();
    init_client(&mut client).await;

    let resp = request(
        &mut client,
        &json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list", "params": {}}).to_string(),
    )
    .await;
    let tools = resp.result.unwrap()["tools"].as_array().unwrap().clone();
    assert_eq!(tools.len(), 11);
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names.first(), Some(&"analyze_task"));
    assert_eq!(names.last(), Some(&"synthesize_experts"));
    for tool in &tools {
        assert_eq!(tool["inputSchema"]["type"], "object");
        assert_eq!(tool["inputSchema"]["required"][0], "userQuery");
    }

    drop(client);
    assert!(handle.await.unwrap().is_ok());
}

#[tokio::test]
async fn test_calls_before_initialize_are_rejected() {
    let (mut client, handle) = start_server();

    let resp = request(
        &mut client,
        &tool_call(1, "analyze_task", json!({"userQuery": "x"})),
    )
    .await;
    assert_eq!(resp.error.unwrap().code, -32003);

    drop(client);
    assert!(handle.await.unwrap().is_ok());
}

#[tokio::test]
async fn test_empty_user_query_is_tool_error() {
    let (mut client, handle) = start_server();
    init_client(&mut client).await;

    let resp = request(
        &mut client,
        &tool_call(2, "consult_ux_designer", json!({"userQuery": ""})),
    )
    .await;
    let result = resp.result.unwrap();
    assert_eq!(result["isError"], true);
    assert!(
        result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("userQuery")
    );

    drop(client);
    assert!(handle.await.unwrap().is_ok());
}

#[tokio::test]
async fn test_malformed_lines_get_null_id_errors() {
    let (mut client, handle) = start_server();

    let resp = request(&mut client, "{not json").await;
    assert_eq!(resp.id, consilium_mcp::protocol::RequestId::Null);
    assert_eq!(resp.error.unwrap().code, -32700);

    // The session keeps going after a bad line.
    init_client(&mut client).await;
    let resp = request(
        &mut client,
        &json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"}).to_string(),
    )
    .await;
    assert_eq!(resp.error.unwrap().code, -32601);

    drop(client);
    assert!(handle.await.unwrap().is_ok());
}

#[tokio::test]
async fn test_direct_qa_consult_with_hint() {
    let (mut client, handle) = start_server();
    init_client(&mut client).await;

    let payload = tool_payload(
        request(
            &mut client,
            &tool_call(
                2,
                "consult_qa_engineer",
                json!({"userQuery": "Our tests are flaky", "testFramework": "jest"}),
            ),
        )
        .await,
    );
    assert_eq!(payload["category"], "flaky");
    let questions = payload["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 1);
    assert!(questions[0].as_str().unwrap().contains("jest"));

    drop(client);
    assert!(handle.await.unwrap().is_ok());
}
