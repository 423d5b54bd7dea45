//! MCP server implementation using pmcp (Pragmatic AI's rust-mcp-sdk).
//!
//! pmcp's `ServerCore` handles the protocol lifecycle and resources. Tool
//! listing and tool calls are answered from our own [`ToolRegistry`] so each
//! formatted block reaches the client as its own text content entry.
//! Transports: stdio through pmcp's `StdioAdapter`, and JSON-RPC over HTTP
//! POST through an axum route.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use pmcp::server::adapters::{StdioAdapter, TransportAdapter};
use pmcp::server::auth::AuthContext;
use pmcp::server::builder::ServerCoreBuilder;
use pmcp::server::core::{ProtocolHandler, ServerCore};
use pmcp::types::{
    CallToolRequest, ClientRequest, Implementation, JSONRPCError, JSONRPCResponse,
    ListToolsResult, Notification, Request, RequestId, ServerCapabilities, ToolCapabilities,
    TransportMessage,
};
use pmcp::{Error, ErrorCode, StdioTransport};
use tokio::task::JoinHandle;

use crate::mcp::resources::StockImageResources;
use crate::mcp::tools::ToolRegistry;
use crate::service::StockImageService;

/// Server name announced during initialization
pub const SERVER_NAME: &str = "free-stock-images-mcp";

/// Path of the JSON-RPC endpoint in HTTP mode
pub const MCP_HTTP_PATH: &str = "/mcp";

/// JSON-RPC code for requests sent before `initialize`
const NOT_INITIALIZED: i32 = -32002;

/// The MCP server for stock image search
///
/// This server exposes the search, listing and status tools plus one
/// `stock-images://` resource per source, over stdio or HTTP.
pub struct McpServer {
    core: ServerCore,
    tools: ToolRegistry,
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer")
            .field("name", &SERVER_NAME)
            .field("tools", &self.tools.len())
            .finish()
    }
}

impl McpServer {
    /// Create a new MCP server on top of the given service
    pub fn new(service: Arc<StockImageService>, default_limit: u32) -> Result<Self, Error> {
        let tools = ToolRegistry::from_service(service.clone(), default_limit);
        let capabilities = ServerCapabilities {
            tools: Some(ToolCapabilities {
                list_changed: Some(false),
            }),
            ..Default::default()
        };

        let core = ServerCoreBuilder::new()
            .name(SERVER_NAME)
            .version(env!("CARGO_PKG_VERSION"))
            .capabilities(capabilities)
            .resources(StockImageResources::new(service))
            .stateless_mode(false)
            .build()?;

        Ok(Self { core, tools })
    }

    /// Run the server in stdio mode (for Claude Desktop and other MCP clients)
    ///
    /// Returns once stdin is closed.
    pub async fn run(self) -> Result<(), Error> {
        tracing::info!("Starting MCP server in stdio mode");
        StdioAdapter::new().serve(Arc::new(self)).await
    }

    /// Run the server in HTTP mode, answering JSON-RPC posts on [`MCP_HTTP_PATH`]
    ///
    /// Binds before returning, so the returned address is ready for requests.
    pub async fn run_http(self, addr: &str) -> Result<(SocketAddr, JoinHandle<()>), Error> {
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| Error::invalid_params(format!("Invalid address: {}", e)))?;

        let listener = tokio::net::TcpListener::bind(socket_addr)
            .await
            .map_err(|e| Error::internal(format!("Failed to bind {}: {}", socket_addr, e)))?;
        let bound = listener
            .local_addr()
            .map_err(|e| Error::internal(e.to_string()))?;

        tracing::info!("Starting MCP server in HTTP mode on {}", bound);

        let app = router(Arc::new(self));
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("HTTP server error: {}", e);
            }
        });

        Ok((bound, handle))
    }

    fn list_tools(&self, id: RequestId) -> JSONRPCResponse {
        respond(id, ListToolsResult::new(self.tools.infos()))
    }

    async fn call_tool(&self, id: RequestId, call: &CallToolRequest) -> JSONRPCResponse {
        match self.tools.execute(&call.name, call.arguments.clone()).await {
            Ok(result) => respond(id, result),
            Err(message) => {
                tracing::warn!("Tool call rejected: {}", message);
                JSONRPCResponse::error(
                    id,
                    JSONRPCError::new(ErrorCode::INVALID_PARAMS.as_i32(), message),
                )
            },
        }
    }
}

fn respond<T: serde::Serialize>(id: RequestId, result: T) -> JSONRPCResponse {
    match serde_json::to_value(result) {
        Ok(value) => JSONRPCResponse::success(id, value),
        Err(e) => JSONRPCResponse::error(
            id,
            JSONRPCError::new(ErrorCode::INTERNAL_ERROR.as_i32(), e.to_string()),
        ),
    }
}

#[async_trait]
impl ProtocolHandler for McpServer {
    async fn handle_request(
        &self,
        id: RequestId,
        request: Request,
        auth_context: Option<AuthContext>,
    ) -> JSONRPCResponse {
        if let Request::Client(ref client) = request {
            if matches!(
                &**client,
                ClientRequest::ListTools(_) | ClientRequest::CallTool(_)
            ) && !self.core.is_initialized().await
            {
                return JSONRPCResponse::error(
                    id,
                    JSONRPCError::new(
                        NOT_INITIALIZED,
                        "Server not initialized. Call initialize first.",
                    ),
                );
            }

            match &**client {
                ClientRequest::ListTools(_) => return self.list_tools(id),
                ClientRequest::CallTool(call) => return self.call_tool(id, call).await,
                _ => {},
            }
        }

        self.core.handle_request(id, request, auth_context).await
    }

    async fn handle_notification(&self, notification: Notification) -> pmcp::Result<()> {
        self.core.handle_notification(notification).await
    }

    fn capabilities(&self) -> &ServerCapabilities {
        self.core.capabilities()
    }

    fn info(&self) -> &Implementation {
        self.core.info()
    }
}

/// HTTP routes for the MCP endpoint
pub fn router(server: Arc<McpServer>) -> Router {
    Router::new()
        .route(MCP_HTTP_PATH, post(handle_post))
        .with_state(server)
}

async fn handle_post(State(server): State<Arc<McpServer>>, body: String) -> Response {
    let message = match StdioTransport::parse_message(body.as_bytes()) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!("Rejected HTTP body: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        },
    };

    match message {
        TransportMessage::Request { id, request } => {
            let response = server.handle_request(id, request, None).await;
            match StdioTransport::serialize_message(&TransportMessage::Response(response)) {
                Ok(bytes) => ([(header::CONTENT_TYPE, "application/json")], bytes).into_response(),
                Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
            }
        },
        TransportMessage::Notification(notification) => {
            match server.handle_notification(notification).await {
                Ok(()) => StatusCode::ACCEPTED.into_response(),
                Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
            }
        },
        TransportMessage::Response(_) => {
            (StatusCode::BAD_REQUEST, "unexpected response message").into_response()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use crate::sources::{ApiClient, SourceRegistry};
    use crate::utils::HttpClient;
    use serde_json::{json, Value};

    fn server() -> McpServer {
        let client = ApiClient::new(HttpClient::new().unwrap(), Credentials::isolated());
        let service = Arc::new(StockImageService::new(
            Arc::new(SourceRegistry::new()),
            client,
        ));
        McpServer::new(service, 5).unwrap()
    }

    fn request(value: Value) -> (RequestId, Request) {
        match StdioTransport::parse_message(value.to_string().as_bytes()).unwrap() {
            TransportMessage::Request { id, request } => (id, request),
            other => panic!("not a request: {:?}", other),
        }
    }

    fn initialize() -> Value {
        json!({
            "jsonrpc": "2.0", "id": 1, "method": "initialize",
            "params": {
                "protocolVersion": pmcp::LATEST_PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "0.0.0"}
            }
        })
    }

    async fn call(server: &McpServer, value: Value) -> Value {
        let (id, req) = request(value);
        serde_json::to_value(server.handle_request(id, req, None).await).unwrap()
    }

    #[tokio::test]
    async fn test_tools_require_initialize() {
        let server = server();
        let reply = call(
            &server,
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        )
        .await;
        assert_eq!(reply["error"]["code"], NOT_INITIALIZED);
    }

    #[tokio::test]
    async fn test_tools_list_in_registration_order() {
        let server = server();
        call(&server, initialize()).await;

        let reply = call(
            &server,
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        )
        .await;
        let names: Vec<_> = reply["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            ["search_stock_images", "get_stock_image_sources", "check_api_status"]
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let server = server();
        call(&server, initialize()).await;

        let reply = call(
            &server,
            json!({
                "jsonrpc": "2.0", "id": 3, "method": "tools/call",
                "params": {"name": "fetch_image", "arguments": {}}
            }),
        )
        .await;
        assert_eq!(reply["error"]["code"], -32602);
        assert_eq!(reply["error"]["message"], "Unknown tool: fetch_image");
    }

    #[tokio::test]
    async fn test_status_tool_returns_one_text_entry() {
        let server = server();
        call(&server, initialize()).await;

        let reply = call(
            &server,
            json!({
                "jsonrpc": "2.0", "id": 4, "method": "tools/call",
                "params": {"name": "check_api_status", "arguments": {}}
            }),
        )
        .await;
        let content = reply["result"]["content"].as_array().unwrap();
        assert_eq!(content.len(), 1);
        assert_eq!(content[0]["type"], "text");
        assert!(content[0]["text"]
            .as_str()
            .unwrap()
            .contains("Not found in environment"));
    }
}
