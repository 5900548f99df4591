//! MCP surface: exposes the catalogued tool registry over `rmcp`'s
//! `ServerHandler`, so any MCP-speaking client can drive the library the
//! same way the HTTP surface's `/agent/turn` route does.

use std::sync::Arc;

use photolib_application::ToolDispatcher;
use photolib_domain::ports::services::tool_registry::{ParamType, ToolDescriptor, ToolRegistryInterface};
use photolib_infrastructure::di::AppContext;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::StreamableHttpService;
use rmcp::{ErrorData as McpError, ServerHandler, ServiceExt};

/// Bridges the process-wide tool catalogue to the MCP protocol. Every
/// catalogued tool, including `agent_execute_action`, is delegated to
/// [`ToolDispatcher`]; the separate conversational ReAct loop lives behind
/// the HTTP `/agent/turn` route instead.
#[derive(Clone)]
pub struct PhotolibMcpServer {
    ctx: Arc<AppContext>,
}

impl PhotolibMcpServer {
    #[must_use]
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }
}

fn param_type_schema(param_type: ParamType) -> &'static str {
    match param_type {
        ParamType::String => "string",
        ParamType::Integer => "integer",
        ParamType::Number => "number",
        ParamType::Boolean => "boolean",
        ParamType::Array => "array",
        ParamType::Object => "object",
    }
}

fn tool_descriptor_to_mcp_tool(tool: &ToolDescriptor) -> rmcp::model::Tool {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();
    for param in &tool.parameters {
        properties.insert(param.name.clone(), serde_json::json!({"type": param_type_schema(param.param_type), "description": param.description}));
        if param.required {
            required.push(serde_json::Value::String(param.name.clone()));
        }
    }

    let schema = serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    });
    let input_schema = schema.as_object().cloned().unwrap_or_default();

    rmcp::model::Tool {
        name: std::borrow::Cow::Owned(tool.name.clone()),
        title: None,
        description: Some(std::borrow::Cow::Owned(tool.description.clone())),
        input_schema: Arc::new(input_schema),
        output_schema: None,
        annotations: None,
        icons: None,
        meta: Default::default(),
    }
}

impl ServerHandler for PhotolibMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "photolib".to_owned(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                ..Default::default()
            },
            instructions: Some(
                "Semantic photo library. Search, caption, edit, recommend deletions, and \
                 reconstruct 3D point clouds from an indexed photo collection. Prefer \
                 `agent_execute_action` for free-form requests; call the other tools \
                 directly when the operation is already known."
                    .to_owned(),
            ),
        }
    }

    async fn list_tools(&self, _pagination: Option<PaginatedRequestParam>, _context: rmcp::service::RequestContext<rmcp::RoleServer>) -> Result<ListToolsResult, McpError> {
        let tools = self.ctx.tool_registry_port().list().iter().map(tool_descriptor_to_mcp_tool).collect();
        Ok(ListToolsResult { tools, next_cursor: None, meta: Default::default() })
    }

    async fn call_tool(&self, request: CallToolRequestParam, _context: rmcp::service::RequestContext<rmcp::RoleServer>) -> Result<CallToolResult, McpError> {
        let arguments = serde_json::Value::Object(request.arguments.clone().unwrap_or_default());

        let result = self.ctx.dispatcher_port().dispatch(request.name.as_ref(), arguments).await;

        match result {
            Ok(value) => {
                let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(err) => Ok(CallToolResult::error(vec![Content::text(err.to_string())])),
        }
    }
}

/// Mounts the MCP surface as a nested Tower service at `/mcp`, using rmcp's
/// streamable-HTTP transport rather than a hand-rolled JSON-RPC endpoint.
#[must_use]
pub fn router(ctx: Arc<AppContext>) -> axum::Router {
    let service = StreamableHttpService::new(move || Ok(PhotolibMcpServer::new(ctx.clone())), LocalSessionManager::default().into(), Default::default());
    axum::Router::new().nest_service("/mcp", service)
}

/// Serves the MCP surface over stdio, for desktop MCP clients that launch
/// the binary as a subprocess rather than connecting over HTTP.
///
/// # Errors
///
/// Returns an error if the transport fails to initialize or the service
/// loop errors out.
pub async fn serve_stdio(ctx: Arc<AppContext>) -> anyhow::Result<()> {
    let service = PhotolibMcpServer::new(ctx).serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;
    Ok(())
}
