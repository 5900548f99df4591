//! HTTP client for an OpenAI-compatible tool-calling chat completions API,
//! driving the agent orchestrator's ReAct loop.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use photolib_domain::constants::REASONING_CALL_TIMEOUT_SECS;
use photolib_domain::error::{Error, Result};
use photolib_domain::ports::providers::reasoning::{
    ReasoningEngineProvider, ReasoningMessage, ReasoningRole, ReasoningStep, ReasoningToolCall,
};
use photolib_domain::ports::services::tool_registry::{ParamType, ToolDescriptor};
use photolib_domain::registry::reasoning::{REASONING_PROVIDERS, ReasoningProviderConfig, ReasoningProviderEntry};
use serde::Deserialize;
use serde_json::{Value, json};

/// Calls a chat-completions endpoint that implements OpenAI's function
/// (tool) calling contract: each [`ToolDescriptor`] becomes a JSON Schema
/// function definition, and the response's `tool_calls` array becomes a
/// [`ReasoningStep::ToolCalls`].
pub struct HttpReasoningProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl HttpReasoningProvider {
    /// Builds a client bound to `base_url`, calling `model` on each request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, model: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REASONING_CALL_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url: base_url.into(), api_key, model: model.into() })
    }

    fn param_schema(param_type: ParamType) -> &'static str {
        match param_type {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
        }
    }

    fn tool_to_function(tool: &ToolDescriptor) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();
        for param in &tool.parameters {
            properties.insert(
                param.name.clone(),
                json!({"type": Self::param_schema(param.param_type), "description": param.description}),
            );
            if param.required {
                required.push(param.name.clone());
            }
        }
        json!({
            "type": "function",
            "function": {
                "name": tool.name,
                "description": tool.description,
                "parameters": {"type": "object", "properties": properties, "required": required},
            },
        })
    }

    fn message_to_wire(message: &ReasoningMessage) -> Value {
        match message.role {
            ReasoningRole::System => json!({"role": "system", "content": message.content}),
            ReasoningRole::User => json!({"role": "user", "content": message.content}),
            ReasoningRole::Assistant => json!({"role": "assistant", "content": message.content}),
            ReasoningRole::Tool => json!({
                "role": "tool",
                "tool_call_id": message.tool_call_id,
                "name": message.name,
                "content": message.content,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    id: String,
    function: WireFunctionCall,
}

#[derive(Debug, Deserialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

#[async_trait]
impl ReasoningEngineProvider for HttpReasoningProvider {
    async fn step(&self, messages: &[ReasoningMessage], tools: &[ToolDescriptor]) -> Result<ReasoningStep> {
        let wire_messages: Vec<Value> = messages.iter().map(Self::message_to_wire).collect();
        let wire_tools: Vec<Value> = tools.iter().map(Self::tool_to_function).collect();

        let mut body = json!({"model": self.model, "messages": wire_messages});
        if !wire_tools.is_empty() {
            body["tools"] = json!(wire_tools);
        }

        let endpoint = format!("{}/v1/chat/completions", self.base_url);
        let mut builder = self.client.post(endpoint).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(classify_http_error)?;
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::rate_limited("reasoning", None));
        }
        if status.is_server_error() {
            return Err(Error::provider_unavailable("reasoning", format!("upstream status {status}")));
        }

        let parsed: ChatCompletionResponse =
            response.json().await.map_err(|e| Error::corrupt_payload(format!("malformed reasoning response: {e}")))?;

        if !status.is_success() {
            return Err(Error::invalid_input(format!("reasoning engine rejected the request with status {status}")));
        }

        let message = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| Error::corrupt_payload("reasoning response contained no choices"))?;

        if message.tool_calls.is_empty() {
            let content = message.content.unwrap_or_default();
            return Ok(ReasoningStep::FinalAnswer(content));
        }

        let calls = message
            .tool_calls
            .into_iter()
            .map(|call| {
                let arguments = serde_json::from_str(&call.function.arguments)
                    .map_err(|e| Error::corrupt_payload(format!("malformed tool call arguments: {e}")))?;
                Ok(ReasoningToolCall { id: call.id, name: call.function.name, arguments })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ReasoningStep::ToolCalls(calls))
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}

fn classify_http_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::timed_out("reasoning_step", REASONING_CALL_TIMEOUT_SECS * 1000)
    } else {
        Error::provider_unavailable("reasoning", error.to_string())
    }
}

fn http_factory(config: &ReasoningProviderConfig) -> std::result::Result<Arc<dyn ReasoningEngineProvider>, String> {
    let base_url = config.base_url.clone().ok_or("reasoning provider requires base_url")?;
    let model = config.model.clone().ok_or("reasoning provider requires model")?;
    HttpReasoningProvider::new(base_url, config.api_key.clone(), model)
        .map(|provider| Arc::new(provider) as Arc<dyn ReasoningEngineProvider>)
        .map_err(|e| e.to_string())
}

#[linkme::distributed_slice(REASONING_PROVIDERS)]
static HTTP_PROVIDER: ReasoningProviderEntry = ReasoningProviderEntry {
    name: "http",
    description: "OpenAI-compatible tool-calling chat completions endpoint",
    build: http_factory,
};
