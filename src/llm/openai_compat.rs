//! OpenAI-compatible chat-completions transport.
//!
//! Works against any endpoint speaking the `/chat/completions` wire
//! format. Native tool calls are re-encoded into the crate's uniform
//! `{"tool": ..., "args": ...}` response text, so agent languages parse
//! every backend the same way.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Settings;
use crate::core::{AgentError, AgentResult, Prompt};

use super::LanguageModel;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Chat-completions client with bounded retries.
pub struct OpenAiCompatModel {
    model: String,
    base_url: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: Option<u32>,
    max_retries: u32,
    client: reqwest::Client,
}

impl OpenAiCompatModel {
    pub fn new(model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            temperature: 0.0,
            max_tokens: None,
            max_retries: 3,
            client,
        }
    }

    /// Point the transport at a different endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Authenticate with a bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Cap on retries after the initial attempt.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Build a transport from environment-backed settings. Fails when
    /// no model is configured.
    pub fn from_settings(settings: &Settings) -> AgentResult<Self> {
        let model = settings
            .llm_model
            .clone()
            .ok_or_else(|| AgentError::InvalidConfig("LLM_MODEL is not set".to_string()))?;

        let mut transport = Self::new(model)
            .with_temperature(settings.llm_temperature)
            .with_max_retries(settings.llm_max_retries);
        if let Some(base_url) = &settings.llm_base_url {
            transport = transport.with_base_url(base_url.clone());
        }
        if let Some(api_key) = &settings.llm_api_key {
            transport = transport.with_api_key(api_key.clone());
        }
        if let Some(max_tokens) = settings.llm_max_tokens {
            transport = transport.with_max_tokens(max_tokens);
        }
        Ok(transport)
    }

    fn request_body(&self, prompt: &Prompt) -> AgentResult<Value> {
        let mut body = json!({
            "model": self.model,
            "messages": serde_json::to_value(&prompt.messages)?,
            "temperature": self.temperature,
        });
        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(tools) = &prompt.tools {
            if !tools.is_empty() {
                let declarations: Vec<Value> = tools
                    .iter()
                    .map(|spec| json!({"type": "function", "function": spec}))
                    .collect();
                body["tools"] = Value::Array(declarations);
            }
        }
        Ok(body)
    }

    /// Send the request, retrying transient failures (network errors,
    /// 429, 5xx) up to `max_retries` times with a growing pause.
    async fn send_with_retry(&self, body: &Value) -> AgentResult<ApiResponse> {
        let url = format!("{}/chat/completions", self.base_url);
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let mut request = self.client.post(&url).json(body);
            if let Some(api_key) = &self.api_key {
                request = request.bearer_auth(api_key);
            }
            let (retryable, error) = match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.json::<ApiResponse>().await.map_err(|e| {
                            AgentError::Model(format!("invalid response payload: {e}"))
                        });
                    }
                    let retryable = status.as_u16() == 429 || status.is_server_error();
                    let text = response.text().await.unwrap_or_default();
                    (
                        retryable,
                        AgentError::Model(format!("{url} returned {status}: {text}")),
                    )
                }
                Err(e) => (true, AgentError::Model(format!("request to {url} failed: {e}"))),
            };
            if !retryable || attempt > self.max_retries {
                return Err(error);
            }
            tracing::warn!(
                "[OpenAiCompat] attempt {}/{} failed, retrying: {}",
                attempt,
                self.max_retries + 1,
                error
            );
            tokio::time::sleep(Duration::from_millis(500 * u64::from(attempt))).await;
        }
    }
}

#[async_trait]
impl LanguageModel for OpenAiCompatModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &Prompt) -> AgentResult<Option<String>> {
        let body = self.request_body(prompt)?;
        let response = self.send_with_retry(&body).await?;

        let Some(choice) = response.choices.into_iter().next() else {
            return Ok(None);
        };
        if let Some(tool_call) = choice
            .message
            .tool_calls
            .and_then(|mut calls| (!calls.is_empty()).then(|| calls.remove(0)))
        {
            let args: Value = serde_json::from_str(&tool_call.function.arguments)
                .map_err(|e| AgentError::Model(format!("invalid tool call arguments: {e}")))?;
            let call = json!({"tool": tool_call.function.name, "args": args});
            return Ok(Some(call.to_string()));
        }
        Ok(choice.message.content)
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ApiToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ApiToolCall {
    function: ApiFunction,
}

#[derive(Debug, Deserialize)]
struct ApiFunction {
    name: String,
    arguments: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChatMessage, ToolSpec};
    use serde_json::json;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let transport = OpenAiCompatModel::new("test-model").with_base_url("http://localhost:8000/v1/");
        assert_eq!(transport.base_url, "http://localhost:8000/v1");
    }

    #[test]
    fn test_request_body_shape() {
        let transport = OpenAiCompatModel::new("test-model").with_max_tokens(256);
        let prompt = Prompt::new(vec![
            ChatMessage::system("be terse"),
            ChatMessage::user("hello"),
        ])
        .with_tools(vec![ToolSpec {
            name: "search".to_string(),
            description: "Searches".to_string(),
            parameters: json!({"type": "object", "properties": {}}),
        }]);

        let body = transport.request_body(&prompt).unwrap();

        assert_eq!(body["model"], json!("test-model"));
        assert_eq!(body["temperature"], json!(0.0));
        assert_eq!(body["max_tokens"], json!(256));
        assert_eq!(body["messages"][0]["role"], json!("system"));
        assert_eq!(body["messages"][1]["content"], json!("hello"));
        assert_eq!(body["tools"][0]["type"], json!("function"));
        assert_eq!(body["tools"][0]["function"]["name"], json!("search"));
    }

    #[test]
    fn test_request_body_omits_empty_tools() {
        let transport = OpenAiCompatModel::new("test-model");
        let prompt = Prompt::new(vec![ChatMessage::user("hello")]).with_tools(vec![]);

        let body = transport.request_body(&prompt).unwrap();

        assert!(body.get("tools").is_none());
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_response_parsing_content() {
        let raw = r#"{
            "choices": [{"message": {"content": "Hello there", "role": "assistant"}}]
        }"#;

        let response: ApiResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("Hello there")
        );
        assert!(response.choices[0].message.tool_calls.is_none());
    }

    #[test]
    fn test_response_parsing_tool_calls() {
        let raw = r#"{
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "search", "arguments": "{\"query\": \"report\"}"}
                    }]
                }
            }]
        }"#;

        let response: ApiResponse = serde_json::from_str(raw).unwrap();

        let calls = response.choices[0].message.tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].function.name, "search");
        let args: Value = serde_json::from_str(&calls[0].function.arguments).unwrap();
        assert_eq!(args, json!({"query": "report"}));
    }

    #[test]
    fn test_from_settings_requires_model() {
        let settings = Settings::default();
        assert!(matches!(
            OpenAiCompatModel::from_settings(&settings),
            Err(AgentError::InvalidConfig(_))
        ));

        let settings = Settings {
            llm_model: Some("test-model".to_string()),
            llm_base_url: Some("http://localhost:1234/".to_string()),
            ..Settings::default()
        };
        let transport = OpenAiCompatModel::from_settings(&settings).unwrap();
        assert_eq!(transport.name(), "test-model");
        assert_eq!(transport.base_url, "http://localhost:1234");
    }
}
