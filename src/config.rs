//! Environment-backed runtime settings.

use std::env;
use std::str::FromStr;

/// Settings read from the process environment.
///
/// Every field has a usable default, so the crate works without any
/// environment at all; only a transport built from settings insists on
/// `LLM_MODEL`.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Model identifier passed to the chat-completions endpoint.
    pub llm_model: Option<String>,
    /// Bearer token for the endpoint.
    pub llm_api_key: Option<String>,
    /// Endpoint base URL, e.g. an OpenAI-compatible proxy.
    pub llm_base_url: Option<String>,
    pub llm_temperature: f32,
    pub llm_max_tokens: Option<u32>,
    pub llm_max_retries: u32,
    /// Pause between agent loop iterations, in seconds.
    pub agent_sleep_secs: Option<u64>,
    /// Tracing filter, e.g. `info` or `stratagem=debug`.
    pub log_level: String,
    /// Log file path; logs go to stderr when unset.
    pub log_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm_model: None,
            llm_api_key: None,
            llm_base_url: None,
            llm_temperature: 0.0,
            llm_max_tokens: None,
            llm_max_retries: 3,
            agent_sleep_secs: None,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    /// Read settings from the environment, falling back to defaults for
    /// anything missing or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            llm_model: string_var("LLM_MODEL"),
            llm_api_key: string_var("LLM_API_KEY"),
            llm_base_url: string_var("LLM_BASE_URL"),
            llm_temperature: parsed_var("LLM_TEMPERATURE").unwrap_or(defaults.llm_temperature),
            llm_max_tokens: parsed_var("LLM_MAX_TOKENS"),
            llm_max_retries: parsed_var("LLM_MAX_RETRIES").unwrap_or(defaults.llm_max_retries),
            agent_sleep_secs: parsed_var("AGENT_SLEEP_SECS"),
            log_level: string_var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_file: string_var("LOG_FILE"),
        }
    }
}

/// Read a non-empty environment variable.
fn string_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Read and parse an environment variable, warning when the value is
/// present but malformed.
fn parsed_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = string_var(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("[Settings] Ignoring unparseable {}='{}'", name, raw);
            None
        }
    }
}
