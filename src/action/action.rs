//! Tool abstraction: a named, schema-described operation an agent can
//! dispatch.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use super::context::ActionContext;

/// Schema parameter mirroring the context handle itself. It is
/// stripped from the visible schema because every handler already
/// receives the context.
const CONTEXT_ARG: &str = "action_context";

/// Prefix marking a parameter as hidden from the model and filled from
/// context properties at dispatch time.
const HIDDEN_PREFIX: &str = "_";

/// Executable body of an action.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, context: &ActionContext, args: Value) -> Result<Value>;
}

/// Adapter turning a plain closure into a [`ToolHandler`].
struct FnTool<F>(F);

#[async_trait]
impl<F> ToolHandler for FnTool<F>
where
    F: Fn(&ActionContext, Value) -> Result<Value> + Send + Sync,
{
    async fn call(&self, context: &ActionContext, args: Value) -> Result<Value> {
        (self.0)(context, args)
    }
}

/// A tool an agent can invoke.
///
/// Construction splits the declared parameter schema into the part the
/// model sees and the hidden parameters (names starting with `_`) that
/// the environment fills from context properties.
#[derive(Clone)]
pub struct Action {
    pub name: String,
    pub description: String,
    /// JSON schema for the model-visible parameters.
    pub parameters: Value,
    /// Terminal actions end the run after they execute.
    pub terminal: bool,
    /// Hidden parameter names injected from context properties.
    pub context_params: Vec<String>,
    handler: Arc<dyn ToolHandler>,
}

impl Action {
    /// Create an action from an explicit handler.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        let (parameters, context_params) = split_schema(parameters);
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            terminal: false,
            context_params,
            handler,
        }
    }

    /// Create an action from a synchronous closure. Handlers that need
    /// to await something implement [`ToolHandler`] directly.
    pub fn from_fn<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
        handler: F,
    ) -> Self
    where
        F: Fn(&ActionContext, Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self::new(name, description, parameters, Arc::new(FnTool(handler)))
    }

    /// Mark this action as terminal.
    pub fn with_terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    /// Run the handler with already-injected arguments.
    pub async fn execute(&self, context: &ActionContext, args: Value) -> Result<Value> {
        self.handler.call(context, args).await
    }
}

/// Split a parameter schema into the model-visible part and the hidden
/// parameter names. The `action_context` parameter is stripped but not
/// recorded, since the context is always passed to handlers.
fn split_schema(mut schema: Value) -> (Value, Vec<String>) {
    let mut hidden = Vec::new();
    if let Some(properties) = schema.get_mut("properties").and_then(Value::as_object_mut) {
        let stripped: Vec<String> = properties
            .keys()
            .filter(|key| key.starts_with(HIDDEN_PREFIX) || key.as_str() == CONTEXT_ARG)
            .cloned()
            .collect();
        for key in stripped {
            properties.remove(&key);
            if key.starts_with(HIDDEN_PREFIX) {
                hidden.push(key);
            }
        }
    }
    if let Some(required) = schema.get_mut("required").and_then(Value::as_array_mut) {
        required.retain(|name| {
            name.as_str()
                .map(|n| !n.starts_with(HIDDEN_PREFIX) && n != CONTEXT_ARG)
                .unwrap_or(true)
        });
    }
    (schema, hidden)
}
