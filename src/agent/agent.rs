//! The agent control loop: render a prompt, ask the model for a
//! decision, dispatch it as a tool call, record the outcome, repeat
//! until a terminal action fires or the iteration cap runs out.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use uuid::Uuid;

use crate::action::library::{
    call_agent_memory_handoff, call_agent_message_passing, call_agent_with_reflection, terminate,
};
use crate::action::{Action, ActionContext, ActionRegistry};
use crate::core::{AgentResult, Goal};
use crate::environment::{Environment, ExecutionResult};
use crate::language::AgentLanguage;
use crate::llm::LanguageModel;
use crate::memory::{InMemoryLog, MemoryEntry, SharedMemory};

use super::registry::{AgentRegistry, AgentSummary};

/// Default cap on loop iterations per run.
const DEFAULT_MAX_ITERATIONS: usize = 50;

/// How a coordinator shares memory with agents it delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelegationPolicy {
    /// Callee runs on a private log; only its final entry comes back.
    MessagePassing,
    /// Like message passing, plus the callee's log is copied into the
    /// caller's memory as tagged thought entries.
    Reflection,
    /// Callee works directly on the caller's log.
    #[default]
    MemoryHandoff,
}

impl DelegationPolicy {
    fn delegation_action(self) -> Action {
        match self {
            DelegationPolicy::MessagePassing => call_agent_message_passing(),
            DelegationPolicy::Reflection => call_agent_with_reflection(),
            DelegationPolicy::MemoryHandoff => call_agent_memory_handoff(),
        }
    }
}

/// Builder for [`Agent`].
pub struct AgentBuilder {
    goals: Vec<Goal>,
    language: Arc<dyn AgentLanguage>,
    model: Arc<dyn LanguageModel>,
    tools: Vec<Action>,
    name: Option<String>,
    description: Option<String>,
    max_iterations: usize,
    managed_agents: Vec<Agent>,
    delegation: DelegationPolicy,
    step_delay: Option<Duration>,
    log_final_memory: bool,
}

impl AgentBuilder {
    fn new(
        goals: Vec<Goal>,
        language: Arc<dyn AgentLanguage>,
        model: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            goals,
            language,
            model,
            tools: Vec::new(),
            name: None,
            description: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            managed_agents: Vec::new(),
            delegation: DelegationPolicy::default(),
            step_delay: None,
            log_final_memory: true,
        }
    }

    /// Add one tool.
    pub fn with_tool(mut self, tool: Action) -> Self {
        self.tools.push(tool);
        self
    }

    /// Add several tools.
    pub fn with_tools(mut self, tools: impl IntoIterator<Item = Action>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Set a stable name. Defaults to a random UUID.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set an explicit description advertised to coordinators. Without
    /// one, the description is derived from the goals.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Cap the number of loop iterations per run.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Give this agent other agents to delegate to.
    pub fn with_managed_agents(mut self, agents: impl IntoIterator<Item = Agent>) -> Self {
        self.managed_agents.extend(agents);
        self
    }

    /// Choose how memory moves on delegation.
    pub fn with_delegation(mut self, policy: DelegationPolicy) -> Self {
        self.delegation = policy;
        self
    }

    /// Pause between loop iterations.
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = Some(delay);
        self
    }

    /// Toggle the end-of-run memory debug dump.
    pub fn with_memory_logging(mut self, enabled: bool) -> Self {
        self.log_final_memory = enabled;
        self
    }

    /// Finish the agent: wire the delegation tool when agents are
    /// managed, guarantee a terminal action, and freeze the registries.
    pub fn build(self) -> Agent {
        let mut tools = self.tools;
        if !self.managed_agents.is_empty() {
            tools.push(self.delegation.delegation_action());
        }
        if !tools.iter().any(|tool| tool.terminal) {
            tools.push(terminate());
        }
        let agents = if self.managed_agents.is_empty() {
            None
        } else {
            Some(Arc::new(AgentRegistry::new(self.managed_agents)))
        };
        Agent {
            name: self.name.unwrap_or_else(|| Uuid::new_v4().to_string()),
            description: self.description,
            goals: self.goals,
            language: self.language,
            model: self.model,
            actions: ActionRegistry::from_actions(tools),
            environment: Environment::new(),
            agents,
            max_iterations: self.max_iterations,
            step_delay: self.step_delay,
            log_final_memory: self.log_final_memory,
        }
    }
}

/// An autonomous loop around one model, one language, and a set of
/// tools.
pub struct Agent {
    name: String,
    description: Option<String>,
    goals: Vec<Goal>,
    language: Arc<dyn AgentLanguage>,
    model: Arc<dyn LanguageModel>,
    actions: ActionRegistry,
    environment: Environment,
    agents: Option<Arc<AgentRegistry>>,
    max_iterations: usize,
    step_delay: Option<Duration>,
    log_final_memory: bool,
}

impl Agent {
    /// Start building an agent from its goals, language, and model.
    pub fn builder(
        goals: Vec<Goal>,
        language: Arc<dyn AgentLanguage>,
        model: Arc<dyn LanguageModel>,
    ) -> AgentBuilder {
        AgentBuilder::new(goals, language, model)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description advertised to coordinators: the explicit one when
    /// set, otherwise the goals rendered in priority order.
    pub fn description(&self) -> String {
        if let Some(description) = &self.description {
            return description.clone();
        }
        let mut ordered: Vec<&Goal> = self.goals.iter().collect();
        ordered.sort_by_key(|goal| goal.priority);
        ordered
            .iter()
            .map(|goal| format!("- {}: {}", goal.name, goal.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Actions this agent can dispatch.
    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    fn agent_summaries(&self) -> Vec<AgentSummary> {
        self.agents
            .as_ref()
            .map(|registry| registry.summaries())
            .unwrap_or_default()
    }

    /// Run the control loop on one task.
    ///
    /// A fresh memory is created unless the caller hands one over. The
    /// accumulated memory is returned when a terminal action executes
    /// or the iteration cap is reached; only model transport faults and
    /// serialization faults abort the run.
    pub async fn run(
        &self,
        user_input: impl Into<String>,
        memory: Option<SharedMemory>,
        properties: Option<HashMap<String, Value>>,
    ) -> AgentResult<SharedMemory> {
        let memory = memory.unwrap_or_else(InMemoryLog::shared);
        memory.add(MemoryEntry::user(user_input));

        let mut context = ActionContext::new()
            .with_property("name", Value::String(self.name.clone()))
            .with_memory(memory.clone())
            .with_model(self.model.clone())
            .with_properties(properties.unwrap_or_default());
        if let Some(agents) = &self.agents {
            context = context.with_agents(agents.clone());
        }

        tracing::info!("[Agent] '{}' starting run", self.name);
        for iteration in 0..self.max_iterations {
            let started = Instant::now();

            let prompt = self.language.construct_prompt(
                self.actions.actions(),
                &self.goals,
                memory.as_ref(),
                &self.agent_summaries(),
            );
            let response = self.model.complete(&prompt).await?;
            let outcome = self.dispatch(&context, response.as_deref()).await;

            memory.add(MemoryEntry::assistant(
                response.as_deref().unwrap_or_default(),
            ));
            memory.add(MemoryEntry::environment(serde_json::to_string(&outcome)?));

            tracing::debug!(
                "[Agent] '{}' iteration {} took {:.2}s",
                self.name,
                iteration,
                started.elapsed().as_secs_f64()
            );
            if self.should_terminate(response.as_deref()) {
                tracing::info!("[Agent] '{}' reached a terminal action", self.name);
                break;
            }
            if let Some(delay) = self.step_delay {
                tokio::time::sleep(delay).await;
            }
        }

        if self.log_final_memory {
            self.log_memory(&memory);
        }
        Ok(memory)
    }

    /// Interpret one model response: parse it, look the tool up, and
    /// execute it. Every recoverable fault becomes a failure envelope
    /// so the model sees it on the next turn.
    async fn dispatch(&self, context: &ActionContext, response: Option<&str>) -> ExecutionResult {
        match self.language.parse_response(response) {
            Ok(call) => match self.actions.get(&call.tool) {
                Some(action) => self.environment.execute(context, action, &call.args).await,
                None => {
                    tracing::warn!("[Agent] '{}' chose unknown tool '{}'", self.name, call.tool);
                    ExecutionResult::failure(format!(
                        "Unknown tool '{}'. Use one of the available tools: {:?}",
                        call.tool,
                        self.actions.catalog()
                    ))
                }
            },
            Err(err) => {
                tracing::warn!(
                    "[Agent] '{}' produced no usable action: {} (response={:?})",
                    self.name,
                    err,
                    response
                );
                ExecutionResult::failure(format!(
                    "{} Use one of the available tools: {:?}",
                    err,
                    self.actions.catalog()
                ))
            }
        }
    }

    /// A response ends the run when it parses to a registered terminal
    /// action. Anything unparseable keeps the loop going.
    fn should_terminate(&self, response: Option<&str>) -> bool {
        match self.language.parse_response(response) {
            Ok(call) => self
                .actions
                .get(&call.tool)
                .map(|action| action.terminal)
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Debug-dump the memory that a run produced.
    fn log_memory(&self, memory: &SharedMemory) {
        tracing::debug!("[Agent] ----------------------------------------");
        tracing::debug!("[Agent] Memory of '{}': '{}'", self.name, self.description());
        for entry in memory.get_all(None) {
            tracing::debug!("[Agent] {}: {}", entry.kind, entry.content);
        }
        tracing::debug!("[Agent] ----------------------------------------");
    }
}
