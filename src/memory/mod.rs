//! Conversation memory: the ordered log of user, assistant, and
//! environment entries an agent run accumulates.

use std::fmt;
use std::sync::{Arc, RwLock};

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// Classifies who produced a memory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// The seeding user request, or a reply relayed from the user.
    User,
    /// Raw model response text.
    Assistant,
    /// Serialized execution envelope from the environment.
    Environment,
    /// An entry copied from a delegated agent's log, tagged with the
    /// producing agent's name.
    AgentThought(String),
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::User => write!(f, "user"),
            EntryKind::Assistant => write!(f, "assistant"),
            EntryKind::Environment => write!(f, "environment"),
            EntryKind::AgentThought(agent) => write!(f, "{agent}_thought"),
        }
    }
}

impl Serialize for EntryKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EntryKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "user" => Ok(EntryKind::User),
            "assistant" => Ok(EntryKind::Assistant),
            "environment" => Ok(EntryKind::Environment),
            other => match other.strip_suffix("_thought") {
                Some(agent) if !agent.is_empty() => Ok(EntryKind::AgentThought(agent.to_string())),
                _ => Err(de::Error::custom(format!(
                    "unknown memory entry kind: {other}"
                ))),
            },
        }
    }
}

/// One entry in an agent's memory log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub content: String,
}

impl MemoryEntry {
    pub fn new(kind: EntryKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(EntryKind::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(EntryKind::Assistant, content)
    }

    pub fn environment(content: impl Into<String>) -> Self {
        Self::new(EntryKind::Environment, content)
    }

    pub fn agent_thought(agent: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(EntryKind::AgentThought(agent.into()), content)
    }
}

/// Shared handle to a memory log.
///
/// Cloning the handle aliases the same underlying log, which is what
/// the memory-handoff delegation policy relies on.
pub type SharedMemory = Arc<dyn Memory>;

/// Append-only log of memory entries.
pub trait Memory: Send + Sync {
    /// Append one entry to the end of the log.
    fn add(&self, entry: MemoryEntry);

    /// Entries in insertion order. With a limit, only the most recent
    /// `n` entries are returned.
    fn get_all(&self, limit: Option<usize>) -> Vec<MemoryEntry>;

    /// The most recently appended entry, if any.
    fn last(&self) -> Option<MemoryEntry> {
        self.get_all(Some(1)).pop()
    }

    /// Number of entries currently in the log.
    fn len(&self) -> usize {
        self.get_all(None).len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Default in-process memory backed by a vector.
#[derive(Debug, Default)]
pub struct InMemoryLog {
    entries: RwLock<Vec<MemoryEntry>>,
}

impl InMemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh log in a shareable handle.
    pub fn shared() -> SharedMemory {
        Arc::new(Self::new())
    }
}

impl Memory for InMemoryLog {
    fn add(&self, entry: MemoryEntry) {
        self.entries.write().unwrap().push(entry);
    }

    fn get_all(&self, limit: Option<usize>) -> Vec<MemoryEntry> {
        let entries = self.entries.read().unwrap();
        match limit {
            Some(n) => entries[entries.len().saturating_sub(n)..].to_vec(),
            None => entries.clone(),
        }
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}
