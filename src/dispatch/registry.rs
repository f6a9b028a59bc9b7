//! Agent registry
//!
//! The gateway serves a fixed, statically configured set of agents. The
//! registry maps each agent key to its entry (display metadata plus the
//! behavior that runs its turns). Keys arrive from a closed UI control,
//! so lookups are expected to succeed; a miss is still a typed error.

use std::collections::HashMap;
use std::sync::Arc;

use crate::runtime::AgentBehavior;

/// One registered agent
#[derive(Clone)]
pub struct AgentEntry {
    /// Stable key the transport selects the agent by
    pub key: String,

    /// Human-readable name
    pub display_name: String,

    /// Short description of what the agent handles
    pub description: String,

    /// The behavior that runs this agent's turns
    pub behavior: Arc<dyn AgentBehavior>,
}

impl AgentEntry {
    /// Create an agent entry
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        behavior: Arc<dyn AgentBehavior>,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            description: description.into(),
            behavior,
        }
    }
}

impl std::fmt::Debug for AgentEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentEntry")
            .field("key", &self.key)
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// Fixed map of agent key to agent entry
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: HashMap<String, Arc<AgentEntry>>,
}

impl AgentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent, replacing any previous entry with the same key
    pub fn register(&mut self, entry: AgentEntry) {
        self.agents.insert(entry.key.clone(), Arc::new(entry));
    }

    /// Look up an agent by key
    pub fn get(&self, key: &str) -> Option<Arc<AgentEntry>> {
        self.agents.get(key).cloned()
    }

    /// Check whether a key is registered
    pub fn contains(&self, key: &str) -> bool {
        self.agents.contains_key(key)
    }

    /// All registered keys
    pub fn keys(&self) -> Vec<String> {
        self.agents.keys().cloned().collect()
    }

    /// Number of registered agents
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
