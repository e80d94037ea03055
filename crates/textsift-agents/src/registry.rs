//! Explicit agent registry
//!
//! Agents are built by a stable string kind looked up in a registry value
//! that the caller owns and passes around. There is no process-global
//! state: multiple registries with different builder sets can coexist, and
//! external collaborators (OCR providers, LLM wrappers) register their own
//! builders next to the built-in classifiers.

use crate::binary::RegexBinaryClassifier;
use crate::config::{AgentsConfig, MatcherSpec, MultiClassSpec, MultiLabelSpec};
use crate::multiclass::RegexMultiClassClassifier;
use crate::multilabel::RegexMultiLabelClassifier;
use serde_json::Value;
use std::collections::HashMap;
use textsift_core::{DynAgent, Error, JsonAgent, Result};
use tracing::info;

/// Builder taking JSON construction parameters to a ready agent
pub type AgentBuilder = Box<dyn Fn(Value) -> Result<DynAgent> + Send + Sync>;

/// Registry mapping agent kinds to builders.
pub struct AgentRegistry {
    builders: HashMap<String, AgentBuilder>,
}

impl AgentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Create a registry with the built-in classifier kinds registered:
    /// `regex_binary`, `regex_multilabel`, `regex_multiclass`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register("regex_binary", |params| {
            let spec: MatcherSpec = serde_json::from_value(params)
                .map_err(|e| Error::pattern(format!("invalid binary classifier params: {e}")))?;
            Ok(JsonAgent::new(RegexBinaryClassifier::new(spec)?).into_dyn())
        });

        registry.register("regex_multilabel", |params| {
            let spec: MultiLabelSpec = serde_json::from_value(params)
                .map_err(|e| Error::pattern(format!("invalid multilabel params: {e}")))?;
            Ok(JsonAgent::new(RegexMultiLabelClassifier::new(spec.labels)?).into_dyn())
        });

        registry.register("regex_multiclass", |params| {
            let spec: MultiClassSpec = serde_json::from_value(params)
                .map_err(|e| Error::pattern(format!("invalid multiclass params: {e}")))?;
            Ok(JsonAgent::new(RegexMultiClassClassifier::from_spec(spec)?).into_dyn())
        });

        registry
    }

    /// Register a builder under a stable kind, replacing any previous one
    pub fn register<F>(&mut self, kind: impl Into<String>, builder: F)
    where
        F: Fn(Value) -> Result<DynAgent> + Send + Sync + 'static,
    {
        self.builders.insert(kind.into(), Box::new(builder));
    }

    /// Build an agent of the given kind.
    ///
    /// An unknown kind is a configuration error, not a lookup panic.
    pub fn build(&self, kind: &str, params: Value) -> Result<DynAgent> {
        let builder = self
            .builders
            .get(kind)
            .ok_or_else(|| Error::config(format!("unknown agent kind '{kind}'")))?;
        builder(params)
    }

    /// Instantiate every named agent from a configuration.
    ///
    /// Construction errors surface immediately; nothing is partially kept.
    pub fn init_from_config(&self, config: &AgentsConfig) -> Result<HashMap<String, DynAgent>> {
        info!(agents = config.agents.len(), "initializing agents");

        let mut agents = HashMap::with_capacity(config.agents.len());
        for (name, spec) in &config.agents {
            let agent = self.build(&spec.kind, spec.params.clone()).map_err(|e| {
                Error::config(format!("failed to build agent '{name}': {e}"))
            })?;
            info!(agent = %name, kind = %spec.kind, "agent ready");
            agents.insert(name.clone(), agent);
        }

        Ok(agents)
    }

    /// All registered kinds
    pub fn kinds(&self) -> Vec<String> {
        self.builders.keys().cloned().collect()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
