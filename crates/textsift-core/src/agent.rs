//! Agent trait and adapters

use crate::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// The single capability every agent provides: invoke with one input,
/// produce a result or a typed failure.
///
/// Implementations must tolerate concurrent invocation through a shared
/// `Arc` — the batch executor hands one instance to many workers. The
/// classifiers in `textsift-agents` are stateless and satisfy this for
/// free; collaborators with per-call mutable state must synchronize
/// internally or construct per call.
#[async_trait]
pub trait Agent: Send + Sync {
    type Input: Send + 'static;
    type Output: Send + 'static;

    /// Invoke the agent on a single input
    async fn invoke(&self, input: Self::Input) -> Result<Self::Output>;

    /// Get the agent name (used in logs and error messages)
    fn name(&self) -> &str;
}

/// Object-safe agent over JSON values, the form the registry hands out.
///
/// External collaborators (OCR providers, LLM wrappers) plug in here as
/// opaque callables; this crate never sees their internals.
pub type DynAgent = Arc<dyn Agent<Input = Value, Output = Value>>;

impl std::fmt::Debug for dyn Agent<Input = Value, Output = Value> + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent").field("name", &self.name()).finish()
    }
}

/// Adapter turning any typed agent into a JSON-value agent.
///
/// Each incoming value is deserialized into the inner agent's input type
/// and the output serialized back; a value of the wrong shape surfaces as
/// a serialization error for that invocation only.
pub struct JsonAgent<A> {
    inner: A,
}

impl<A> JsonAgent<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }

    /// Wrap and erase to a shareable [`DynAgent`]
    pub fn into_dyn(self) -> DynAgent
    where
        A: Agent + 'static,
        A::Input: DeserializeOwned,
        A::Output: Serialize,
    {
        Arc::new(self)
    }

    /// Get the wrapped agent
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

#[async_trait]
impl<A> Agent for JsonAgent<A>
where
    A: Agent,
    A::Input: DeserializeOwned,
    A::Output: Serialize,
{
    type Input = Value;
    type Output = Value;

    async fn invoke(&self, input: Value) -> Result<Value> {
        let typed: A::Input = serde_json::from_value(input)?;
        let output = self.inner.invoke(typed).await?;
        Ok(serde_json::to_value(output)?)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
