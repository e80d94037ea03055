//! Parallel batch executor
//!
//! Fans one shared agent out over a batch of inputs on a bounded pool of
//! tokio workers. Results are collected in completion order and reassembled
//! under the original keys (or original sequence order). A failing
//! invocation does not cancel its siblings: every submitted task runs to
//! completion and the first error observed while collecting is returned to
//! the caller afterwards.

use crate::agent::{Agent, DynAgent};
use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// Executes one agent over many inputs in parallel.
#[derive(Debug, Clone, Copy)]
pub struct BatchExecutor {
    limit: usize,
}

impl BatchExecutor {
    /// Create an executor sized to the machine's logical CPU count
    pub fn new() -> Self {
        Self {
            limit: num_cpus::get(),
        }
    }

    /// Create an executor with an explicit worker limit (minimum 1)
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    /// Get the concurrency limit
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Run `agent` once per entry of a keyed batch.
    ///
    /// Blocks until every invocation has finished. Completion order is
    /// arbitrary; the returned map always carries the original keys.
    pub async fn run_keyed<K, A>(
        &self,
        agent: Arc<A>,
        inputs: HashMap<K, A::Input>,
    ) -> Result<HashMap<K, A::Output>>
    where
        K: Eq + Hash + Send + 'static,
        A: Agent + ?Sized + 'static,
    {
        let total = inputs.len();
        debug!(
            agent = agent.name(),
            inputs = total,
            workers = self.limit,
            "dispatching batch"
        );

        let semaphore = Arc::new(Semaphore::new(self.limit));
        let mut tasks: JoinSet<(K, Result<A::Output>)> = JoinSet::new();

        for (key, input) in inputs {
            let agent = Arc::clone(&agent);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => agent.invoke(input).await,
                    Err(_) => Err(Error::internal("executor semaphore closed")),
                };
                (key, result)
            });
        }

        // Drain every task before surfacing the first failure so that
        // siblings of a failed invocation still run to completion.
        let mut results = HashMap::with_capacity(total);
        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((key, Ok(output))) => {
                    results.insert(key, output);
                }
                Ok((_, Err(err))) => {
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
                Err(join_err) => {
                    if first_error.is_none() {
                        first_error =
                            Some(Error::internal(format!("batch worker panicked: {join_err}")));
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(results),
        }
    }

    /// Run `agent` once per element of a sequence, preserving order.
    ///
    /// Elements are keyed by their index for the fan-out and the output
    /// vector is reassembled as `0..n` regardless of completion order.
    pub async fn run_ordered<A>(
        &self,
        agent: Arc<A>,
        inputs: Vec<A::Input>,
    ) -> Result<Vec<A::Output>>
    where
        A: Agent + ?Sized + 'static,
    {
        let total = inputs.len();
        let keyed: HashMap<usize, A::Input> = inputs.into_iter().enumerate().collect();
        let mut results = self.run_keyed(agent, keyed).await?;

        (0..total)
            .map(|index| {
                results
                    .remove(&index)
                    .ok_or_else(|| Error::internal(format!("missing batch result {index}")))
            })
            .collect()
    }

    /// Run a dynamic agent over pre-validated JSON batch inputs.
    pub async fn run_values(&self, agent: DynAgent, inputs: BatchInputs) -> Result<BatchOutputs> {
        match inputs {
            BatchInputs::Keyed(map) => {
                let results = self.run_keyed(agent, map).await?;
                Ok(BatchOutputs::Keyed(results))
            }
            BatchInputs::Ordered(items) => {
                let results = self.run_ordered(agent, items).await?;
                Ok(BatchOutputs::Ordered(results))
            }
        }
    }
}

impl Default for BatchExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// A batch of JSON inputs: a mapping with caller-owned keys or a sequence
/// keyed by position.
#[derive(Debug, Clone)]
pub enum BatchInputs {
    Keyed(HashMap<String, Value>),
    Ordered(Vec<Value>),
}

impl BatchInputs {
    /// Validate a JSON value as batch inputs.
    ///
    /// Anything other than an object or an array (a string, number, bool,
    /// or null) is rejected up front, before any worker is scheduled.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::Keyed(map.into_iter().collect())),
            Value::Array(items) => Ok(Self::Ordered(items)),
            other => Err(Error::input(format!(
                "expected a mapping or a sequence, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Number of invocations this batch produces
    pub fn len(&self) -> usize {
        match self {
            Self::Keyed(map) => map.len(),
            Self::Ordered(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Batch results mirroring the input shape: keyed stays keyed, a sequence
/// comes back as a sequence in original order.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutputs {
    Keyed(HashMap<String, Value>),
    Ordered(Vec<Value>),
}

impl BatchOutputs {
    /// Collapse into a plain JSON value
    pub fn into_value(self) -> Value {
        match self {
            Self::Keyed(map) => Value::Object(map.into_iter().collect()),
            Self::Ordered(items) => Value::Array(items),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
