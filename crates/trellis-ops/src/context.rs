//! Execution contexts for operations.
//!
//! A context carries the input map an operation reads from and the output
//! map it writes to. Contexts nest: a workflow step runs in a child context
//! whose input lookups fall back to the enclosing job's context when the
//! key is absent locally.

use crate::error::OperationError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The execution context of one operation run.
#[derive(Debug, Default)]
pub struct OperationContext {
    input: HashMap<String, Value>,
    output: RwLock<HashMap<String, Value>>,
    parent: Option<Arc<OperationContext>>,
}

impl OperationContext {
    /// Create a context over the given input map.
    pub fn new(input: HashMap<String, Value>) -> Self {
        Self {
            input,
            output: RwLock::new(HashMap::new()),
            parent: None,
        }
    }

    /// Create a child context whose input lookups fall back to `parent`.
    pub fn child_of(parent: Arc<OperationContext>, input: HashMap<String, Value>) -> Self {
        Self {
            input,
            output: RwLock::new(HashMap::new()),
            parent: Some(parent),
        }
    }

    /// Look up an input value, falling back to the parent chain when the
    /// key is absent locally.
    pub fn input(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.input.get(key) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.input(key))
    }

    /// The full input map visible from this context: the parent chain's
    /// entries overlaid with local ones, so local keys shadow inherited
    /// keys.
    pub fn visible_inputs(&self) -> serde_json::Map<String, Value> {
        let mut merged = self
            .parent
            .as_ref()
            .map(|parent| parent.visible_inputs())
            .unwrap_or_default();
        for (key, value) in &self.input {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Look up and deserialize a required input value.
    pub fn typed_input<T: DeserializeOwned>(&self, key: &str) -> Result<T, OperationError> {
        let value = self
            .input(key)
            .ok_or_else(|| OperationError::MissingInput(key.to_string()))?;
        Ok(serde_json::from_value(value)?)
    }

    /// Write one output value.
    pub async fn set_output(
        &self,
        key: impl Into<String>,
        value: impl Serialize,
    ) -> Result<(), OperationError> {
        let value = serde_json::to_value(value)?;
        self.output.write().await.insert(key.into(), value);
        Ok(())
    }

    /// Merge every field of a JSON object into the output map. Non-object
    /// values are stored under `"result"`.
    pub async fn merge_output(&self, value: Value) {
        let mut output = self.output.write().await;
        match value {
            Value::Object(fields) => {
                for (key, value) in fields {
                    output.insert(key, value);
                }
            }
            other => {
                output.insert("result".to_string(), other);
            }
        }
    }

    /// A snapshot of the current output map.
    pub async fn outputs(&self) -> HashMap<String, Value> {
        self.output.read().await.clone()
    }
}
