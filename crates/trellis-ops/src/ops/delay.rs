use crate::context::OperationContext;
use crate::error::OperationError;
use crate::operation::TypedOperation;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Waits a configured duration, then echoes its input value. Useful for
/// exercising workflow sequencing and scheduler behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayOperation {
    /// The duration to wait, in milliseconds
    #[serde(default)]
    pub delay_ms: u64,
}

impl DelayOperation {
    /// Create a delay of the given number of milliseconds.
    pub fn new(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

/// The input of [`DelayOperation`].
#[derive(Debug, Deserialize)]
pub struct DelayInput {
    /// The value to echo
    #[serde(default)]
    pub value: Value,
}

/// The output of [`DelayOperation`].
#[derive(Debug, Serialize)]
pub struct DelayOutput {
    /// The echoed value
    pub value: Value,
}

#[async_trait]
impl TypedOperation for DelayOperation {
    type Input = DelayInput;
    type Output = DelayOutput;
    const DISCRIMINANT: &'static str = "delay";

    async fn run(
        &self,
        input: DelayInput,
        _context: &OperationContext,
    ) -> Result<DelayOutput, OperationError> {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        Ok(DelayOutput { value: input.value })
    }
}
