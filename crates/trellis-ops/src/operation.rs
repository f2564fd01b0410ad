//! The operation abstraction.
//!
//! [`TypedOperation`] is the contract concrete operations implement: one
//! input shape, one output shape, a unique discriminant string, and an
//! asynchronous `run`. [`Operation`] is the object-safe view the registry
//! and the job scheduler work with; every `TypedOperation` is an
//! `Operation` through the blanket implementation, which handles the
//! (de)serialization of the input and output shapes.

use crate::context::OperationContext;
use crate::error::OperationError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// The object-safe view of an executable operation.
#[async_trait]
pub trait Operation: Send + Sync + 'static {
    /// The unique discriminant string of this operation type.
    fn discriminant(&self) -> &'static str;

    /// Execute against a context: read inputs, produce the output payload,
    /// and record it in the context's output map.
    async fn perform(&self, context: &OperationContext) -> Result<Value, OperationError>;

    /// The configuration fields of this instance as a JSON value.
    fn to_config(&self) -> Result<Value, OperationError>;
}

/// A statically typed operation: configuration fields on `Self`, one input
/// shape, one output shape.
#[async_trait]
pub trait TypedOperation: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The input shape, deserialized from the context's visible inputs.
    type Input: DeserializeOwned + Send;

    /// The output shape, serialized into the context's output map.
    type Output: Serialize + Send;

    /// The unique discriminant string of this operation type.
    const DISCRIMINANT: &'static str;

    /// Execute with an already-deserialized input.
    async fn run(
        &self,
        input: Self::Input,
        context: &OperationContext,
    ) -> Result<Self::Output, OperationError>;
}

#[async_trait]
impl<T: TypedOperation> Operation for T {
    fn discriminant(&self) -> &'static str {
        T::DISCRIMINANT
    }

    async fn perform(&self, context: &OperationContext) -> Result<Value, OperationError> {
        let input: T::Input = serde_json::from_value(Value::Object(context.visible_inputs()))?;
        let output = self.run(input, context).await?;
        let value = serde_json::to_value(output)?;
        context.merge_output(value.clone()).await;
        Ok(value)
    }

    fn to_config(&self) -> Result<Value, OperationError> {
        Ok(serde_json::to_value(self)?)
    }
}
