//! The discriminant registry.
//!
//! Polymorphic operation payloads are JSON objects whose reserved
//! discriminant field (default `"type"`) selects the concrete type. The
//! registry maps discriminant strings to deserialization factories and is
//! built once, explicitly, during process initialization; resolution never
//! consults global state.

use crate::error::OperationError;
use crate::operation::{Operation, TypedOperation};
use crate::ops::{DelayOperation, GenerateGraphOperation, ReverseEdgesOperation};
use crate::workflow::WorkflowOperation;
use serde_json::Value;
use std::collections::HashMap;
use trellis_graph::FiniteSyntheticOptions;

type Factory = Box<dyn Fn(Value) -> Result<Box<dyn Operation>, OperationError> + Send + Sync>;
type AliasConstructor = Box<dyn Fn() -> Box<dyn Operation> + Send + Sync>;

/// The default name of the reserved discriminant field.
pub const DISCRIMINANT_FIELD: &str = "type";

/// A map from discriminant strings to operation factories.
pub struct OperationRegistry {
    discriminant_field: String,
    factories: HashMap<String, Factory>,
    aliases: HashMap<String, AliasConstructor>,
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationRegistry {
    /// Create an empty registry using the default discriminant field.
    pub fn new() -> Self {
        Self {
            discriminant_field: DISCRIMINANT_FIELD.to_string(),
            factories: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Override the name of the discriminant field.
    pub fn with_discriminant_field(mut self, field: impl Into<String>) -> Self {
        self.discriminant_field = field.into();
        self
    }

    /// A registry with every built-in operation registered.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register::<DelayOperation>();
        registry.register::<ReverseEdgesOperation>();
        registry.register::<GenerateGraphOperation>();
        registry.register::<WorkflowOperation>();
        // Human-friendly name for a generator preconfigured with the
        // stock demo parameters, not a default-constructed one.
        registry.register_alias("syntheticGraph", || {
            Box::new(GenerateGraphOperation::new(FiniteSyntheticOptions {
                seed: 1842,
                vertex_count: 25,
                edge_probability: 0.15,
            }))
        });
        registry
    }

    /// The name of the discriminant field.
    #[inline]
    pub fn discriminant_field(&self) -> &str {
        &self.discriminant_field
    }

    /// Register an operation type under its discriminant.
    pub fn register<T: TypedOperation>(&mut self) -> &mut Self {
        self.factories.insert(
            T::DISCRIMINANT.to_string(),
            Box::new(|config| {
                let operation: T = serde_json::from_value(config)?;
                Ok(Box::new(operation))
            }),
        );
        self
    }

    /// Register an additional name resolving to a programmatically
    /// constructed instance. Exact discriminant matches take precedence
    /// over aliases.
    pub fn register_alias(
        &mut self,
        name: impl Into<String>,
        constructor: impl Fn() -> Box<dyn Operation> + Send + Sync + 'static,
    ) -> &mut Self {
        self.aliases.insert(name.into(), Box::new(constructor));
        self
    }

    /// The registered discriminant strings, exact registrations only.
    pub fn discriminants(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Serialize an operation as one object: the discriminant field first,
    /// then the instance's configuration fields.
    pub fn serialize(&self, operation: &dyn Operation) -> Result<Value, OperationError> {
        let mut object = serde_json::Map::new();
        object.insert(
            self.discriminant_field.clone(),
            Value::String(operation.discriminant().to_string()),
        );
        match operation.to_config()? {
            Value::Object(fields) => {
                for (key, value) in fields {
                    object.insert(key, value);
                }
            }
            Value::Null => {}
            other => {
                return Err(OperationError::SerializationError(format!(
                    "Operation configuration must be an object, got {other}"
                )))
            }
        }
        Ok(Value::Object(object))
    }

    /// Resolve and deserialize a discriminant-tagged payload. An unknown
    /// discriminant is a hard failure, never a fallback.
    pub fn deserialize(&self, value: Value) -> Result<Box<dyn Operation>, OperationError> {
        let Value::Object(mut object) = value else {
            return Err(OperationError::SerializationError(
                "Operation payload must be an object".to_string(),
            ));
        };
        let tag = match object.remove(&self.discriminant_field) {
            Some(Value::String(tag)) => tag,
            Some(other) => {
                return Err(OperationError::SerializationError(format!(
                    "Discriminant field must be a string, got {other}"
                )))
            }
            None => {
                return Err(OperationError::SerializationError(format!(
                    "Missing discriminant field: {}",
                    self.discriminant_field
                )))
            }
        };
        if let Some(factory) = self.factories.get(&tag) {
            return factory(Value::Object(object));
        }
        if let Some(constructor) = self.aliases.get(&tag) {
            return Ok(constructor());
        }
        Err(OperationError::UnknownDiscriminant(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_writes_discriminant_first() {
        let registry = OperationRegistry::builtin();
        let operation = DelayOperation::new(250);

        let value = registry.serialize(&operation).unwrap();
        let text = serde_json::to_string(&value).unwrap();

        assert!(text.starts_with(r#"{"type":"delay""#));
    }

    #[test]
    fn test_round_trip_preserves_configuration() {
        let registry = OperationRegistry::builtin();
        let operation = DelayOperation::new(250);

        let value = registry.serialize(&operation).unwrap();
        let resolved = registry.deserialize(value).unwrap();

        assert_eq!(resolved.discriminant(), "delay");
        assert_eq!(resolved.to_config().unwrap(), json!({"delayMs": 250}));
    }

    #[test]
    fn test_round_trip_every_builtin() {
        let registry = OperationRegistry::builtin();
        let discriminants: Vec<String> = registry
            .discriminants()
            .map(|tag| tag.to_string())
            .collect();
        assert_eq!(discriminants.len(), 4);

        for tag in discriminants {
            let payload = json!({ "type": tag.clone() });
            let resolved = registry.deserialize(payload).unwrap();
            assert_eq!(resolved.discriminant(), tag);

            let serialized = registry.serialize(resolved.as_ref()).unwrap();
            let again = registry.deserialize(serialized).unwrap();
            assert_eq!(again.discriminant(), tag);
        }
    }

    #[test]
    fn test_unknown_discriminant_is_a_hard_error() {
        let registry = OperationRegistry::builtin();
        let result = registry.deserialize(json!({"type": "mystery"}));
        assert!(matches!(
            result,
            Err(OperationError::UnknownDiscriminant(tag)) if tag == "mystery"
        ));
    }

    #[test]
    fn test_missing_discriminant_field() {
        let registry = OperationRegistry::builtin();
        let result = registry.deserialize(json!({"delayMs": 250}));
        assert!(matches!(
            result,
            Err(OperationError::SerializationError(_))
        ));
    }

    #[test]
    fn test_alias_resolves_to_constructed_instance() {
        let registry = OperationRegistry::builtin();
        let resolved = registry.deserialize(json!({"type": "syntheticGraph"})).unwrap();
        assert_eq!(resolved.discriminant(), "generateGraph");

        // The alias builds a configured instance, not a default one.
        let default_config = GenerateGraphOperation::default().to_config().unwrap();
        assert_ne!(resolved.to_config().unwrap(), default_config);
        assert_eq!(resolved.to_config().unwrap()["seed"], json!(1842));
    }

    #[test]
    fn test_exact_match_wins_over_alias() {
        let mut registry = OperationRegistry::builtin();
        // An alias colliding with a registered discriminant never fires.
        registry.register_alias("delay", || Box::new(DelayOperation::new(9999)));

        let resolved = registry.deserialize(json!({"type": "delay", "delayMs": 5})).unwrap();
        assert_eq!(resolved.to_config().unwrap(), json!({"delayMs": 5}));
    }

    #[test]
    fn test_custom_discriminant_field() {
        let mut registry = OperationRegistry::new().with_discriminant_field("kind");
        registry.register::<DelayOperation>();

        let operation = DelayOperation::new(10);
        let value = registry.serialize(&operation).unwrap();
        assert_eq!(value.get("kind"), Some(&json!("delay")));

        let resolved = registry.deserialize(value).unwrap();
        assert_eq!(resolved.discriminant(), "delay");
    }
}
