use crate::identity::Identity;
use serde::{Deserialize, Serialize};

/// One raw recorded value for a property: a serialized type tag plus the
/// value itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// The serialized type tag of the value
    pub value_type: String,
    /// The recorded value
    pub value: serde_json::Value,
}

impl Observation {
    /// Create an observation, inferring the type tag from the value shape.
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        let value = value.into();
        let value_type = match &value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        };
        Self {
            value_type: value_type.to_string(),
            value,
        }
    }

    /// View the observation as a floating-point number, if it is numeric.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }
}

/// A named collection of observations attached to a vertex, with optional
/// derived sub-properties (e.g. statistical summaries appended by actors).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// The identity (name) of the property
    pub id: Identity,

    /// The ordered raw observations recorded for this property
    #[serde(default)]
    pub observations: Vec<Observation>,

    /// Derived sub-properties attached by transformations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subproperties: Vec<Property>,
}

impl Property {
    /// Create a property with no observations.
    pub fn new(id: impl Into<Identity>) -> Self {
        Self {
            id: id.into(),
            observations: Vec::new(),
            subproperties: Vec::new(),
        }
    }

    /// Create a property from a list of raw values.
    pub fn with_values(
        id: impl Into<Identity>,
        values: impl IntoIterator<Item = serde_json::Value>,
    ) -> Self {
        Self {
            id: id.into(),
            observations: values.into_iter().map(Observation::new).collect(),
            subproperties: Vec::new(),
        }
    }

    /// Build a new property identical to this one with an extra derived
    /// sub-property appended. The source property is not mutated.
    pub fn with_subproperty(&self, subproperty: Property) -> Property {
        let mut derived = self.clone();
        derived.subproperties.push(subproperty);
        derived
    }

    /// Collect every observation value as a number.
    ///
    /// Returns `None` when any observation is non-numeric; callers that
    /// compute statistics treat that as "leave the property unchanged".
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        self.observations.iter().map(Observation::as_f64).collect()
    }
}
