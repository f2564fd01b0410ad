use crate::error::OperationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use trellis_graph::{Property, Vertex};

/// A predicate determining which vertices and properties a workflow step
/// applies to. Discriminant-tagged for polymorphic payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Selector {
    /// Selects every vertex and every property
    All,
    /// Selects vertices whose label matches a pattern
    VertexName {
        /// The regular expression to match labels against
        pattern: String,
    },
    /// Selects properties whose name matches a pattern
    PropertyName {
        /// The regular expression to match property names against
        pattern: String,
    },
    /// Selects what every inner selector selects
    And {
        /// The combined selectors
        selectors: Vec<Selector>,
    },
    /// Selects what any inner selector selects
    Or {
        /// The combined selectors
        selectors: Vec<Selector>,
    },
}

impl Selector {
    /// Whether the step applies to this vertex at all. A property-scoped
    /// selector admits every vertex and narrows at the property level.
    pub fn selects_vertex(&self, vertex: &Vertex) -> Result<bool, OperationError> {
        match self {
            Selector::All => Ok(true),
            Selector::VertexName { pattern } => {
                let regex = compile(pattern)?;
                Ok(vertex
                    .label
                    .as_deref()
                    .is_some_and(|label| regex.is_match(label)))
            }
            Selector::PropertyName { .. } => Ok(true),
            Selector::And { selectors } => {
                for selector in selectors {
                    if !selector.selects_vertex(vertex)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Selector::Or { selectors } => {
                for selector in selectors {
                    if selector.selects_vertex(vertex)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Whether the step applies to this property of an already-selected
    /// vertex.
    pub fn selects_property(&self, property: &Property) -> Result<bool, OperationError> {
        match self {
            Selector::All | Selector::VertexName { .. } => Ok(true),
            Selector::PropertyName { pattern } => {
                let regex = compile(pattern)?;
                Ok(regex.is_match(&property.id.as_text()))
            }
            Selector::And { selectors } => {
                for selector in selectors {
                    if !selector.selects_property(property)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Selector::Or { selectors } => {
                for selector in selectors {
                    if selector.selects_property(property)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

fn compile(pattern: &str) -> Result<Regex, OperationError> {
    Regex::new(pattern)
        .map_err(|error| OperationError::InvalidConfiguration(format!("Bad pattern: {error}")))
}
