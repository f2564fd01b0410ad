//! The workflow engine.
//!
//! A workflow is an ordered list of (selector, actor) steps applied to
//! successive finite snapshots of a graph. Each step reads the previous
//! snapshot and builds a fresh one; no vertex is ever mutated in place,
//! and step k+1 never starts before step k's snapshot is complete.

/// Property transformations
pub mod actor;

/// Step applicability predicates
pub mod selector;

pub use actor::Actor;
pub use selector::Selector;

use crate::context::OperationContext;
use crate::error::OperationError;
use crate::operation::TypedOperation;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use trellis_graph::{MemoryGraph, Property};

/// One workflow step. A missing selector defaults to "select everything";
/// a missing actor makes the step a no-op copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    /// The predicate scoping the step, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<Selector>,

    /// The transformation to apply, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<Actor>,
}

impl WorkflowStep {
    /// Create a step from a selector and an actor.
    pub fn new(selector: Option<Selector>, actor: Option<Actor>) -> Self {
        Self { selector, actor }
    }

    fn apply(&self, snapshot: &MemoryGraph) -> Result<MemoryGraph, OperationError> {
        let Some(actor) = &self.actor else {
            return Ok(snapshot.clone());
        };

        let mut next = MemoryGraph::new(snapshot.id().clone(), snapshot.is_directed());
        for root in snapshot.root_ids() {
            next.mark_root(root.clone());
        }

        for vertex in snapshot.iter() {
            let selected = match &self.selector {
                Some(selector) => selector.selects_vertex(vertex)?,
                None => true,
            };
            if !selected {
                next.insert(vertex.clone());
                continue;
            }

            let mut derived = vertex.clone();
            derived.properties = vertex
                .properties
                .iter()
                .map(|property| -> Result<Property, OperationError> {
                    let in_scope = match &self.selector {
                        Some(selector) => selector.selects_property(property)?,
                        None => true,
                    };
                    Ok(if in_scope {
                        actor.apply(property)
                    } else {
                        property.clone()
                    })
                })
                .collect::<Result<_, _>>()?;
            next.insert(derived);
        }

        Ok(next)
    }
}

/// An ordered list of workflow steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workflow {
    /// The steps, applied strictly in order
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
}

impl Workflow {
    /// Create a workflow from its steps.
    pub fn new(steps: Vec<WorkflowStep>) -> Self {
        Self { steps }
    }

    /// Run every step in order against successive snapshots.
    pub fn apply(&self, snapshot: &MemoryGraph) -> Result<MemoryGraph, OperationError> {
        let mut current = snapshot.clone();
        for (index, step) in self.steps.iter().enumerate() {
            tracing::debug!(step = index, "Applying workflow step");
            current = step.apply(&current)?;
        }
        Ok(current)
    }
}

/// Runs a workflow against a finite graph snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowOperation {
    /// The workflow to run
    #[serde(default)]
    pub workflow: Workflow,
}

impl WorkflowOperation {
    /// Create an operation running the given workflow.
    pub fn new(workflow: Workflow) -> Self {
        Self { workflow }
    }
}

/// The input of [`WorkflowOperation`].
#[derive(Debug, Deserialize)]
pub struct WorkflowInput {
    /// The snapshot the workflow starts from
    pub graph: MemoryGraph,
}

/// The output of [`WorkflowOperation`].
#[derive(Debug, Serialize)]
pub struct WorkflowOutput {
    /// The final snapshot
    pub graph: MemoryGraph,
}

#[async_trait]
impl TypedOperation for WorkflowOperation {
    type Input = WorkflowInput;
    type Output = WorkflowOutput;
    const DISCRIMINANT: &'static str = "workflow";

    async fn run(
        &self,
        input: WorkflowInput,
        _context: &OperationContext,
    ) -> Result<WorkflowOutput, OperationError> {
        let graph = self.workflow.apply(&input.graph)?;
        Ok(WorkflowOutput { graph })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use trellis_graph::{Identity, Vertex};

    fn sample_graph() -> MemoryGraph {
        let mut graph = MemoryGraph::new("sample", true);
        graph.insert(
            Vertex::new("v1")
                .with_label("alpha")
                .with_properties(vec![
                    Property::with_values("value", vec![json!(2), json!(4), json!(6)]),
                    Property::with_values("name", vec![json!("first")]),
                ]),
        );
        graph.insert(
            Vertex::new("v2")
                .with_label("beta")
                .with_properties(vec![Property::with_values("value", vec![json!(10)])]),
        );
        graph.mark_root("v1");
        graph
    }

    fn statistic(graph: &MemoryGraph, vertex: &str, property: &str, name: &str) -> Option<f64> {
        graph
            .get(&Identity::new(vertex))?
            .property(&Identity::new(property))?
            .subproperties
            .iter()
            .find(|subproperty| subproperty.id == Identity::new(name))?
            .observations[0]
            .as_f64()
    }

    #[test]
    fn test_empty_workflow_is_identity() {
        let graph = sample_graph();
        let result = Workflow::default().apply(&graph).unwrap();
        assert_eq!(result, graph);
    }

    #[test]
    fn test_step_without_actor_copies_snapshot() {
        let graph = sample_graph();
        let workflow = Workflow::new(vec![WorkflowStep::new(Some(Selector::All), None)]);
        assert_eq!(workflow.apply(&graph).unwrap(), graph);
    }

    #[test]
    fn test_mean_over_all_vertices() {
        let graph = sample_graph();
        let workflow = Workflow::new(vec![WorkflowStep::new(None, Some(Actor::Mean))]);

        let result = workflow.apply(&graph).unwrap();

        assert_eq!(statistic(&result, "v1", "value", "Mean"), Some(4.0));
        assert_eq!(statistic(&result, "v2", "value", "Mean"), Some(10.0));
        // The non-numeric property is untouched.
        let name = result
            .get(&Identity::new("v1"))
            .unwrap()
            .property(&Identity::new("name"))
            .unwrap()
            .clone();
        assert!(name.subproperties.is_empty());
        // The source snapshot is unmodified.
        assert_eq!(statistic(&graph, "v1", "value", "Mean"), None);
    }

    #[test]
    fn test_selector_scopes_the_actor() {
        let graph = sample_graph();
        let workflow = Workflow::new(vec![WorkflowStep::new(
            Some(Selector::VertexName {
                pattern: "^alpha$".to_string(),
            }),
            Some(Actor::Mean),
        )]);

        let result = workflow.apply(&graph).unwrap();

        assert_eq!(statistic(&result, "v1", "value", "Mean"), Some(4.0));
        assert_eq!(statistic(&result, "v2", "value", "Mean"), None);
    }

    #[test]
    fn test_steps_apply_in_order_to_successive_snapshots() {
        let graph = sample_graph();
        // The second step sees the first step's output: the mean statistic
        // exists before the variance step runs, and both end up appended.
        let workflow = Workflow::new(vec![
            WorkflowStep::new(None, Some(Actor::Mean)),
            WorkflowStep::new(None, Some(Actor::Variance { bessel: true })),
        ]);

        let result = workflow.apply(&graph).unwrap();

        assert_eq!(statistic(&result, "v1", "value", "Mean"), Some(4.0));
        assert_eq!(statistic(&result, "v1", "value", "Variance"), Some(4.0));
    }

    #[test]
    fn test_workflow_preserves_roots_and_direction() {
        let graph = sample_graph();
        let workflow = Workflow::new(vec![WorkflowStep::new(None, Some(Actor::Mean))]);

        let result = workflow.apply(&graph).unwrap();

        assert!(result.is_directed());
        assert_eq!(
            result.root_ids().cloned().collect::<Vec<_>>(),
            vec![Identity::new("v1")]
        );
    }

    #[test]
    fn test_workflow_determinism() {
        let graph = sample_graph();
        let workflow = Workflow::new(vec![
            WorkflowStep::new(None, Some(Actor::Mean)),
            WorkflowStep::new(
                Some(Selector::PropertyName {
                    pattern: "^value$".to_string(),
                }),
                Some(Actor::Median),
            ),
        ]);

        let first = serde_json::to_string(&workflow.apply(&graph).unwrap()).unwrap();
        let second = serde_json::to_string(&workflow.apply(&graph).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
