use crate::capabilities::{
    DynamicComponent, DynamicInComponent, DynamicOutComponent, EnumerableComponent,
    RootedComponent, VertexStream,
};
use crate::components::{Component, ComponentStack};
use crate::identity::Identity;
use crate::traversal;
use std::sync::Arc;

/// A graph: an identity, graph-level invariant flags, and the set of
/// capabilities registered in its component stack.
///
/// The `directed`/`dynamic`/`finite` flags are set at construction and
/// never change. Everything else a graph can do is discovered by querying
/// the component stack; every capability is optional.
#[derive(Debug, Clone)]
pub struct Graph {
    id: Identity,
    label: Option<String>,
    directed: bool,
    dynamic: bool,
    finite: bool,
    components: Arc<ComponentStack>,
}

impl Graph {
    /// Create a graph over an assembled component stack.
    pub fn new(
        id: impl Into<Identity>,
        directed: bool,
        dynamic: bool,
        finite: bool,
        components: ComponentStack,
    ) -> Self {
        Self {
            id: id.into(),
            label: None,
            directed,
            dynamic,
            finite,
            components: Arc::new(components),
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The identity of the graph.
    #[inline]
    pub fn id(&self) -> &Identity {
        &self.id
    }

    /// The label of the graph, if any.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Whether edges are directed.
    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Whether vertices are generated lazily on lookup.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Whether the vertex set is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.finite
    }

    /// The capability registry of the graph.
    #[inline]
    pub fn components(&self) -> &Arc<ComponentStack> {
        &self.components
    }

    /// Build a scoped view of this graph with extra capability overrides.
    /// The original graph's stack is never mutated.
    pub fn branch_with(&self, overrides: impl IntoIterator<Item = Component>) -> Graph {
        let mut branch = self.components.branch();
        for component in overrides {
            branch.append(component);
        }
        Graph {
            id: self.id.clone(),
            label: self.label.clone(),
            directed: self.directed,
            dynamic: self.dynamic,
            finite: self.finite,
            components: Arc::new(branch),
        }
    }

    /// Dynamic single-vertex lookup, if registered.
    pub fn dynamic(&self) -> Option<Arc<dyn DynamicComponent>> {
        self.components.dynamic()
    }

    /// Whole-graph enumeration, if registered.
    pub fn enumerable(&self) -> Option<Arc<dyn EnumerableComponent>> {
        self.components.enumerable()
    }

    /// Root-vertex discovery, if registered.
    pub fn rooted(&self) -> Option<Arc<dyn RootedComponent>> {
        self.components.rooted()
    }

    /// The child vertices of `id`.
    ///
    /// Prefers a registered direct out-traversal; otherwise derives the
    /// traversal from dynamic lookup by walking the vertex's edge list.
    /// `None` when the graph supports neither.
    pub fn children(&self, id: &Identity) -> Option<VertexStream<'static>> {
        if let Some(component) = self.components.dynamic_out() {
            return Some(DynamicOutComponent::children(component, id));
        }
        self.components
            .dynamic()
            .map(|dynamic| traversal::derive_children(dynamic, id))
    }

    /// The parent vertices of `id`, with the same fallback behavior as
    /// [`Graph::children`].
    pub fn parents(&self, id: &Identity) -> Option<VertexStream<'static>> {
        if let Some(component) = self.components.dynamic_in() {
            return Some(DynamicInComponent::parents(component, id));
        }
        self.components
            .dynamic()
            .map(|dynamic| traversal::derive_parents(dynamic, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentKind;
    use crate::edge::Edge;
    use crate::error::GraphError;
    use crate::vertex::Vertex;
    use async_trait::async_trait;
    use futures::TryStreamExt;

    /// A two-vertex path r -> s exposed through lookup only.
    struct TinyLookup;

    #[async_trait]
    impl DynamicComponent for TinyLookup {
        async fn vertex(&self, id: &Identity) -> Result<Vertex, GraphError> {
            match id.as_text().as_str() {
                "r" => Ok(Vertex::new("r").with_edges(vec![Edge::new("r", "s")])),
                "s" => Ok(Vertex::new("s").with_edges(vec![Edge::new("r", "s")])),
                other => Err(GraphError::VertexNotFound(other.to_string())),
            }
        }
    }

    fn lookup_only_graph() -> Graph {
        let mut stack = ComponentStack::new();
        stack.append(Component::Dynamic(Arc::new(TinyLookup)));
        Graph::new("tiny", true, true, false, stack)
    }

    #[test]
    fn test_flags_are_fixed_at_construction() {
        let graph = lookup_only_graph();
        assert!(graph.is_directed());
        assert!(graph.is_dynamic());
        assert!(!graph.is_finite());
    }

    #[tokio::test]
    async fn test_children_fall_back_to_derivation() {
        let graph = lookup_only_graph();
        let children: Vec<Vertex> = graph
            .children(&Identity::new("r"))
            .expect("dynamic lookup supports derived traversal")
            .try_collect()
            .await
            .unwrap();

        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, Identity::new("s"));
    }

    #[tokio::test]
    async fn test_traversal_absent_without_any_capability() {
        let graph = Graph::new("empty", false, false, true, ComponentStack::new());
        assert!(graph.children(&Identity::new("r")).is_none());
        assert!(graph.parents(&Identity::new("r")).is_none());
    }

    #[tokio::test]
    async fn test_branch_with_override_leaves_original_intact() {
        let graph = lookup_only_graph();

        // A filtered view removes lookup without touching the original.
        let mut tombstoned = graph.components().branch();
        tombstoned.remove(ComponentKind::Dynamic);
        let view = Graph {
            id: graph.id().clone(),
            label: None,
            directed: graph.is_directed(),
            dynamic: graph.is_dynamic(),
            finite: graph.is_finite(),
            components: Arc::new(tombstoned),
        };

        assert!(view.dynamic().is_none());
        assert!(graph.dynamic().is_some());
    }
}
