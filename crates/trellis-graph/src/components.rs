//! The layered capability registry.
//!
//! A [`ComponentStack`] maps capability kinds to implementations. Lookups
//! scan the local layer newest-first and then delegate to the parent layer;
//! a tombstone entry shadows every deeper entry of the same kind. Branching
//! creates a fresh empty layer over the current stack so scoped overrides
//! never mutate the original.

use crate::capabilities::{
    DynamicComponent, DynamicInComponent, DynamicOutComponent, EnumerableComponent,
    RootedComponent,
};
use std::fmt;
use std::sync::Arc;

/// The kind of a graph capability, used as the registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Dynamic single-vertex lookup
    Dynamic,
    /// Whole-graph enumeration
    Enumerable,
    /// Root-vertex discovery
    Rooted,
    /// Direct in-edge traversal
    DynamicIn,
    /// Direct out-edge traversal
    DynamicOut,
}

/// A registered capability implementation, tagged by kind.
#[derive(Clone)]
pub enum Component {
    /// Dynamic single-vertex lookup
    Dynamic(Arc<dyn DynamicComponent>),
    /// Whole-graph enumeration
    Enumerable(Arc<dyn EnumerableComponent>),
    /// Root-vertex discovery
    Rooted(Arc<dyn RootedComponent>),
    /// Direct in-edge traversal
    DynamicIn(Arc<dyn DynamicInComponent>),
    /// Direct out-edge traversal
    DynamicOut(Arc<dyn DynamicOutComponent>),
}

impl Component {
    /// The kind tag of this component.
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Dynamic(_) => ComponentKind::Dynamic,
            Component::Enumerable(_) => ComponentKind::Enumerable,
            Component::Rooted(_) => ComponentKind::Rooted,
            Component::DynamicIn(_) => ComponentKind::DynamicIn,
            Component::DynamicOut(_) => ComponentKind::DynamicOut,
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component({:?})", self.kind())
    }
}

/// An ordered local list of capability entries plus a reference to a parent
/// stack. A `None` implementation is a tombstone.
#[derive(Debug, Default)]
pub struct ComponentStack {
    entries: Vec<(ComponentKind, Option<Component>)>,
    parent: Option<Arc<ComponentStack>>,
}

impl ComponentStack {
    /// Create an empty stack with no parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a capability override to the local layer. The most recently
    /// appended entry of a kind wins lookups.
    pub fn append(&mut self, component: Component) -> &mut Self {
        self.entries.push((component.kind(), Some(component)));
        self
    }

    /// Shadow every deeper entry of the given kind, including the parent's,
    /// by pushing a tombstone.
    pub fn remove(&mut self, kind: ComponentKind) -> &mut Self {
        self.entries.push((kind, None));
        self
    }

    /// Clear the local layer. The parent is unaffected.
    pub fn clear(&mut self) -> &mut Self {
        self.entries.clear();
        self
    }

    /// Create a new empty stack layered over this one. Mutations to the
    /// branch never affect the original stack.
    pub fn branch(self: &Arc<Self>) -> ComponentStack {
        ComponentStack {
            entries: Vec::new(),
            parent: Some(Arc::clone(self)),
        }
    }

    /// Find the topmost non-tombstone entry of the given kind.
    ///
    /// Scans local entries newest-first; a tombstone makes the lookup miss
    /// even when the parent holds an implementation. A miss is `None`,
    /// never an error: callers must treat every capability as optional.
    pub fn find(&self, kind: ComponentKind) -> Option<Component> {
        for (entry_kind, component) in self.entries.iter().rev() {
            if *entry_kind == kind {
                return component.clone();
            }
        }
        self.parent.as_ref().and_then(|parent| parent.find(kind))
    }

    /// Collect every non-tombstone entry of the given kind across the whole
    /// chain, local entries (newest-first) before the parent's. Tombstones
    /// shadow [`ComponentStack::find`] only; enumeration skips them.
    pub fn find_all(&self, kind: ComponentKind) -> Vec<Component> {
        let mut found = Vec::new();
        for (entry_kind, component) in self.entries.iter().rev() {
            if *entry_kind == kind {
                if let Some(component) = component {
                    found.push(component.clone());
                }
            }
        }
        if let Some(parent) = &self.parent {
            found.extend(parent.find_all(kind));
        }
        found
    }

    /// Typed lookup for dynamic single-vertex lookup.
    pub fn dynamic(&self) -> Option<Arc<dyn DynamicComponent>> {
        match self.find(ComponentKind::Dynamic) {
            Some(Component::Dynamic(component)) => Some(component),
            _ => None,
        }
    }

    /// Typed lookup for whole-graph enumeration.
    pub fn enumerable(&self) -> Option<Arc<dyn EnumerableComponent>> {
        match self.find(ComponentKind::Enumerable) {
            Some(Component::Enumerable(component)) => Some(component),
            _ => None,
        }
    }

    /// Typed lookup for root-vertex discovery.
    pub fn rooted(&self) -> Option<Arc<dyn RootedComponent>> {
        match self.find(ComponentKind::Rooted) {
            Some(Component::Rooted(component)) => Some(component),
            _ => None,
        }
    }

    /// Typed lookup for direct in-edge traversal.
    pub fn dynamic_in(&self) -> Option<Arc<dyn DynamicInComponent>> {
        match self.find(ComponentKind::DynamicIn) {
            Some(Component::DynamicIn(component)) => Some(component),
            _ => None,
        }
    }

    /// Typed lookup for direct out-edge traversal.
    pub fn dynamic_out(&self) -> Option<Arc<dyn DynamicOutComponent>> {
        match self.find(ComponentKind::DynamicOut) {
            Some(Component::DynamicOut(component)) => Some(component),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::identity::Identity;
    use crate::vertex::Vertex;
    use async_trait::async_trait;

    /// A lookup component that always produces a vertex with a fixed label.
    struct LabelledLookup(&'static str);

    #[async_trait]
    impl DynamicComponent for LabelledLookup {
        async fn vertex(&self, id: &Identity) -> Result<Vertex, GraphError> {
            Ok(Vertex::new(id.clone()).with_label(self.0))
        }
    }

    async fn label_of(stack: &ComponentStack) -> Option<String> {
        let component = stack.dynamic()?;
        let vertex = component.vertex(&Identity::new("v")).await.ok()?;
        vertex.label
    }

    #[tokio::test]
    async fn test_newest_local_entry_wins() {
        let mut stack = ComponentStack::new();
        stack.append(Component::Dynamic(Arc::new(LabelledLookup("old"))));
        stack.append(Component::Dynamic(Arc::new(LabelledLookup("new"))));

        assert_eq!(label_of(&stack).await.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_tombstone_shadows_parent() {
        let mut parent = ComponentStack::new();
        parent.append(Component::Dynamic(Arc::new(LabelledLookup("parent"))));
        let parent = Arc::new(parent);

        let mut branch = parent.branch();
        assert_eq!(label_of(&branch).await.as_deref(), Some("parent"));

        branch.remove(ComponentKind::Dynamic);
        assert!(branch.dynamic().is_none());

        // The parent is unaffected.
        assert_eq!(label_of(&parent).await.as_deref(), Some("parent"));
    }

    #[tokio::test]
    async fn test_append_then_remove_shadows_override_and_parent() {
        let mut parent = ComponentStack::new();
        parent.append(Component::Dynamic(Arc::new(LabelledLookup("parent"))));
        let parent = Arc::new(parent);

        let mut branch = parent.branch();
        branch.append(Component::Dynamic(Arc::new(LabelledLookup("override"))));
        assert_eq!(label_of(&branch).await.as_deref(), Some("override"));

        // A tombstone above the override shadows it and the parent both:
        // removal hides the capability entirely, it does not re-expose the
        // parent's entry.
        branch.remove(ComponentKind::Dynamic);
        assert!(branch.find(ComponentKind::Dynamic).is_none());
        assert!(branch.dynamic().is_none());

        // The parent still holds its entry.
        assert_eq!(label_of(&parent).await.as_deref(), Some("parent"));
    }

    #[tokio::test]
    async fn test_branch_isolation() {
        let mut original = ComponentStack::new();
        original.append(Component::Dynamic(Arc::new(LabelledLookup("base"))));
        let original = Arc::new(original);

        let mut branch = original.branch();
        branch.append(Component::Dynamic(Arc::new(LabelledLookup("scoped"))));

        assert_eq!(label_of(&branch).await.as_deref(), Some("scoped"));
        assert_eq!(label_of(&original).await.as_deref(), Some("base"));
    }

    #[test]
    fn test_find_all_spans_the_chain() {
        let mut parent = ComponentStack::new();
        parent.append(Component::Dynamic(Arc::new(LabelledLookup("parent"))));
        let parent = Arc::new(parent);

        let mut branch = parent.branch();
        branch.append(Component::Dynamic(Arc::new(LabelledLookup("local"))));
        branch.remove(ComponentKind::Dynamic);

        // The tombstone blocks find but not enumeration.
        assert!(branch.find(ComponentKind::Dynamic).is_none());
        assert_eq!(branch.find_all(ComponentKind::Dynamic).len(), 2);
    }

    #[test]
    fn test_miss_is_none_not_error() {
        let stack = ComponentStack::new();
        assert!(stack.find(ComponentKind::Enumerable).is_none());
        assert!(stack.enumerable().is_none());
        assert!(stack.find_all(ComponentKind::Rooted).is_empty());
    }
}
