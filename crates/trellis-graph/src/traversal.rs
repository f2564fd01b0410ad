//! Default-derived traversals.
//!
//! Any graph exposing dynamic single-vertex lookup gets in/out traversal
//! for free: fetch the vertex, walk its edge list, and look up each
//! neighbor. This fallback is always correct but may be slower than a
//! provider's direct index; the two must be observably identical.

use crate::capabilities::{DynamicComponent, VertexStream};
use crate::identity::Identity;
use futures::stream;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Clone, Copy)]
enum Direction {
    Out,
    In,
}

struct WalkState {
    dynamic: Arc<dyn DynamicComponent>,
    direction: Direction,
    origin: Option<Identity>,
    pending: VecDeque<Identity>,
}

fn walk(
    dynamic: Arc<dyn DynamicComponent>,
    id: &Identity,
    direction: Direction,
) -> VertexStream<'static> {
    let state = WalkState {
        dynamic,
        direction,
        origin: Some(id.clone()),
        pending: VecDeque::new(),
    };
    Box::pin(stream::unfold(state, |mut state| async move {
        // The first pull fetches the origin vertex and queues its
        // neighbor identities; each later pull resolves one neighbor.
        if let Some(origin) = state.origin.take() {
            match state.dynamic.vertex(&origin).await {
                Ok(vertex) => {
                    state.pending = match state.direction {
                        Direction::Out => vertex.child_ids().cloned().collect(),
                        Direction::In => vertex.parent_ids().cloned().collect(),
                    };
                }
                Err(error) => return Some((Err(error), state)),
            }
        }
        let next = state.pending.pop_front()?;
        let item = state.dynamic.vertex(&next).await;
        Some((item, state))
    }))
}

/// Derive the child vertices of `id` from dynamic lookup alone.
pub fn derive_children(
    dynamic: Arc<dyn DynamicComponent>,
    id: &Identity,
) -> VertexStream<'static> {
    walk(dynamic, id, Direction::Out)
}

/// Derive the parent vertices of `id` from dynamic lookup alone.
pub fn derive_parents(dynamic: Arc<dyn DynamicComponent>, id: &Identity) -> VertexStream<'static> {
    walk(dynamic, id, Direction::In)
}
