//! End-to-end test: a workflow operation resolved from a discriminant
//! payload, submitted to the scheduler, executed by a worker, and observed
//! through its job record.

use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use trellis_graph::{Identity, MemoryGraph, Property, Vertex};
use trellis_jobs::{InMemoryJobRepository, JobRepository, JobScheduler, SchedulerConfig};
use trellis_ops::{OperationContext, OperationRegistry};
use uuid::Uuid;

fn sample_graph() -> MemoryGraph {
    let mut graph = MemoryGraph::new("measurements", true);
    graph.insert(
        Vertex::new("v1")
            .with_label("sensor-a")
            .with_properties(vec![Property::with_values(
                "reading",
                vec![json!(2), json!(4), json!(6)],
            )]),
    );
    graph.insert(
        Vertex::new("v2")
            .with_label("sensor-b")
            .with_properties(vec![Property::with_values("reading", vec![json!("n/a")])]),
    );
    graph
}

async fn wait_for_result(
    repository: &Arc<InMemoryJobRepository>,
    id: &Uuid,
) -> serde_json::Value {
    for _ in 0..200 {
        if let Some(item) = repository.get(id).await.unwrap() {
            if item.completed {
                return item.result.expect("completed job carries a result");
            }
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("Job never completed");
}

#[tokio::test]
async fn test_workflow_job_end_to_end() {
    // Initialize tracing
    let _ = tracing_subscriber::fmt()
        .with_env_filter("trellis_jobs=debug")
        .try_init();

    let registry = OperationRegistry::builtin();
    let operation = registry
        .deserialize(json!({
            "type": "workflow",
            "workflow": {
                "steps": [
                    { "selector": { "type": "all" }, "actor": { "type": "mean" } }
                ]
            }
        }))
        .unwrap();

    let repository = InMemoryJobRepository::new();
    let scheduler = JobScheduler::new(
        Arc::clone(&repository) as Arc<dyn JobRepository>,
        SchedulerConfig::default(),
    );
    scheduler.start();

    let context = Arc::new(OperationContext::new(HashMap::from([(
        "graph".to_string(),
        serde_json::to_value(sample_graph()).unwrap(),
    )])));
    let id = scheduler
        .submit(Arc::from(operation), context)
        .await
        .unwrap();

    let result = wait_for_result(&repository, &id).await;
    let graph: MemoryGraph = serde_json::from_value(result["graph"].clone()).unwrap();

    let transformed = graph.get(&Identity::new("v1")).unwrap();
    let reading = transformed.property(&Identity::new("reading")).unwrap();
    let mean = reading
        .subproperties
        .iter()
        .find(|subproperty| subproperty.id == Identity::new("Mean"))
        .expect("mean appended");
    assert_eq!(mean.observations[0].value, json!(4.0));

    // The non-numeric property is carried through unchanged.
    let untouched = graph.get(&Identity::new("v2")).unwrap();
    assert!(untouched.property(&Identity::new("reading")).unwrap().subproperties.is_empty());

    scheduler.shutdown().await;
}

#[tokio::test]
async fn test_generate_then_reverse_pipeline() {
    let registry = OperationRegistry::builtin();
    let repository = InMemoryJobRepository::new();
    let scheduler = JobScheduler::new(
        Arc::clone(&repository) as Arc<dyn JobRepository>,
        SchedulerConfig { workers: 2 },
    );
    scheduler.start();

    let generate = registry
        .deserialize(json!({"type": "generateGraph", "seed": 3, "vertexCount": 4, "edgeProbability": 0.5}))
        .unwrap();
    let generate_id = scheduler
        .submit(
            Arc::from(generate),
            Arc::new(OperationContext::new(HashMap::new())),
        )
        .await
        .unwrap();
    let generated = wait_for_result(&repository, &generate_id).await;

    let reverse = registry.deserialize(json!({"type": "reverseEdges"})).unwrap();
    let reverse_id = scheduler
        .submit(
            Arc::from(reverse),
            Arc::new(OperationContext::new(HashMap::from([(
                "graph".to_string(),
                generated["graph"].clone(),
            )]))),
        )
        .await
        .unwrap();
    let reversed = wait_for_result(&repository, &reverse_id).await;

    let before: MemoryGraph = serde_json::from_value(generated["graph"].clone()).unwrap();
    let after: MemoryGraph = serde_json::from_value(reversed["graph"].clone()).unwrap();
    assert_eq!(before.len(), after.len());

    scheduler.shutdown().await;
}
