mod common;

use common::create_test_planner;
use jiff::civil::date;
use planout_core::{
    ChunkStatus, ErrorKind, Frequency, PlannerError,
    params::{
        AddChunks, Breakdown, ChunkChanges, ChunkRef, CreatePlan, Id, NewChunk, PlanChanges,
        UpdateChunk, UpdatePlan,
    },
};
use serde_json::{Map, json};

async fn create_plan(planner: &planout_core::Planner, title: &str) -> u64 {
    planner
        .create_plan(&CreatePlan {
            title: title.to_string(),
            description: None,
            color: None,
        })
        .await
        .expect("Failed to create plan")
        .id
}

#[tokio::test]
async fn test_complete_plan_workflow() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = planner
        .create_plan(&CreatePlan {
            title: "Marathon".to_string(),
            description: Some("Base mileage\nLong runs\nTaper".to_string()),
            color: Some("#10b981".to_string()),
        })
        .await
        .expect("Failed to create plan");

    let plan = planner
        .breakdown_plan(&Breakdown {
            id: plan.id,
            chunks_per_day: 1,
            start_date: Some("2024-01-01".to_string()),
        })
        .await
        .expect("Failed to break down plan");
    assert_eq!(plan.chunks.len(), 3);
    assert_eq!(plan.chunks[2].scheduled_date, Some(date(2024, 1, 3)));

    // Setting deadlines moves the plan deadline to the latest one
    for (chunk, deadline) in plan.chunks.iter().zip(["2024-02-01", "2024-04-01", "2024-03-01"]) {
        planner
            .update_chunk(&UpdateChunk {
                plan_id: plan.id,
                chunk_id: chunk.id,
                changes: ChunkChanges {
                    deadline: Some(deadline.to_string()),
                    ..Default::default()
                },
            })
            .await
            .expect("Failed to update chunk");
    }
    let current = planner.get_plan(&Id { id: plan.id }).await.unwrap().unwrap();
    assert_eq!(current.deadline, Some(date(2024, 4, 1)));

    // Deleting the latest chunk pulls the plan deadline back
    planner
        .delete_chunk(&ChunkRef {
            plan_id: plan.id,
            chunk_id: plan.chunks[1].id,
        })
        .await
        .expect("Failed to delete chunk");
    let current = planner.get_plan(&Id { id: plan.id }).await.unwrap().unwrap();
    assert_eq!(current.deadline, Some(date(2024, 3, 1)));
    assert_eq!(current.chunks.len(), 2);

    let summaries = planner.list_plan_summaries().await.unwrap();
    assert_eq!(summaries.len(), 1);

    let deleted = planner.delete_plan(&Id { id: plan.id }).await.unwrap();
    assert_eq!(deleted.chunks.len(), 2);
    assert!(planner.get_plan(&Id { id: plan.id }).await.unwrap().is_none());
}

#[tokio::test]
async fn test_add_chunks_applies_defaults() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan_id = create_plan(&planner, "Reading").await;

    let plan = planner
        .add_chunks(&AddChunks {
            plan_id,
            chunks: vec![
                NewChunk {
                    title: "Chapter 1".to_string(),
                    deadline: Some("2024-06-30".to_string()),
                    ..Default::default()
                },
                NewChunk {
                    title: "Chapter 2".to_string(),
                    status: Some("IN_PROGRESS".to_string()),
                    frequency: Some("Weekly".to_string()),
                    deadline: Some("garbage".to_string()),
                    ..Default::default()
                },
            ],
        })
        .await
        .expect("Failed to add chunks");

    let [first, second] = plan.chunks.as_slice() else {
        panic!("expected two chunks, got {}", plan.chunks.len());
    };
    assert_eq!(first.status, ChunkStatus::Todo);
    assert_eq!(first.estimated_hours, 1.0);
    assert_eq!(first.duration_minutes, 30);
    assert_eq!(first.frequency, Frequency::Daily);
    assert_eq!(second.status, ChunkStatus::InProgress);
    assert_eq!(second.frequency, Frequency::Weekly);
    assert_eq!(second.deadline, None);
    assert!(first.scheduled_date < second.scheduled_date);
    assert_eq!(plan.deadline, Some(date(2024, 6, 30)));
}

#[tokio::test]
async fn test_add_chunks_rejects_unknown_status() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan_id = create_plan(&planner, "Reading").await;

    let result = planner
        .add_chunks(&AddChunks {
            plan_id,
            chunks: vec![NewChunk {
                title: "Bad".to_string(),
                status: Some("FINISHED".to_string()),
                ..Default::default()
            }],
        })
        .await;

    let err = result.expect_err("status should be rejected");
    assert!(matches!(err, PlannerError::InvalidStatus { .. }));
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    // Nothing was inserted
    let plan = planner.get_plan(&Id { id: plan_id }).await.unwrap().unwrap();
    assert!(plan.chunks.is_empty());
}

#[tokio::test]
async fn test_update_chunk_errors() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan_id = create_plan(&planner, "One").await;
    let other_id = create_plan(&planner, "Two").await;
    let plan = planner
        .add_chunks(&AddChunks {
            plan_id,
            chunks: vec![NewChunk {
                title: "Only".to_string(),
                ..Default::default()
            }],
        })
        .await
        .unwrap();
    let chunk_id = plan.chunks[0].id;

    let bad_status = planner
        .update_chunk(&UpdateChunk {
            plan_id,
            chunk_id,
            changes: ChunkChanges {
                status: Some("done".to_string()),
                ..Default::default()
            },
        })
        .await;
    assert!(matches!(bad_status, Err(PlannerError::InvalidStatus { .. })));

    let other_plan = planner
        .update_chunk(&UpdateChunk {
            plan_id: other_id,
            chunk_id,
            changes: ChunkChanges::default(),
        })
        .await
        .expect_err("chunk belongs to another plan");
    assert_eq!(other_plan.kind(), ErrorKind::NotFound);

    let missing_plan = planner
        .update_chunk(&UpdateChunk {
            plan_id: 999,
            chunk_id,
            changes: ChunkChanges::default(),
        })
        .await;
    assert!(matches!(missing_plan, Err(PlannerError::PlanNotFound { id: 999 })));
}

#[tokio::test]
async fn test_skip_bookkeeping_round_trip() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan_id = create_plan(&planner, "Gym").await;
    let plan = planner
        .add_chunks(&AddChunks {
            plan_id,
            chunks: vec![NewChunk {
                title: "Legs".to_string(),
                ..Default::default()
            }],
        })
        .await
        .unwrap();

    let history = Map::from_iter([("skipped".to_string(), json!(["2024-02-02"]))]);
    let chunk = planner
        .update_chunk(&UpdateChunk {
            plan_id,
            chunk_id: plan.chunks[0].id,
            changes: ChunkChanges {
                status: Some("SKIPPED".to_string()),
                history: Some(history.clone()),
                ..Default::default()
            },
        })
        .await
        .unwrap();
    assert_eq!(chunk.status, ChunkStatus::Skipped);

    let stored = planner
        .get_chunk(&ChunkRef {
            plan_id,
            chunk_id: chunk.id,
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.history, history);
}

#[tokio::test]
async fn test_update_plan() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan_id = create_plan(&planner, "Draft").await;

    let plan = planner
        .update_plan(&UpdatePlan {
            id: plan_id,
            changes: PlanChanges {
                color: Some("#000000".to_string()),
                ..Default::default()
            },
        })
        .await
        .unwrap();
    assert_eq!(plan.title, "Draft");
    assert_eq!(plan.color, "#000000");

    let blank = planner
        .update_plan(&UpdatePlan {
            id: plan_id,
            changes: PlanChanges {
                title: Some(" ".to_string()),
                ..Default::default()
            },
        })
        .await;
    assert!(matches!(blank, Err(PlannerError::InvalidInput { .. })));

    let missing = planner
        .update_plan(&UpdatePlan {
            id: 999,
            changes: PlanChanges::default(),
        })
        .await;
    assert!(matches!(missing, Err(PlannerError::PlanNotFound { id: 999 })));
}

#[tokio::test]
async fn test_backfill_through_planner() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan_id = create_plan(&planner, "Backfill").await;
    planner
        .add_chunks(&AddChunks {
            plan_id,
            chunks: vec![NewChunk {
                title: "No deadline".to_string(),
                ..Default::default()
            }],
        })
        .await
        .unwrap();

    let summary = planner.backfill_deadlines().await.unwrap();
    assert_eq!(summary.chunks_updated, 1);
    assert_eq!(summary.plans_recalculated, 1);

    let plan = planner.get_plan(&Id { id: plan_id }).await.unwrap().unwrap();
    assert!(plan.chunks[0].deadline.is_some());
    assert_eq!(plan.deadline, plan.chunks[0].deadline);
    assert_eq!(
        planner
            .recalculate_plan_deadline(&Id { id: plan_id })
            .await
            .unwrap(),
        plan.deadline
    );
}

#[tokio::test]
async fn test_suggestions_without_generator_access() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan_id = create_plan(&planner, "Offline").await;

    assert!(!planner.ai_configured());
    let suggestions = planner
        .suggest_plan_chunks(&Id { id: plan_id }, None)
        .await
        .unwrap();
    assert!(suggestions.is_empty());
}
