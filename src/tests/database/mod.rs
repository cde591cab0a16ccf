use crate::core::client::database::{memory::MemoryDatabase, DatabaseClient, DatabaseError, FinalizeResult};
use crate::types::task::{Prediction, TaskOutcome, TaskRecord, TaskStatus};
use rstest::rstest;
use uuid::Uuid;

#[rstest]
#[tokio::test]
async fn test_create_and_get_roundtrip() {
    let database = MemoryDatabase::new();
    let record = TaskRecord::new_pending(Uuid::new_v4());

    let created = database.create_task(record.clone()).await.unwrap();
    assert_eq!(created, record);

    let fetched = database.get_task(record.id).await.unwrap().unwrap();
    assert_eq!(fetched.status, TaskStatus::Pending);
    assert_eq!(fetched.image_key, format!("images/{}", record.id));
    assert!(fetched.result.is_none());
    assert!(fetched.error.is_none());
}

#[rstest]
#[tokio::test]
async fn test_duplicate_create_is_rejected() {
    let database = MemoryDatabase::new();
    let record = TaskRecord::new_pending(Uuid::new_v4());

    database.create_task(record.clone()).await.unwrap();
    assert!(matches!(database.create_task(record).await, Err(DatabaseError::TaskAlreadyExists(_))));
}

#[rstest]
#[tokio::test]
async fn test_unknown_task_lookup_returns_none() {
    let database = MemoryDatabase::new();
    assert!(database.get_task(Uuid::new_v4()).await.unwrap().is_none());
}

#[rstest]
#[tokio::test]
async fn test_finalize_applies_completed_outcome_once() {
    let database = MemoryDatabase::new();
    let record = database.create_task(TaskRecord::new_pending(Uuid::new_v4())).await.unwrap();
    let predictions = vec![Prediction::new("cat", 0.92), Prediction::new("dog", 0.05)];

    let result = database.finalize_task(record.id, TaskOutcome::Completed(predictions.clone())).await.unwrap();
    let finalized = match result {
        FinalizeResult::Applied(record) => record,
        other => panic!("expected Applied, got {:?}", other),
    };
    assert_eq!(finalized.status, TaskStatus::Completed);
    assert_eq!(finalized.result.as_deref(), Some(predictions.as_slice()));
    assert!(finalized.error.is_none());
    assert!(finalized.updated_at >= finalized.created_at);
}

#[rstest]
#[tokio::test]
async fn test_second_finalize_is_a_noop_preserving_result_and_updated_at() {
    let database = MemoryDatabase::new();
    let record = database.create_task(TaskRecord::new_pending(Uuid::new_v4())).await.unwrap();

    let first = database
        .finalize_task(record.id, TaskOutcome::Completed(vec![Prediction::new("cat", 0.92)]))
        .await
        .unwrap();
    let first = match first {
        FinalizeResult::Applied(record) => record,
        other => panic!("expected Applied, got {:?}", other),
    };

    // A racing duplicate trying to fail the task loses and changes nothing
    let second = database
        .finalize_task(record.id, TaskOutcome::Failed("too late".to_string()))
        .await
        .unwrap();
    let second = match second {
        FinalizeResult::AlreadyTerminal(record) => record,
        other => panic!("expected AlreadyTerminal, got {:?}", other),
    };
    assert_eq!(second.status, TaskStatus::Completed);
    assert_eq!(second.result, first.result);
    assert_eq!(second.updated_at, first.updated_at);
    assert!(second.error.is_none());
}

#[rstest]
#[tokio::test]
async fn test_finalize_failed_sets_error_and_no_result() {
    let database = MemoryDatabase::new();
    let record = database.create_task(TaskRecord::new_pending(Uuid::new_v4())).await.unwrap();

    let result = database.finalize_task(record.id, TaskOutcome::Failed("boom".to_string())).await.unwrap();
    let failed = match result {
        FinalizeResult::Applied(record) => record,
        other => panic!("expected Applied, got {:?}", other),
    };
    assert_eq!(failed.status, TaskStatus::Failed);
    assert_eq!(failed.error.as_deref(), Some("boom"));
    assert!(failed.result.is_none());
}

#[rstest]
#[tokio::test]
async fn test_finalize_unknown_task_is_an_error() {
    let database = MemoryDatabase::new();
    assert!(matches!(
        database.finalize_task(Uuid::new_v4(), TaskOutcome::Failed("nope".to_string())).await,
        Err(DatabaseError::TaskNotFound(_))
    ));
}
