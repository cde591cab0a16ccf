//! End-to-end pipeline tests: real event workers over the in-process
//! backends, driven by paused virtual time so visibility timeouts and
//! dead-letter escalation play out in milliseconds of wall clock.

use crate::config::Config;
use crate::tests::common::{fast_params, sample_jpeg, test_context, FailingClassifier, TestContext};
use crate::types::queue::QueueType;
use crate::types::task::{Prediction, TaskRecord, TaskStatus};
use crate::worker::event_handler::service::{TaskHandlerService, RETRIES_EXHAUSTED_CAUSE};
use crate::worker::initialize_worker;
use bytes::Bytes;
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Poll the status store until the record is terminal. The budget is far
/// beyond what two visibility windows plus dead-letter handling need.
async fn wait_for_terminal(config: &Arc<Config>, id: Uuid) -> TaskRecord {
    for _ in 0..600 {
        if let Some(record) = TaskHandlerService::get_task(id, config.clone()).await.unwrap() {
            if record.is_terminal() {
                return record;
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("task {id} never reached a terminal status");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_submitted_task_completes_end_to_end(sample_jpeg: Bytes) {
    let context: TestContext = crate::tests::common::cat_context();
    let shutdown_token = CancellationToken::new();
    let controller = initialize_worker(context.config.clone(), shutdown_token.clone()).await.unwrap();

    let record = TaskHandlerService::submit_task(sample_jpeg, context.config.clone()).await.unwrap();
    assert_eq!(record.status, TaskStatus::Pending);

    let finished = wait_for_terminal(&context.config, record.id).await;
    assert_eq!(finished.status, TaskStatus::Completed);
    assert_eq!(finished.result, Some(vec![Prediction::new("cat", 0.92)]));
    assert!(finished.error.is_none());

    controller.shutdown().await.unwrap();
    // Both queues drained: the message was acked, nothing escalated
    assert_eq!(context.queue.depth(QueueType::TaskProcessing), 0);
    assert_eq!(context.queue.depth(QueueType::TaskDeadLetter), 0);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_poison_task_fails_after_exhausting_deliveries(sample_jpeg: Bytes) {
    // max_deliveries = 2 per the fast params: two attempts, then escalation
    let context = test_context(Arc::new(FailingClassifier), fast_params());
    let shutdown_token = CancellationToken::new();
    let controller = initialize_worker(context.config.clone(), shutdown_token.clone()).await.unwrap();

    let record = TaskHandlerService::submit_task(sample_jpeg, context.config.clone()).await.unwrap();

    let finished = wait_for_terminal(&context.config, record.id).await;
    assert_eq!(finished.status, TaskStatus::Failed);
    assert_eq!(finished.error.as_deref(), Some(RETRIES_EXHAUSTED_CAUSE));
    assert!(finished.result.is_none());

    controller.shutdown().await.unwrap();
    // The dead-letter message was consumed and acked by the failure handler
    assert_eq!(context.queue.depth(QueueType::TaskProcessing), 0);
    assert_eq!(context.queue.depth(QueueType::TaskDeadLetter), 0);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_multiple_tasks_settle_independently(sample_jpeg: Bytes) {
    let context: TestContext = crate::tests::common::cat_context();
    let shutdown_token = CancellationToken::new();
    let controller = initialize_worker(context.config.clone(), shutdown_token.clone()).await.unwrap();

    let mut ids = Vec::new();
    for _ in 0..5 {
        let record = TaskHandlerService::submit_task(sample_jpeg.clone(), context.config.clone()).await.unwrap();
        ids.push(record.id);
    }

    for id in ids {
        let finished = wait_for_terminal(&context.config, id).await;
        assert_eq!(finished.status, TaskStatus::Completed);
    }

    controller.shutdown().await.unwrap();
}
