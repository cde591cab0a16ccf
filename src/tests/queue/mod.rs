use crate::core::client::queue::{memory::MemoryQueue, QueueError, TaskQueueClient};
use crate::types::queue::QueueType;
use rstest::rstest;
use std::time::Duration;
use tokio::time::advance;

const VISIBILITY: Duration = Duration::from_secs(3);

fn queue_with(max_deliveries: u32) -> MemoryQueue {
    MemoryQueue::new(VISIBILITY, max_deliveries)
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_leased_message_is_invisible_until_timeout() {
    let queue = queue_with(5);
    queue.send_message(QueueType::TaskProcessing, "payload".to_string()).await.unwrap();

    let first = queue.consume_message(QueueType::TaskProcessing).await.unwrap();
    assert!(matches!(
        queue.consume_message(QueueType::TaskProcessing).await,
        Err(QueueError::NoData(QueueType::TaskProcessing))
    ));

    advance(VISIBILITY + Duration::from_millis(1)).await;

    let second = queue.consume_message(QueueType::TaskProcessing).await.unwrap();
    assert_eq!(first.message_id, second.message_id);
    assert_eq!(first.payload, second.payload);
    assert_ne!(first.receipt, second.receipt);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_ack_removes_message_for_good() {
    let queue = queue_with(5);
    queue.send_message(QueueType::TaskProcessing, "payload".to_string()).await.unwrap();

    let delivery = queue.consume_message(QueueType::TaskProcessing).await.unwrap();
    queue.ack_message(QueueType::TaskProcessing, &delivery).await.unwrap();
    assert_eq!(queue.depth(QueueType::TaskProcessing), 0);

    advance(VISIBILITY * 2).await;
    assert!(matches!(queue.consume_message(QueueType::TaskProcessing).await, Err(QueueError::NoData(_))));

    // A second ack of an already-removed message is accepted
    queue.ack_message(QueueType::TaskProcessing, &delivery).await.unwrap();
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_stale_receipt_cannot_ack_a_redelivered_message() {
    let queue = queue_with(5);
    queue.send_message(QueueType::TaskProcessing, "payload".to_string()).await.unwrap();

    let first = queue.consume_message(QueueType::TaskProcessing).await.unwrap();
    advance(VISIBILITY + Duration::from_millis(1)).await;
    let second = queue.consume_message(QueueType::TaskProcessing).await.unwrap();

    assert!(matches!(
        queue.ack_message(QueueType::TaskProcessing, &first).await,
        Err(QueueError::StaleReceipt { .. })
    ));
    // The live lease still works
    queue.ack_message(QueueType::TaskProcessing, &second).await.unwrap();
    assert_eq!(queue.depth(QueueType::TaskProcessing), 0);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_exhausted_message_escalates_to_dead_letter_exactly_once() {
    let queue = queue_with(2);
    queue.send_message(QueueType::TaskProcessing, "poison".to_string()).await.unwrap();

    // Two deliveries, neither acked
    for _ in 0..2 {
        queue.consume_message(QueueType::TaskProcessing).await.unwrap();
        advance(VISIBILITY + Duration::from_millis(1)).await;
    }

    // Third attempt moves the message to the dead-letter queue instead of
    // handing it out again
    assert!(matches!(queue.consume_message(QueueType::TaskProcessing).await, Err(QueueError::NoData(_))));
    assert_eq!(queue.depth(QueueType::TaskProcessing), 0);
    assert_eq!(queue.depth(QueueType::TaskDeadLetter), 1);

    let escalated = queue.consume_message(QueueType::TaskDeadLetter).await.unwrap();
    assert_eq!(escalated.payload, "poison");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_dead_letter_queue_redelivers_without_further_escalation() {
    let queue = queue_with(1);
    queue.send_message(QueueType::TaskDeadLetter, "stuck".to_string()).await.unwrap();

    // Far beyond the budget that applies on the processing queue
    for _ in 0..5 {
        queue.consume_message(QueueType::TaskDeadLetter).await.unwrap();
        advance(VISIBILITY + Duration::from_millis(1)).await;
    }
    assert_eq!(queue.depth(QueueType::TaskDeadLetter), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn test_messages_are_delivered_in_arrival_order() {
    let queue = queue_with(5);
    queue.send_message(QueueType::TaskProcessing, "first".to_string()).await.unwrap();
    queue.send_message(QueueType::TaskProcessing, "second".to_string()).await.unwrap();

    let a = queue.consume_message(QueueType::TaskProcessing).await.unwrap();
    let b = queue.consume_message(QueueType::TaskProcessing).await.unwrap();
    assert_eq!(a.payload, "first");
    assert_eq!(b.payload, "second");
}
