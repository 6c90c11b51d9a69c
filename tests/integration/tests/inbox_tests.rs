//! Conversation assembler scenario tests
//!
//! Run with: cargo test -p integration-tests --test inbox_tests

use integration_tests::{seed_user, thread_order, TestEnv};
use market_core::entities::UserRole;
use market_core::Snowflake;
use market_service::InboxService;

// ============================================================================
// Partitioning
// ============================================================================

#[tokio::test]
async fn test_messages_partition_by_counterpart() {
    let env = TestEnv::seeded().await;
    let inbox = InboxService::new(&env.ctx);

    inbox.send(&env.buyer, env.seller.id, "is the bike available?").await.unwrap();
    inbox.send(&env.seller, env.buyer.id, "yes it is").await.unwrap();
    inbox.send(&env.buyer, env.admin.id, "unrelated question").await.unwrap();

    let threads = inbox.load_inbox(env.buyer.id).await.unwrap();
    assert_eq!(threads.len(), 2);

    let seller_thread = threads
        .iter()
        .find(|t| t.counterpart.id == env.seller.id)
        .unwrap();
    assert_eq!(seller_thread.messages.len(), 2);
    // Ascending within the thread
    assert_eq!(seller_thread.messages[0].content, "is the bike available?");
    assert_eq!(seller_thread.messages[1].content, "yes it is");
    // Only the received half counts as unread
    assert_eq!(seller_thread.unread_count, 1);
}

#[tokio::test]
async fn test_unknown_counterpart_gets_placeholder() {
    let env = TestEnv::seeded().await;
    let inbox = InboxService::new(&env.ctx);

    let ghost = Snowflake::new(987654321);
    inbox.send(&env.buyer, ghost, "anyone there?").await.unwrap();

    let threads = inbox.load_inbox(env.buyer.id).await.unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].counterpart.id, ghost);
    assert_eq!(threads[0].counterpart.name, "Unknown user");
    assert_eq!(threads[0].messages.len(), 1);
}

// ============================================================================
// Ordering
// ============================================================================

#[tokio::test]
async fn test_threads_order_by_unread_then_recency_then_empty() {
    let env = TestEnv::seeded().await;
    let other = seed_user(&env.ctx, "Other One", UserRole::User).await;
    let inbox = InboxService::new(&env.ctx);

    // Seller thread: read, but most recent activity overall.
    inbox.send(&env.seller, env.buyer.id, "old message").await.unwrap();
    inbox.open_conversation(env.buyer.id, env.seller.id).await.unwrap();

    // Admin thread: one unread message.
    inbox.send(&env.admin, env.buyer.id, "please review").await.unwrap();

    // Most recent message lands in the already-read seller thread.
    inbox.send(&env.buyer, env.seller.id, "newest").await.unwrap();

    // Explicitly started, never written to.
    inbox.start_conversation(env.buyer.id, other.id).await.unwrap();

    let threads = inbox.load_inbox(env.buyer.id).await.unwrap();
    assert_eq!(
        thread_order(&threads),
        vec![env.admin.id, env.seller.id, other.id]
    );

    let empty = &threads[2];
    assert!(empty.messages.is_empty());
    assert_eq!(empty.unread_count, 0);
    assert!(empty.last_activity.is_none());
}

#[tokio::test]
async fn test_starting_an_existing_thread_changes_nothing() {
    let env = TestEnv::seeded().await;
    let inbox = InboxService::new(&env.ctx);

    inbox.send(&env.buyer, env.seller.id, "hello").await.unwrap();
    inbox.start_conversation(env.buyer.id, env.seller.id).await.unwrap();
    inbox.start_conversation(env.buyer.id, env.seller.id).await.unwrap();

    let threads = inbox.load_inbox(env.buyer.id).await.unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].messages.len(), 1);
}

// ============================================================================
// Read state
// ============================================================================

#[tokio::test]
async fn test_open_conversation_marks_only_that_thread() {
    let env = TestEnv::seeded().await;
    let inbox = InboxService::new(&env.ctx);

    inbox.send(&env.seller, env.buyer.id, "from seller").await.unwrap();
    inbox.send(&env.seller, env.buyer.id, "again").await.unwrap();
    inbox.send(&env.admin, env.buyer.id, "from admin").await.unwrap();

    assert_eq!(inbox.unread_total(env.buyer.id).await.unwrap(), 3);

    let remaining = inbox
        .open_conversation(env.buyer.id, env.seller.id)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
    assert_eq!(inbox.unread_total(env.buyer.id).await.unwrap(), 1);

    // The seller's own view of the pair is untouched: their sent
    // messages are now read, but nothing addressed to them changed.
    assert_eq!(inbox.unread_total(env.seller.id).await.unwrap(), 0);

    let threads = inbox.load_inbox(env.buyer.id).await.unwrap();
    let admin_thread = threads
        .iter()
        .find(|t| t.counterpart.id == env.admin.id)
        .unwrap();
    assert_eq!(admin_thread.unread_count, 1);
}

#[tokio::test]
async fn test_send_then_open_round_trip() {
    let env = TestEnv::seeded().await;
    let inbox = InboxService::new(&env.ctx);

    let sent = inbox.send(&env.buyer, env.seller.id, "ping").await.unwrap();
    assert!(!sent.read);

    // Receiver opens the thread
    inbox.open_conversation(env.seller.id, env.buyer.id).await.unwrap();

    let threads = inbox.load_inbox(env.seller.id).await.unwrap();
    assert_eq!(threads[0].unread_count, 0);
    assert!(threads[0].messages[0].read);
}
