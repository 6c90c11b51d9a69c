//! Moderation workflow scenario tests
//!
//! Run with: cargo test -p integration-tests --test moderation_tests

use integration_tests::{
    listing_request, notification_kinds, product_ids, seed_user, TestEnv,
};
use market_core::entities::{NotificationKind, ProductStatus, UserRole};
use market_service::ModerationService;

// ============================================================================
// Creation and the approval queue
// ============================================================================

#[tokio::test]
async fn test_seller_submission_enters_queue() {
    let env = TestEnv::seeded().await;
    let moderation = ModerationService::new(&env.ctx);

    let product = moderation
        .create_product(&env.seller, listing_request("Road bike"))
        .await
        .unwrap();

    assert_eq!(product.status, ProductStatus::Pending);
    assert!(moderation.list_approved().await.unwrap().is_empty());
    assert_eq!(moderation.list_pending().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_admin_submission_goes_straight_to_catalog() {
    let env = TestEnv::seeded().await;
    let moderation = ModerationService::new(&env.ctx);

    let product = moderation
        .create_product(&env.admin, listing_request("Office chair"))
        .await
        .unwrap();

    assert_eq!(product.status, ProductStatus::Approved);
    assert!(moderation.list_pending().await.unwrap().is_empty());
    assert!(notification_kinds(&env.ctx, env.admin.id).await.is_empty());
}

#[tokio::test]
async fn test_every_admin_gets_exactly_one_approval_request() {
    let env = TestEnv::seeded().await;
    let second_admin = seed_user(&env.ctx, "Admin Two", UserRole::Admin).await;
    let moderation = ModerationService::new(&env.ctx);

    moderation
        .create_product(&env.seller, listing_request("Road bike"))
        .await
        .unwrap();

    for admin in [env.admin, second_admin] {
        let kinds = notification_kinds(&env.ctx, admin.id).await;
        assert_eq!(kinds, vec![NotificationKind::ProductApproval]);
    }
    // The seller gets nothing at submission time
    assert!(notification_kinds(&env.ctx, env.seller.id).await.is_empty());
}

// ============================================================================
// Status transitions
// ============================================================================

#[tokio::test]
async fn test_repeated_approval_notifies_once() {
    let env = TestEnv::seeded().await;
    let moderation = ModerationService::new(&env.ctx);

    let product = moderation
        .create_product(&env.seller, listing_request("Road bike"))
        .await
        .unwrap();

    moderation.approve(&env.admin, product.id).await.unwrap();
    moderation.approve(&env.admin, product.id).await.unwrap();
    moderation.approve(&env.admin, product.id).await.unwrap();

    assert_eq!(
        notification_kinds(&env.ctx, env.seller.id).await,
        vec![NotificationKind::ProductApproved]
    );
    assert_eq!(moderation.list_approved().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_reject_then_approve_notifies_in_order() {
    let env = TestEnv::seeded().await;
    let moderation = ModerationService::new(&env.ctx);

    let product = moderation
        .create_product(&env.seller, listing_request("Road bike"))
        .await
        .unwrap();

    moderation.reject(&env.admin, product.id).await.unwrap();
    moderation.approve(&env.admin, product.id).await.unwrap();

    assert_eq!(
        notification_kinds(&env.ctx, env.seller.id).await,
        vec![
            NotificationKind::ProductRejected,
            NotificationKind::ProductApproved,
        ]
    );
}

#[tokio::test]
async fn test_non_admin_cannot_moderate() {
    let env = TestEnv::seeded().await;
    let moderation = ModerationService::new(&env.ctx);

    let product = moderation
        .create_product(&env.seller, listing_request("Road bike"))
        .await
        .unwrap();

    let err = moderation.approve(&env.seller, product.id).await.unwrap_err();
    assert!(err.is_authorization());

    // Status untouched
    let fetched = moderation.get_product(product.id).await.unwrap();
    assert_eq!(fetched.status, ProductStatus::Pending);
}

#[tokio::test]
async fn test_catalog_never_shows_unapproved() {
    let env = TestEnv::seeded().await;
    let moderation = ModerationService::new(&env.ctx);

    let pending = moderation
        .create_product(&env.seller, listing_request("Pending"))
        .await
        .unwrap();
    let rejected = moderation
        .create_product(&env.seller, listing_request("Rejected"))
        .await
        .unwrap();
    moderation.reject(&env.admin, rejected.id).await.unwrap();
    let approved = moderation
        .create_product(&env.seller, listing_request("Approved"))
        .await
        .unwrap();
    moderation.approve(&env.admin, approved.id).await.unwrap();

    let catalog = moderation.list_approved().await.unwrap();
    assert_eq!(product_ids(&catalog), vec![approved.id]);

    let all = moderation.list_all().await.unwrap();
    assert_eq!(product_ids(&all), vec![pending.id, rejected.id, approved.id]);
}

// ============================================================================
// Deletion
// ============================================================================

#[tokio::test]
async fn test_delete_removes_everywhere_but_keeps_notifications() {
    let env = TestEnv::seeded().await;
    let moderation = ModerationService::new(&env.ctx);

    let product = moderation
        .create_product(&env.seller, listing_request("Road bike"))
        .await
        .unwrap();
    moderation.approve(&env.admin, product.id).await.unwrap();

    assert!(moderation.delete_product(&env.seller, product.id).await.unwrap());

    assert!(moderation.list_all().await.unwrap().is_empty());
    assert!(moderation
        .list_by_seller(env.seller.id)
        .await
        .unwrap()
        .is_empty());
    assert!(moderation.get_product(product.id).await.unwrap_err().is_not_found());

    // Notifications referencing the listing survive; consumers tolerate
    // the missing target.
    assert_eq!(
        notification_kinds(&env.ctx, env.admin.id).await,
        vec![NotificationKind::ProductApproval]
    );
}

#[tokio::test]
async fn test_admin_can_delete_someone_elses_listing() {
    let env = TestEnv::seeded().await;
    let moderation = ModerationService::new(&env.ctx);

    let product = moderation
        .create_product(&env.seller, listing_request("Road bike"))
        .await
        .unwrap();

    let err = moderation
        .delete_product(&env.buyer, product.id)
        .await
        .unwrap_err();
    assert!(err.is_authorization());

    assert!(moderation.delete_product(&env.admin, product.id).await.unwrap());
    // Gone means gone; a second delete is a quiet false
    assert!(!moderation.delete_product(&env.admin, product.id).await.unwrap());
}

// ============================================================================
// Comments and likes
// ============================================================================

#[tokio::test]
async fn test_comments_keep_insertion_order() {
    let env = TestEnv::seeded().await;
    let moderation = ModerationService::new(&env.ctx);

    let product = moderation
        .create_product(&env.seller, listing_request("Road bike"))
        .await
        .unwrap();

    for text in ["first", "second", "third"] {
        moderation
            .add_comment(
                &env.buyer,
                product.id,
                market_service::dto::requests::AddCommentRequest {
                    content: text.to_string(),
                },
            )
            .await
            .unwrap();
    }

    let fetched = moderation.get_product(product.id).await.unwrap();
    let contents: Vec<&str> = fetched.comments.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "second", "third"]);
    assert_eq!(fetched.comments[0].author_name, "Buyer One");
}

#[tokio::test]
async fn test_like_counter_is_monotonic() {
    let env = TestEnv::seeded().await;
    let moderation = ModerationService::new(&env.ctx);

    let product = moderation
        .create_product(&env.seller, listing_request("Road bike"))
        .await
        .unwrap();

    for expected in 1..=5 {
        let liked = moderation.toggle_like(product.id).await.unwrap();
        assert_eq!(liked.like_count, expected);
    }
}
