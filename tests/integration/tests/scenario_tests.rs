//! End-to-end scenarios across every service
//!
//! Run with: cargo test -p integration-tests --test scenario_tests

use integration_tests::{
    empty_context, listing_request, notification_kinds, register_request, seed_user,
    unread_notification_count, TestEnv,
};
use market_common::AppConfig;
use market_core::entities::{Actor, NotificationKind, ProductStatus, UserRole};
use market_core::DomainEvent;
use market_service::dto::requests::LoginRequest;
use market_service::{
    AuthService, InboxService, ModerationService, NotificationService, ServiceContext,
};
use market_store::MarketStore;

/// The full marketplace lifecycle: registration, submission, moderation,
/// conversation, and notification consumption.
#[tokio::test]
async fn test_full_marketplace_lifecycle() {
    let ctx = empty_context();
    let admin = seed_user(&ctx, "Admin One", UserRole::Admin).await;

    let auth = AuthService::new(&ctx);
    let moderation = ModerationService::new(&ctx);
    let inbox = InboxService::new(&ctx);
    let notifications = NotificationService::new(&ctx);

    // A visitor registers and logs back in.
    let request = register_request();
    let registered = auth.register(request.clone()).await.unwrap();
    assert_eq!(registered.role, UserRole::User);

    let logged_in = auth
        .login(LoginRequest {
            email: request.email.clone(),
            password: request.password.clone(),
        })
        .await
        .unwrap();
    assert_eq!(logged_in.id, registered.id);
    let seller = Actor::new(logged_in.id, logged_in.role);

    // They list a product; it lands in the moderation queue.
    let product = moderation
        .create_product(&seller, listing_request("Espresso machine"))
        .await
        .unwrap();
    assert_eq!(product.status, ProductStatus::Pending);
    assert!(moderation.list_approved().await.unwrap().is_empty());

    // The admin sees the approval request and approves.
    let admin_inbox = notifications.list_unread(admin.id).await.unwrap();
    assert_eq!(admin_inbox.len(), 1);
    assert_eq!(admin_inbox[0].kind, NotificationKind::ProductApproval);
    assert_eq!(admin_inbox[0].product_id, Some(product.id));

    moderation.approve(&admin, product.id).await.unwrap();

    // The catalog now carries the listing; the seller was told once.
    let catalog = moderation.list_approved().await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].id, product.id);
    assert_eq!(
        notification_kinds(&ctx, seller.id).await,
        vec![NotificationKind::ProductApproved]
    );

    // A buyer registers, asks a question in the comments and by message.
    let buyer_req = register_request();
    let buyer_user = auth.register(buyer_req).await.unwrap();
    let buyer = Actor::new(buyer_user.id, buyer_user.role);

    moderation
        .add_comment(
            &buyer,
            product.id,
            market_service::dto::requests::AddCommentRequest {
                content: "Does it come with the grinder?".to_string(),
            },
        )
        .await
        .unwrap();
    inbox.send(&buyer, seller.id, "Hi, still available?").await.unwrap();

    // The seller opens the conversation and replies.
    assert_eq!(inbox.unread_total(seller.id).await.unwrap(), 1);
    inbox.open_conversation(seller.id, buyer.id).await.unwrap();
    assert_eq!(inbox.unread_total(seller.id).await.unwrap(), 0);
    inbox.send(&seller, buyer.id, "Yes, grinder included").await.unwrap();

    let buyer_threads = inbox.load_inbox(buyer.id).await.unwrap();
    assert_eq!(buyer_threads.len(), 1);
    assert_eq!(buyer_threads[0].unread_count, 1);
    assert_eq!(buyer_threads[0].messages.len(), 2);

    // The admin clears their notification center.
    assert_eq!(unread_notification_count(&ctx, admin.id).await, 1);
    let cleared = notifications.mark_all_read(&admin).await.unwrap();
    assert_eq!(cleared, 1);
    assert_eq!(unread_notification_count(&ctx, admin.id).await, 0);

    // The sale concludes and the listing goes away; history stays.
    assert!(moderation.delete_product(&seller, product.id).await.unwrap());
    assert!(moderation.get_product(product.id).await.unwrap_err().is_not_found());
    assert_eq!(
        notification_kinds(&ctx, seller.id).await,
        vec![NotificationKind::ProductApproved]
    );
}

/// Subscribers on the event bus observe the workflow as it happens.
#[tokio::test]
async fn test_event_bus_mirrors_the_workflow() {
    let env = TestEnv::seeded().await;
    let moderation = ModerationService::new(&env.ctx);
    let mut rx = env.ctx.subscribe();

    let product = moderation
        .create_product(&env.seller, listing_request("Turntable"))
        .await
        .unwrap();
    moderation.approve(&env.admin, product.id).await.unwrap();

    let mut seen = Vec::new();
    while let Ok(event) = rx.try_recv() {
        seen.push(event);
    }

    assert!(matches!(seen[0], DomainEvent::ProductSubmitted { product_id, .. } if product_id == product.id));
    assert!(seen.iter().any(|e| matches!(
        e,
        DomainEvent::ProductStatusChanged { status: ProductStatus::Approved, .. }
    )));
    // Admin fan-out and the seller outcome both crossed the bus
    assert!(
        seen.iter()
            .filter(|e| matches!(e, DomainEvent::NotificationCreated { .. }))
            .count()
            >= 2
    );
}

/// Collections survive a full close-and-reopen of the store.
#[tokio::test]
async fn test_state_survives_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::for_tests();

    let (seller, product_id) = {
        let store = MarketStore::open(Some(dir.path())).unwrap();
        let ctx = ServiceContext::from_store(&store, &config);
        let admin = seed_user(&ctx, "Admin One", UserRole::Admin).await;
        let seller = seed_user(&ctx, "Seller One", UserRole::User).await;

        let moderation = ModerationService::new(&ctx);
        let product = moderation
            .create_product(&seller, listing_request("Bookshelf"))
            .await
            .unwrap();
        moderation.approve(&admin, product.id).await.unwrap();
        (seller, product.id)
    };

    let store = MarketStore::open(Some(dir.path())).unwrap();
    let ctx = ServiceContext::from_store(&store, &config);
    let moderation = ModerationService::new(&ctx);

    let catalog = moderation.list_approved().await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].id, product_id);
    assert_eq!(
        notification_kinds(&ctx, seller.id).await,
        vec![NotificationKind::ProductApproved]
    );
}
