//! Test helpers for scenario assertions

use market_core::entities::NotificationKind;
use market_core::Snowflake;
use market_service::dto::responses::{ConversationThread, ProductResponse};
use market_service::ServiceContext;

/// Notification kinds delivered to one user, in creation order
pub async fn notification_kinds(ctx: &ServiceContext, user_id: Snowflake) -> Vec<NotificationKind> {
    ctx.notification_repo()
        .find_by_user(user_id)
        .await
        .expect("list notifications")
        .into_iter()
        .map(|n| n.kind)
        .collect()
}

/// Count of unread notifications for one user
pub async fn unread_notification_count(ctx: &ServiceContext, user_id: Snowflake) -> usize {
    ctx.notification_repo()
        .find_unread_by_user(user_id)
        .await
        .expect("list unread notifications")
        .len()
}

/// Counterpart ids of an assembled inbox, in thread order
pub fn thread_order(threads: &[ConversationThread]) -> Vec<Snowflake> {
    threads.iter().map(|t| t.counterpart.id).collect()
}

/// Ids of a listing collection
pub fn product_ids(products: &[ProductResponse]) -> Vec<Snowflake> {
    products.iter().map(|p| p.id).collect()
}
