//! JSON-collection implementation of NotificationRepository

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use market_core::entities::Notification;
use market_core::traits::{NotificationRepository, RepoResult};
use market_core::value_objects::Snowflake;

use crate::collection::JsonCollection;

/// Notification center backed by the `notifications` collection
#[derive(Clone)]
pub struct JsonNotificationRepository {
    notifications: Arc<JsonCollection<Notification>>,
}

impl JsonNotificationRepository {
    pub fn new(notifications: Arc<JsonCollection<Notification>>) -> Self {
        Self { notifications }
    }
}

#[async_trait]
impl NotificationRepository for JsonNotificationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>> {
        Ok(self.notifications.get(id))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Notification>> {
        Ok(self.notifications.filter(|n| n.user_id == user_id))
    }

    #[instrument(skip(self))]
    async fn find_unread_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Notification>> {
        Ok(self.notifications.filter(|n| n.user_id == user_id && !n.read))
    }

    #[instrument(skip(self, notification))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        self.notifications.upsert(notification.clone())
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: Snowflake) -> RepoResult<bool> {
        let changed = self.notifications.mutate_all(|n| {
            if n.id == id && !n.read {
                n.mark_read();
                true
            } else {
                false
            }
        })?;
        // A read notification also counts as found.
        Ok(changed > 0 || self.notifications.get(id).is_some())
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64> {
        self.notifications.mutate_all(|n| {
            if n.user_id == user_id && !n.read {
                n.mark_read();
                true
            } else {
                false
            }
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        self.notifications.remove(id)
    }
}
