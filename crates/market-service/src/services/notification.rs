//! Notification service - per-user notification center
//!
//! Emission is the boundary the moderation workflow calls into; reads are
//! poll-friendly and never fail on an empty collection.

use tokio::sync::broadcast;
use tracing::{info, instrument};

use market_core::entities::{Actor, Notification, NotificationKind};
use market_core::{DomainError, DomainEvent, Snowflake};

use crate::dto::responses::NotificationResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a notification for one recipient
    ///
    /// Internal boundary used by the moderation workflow; does not await
    /// the artificial latency because it always runs inside an operation
    /// that already did.
    #[instrument(skip(self, title, message))]
    pub async fn emit(
        &self,
        user_id: Snowflake,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        product_id: Option<Snowflake>,
    ) -> ServiceResult<NotificationResponse> {
        let notification = Notification::new(
            self.ctx.generate_id(),
            user_id,
            title.into(),
            message.into(),
            kind,
            product_id,
        );
        self.ctx.notification_repo().create(&notification).await?;

        info!(notification_id = %notification.id, user_id = %user_id, "notification created");

        self.ctx.publish(DomainEvent::NotificationCreated {
            notification_id: notification.id,
            user_id,
        });

        Ok(notification.into())
    }

    /// All notifications for one user, oldest first
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: Snowflake) -> ServiceResult<Vec<NotificationResponse>> {
        self.ctx.simulate_latency().await;

        let notifications = self.ctx.notification_repo().find_by_user(user_id).await?;
        Ok(notifications.into_iter().map(Into::into).collect())
    }

    /// Unread notifications for one user
    #[instrument(skip(self))]
    pub async fn list_unread(&self, user_id: Snowflake) -> ServiceResult<Vec<NotificationResponse>> {
        self.ctx.simulate_latency().await;

        let notifications = self
            .ctx
            .notification_repo()
            .find_unread_by_user(user_id)
            .await?;
        Ok(notifications.into_iter().map(Into::into).collect())
    }

    /// Mark one notification read; recipient only
    #[instrument(skip(self))]
    pub async fn mark_read(&self, actor: &Actor, notification_id: Snowflake) -> ServiceResult<()> {
        self.ctx.simulate_latency().await;

        let notification = self
            .ctx
            .notification_repo()
            .find_by_id(notification_id)
            .await?
            .ok_or(DomainError::NotificationNotFound(notification_id))?;

        if notification.user_id != actor.id {
            return Err(DomainError::NotRecipient.into());
        }

        self.ctx.notification_repo().mark_read(notification_id).await?;
        Ok(())
    }

    /// Mark every notification of the actor read; returns the count updated
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, actor: &Actor) -> ServiceResult<u64> {
        self.ctx.simulate_latency().await;

        let updated = self.ctx.notification_repo().mark_all_read(actor.id).await?;
        if updated > 0 {
            info!(user_id = %actor.id, updated, "notifications marked read");
        }
        Ok(updated)
    }

    /// Delete one notification; recipient only, false when already gone
    #[instrument(skip(self))]
    pub async fn delete(&self, actor: &Actor, notification_id: Snowflake) -> ServiceResult<bool> {
        self.ctx.simulate_latency().await;

        let Some(notification) = self
            .ctx
            .notification_repo()
            .find_by_id(notification_id)
            .await?
        else {
            return Ok(false);
        };

        if notification.user_id != actor.id {
            return Err(DomainError::NotRecipient.into());
        }

        self.ctx.notification_repo().delete(notification_id).await
            .map_err(ServiceError::from)
    }

    /// Subscribe to the domain event bus for push-style consumers
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.ctx.subscribe()
    }
}
