//! Notification entity - a per-user event record created by the moderation workflow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Kind of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Sent to every admin when a listing enters the moderation queue
    ProductApproval,
    /// Sent to the seller when their listing is approved
    ProductApproved,
    /// Sent to the seller when their listing is rejected
    ProductRejected,
    General,
}

/// Notification record
///
/// `product_id` may reference a listing that has since been deleted;
/// consumers must tolerate a missing target rather than fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub product_id: Option<Snowflake>,
}

impl Notification {
    /// Create a new unread Notification stamped with the current time
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        title: String,
        message: String,
        kind: NotificationKind,
        product_id: Option<Snowflake>,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            message,
            kind,
            read: false,
            created_at: Utc::now(),
            product_id,
        }
    }

    /// Mark as read (recipient opened it)
    pub fn mark_read(&mut self) {
        self.read = true;
    }

    /// Check whether this notification references a product
    #[inline]
    pub fn references_product(&self) -> bool {
        self.product_id.is_some()
    }
}
