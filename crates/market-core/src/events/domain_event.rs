//! Domain events - emitted when workflow state changes
//!
//! These events feed the in-process broadcast bus so push-style consumers
//! (e.g. a notification badge) can react without polling the store.

use serde::{Deserialize, Serialize};

use crate::entities::ProductStatus;
use crate::value_objects::Snowflake;

/// All possible domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    /// A listing entered the moderation queue
    ProductSubmitted {
        product_id: Snowflake,
        seller_id: Snowflake,
    },

    /// An admin moved a listing to a new status
    ProductStatusChanged {
        product_id: Snowflake,
        seller_id: Snowflake,
        status: ProductStatus,
    },

    /// A listing was permanently removed
    ProductDeleted { product_id: Snowflake },

    /// A direct message was appended to the log
    MessageSent {
        message_id: Snowflake,
        sender_id: Snowflake,
        receiver_id: Snowflake,
    },

    /// A notification was created for a recipient
    NotificationCreated {
        notification_id: Snowflake,
        user_id: Snowflake,
    },
}

impl DomainEvent {
    /// The user most directly affected by this event, if any
    ///
    /// Used by subscribers that only care about events addressed to one
    /// viewer.
    pub fn recipient(&self) -> Option<Snowflake> {
        match self {
            Self::ProductSubmitted { .. } | Self::ProductDeleted { .. } => None,
            Self::ProductStatusChanged { seller_id, .. } => Some(*seller_id),
            Self::MessageSent { receiver_id, .. } => Some(*receiver_id),
            Self::NotificationCreated { user_id, .. } => Some(*user_id),
        }
    }
}
