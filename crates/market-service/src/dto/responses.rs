//! Response DTOs
//!
//! All response DTOs implement `Serialize`. Snowflake ids serialize as
//! strings through the value object itself.

use chrono::{DateTime, Utc};
use serde::Serialize;

use market_core::entities::{NotificationKind, ProductStatus, UserRole};
use market_core::Snowflake;

/// The authenticated user's own record
///
/// The only user response that carries the email. Never carries the
/// credential; that stays in the store layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponse {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar_ref: String,
    pub created_at: DateTime<Utc>,
}

/// A user as seen by everyone else
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUserResponse {
    pub id: Snowflake,
    pub name: String,
    pub avatar_ref: String,
}

impl PublicUserResponse {
    /// Placeholder identity for a counterpart missing from the directory
    pub fn placeholder(id: Snowflake) -> Self {
        Self {
            id,
            name: "Unknown user".to_string(),
            avatar_ref: String::new(),
        }
    }
}

/// A listing with its inline comments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductResponse {
    pub id: Snowflake,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub images: Vec<String>,
    pub seller_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub like_count: u32,
    pub status: ProductStatus,
    pub comments: Vec<CommentResponse>,
}

/// One comment on a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentResponse {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub author_name: String,
    pub author_avatar: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// One direct message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub receiver_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

/// One assembled conversation in the inbox
///
/// `messages` is ascending by time; `last_activity` is `None` for a
/// conversation that was started but never written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationThread {
    pub counterpart: PublicUserResponse,
    pub messages: Vec<MessageResponse>,
    pub unread_count: u64,
    pub last_activity: Option<DateTime<Utc>>,
    pub preview: Option<String>,
}

/// One notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationResponse {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub product_id: Option<Snowflake>,
}
