//! Product entity - a marketplace listing with its moderation state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Moderation state of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Product entity
///
/// Comments are owned inline: they live and die with the product, so
/// deleting a listing cascades to them without a second collection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Snowflake,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub images: Vec<String>,
    pub seller_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub like_count: u32,
    pub comments: Vec<Comment>,
    pub status: ProductStatus,
}

impl Product {
    /// Create a new Product
    ///
    /// Initial status is `Approved` only when the creating actor is an
    /// admin; everyone else enters the moderation queue as `Pending`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        title: String,
        description: String,
        price: f64,
        category: String,
        images: Vec<String>,
        seller_id: Snowflake,
        seller_is_admin: bool,
    ) -> Self {
        Self {
            id,
            title,
            description,
            price,
            category,
            images,
            seller_id,
            created_at: Utc::now(),
            like_count: 0,
            comments: Vec::new(),
            status: if seller_is_admin {
                ProductStatus::Approved
            } else {
                ProductStatus::Pending
            },
        }
    }

    /// Check if the listing is visible in the public catalog
    #[inline]
    pub fn is_public(&self) -> bool {
        self.status == ProductStatus::Approved
    }

    /// Check if the listing is waiting on moderation
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == ProductStatus::Pending
    }

    /// Append a comment (comments are append-only)
    pub fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Increment the like counter
    ///
    /// The counter is monotonic: the source behavior never decrements,
    /// and that literal behavior is preserved here.
    pub fn add_like(&mut self) {
        self.like_count = self.like_count.saturating_add(1);
    }

    /// Short title-and-price summary used in notification bodies
    pub fn summary(&self) -> String {
        format!("\"{}\" (${:.2})", self.title, self.price)
    }
}

/// Comment on a product
///
/// Author display fields are denormalized at creation time so a comment
/// stays renderable even if the author later disappears from the
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub author_name: String,
    pub author_avatar: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new Comment stamped with the current time
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        author_name: String,
        author_avatar: String,
        content: String,
    ) -> Self {
        Self {
            id,
            author_id,
            author_name,
            author_avatar,
            content,
            created_at: Utc::now(),
        }
    }
}
