//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the store layer provides the
//! implementation over JSON-backed collections. All implementations must
//! preserve the logical-collection semantics: one keyed collection per
//! entity kind, lookups by id, status/participant filters.

use async_trait::async_trait;

use crate::entities::{Message, Notification, Product, ProductStatus, User, UserRole};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository (Identity Directory)
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by id
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// List every user with the given role (admin fan-out uses this)
    async fn list_by_role(&self, role: UserRole) -> RepoResult<Vec<User>>;

    /// Create a new user; the plaintext credential stays inside the store
    async fn create(&self, user: &User, credential: &str) -> RepoResult<()>;

    /// Update an existing user (role changes are rejected by the services)
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get the stored credential for login comparison
    async fn get_credential(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Product Repository (Catalog)
// ============================================================================

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find product by id
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Product>>;

    /// List the full catalog regardless of status, in creation order
    async fn find_all(&self) -> RepoResult<Vec<Product>>;

    /// List products with the given moderation status
    async fn find_by_status(&self, status: ProductStatus) -> RepoResult<Vec<Product>>;

    /// List a seller's products regardless of status
    async fn find_by_seller(&self, seller_id: Snowflake) -> RepoResult<Vec<Product>>;

    /// Create a new product
    async fn create(&self, product: &Product) -> RepoResult<()>;

    /// Replace an existing product record (fields, status, comments, likes)
    async fn update(&self, product: &Product) -> RepoResult<()>;

    /// Permanently delete a product and its inline comments
    ///
    /// Returns false when no product had that id.
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Message Repository (append-only log + contact list)
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Every message in which `user_id` is sender or receiver, in insertion order
    async fn find_by_participant(&self, user_id: Snowflake) -> RepoResult<Vec<Message>>;

    /// Messages between the unordered pair {a, b}, in insertion order
    async fn find_conversation(&self, a: Snowflake, b: Snowflake) -> RepoResult<Vec<Message>>;

    /// Append a message; prior messages are never mutated or reordered
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Mark every unread message addressed to `viewer_id` within the
    /// {viewer, counterpart} pair as read, atomically within the
    /// collection lock. Returns the number of messages updated.
    async fn mark_conversation_read(
        &self,
        viewer_id: Snowflake,
        counterpart_id: Snowflake,
    ) -> RepoResult<u64>;

    /// Record that `user_id` explicitly started a conversation with
    /// `counterpart_id`, so an empty thread shows up in the inbox.
    async fn record_contact(&self, user_id: Snowflake, counterpart_id: Snowflake) -> RepoResult<()>;

    /// Counterparts `user_id` has explicitly started conversations with
    async fn contacts_of(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>>;
}

// ============================================================================
// Notification Repository (Notification Center)
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// All notifications addressed to `user_id`, in creation order
    ///
    /// Must return an empty list (never an error) when the collection is
    /// absent or empty; the UI polls this on an interval.
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Notification>>;

    /// Unread notifications addressed to `user_id`
    async fn find_unread_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Notification>>;

    /// Create a notification
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Find notification by id
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>>;

    /// Mark one notification read; returns false on unknown id
    async fn mark_read(&self, id: Snowflake) -> RepoResult<bool>;

    /// Mark every notification for `user_id` read; returns the count updated
    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64>;

    /// Delete one notification; returns false on unknown id
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;
}
