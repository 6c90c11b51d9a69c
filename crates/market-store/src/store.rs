//! Store assembly: opens every collection and hands out repositories

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use market_core::entities::{Message, Notification, Product};
use market_core::error::DomainError;

use crate::collection::JsonCollection;
use crate::models::{ContactList, StoredUser};
use crate::repositories::{
    JsonMessageRepository, JsonNotificationRepository, JsonProductRepository, JsonUserRepository,
};

/// All collections for one data directory, opened together
///
/// Cloning is cheap; clones share the underlying collections.
#[derive(Clone)]
pub struct MarketStore {
    users: Arc<JsonCollection<StoredUser>>,
    products: Arc<JsonCollection<Product>>,
    messages: Arc<JsonCollection<Message>>,
    notifications: Arc<JsonCollection<Notification>>,
    contacts: Arc<JsonCollection<ContactList>>,
}

impl MarketStore {
    /// Open the store rooted at `data_dir`, or memory-only when `None`
    pub fn open(data_dir: Option<&Path>) -> Result<Self, DomainError> {
        let store = Self {
            users: Arc::new(JsonCollection::open("users", data_dir)?),
            products: Arc::new(JsonCollection::open("products", data_dir)?),
            messages: Arc::new(JsonCollection::open("messages", data_dir)?),
            notifications: Arc::new(JsonCollection::open("notifications", data_dir)?),
            contacts: Arc::new(JsonCollection::open("contacts", data_dir)?),
        };

        info!(
            data_dir = ?data_dir,
            users = store.users.len(),
            products = store.products.len(),
            messages = store.messages.len(),
            notifications = store.notifications.len(),
            "store opened"
        );

        Ok(store)
    }

    /// Memory-only store for tests and ephemeral runs
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(JsonCollection::in_memory("users")),
            products: Arc::new(JsonCollection::in_memory("products")),
            messages: Arc::new(JsonCollection::in_memory("messages")),
            notifications: Arc::new(JsonCollection::in_memory("notifications")),
            contacts: Arc::new(JsonCollection::in_memory("contacts")),
        }
    }

    pub fn user_repository(&self) -> JsonUserRepository {
        JsonUserRepository::new(Arc::clone(&self.users))
    }

    pub fn product_repository(&self) -> JsonProductRepository {
        JsonProductRepository::new(Arc::clone(&self.products))
    }

    pub fn message_repository(&self) -> JsonMessageRepository {
        JsonMessageRepository::new(Arc::clone(&self.messages), Arc::clone(&self.contacts))
    }

    pub fn notification_repository(&self) -> JsonNotificationRepository {
        JsonNotificationRepository::new(Arc::clone(&self.notifications))
    }
}
