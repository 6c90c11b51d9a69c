//! JSON-collection implementation of MessageRepository

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use market_core::entities::Message;
use market_core::traits::{MessageRepository, RepoResult};
use market_core::value_objects::Snowflake;

use crate::collection::JsonCollection;
use crate::models::ContactList;

/// Append-only message log plus the per-user contact listing
#[derive(Clone)]
pub struct JsonMessageRepository {
    messages: Arc<JsonCollection<Message>>,
    contacts: Arc<JsonCollection<ContactList>>,
}

impl JsonMessageRepository {
    pub fn new(
        messages: Arc<JsonCollection<Message>>,
        contacts: Arc<JsonCollection<ContactList>>,
    ) -> Self {
        Self { messages, contacts }
    }
}

fn is_between(message: &Message, a: Snowflake, b: Snowflake) -> bool {
    (message.sender_id == a && message.receiver_id == b)
        || (message.sender_id == b && message.receiver_id == a)
}

#[async_trait]
impl MessageRepository for JsonMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_participant(&self, user_id: Snowflake) -> RepoResult<Vec<Message>> {
        Ok(self.messages.filter(|m| m.involves(user_id)))
    }

    #[instrument(skip(self))]
    async fn find_conversation(&self, a: Snowflake, b: Snowflake) -> RepoResult<Vec<Message>> {
        Ok(self.messages.filter(|m| is_between(m, a, b)))
    }

    #[instrument(skip(self, message))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.messages.upsert(message.clone())
    }

    #[instrument(skip(self))]
    async fn mark_conversation_read(
        &self,
        viewer_id: Snowflake,
        counterpart_id: Snowflake,
    ) -> RepoResult<u64> {
        // One pass under the collection write lock: all-or-nothing for
        // this conversation, other threads untouched.
        self.messages.mutate_all(|m| {
            if is_between(m, viewer_id, counterpart_id) && m.is_unread_for(viewer_id) {
                m.read = true;
                true
            } else {
                false
            }
        })
    }

    #[instrument(skip(self))]
    async fn record_contact(&self, user_id: Snowflake, counterpart_id: Snowflake) -> RepoResult<()> {
        let mut list = self
            .contacts
            .get(user_id)
            .unwrap_or_else(|| ContactList::new(user_id));
        if list.add(counterpart_id) {
            self.contacts.upsert(list)?;
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn contacts_of(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        Ok(self
            .contacts
            .get(user_id)
            .map(|list| list.counterparts)
            .unwrap_or_default())
    }
}
