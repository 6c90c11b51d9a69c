//! Inbox service - conversation assembly over the flat message log
//!
//! The store keeps one append-only message log; everything thread-shaped
//! is derived here at read time. A conversation is the unordered pair
//! {viewer, counterpart}.

use std::cmp::Reverse;
use std::collections::HashMap;

use tracing::{info, instrument};

use market_core::entities::{Actor, Message};
use market_core::{DomainError, DomainEvent, Snowflake};

use crate::dto::responses::{ConversationThread, MessageResponse, PublicUserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Characters of the latest message shown in thread listings
const PREVIEW_LEN: usize = 80;

/// Inbox service
pub struct InboxService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InboxService<'a> {
    /// Create a new InboxService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Assemble the viewer's inbox
    ///
    /// Partitions every message involving the viewer by counterpart,
    /// sorts each thread ascending by time (ids break ties), and orders
    /// threads by descending unread count, then descending latest
    /// activity. Conversations that were started but never written to
    /// sort last. A counterpart missing from the directory gets a
    /// placeholder identity; one bad row never sinks the whole inbox.
    #[instrument(skip(self))]
    pub async fn load_inbox(&self, viewer_id: Snowflake) -> ServiceResult<Vec<ConversationThread>> {
        self.ctx.simulate_latency().await;

        let messages = self.ctx.message_repo().find_by_participant(viewer_id).await?;

        let mut partitions: HashMap<Snowflake, Vec<Message>> = HashMap::new();
        let mut counterpart_order: Vec<Snowflake> = Vec::new();
        for message in messages {
            let counterpart = message.counterpart_of(viewer_id);
            let thread = partitions.entry(counterpart).or_insert_with(|| {
                counterpart_order.push(counterpart);
                Vec::new()
            });
            thread.push(message);
        }

        // Explicitly started conversations appear even with no messages yet
        for counterpart in self.ctx.message_repo().contacts_of(viewer_id).await? {
            if !partitions.contains_key(&counterpart) {
                partitions.insert(counterpart, Vec::new());
                counterpart_order.push(counterpart);
            }
        }

        let mut threads = Vec::with_capacity(counterpart_order.len());
        for counterpart_id in counterpart_order {
            let mut messages = partitions.remove(&counterpart_id).unwrap_or_default();
            messages.sort_by_key(|m| (m.created_at, m.id));

            let unread_count = messages
                .iter()
                .filter(|m| m.is_unread_for(viewer_id))
                .count() as u64;
            let last_activity = messages.last().map(|m| m.created_at);
            let preview = messages.last().map(|m| m.preview(PREVIEW_LEN).to_string());

            let counterpart = match self.ctx.user_repo().find_by_id(counterpart_id).await? {
                Some(user) => user.into(),
                None => PublicUserResponse::placeholder(counterpart_id),
            };

            threads.push(ConversationThread {
                counterpart,
                messages: messages.into_iter().map(MessageResponse::from).collect(),
                unread_count,
                last_activity,
                preview,
            });
        }

        // Unread first, then most recent; empty threads at the bottom
        threads.sort_by_key(|t| {
            (
                t.last_activity.is_none(),
                Reverse(t.unread_count),
                Reverse(t.last_activity),
            )
        });

        Ok(threads)
    }

    /// Record a counterpart so an empty thread shows up in the inbox
    #[instrument(skip(self))]
    pub async fn start_conversation(
        &self,
        viewer_id: Snowflake,
        counterpart_id: Snowflake,
    ) -> ServiceResult<()> {
        self.ctx.simulate_latency().await;

        self.ctx
            .message_repo()
            .record_contact(viewer_id, counterpart_id)
            .await?;
        Ok(())
    }

    /// Append one message to the log
    ///
    /// The receiver does not have to exist in the directory; the inbox
    /// synthesizes a placeholder for unknown counterparts.
    #[instrument(skip(self, content), fields(sender_id = %actor.id))]
    pub async fn send(
        &self,
        actor: &Actor,
        receiver_id: Snowflake,
        content: &str,
    ) -> ServiceResult<MessageResponse> {
        self.ctx.simulate_latency().await;

        if content.trim().is_empty() {
            return Err(DomainError::EmptyContent.into());
        }

        let message = Message::new(
            self.ctx.generate_id(),
            actor.id,
            receiver_id,
            content.to_string(),
        );
        self.ctx.message_repo().create(&message).await?;

        info!(message_id = %message.id, receiver_id = %receiver_id, "message sent");

        self.ctx.publish(DomainEvent::MessageSent {
            message_id: message.id,
            sender_id: actor.id,
            receiver_id,
        });

        Ok(message.into())
    }

    /// Open one conversation, marking everything unread in it read
    ///
    /// Atomic within the message collection; other threads keep their
    /// unread state. Returns the thread's unread count after the update,
    /// which is always zero on success.
    #[instrument(skip(self))]
    pub async fn open_conversation(
        &self,
        viewer_id: Snowflake,
        counterpart_id: Snowflake,
    ) -> ServiceResult<u64> {
        self.ctx.simulate_latency().await;

        let updated = self
            .ctx
            .message_repo()
            .mark_conversation_read(viewer_id, counterpart_id)
            .await?;
        if updated > 0 {
            info!(viewer_id = %viewer_id, counterpart_id = %counterpart_id, updated, "conversation read");
        }
        Ok(0)
    }

    /// Total unread messages across every conversation (navbar badge)
    #[instrument(skip(self))]
    pub async fn unread_total(&self, viewer_id: Snowflake) -> ServiceResult<u64> {
        self.ctx.simulate_latency().await;

        let messages = self.ctx.message_repo().find_by_participant(viewer_id).await?;
        Ok(messages.iter().filter(|m| m.is_unread_for(viewer_id)).count() as u64)
    }
}
