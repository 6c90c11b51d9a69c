//! Message entity - one direct message between two users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Direct message
///
/// A message belongs to the unordered pair {sender, receiver}; the
/// conversation a viewer sees is the derived, time-sorted subsequence for
/// one such pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub receiver_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

impl Message {
    /// Create a new unread Message stamped with the current time
    pub fn new(id: Snowflake, sender_id: Snowflake, receiver_id: Snowflake, content: String) -> Self {
        Self {
            id,
            sender_id,
            receiver_id,
            content,
            created_at: Utc::now(),
            read: false,
        }
    }

    /// Check whether `user_id` is the sender or the receiver
    #[inline]
    pub fn involves(&self, user_id: Snowflake) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    /// The other participant, relative to `viewer_id`
    ///
    /// Returns the sender when the viewer is the receiver and vice versa;
    /// callers must only pass a viewer that `involves` this message.
    #[inline]
    pub fn counterpart_of(&self, viewer_id: Snowflake) -> Snowflake {
        if self.sender_id == viewer_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }

    /// Check whether this message counts toward `viewer_id`'s unread total
    #[inline]
    pub fn is_unread_for(&self, viewer_id: Snowflake) -> bool {
        self.receiver_id == viewer_id && !self.read
    }

    /// Truncated preview used in thread listings
    pub fn preview(&self, max_len: usize) -> &str {
        if self.content.len() <= max_len {
            &self.content
        } else {
            let mut end = max_len;
            while !self.content.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.content[..end]
        }
    }
}
