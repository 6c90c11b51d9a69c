//! Store-layer record shapes
//!
//! Most entities serialize into their collections as-is; the exceptions
//! live here.

use serde::{Deserialize, Serialize};

use market_core::entities::{Message, Notification, Product, User};
use market_core::value_objects::Snowflake;

use crate::collection::Record;

/// User record as stored on disk
///
/// Wraps the domain `User` with the plaintext login credential, which is
/// demo-grade by design and must never travel past the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(flatten)]
    pub user: User,
    pub credential: String,
}

impl Record for StoredUser {
    fn key(&self) -> Snowflake {
        self.user.id
    }
}

/// Per-user auxiliary listing of explicitly started conversations
///
/// Lets the inbox show an empty thread before the first message is sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactList {
    pub user_id: Snowflake,
    pub counterparts: Vec<Snowflake>,
}

impl ContactList {
    pub fn new(user_id: Snowflake) -> Self {
        Self {
            user_id,
            counterparts: Vec::new(),
        }
    }

    /// Add a counterpart once; repeated starts are no-ops
    pub fn add(&mut self, counterpart_id: Snowflake) -> bool {
        if self.counterparts.contains(&counterpart_id) {
            false
        } else {
            self.counterparts.push(counterpart_id);
            true
        }
    }
}

impl Record for ContactList {
    fn key(&self) -> Snowflake {
        self.user_id
    }
}

impl Record for Product {
    fn key(&self) -> Snowflake {
        self.id
    }
}

impl Record for Message {
    fn key(&self) -> Snowflake {
        self.id
    }
}

impl Record for Notification {
    fn key(&self) -> Snowflake {
        self.id
    }
}
