//! JSON-collection implementation of UserRepository

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use market_core::entities::{User, UserRole};
use market_core::traits::{RepoResult, UserRepository};
use market_core::value_objects::Snowflake;

use crate::collection::JsonCollection;
use crate::models::StoredUser;

/// Identity directory backed by the `users` collection
#[derive(Clone)]
pub struct JsonUserRepository {
    users: Arc<JsonCollection<StoredUser>>,
}

impl JsonUserRepository {
    pub fn new(users: Arc<JsonCollection<StoredUser>>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserRepository for JsonUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.users.get(id).map(|stored| stored.user))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .filter(|stored| stored.user.email.eq_ignore_ascii_case(email))
            .into_iter()
            .map(|stored| stored.user)
            .next())
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    #[instrument(skip(self))]
    async fn list_by_role(&self, role: UserRole) -> RepoResult<Vec<User>> {
        Ok(self
            .users
            .filter(|stored| stored.user.role == role)
            .into_iter()
            .map(|stored| stored.user)
            .collect())
    }

    #[instrument(skip(self, credential))]
    async fn create(&self, user: &User, credential: &str) -> RepoResult<()> {
        self.users.upsert(StoredUser {
            user: user.clone(),
            credential: credential.to_string(),
        })
    }

    #[instrument(skip(self, user))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        // Keep the stored credential; only the profile fields change.
        let credential = self
            .users
            .get(user.id)
            .map(|stored| stored.credential)
            .unwrap_or_default();
        self.users.upsert(StoredUser {
            user: user.clone(),
            credential,
        })
    }

    #[instrument(skip(self))]
    async fn get_credential(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.users.get(id).map(|stored| stored.credential))
    }
}
