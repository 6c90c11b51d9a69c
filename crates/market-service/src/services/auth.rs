//! Auth service - the identity directory
//!
//! Registration, login, and the lookups the other workflows consume.
//! Credentials are plaintext and advisory by design; nothing here is a
//! security boundary.

use rand::seq::SliceRandom;
use tracing::{info, instrument};
use validator::Validate;

use market_common::AppError;
use market_core::entities::{User, UserRole};
use market_core::Snowflake;

use crate::dto::requests::{LoginRequest, RegisterRequest};
use crate::dto::responses::{CurrentUserResponse, PublicUserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Background colors for synthesized avatars
const AVATAR_PALETTE: [&str; 6] = ["2563eb", "7c3aed", "db2777", "ea580c", "16a34a", "0891b2"];

/// Auth service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account
    ///
    /// The role is always `User`; admin accounts only exist through
    /// seeding.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<CurrentUserResponse> {
        self.ctx.simulate_latency().await;
        request.validate()?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::conflict("Email already in use"));
        }

        let user = User::new(
            self.ctx.generate_id(),
            request.name.clone(),
            request.email.to_lowercase(),
            UserRole::User,
            synthesize_avatar_ref(&request.name),
        );
        self.ctx.user_repo().create(&user, &request.password).await?;

        info!(user_id = %user.id, "user registered");

        Ok(user.into())
    }

    /// Log in with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<CurrentUserResponse> {
        self.ctx.simulate_latency().await;
        request.validate()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let credential = self
            .ctx
            .user_repo()
            .get_credential(user.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // Plaintext comparison, demo-only
        if credential != request.password {
            return Err(AppError::InvalidCredentials.into());
        }

        info!(user_id = %user.id, "user logged in");

        Ok(user.into())
    }

    /// Look up one user's public identity
    #[instrument(skip(self))]
    pub async fn find_user(&self, id: Snowflake) -> ServiceResult<PublicUserResponse> {
        self.ctx.simulate_latency().await;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id.to_string()))?;

        Ok(user.into())
    }

    /// All admin accounts, as consumed by the moderation fan-out
    #[instrument(skip(self))]
    pub async fn list_admins(&self) -> ServiceResult<Vec<PublicUserResponse>> {
        self.ctx.simulate_latency().await;

        let admins = self.ctx.user_repo().list_by_role(UserRole::Admin).await?;
        Ok(admins.into_iter().map(Into::into).collect())
    }
}

/// Build an avatar reference from the display name and a palette color
fn synthesize_avatar_ref(name: &str) -> String {
    let color = AVATAR_PALETTE
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(AVATAR_PALETTE[0]);
    let encoded: String = name
        .chars()
        .map(|c| if c == ' ' { '+' } else { c })
        .collect();
    format!("https://ui-avatars.com/api/?name={encoded}&background={color}&color=fff")
}
