//! Test fixtures and data generators
//!
//! Provides reusable seeded contexts and request builders for scenario
//! tests. Contexts are in-memory with zero latency.

use std::sync::atomic::{AtomicU64, Ordering};

use market_common::AppConfig;
use market_core::entities::{Actor, User, UserRole};
use market_service::dto::requests::{CreateProductRequest, RegisterRequest};
use market_service::ServiceContext;
use market_store::MarketStore;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A fresh in-memory context with no accounts
pub fn empty_context() -> ServiceContext {
    ServiceContext::from_store(&MarketStore::in_memory(), &AppConfig::for_tests())
}

/// A seeded environment: one admin, one regular seller, one buyer
pub struct TestEnv {
    pub ctx: ServiceContext,
    pub admin: Actor,
    pub seller: Actor,
    pub buyer: Actor,
}

impl TestEnv {
    pub async fn seeded() -> Self {
        let ctx = empty_context();
        let admin = seed_user(&ctx, "Admin One", UserRole::Admin).await;
        let seller = seed_user(&ctx, "Seller One", UserRole::User).await;
        let buyer = seed_user(&ctx, "Buyer One", UserRole::User).await;
        Self {
            ctx,
            admin,
            seller,
            buyer,
        }
    }
}

/// Insert one account directly through the repository
///
/// Registration can only produce regular users, so admin fixtures go in
/// through the seeding path, same as production.
pub async fn seed_user(ctx: &ServiceContext, name: &str, role: UserRole) -> Actor {
    let suffix = unique_suffix();
    let user = User::new(
        ctx.generate_id(),
        name.to_string(),
        format!("user{suffix}@example.com"),
        role,
        format!("avatars/user{suffix}.png"),
    );
    ctx.user_repo()
        .create(&user, "password123")
        .await
        .expect("seed user");
    user.actor()
}

/// A unique registration request
pub fn register_request() -> RegisterRequest {
    let suffix = unique_suffix();
    RegisterRequest {
        name: format!("Test User {suffix}"),
        email: format!("test{suffix}@example.com"),
        password: "TestPass123".to_string(),
    }
}

/// A valid listing request
pub fn listing_request(title: &str) -> CreateProductRequest {
    CreateProductRequest {
        title: title.to_string(),
        description: "Lightly used, works great".to_string(),
        price: 49.99,
        category: "Misc".to_string(),
        images: vec!["img/1.jpg".to_string()],
    }
}
