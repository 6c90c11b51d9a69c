//! Service context - dependency container for services
//!
//! Holds the repositories, the id generator, the event bus, and the
//! simulated latency every operation awaits.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use market_common::AppConfig;
use market_core::traits::{
    MessageRepository, NotificationRepository, ProductRepository, UserRepository,
};
use market_core::{DomainEvent, SnowflakeGenerator};
use market_store::MarketStore;

/// Capacity of the broadcast event bus; slow subscribers lag, they never
/// block publishers.
const EVENT_BUS_CAPACITY: usize = 256;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories over the JSON collections
/// - Snowflake generator for ID generation
/// - Broadcast bus for domain events
/// - The configured artificial latency
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    product_repo: Arc<dyn ProductRepository>,
    message_repo: Arc<dyn MessageRepository>,
    notification_repo: Arc<dyn NotificationRepository>,

    snowflake_generator: Arc<SnowflakeGenerator>,
    events: broadcast::Sender<DomainEvent>,
    latency: Duration,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        product_repo: Arc<dyn ProductRepository>,
        message_repo: Arc<dyn MessageRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        latency: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUS_CAPACITY);
        Self {
            user_repo,
            product_repo,
            message_repo,
            notification_repo,
            snowflake_generator,
            events,
            latency,
        }
    }

    /// Wire a context from an opened store and the loaded configuration
    pub fn from_store(store: &MarketStore, config: &AppConfig) -> Self {
        Self::new(
            Arc::new(store.user_repository()),
            Arc::new(store.product_repository()),
            Arc::new(store.message_repository()),
            Arc::new(store.notification_repository()),
            Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)),
            Duration::from_millis(config.latency.millis),
        )
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the product repository
    pub fn product_repo(&self) -> &dyn ProductRepository {
        self.product_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    // === Services ===

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> market_core::Snowflake {
        self.snowflake_generator.generate()
    }

    /// Await the configured artificial latency
    ///
    /// Every public service operation calls this once on entry; zero
    /// latency (the test configuration) returns immediately.
    pub async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    // === Events ===

    /// Publish a domain event; dropped silently when nobody listens
    pub fn publish(&self, event: DomainEvent) {
        let _ = self.events.send(event);
    }

    /// Subscribe to the domain event bus
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.events.subscribe()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("latency", &self.latency)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    product_repo: Option<Arc<dyn ProductRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    latency: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            user_repo: None,
            product_repo: None,
            message_repo: None,
            notification_repo: None,
            snowflake_generator: None,
            latency: Duration::ZERO,
        }
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn product_repo(mut self, repo: Arc<dyn ProductRepository>) -> Self {
        self.product_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.product_repo
                .ok_or_else(|| ServiceError::validation("product_repo is required"))?,
            self.message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            self.notification_repo
                .ok_or_else(|| ServiceError::validation("notification_repo is required"))?,
            self.snowflake_generator.unwrap_or_default(),
            self.latency,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
