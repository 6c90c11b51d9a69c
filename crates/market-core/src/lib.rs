//! # market-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (storage, runtime plumbing, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Actor, Comment, Message, Notification, NotificationKind, Product, ProductStatus, User,
    UserRole,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{
    MessageRepository, NotificationRepository, ProductRepository, RepoResult, UserRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
