//! # market-service
//!
//! Application layer: request/response DTOs and the services that
//! implement the marketplace workflows on top of the repository traits.
//!
//! - `AuthService` - identity directory (register, login, lookups)
//! - `ModerationService` - listing lifecycle and the approval queue
//! - `InboxService` - conversation assembly over the flat message log
//! - `NotificationService` - per-user notification center
//!
//! Services borrow a [`ServiceContext`], the dependency container built
//! once at startup.

pub mod dto;
pub mod services;

pub use services::context::{ServiceContext, ServiceContextBuilder};
pub use services::error::{ServiceError, ServiceResult};
pub use services::{AuthService, InboxService, ModerationService, NotificationService};
