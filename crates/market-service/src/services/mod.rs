//! Application services

pub mod auth;
pub mod context;
pub mod error;
pub mod inbox;
pub mod moderation;
pub mod notification;

pub use auth::AuthService;
pub use inbox::InboxService;
pub use moderation::ModerationService;
pub use notification::NotificationService;
