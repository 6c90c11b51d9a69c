//! Repository implementations over JSON collections

mod message;
mod notification;
mod product;
mod user;

pub use message::JsonMessageRepository;
pub use notification::JsonNotificationRepository;
pub use product::JsonProductRepository;
pub use user::JsonUserRepository;
