//! Domain entities - core business objects

mod message;
mod notification;
mod product;
mod user;

pub use message::Message;
pub use notification::{Notification, NotificationKind};
pub use product::{Comment, Product, ProductStatus};
pub use user::{Actor, User, UserRole};
