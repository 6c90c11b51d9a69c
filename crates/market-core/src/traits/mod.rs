//! Repository traits (ports) for data access

mod repositories;

pub use repositories::{
    MessageRepository, NotificationRepository, ProductRepository, RepoResult, UserRepository,
};
