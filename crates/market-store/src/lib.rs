//! # market-store
//!
//! Persistence layer: JSON-backed keyed collections and the repository
//! implementations over them.
//!
//! Each logical collection (users, products, messages, notifications,
//! contacts) is one keyed map guarded by its own lock and serialized as a
//! single JSON array on disk. Every mutation flushes under the write
//! lock, so each collection has exactly one writer at a time.

pub mod collection;
pub mod models;
pub mod repositories;

mod store;

pub use collection::{JsonCollection, Record};
pub use repositories::{
    JsonMessageRepository, JsonNotificationRepository, JsonProductRepository, JsonUserRepository,
};
pub use store::MarketStore;
