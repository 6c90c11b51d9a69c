//! Data transfer objects
//!
//! Requests implement `Deserialize` + `Validate`; responses implement
//! `Serialize`. Mapping from entities lives in `mappers`.

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AddCommentRequest, CreateProductRequest, LoginRequest, RegisterRequest, UpdateProductRequest,
};
pub use responses::{
    CommentResponse, ConversationThread, CurrentUserResponse, MessageResponse,
    NotificationResponse, ProductResponse, PublicUserResponse,
};
