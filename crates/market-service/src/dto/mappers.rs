//! Entity-to-response mappings

use market_core::entities::{Comment, Message, Notification, Product, User};

use super::responses::{
    CommentResponse, CurrentUserResponse, MessageResponse, NotificationResponse, ProductResponse,
    PublicUserResponse,
};

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            avatar_ref: user.avatar_ref,
            created_at: user.created_at,
        }
    }
}

impl From<User> for PublicUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            avatar_ref: user.avatar_ref,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            author_id: comment.author_id,
            author_name: comment.author_name,
            author_avatar: comment.author_avatar,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            price: product.price,
            category: product.category,
            images: product.images,
            seller_id: product.seller_id,
            created_at: product.created_at,
            like_count: product.like_count,
            status: product.status,
            comments: product.comments.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content,
            created_at: message.created_at,
            read: message.read,
        }
    }
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            user_id: notification.user_id,
            title: notification.title,
            message: notification.message,
            kind: notification.kind,
            read: notification.read,
            created_at: notification.created_at,
            product_id: notification.product_id,
        }
    }
}
