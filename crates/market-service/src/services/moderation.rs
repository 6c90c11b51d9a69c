//! Moderation service - listing lifecycle and the approval queue
//!
//! Owns every product state transition. Notification delivery is best
//! effort: catalog correctness never depends on it, so emission failures
//! are logged and swallowed.

use tracing::{info, instrument, warn};
use validator::Validate;

use market_core::entities::{Actor, Comment, NotificationKind, Product, ProductStatus, UserRole};
use market_core::{DomainError, DomainEvent, Snowflake};

use crate::dto::requests::{AddCommentRequest, CreateProductRequest, UpdateProductRequest};
use crate::dto::responses::{CommentResponse, ProductResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notification::NotificationService;

/// Moderation service
pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    /// Create a new ModerationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a listing
    ///
    /// An admin's listing goes straight to the public catalog; everyone
    /// else's enters the queue as `Pending`, and every admin gets exactly
    /// one approval-request notification.
    #[instrument(skip(self, request), fields(actor_id = %actor.id))]
    pub async fn create_product(
        &self,
        actor: &Actor,
        request: CreateProductRequest,
    ) -> ServiceResult<ProductResponse> {
        self.ctx.simulate_latency().await;
        request.validate()?;

        let product = Product::new(
            self.ctx.generate_id(),
            request.title,
            request.description,
            request.price,
            request.category,
            request.images,
            actor.id,
            actor.is_admin(),
        );
        self.ctx.product_repo().create(&product).await?;

        info!(product_id = %product.id, status = %product.status, "product created");

        self.ctx.publish(DomainEvent::ProductSubmitted {
            product_id: product.id,
            seller_id: actor.id,
        });

        if product.is_pending() {
            self.notify_admins(&product).await;
        }

        Ok(product.into())
    }

    /// Move a listing to a new moderation status; admin only
    ///
    /// Setting the status it already has is an idempotent no-op: no write,
    /// no notification. A real change notifies the seller exactly once.
    #[instrument(skip(self), fields(actor_id = %actor.id))]
    pub async fn set_status(
        &self,
        actor: &Actor,
        product_id: Snowflake,
        new_status: ProductStatus,
    ) -> ServiceResult<ProductResponse> {
        self.ctx.simulate_latency().await;

        if !actor.is_admin() {
            return Err(DomainError::NotAdmin.into());
        }

        let mut product = self
            .ctx
            .product_repo()
            .find_by_id(product_id)
            .await?
            .ok_or(DomainError::ProductNotFound(product_id))?;

        if product.status == new_status {
            return Ok(product.into());
        }

        product.status = new_status;
        self.ctx.product_repo().update(&product).await?;

        info!(product_id = %product.id, status = %new_status, "product status changed");

        self.ctx.publish(DomainEvent::ProductStatusChanged {
            product_id: product.id,
            seller_id: product.seller_id,
            status: new_status,
        });

        self.notify_seller(&product, new_status).await;

        Ok(product.into())
    }

    /// Approve a pending listing
    pub async fn approve(&self, actor: &Actor, product_id: Snowflake) -> ServiceResult<ProductResponse> {
        self.set_status(actor, product_id, ProductStatus::Approved).await
    }

    /// Reject a pending listing
    pub async fn reject(&self, actor: &Actor, product_id: Snowflake) -> ServiceResult<ProductResponse> {
        self.set_status(actor, product_id, ProductStatus::Rejected).await
    }

    /// Edit listing fields; seller or admin
    ///
    /// Never touches the moderation status.
    #[instrument(skip(self, request), fields(actor_id = %actor.id))]
    pub async fn update_product(
        &self,
        actor: &Actor,
        product_id: Snowflake,
        request: UpdateProductRequest,
    ) -> ServiceResult<ProductResponse> {
        self.ctx.simulate_latency().await;
        request.validate()?;

        let mut product = self
            .ctx
            .product_repo()
            .find_by_id(product_id)
            .await?
            .ok_or(DomainError::ProductNotFound(product_id))?;

        if product.seller_id != actor.id && !actor.is_admin() {
            return Err(DomainError::NotOwner.into());
        }

        if let Some(title) = request.title {
            product.title = title;
        }
        if let Some(description) = request.description {
            product.description = description;
        }
        if let Some(price) = request.price {
            product.price = price;
        }
        if let Some(category) = request.category {
            product.category = category;
        }
        if let Some(images) = request.images {
            product.images = images;
        }

        self.ctx.product_repo().update(&product).await?;

        info!(product_id = %product.id, "product updated");

        Ok(product.into())
    }

    /// Permanently delete a listing; seller or admin
    ///
    /// Comments go with it (owned inline). Already-sent notifications are
    /// never retracted; their consumers tolerate a missing target. False
    /// when the listing was already gone.
    #[instrument(skip(self), fields(actor_id = %actor.id))]
    pub async fn delete_product(&self, actor: &Actor, product_id: Snowflake) -> ServiceResult<bool> {
        self.ctx.simulate_latency().await;

        let Some(product) = self.ctx.product_repo().find_by_id(product_id).await? else {
            return Ok(false);
        };

        if product.seller_id != actor.id && !actor.is_admin() {
            return Err(DomainError::NotOwner.into());
        }

        let removed = self.ctx.product_repo().delete(product_id).await?;
        if removed {
            info!(product_id = %product_id, "product deleted");
            self.ctx.publish(DomainEvent::ProductDeleted { product_id });
        }
        Ok(removed)
    }

    /// Look up one listing
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: Snowflake) -> ServiceResult<ProductResponse> {
        self.ctx.simulate_latency().await;

        let product = self
            .ctx
            .product_repo()
            .find_by_id(product_id)
            .await?
            .ok_or(DomainError::ProductNotFound(product_id))?;

        Ok(product.into())
    }

    /// The public catalog: approved listings only
    #[instrument(skip(self))]
    pub async fn list_approved(&self) -> ServiceResult<Vec<ProductResponse>> {
        self.ctx.simulate_latency().await;
        self.list_by_status(ProductStatus::Approved).await
    }

    /// The moderation queue: pending listings only
    #[instrument(skip(self))]
    pub async fn list_pending(&self) -> ServiceResult<Vec<ProductResponse>> {
        self.ctx.simulate_latency().await;
        self.list_by_status(ProductStatus::Pending).await
    }

    /// Every listing regardless of status
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ServiceResult<Vec<ProductResponse>> {
        self.ctx.simulate_latency().await;

        let products = self.ctx.product_repo().find_all().await?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    /// One seller's listings regardless of status (profile page)
    #[instrument(skip(self))]
    pub async fn list_by_seller(&self, seller_id: Snowflake) -> ServiceResult<Vec<ProductResponse>> {
        self.ctx.simulate_latency().await;

        let products = self.ctx.product_repo().find_by_seller(seller_id).await?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    /// Append a comment to a listing
    ///
    /// Author display fields are denormalized from the directory at
    /// creation time.
    #[instrument(skip(self, request), fields(actor_id = %actor.id))]
    pub async fn add_comment(
        &self,
        actor: &Actor,
        product_id: Snowflake,
        request: AddCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        self.ctx.simulate_latency().await;

        if request.content.trim().is_empty() {
            return Err(DomainError::EmptyContent.into());
        }
        request.validate()?;

        let mut product = self
            .ctx
            .product_repo()
            .find_by_id(product_id)
            .await?
            .ok_or(DomainError::ProductNotFound(product_id))?;

        let author = self
            .ctx
            .user_repo()
            .find_by_id(actor.id)
            .await?
            .ok_or(DomainError::UserNotFound(actor.id))?;

        let comment = Comment::new(
            self.ctx.generate_id(),
            author.id,
            author.name,
            author.avatar_ref,
            request.content,
        );
        product.push_comment(comment.clone());
        self.ctx.product_repo().update(&product).await?;

        info!(product_id = %product_id, comment_id = %comment.id, "comment added");

        Ok(comment.into())
    }

    /// Increment a listing's like counter
    ///
    /// The counter is monotonic; repeated calls keep counting up.
    #[instrument(skip(self))]
    pub async fn toggle_like(&self, product_id: Snowflake) -> ServiceResult<ProductResponse> {
        self.ctx.simulate_latency().await;

        let mut product = self
            .ctx
            .product_repo()
            .find_by_id(product_id)
            .await?
            .ok_or(DomainError::ProductNotFound(product_id))?;

        product.add_like();
        self.ctx.product_repo().update(&product).await?;

        Ok(product.into())
    }

    /// Fan out one approval request per admin
    async fn notify_admins(&self, product: &Product) {
        let admins = match self.ctx.user_repo().list_by_role(UserRole::Admin).await {
            Ok(admins) => admins,
            Err(err) => {
                warn!(product_id = %product.id, error = %err, "admin lookup for fan-out failed");
                return;
            }
        };

        let notifications = NotificationService::new(self.ctx);
        for admin in admins {
            let result = notifications
                .emit(
                    admin.id,
                    "New product pending approval",
                    format!("{} is waiting for review", product.summary()),
                    NotificationKind::ProductApproval,
                    Some(product.id),
                )
                .await;
            if let Err(err) = result {
                warn!(admin_id = %admin.id, product_id = %product.id, error = %err, "approval notification failed");
            }
        }
    }

    /// Tell the seller the moderation outcome; Pending sends nothing
    async fn notify_seller(&self, product: &Product, status: ProductStatus) {
        let (title, body, kind) = match status {
            ProductStatus::Approved => (
                "Product approved",
                format!("Your listing {} has been approved", product.summary()),
                NotificationKind::ProductApproved,
            ),
            ProductStatus::Rejected => (
                "Product rejected",
                format!("Your listing {} has been rejected", product.summary()),
                NotificationKind::ProductRejected,
            ),
            ProductStatus::Pending => return,
        };

        let result = NotificationService::new(self.ctx)
            .emit(product.seller_id, title, body, kind, Some(product.id))
            .await;
        if let Err(err) = result {
            warn!(seller_id = %product.seller_id, product_id = %product.id, error = %err, "seller notification failed");
        }
    }

    async fn list_by_status(&self, status: ProductStatus) -> ServiceResult<Vec<ProductResponse>> {
        let products = self.ctx.product_repo().find_by_status(status).await?;
        Ok(products.into_iter().map(Into::into).collect())
    }
}
