//! Orders service.
//!
//! Checkout converts a basket into an immutable order snapshot inside a
//! single transaction, with the basket row locked to serialize concurrent
//! attempts by the same user.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::warn;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        orders::{
            errors::OrdersServiceError,
            models::{CheckoutDetails, Order, OrderLine, OrderStatus},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
        users::models::AdminCapability,
    },
    receipts,
};

/// Minimum basket total (minor units) accepted at checkout.
pub const MIN_ORDER_TOTAL: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(skip_all, fields(user_uuid = %user))]
    async fn checkout(
        &self,
        user: Uuid,
        details: CheckoutDetails,
    ) -> Result<Order, OrdersServiceError> {
        details.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let Some(basket) = self.orders_repository.lock_basket(&mut tx, user).await? else {
            return Err(OrdersServiceError::EmptyBasket);
        };

        let lines = self.items_repository.basket_lines(&mut tx, basket).await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyBasket);
        }

        let total: u64 = lines.iter().map(|line| line.line_total).sum();

        if total < MIN_ORDER_TOTAL {
            return Err(OrdersServiceError::BelowMinimum {
                total,
                minimum: MIN_ORDER_TOTAL,
            });
        }

        let mut order = self
            .orders_repository
            .create_order(&mut tx, Uuid::now_v7(), user, &details, total)
            .await?;

        for line in &lines {
            self.items_repository
                .create_order_item(
                    &mut tx,
                    Uuid::now_v7(),
                    order.uuid,
                    line.product_uuid,
                    line.quantity,
                )
                .await?;
        }

        self.orders_repository.clear_basket(&mut tx, basket).await?;

        // Confirmation rendering is best-effort: the order still commits
        // without its document.
        match receipts::render_confirmation(&order, &lines) {
            Ok(document) => {
                self.orders_repository
                    .store_document(&mut tx, order.uuid, &document)
                    .await?;

                order.has_document = true;
            }
            Err(error) => {
                warn!(order_uuid = %order.uuid, %error, "confirmation document rendering failed");
            }
        }

        tx.commit().await?;

        Ok(order)
    }

    async fn get_order(&self, user: Uuid, order: Uuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self
            .orders_repository
            .get_order_for_user(&mut tx, order, user)
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(&self, user: Uuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self
            .orders_repository
            .list_orders_for_user(&mut tx, user)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn order_lines(&self, user: Uuid, order: Uuid) -> Result<Vec<OrderLine>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        // Ownership check before exposing lines.
        self.orders_repository
            .get_order_for_user(&mut tx, order, user)
            .await?;

        let lines = self.items_repository.order_lines(&mut tx, order).await?;

        tx.commit().await?;

        Ok(lines)
    }

    async fn update_status(
        &self,
        _admin: &AdminCapability,
        order: Uuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self.orders_repository.get_order(&mut tx, order).await?;

        if !current.status.can_transition(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        let updated = self
            .orders_repository
            .update_status(&mut tx, order, status)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn estimated_total(&self, order: Uuid) -> Result<u64, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.orders_repository.get_order(&mut tx, order).await?;

        let total = self.items_repository.estimated_total(&mut tx, order).await?;

        tx.commit().await?;

        Ok(total)
    }

    async fn confirmation_document(
        &self,
        user: Uuid,
        order: Uuid,
    ) -> Result<Option<Vec<u8>>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let document = self
            .orders_repository
            .get_document(&mut tx, order, user)
            .await?;

        tx.commit().await?;

        Ok(document)
    }

    #[tracing::instrument(skip(self))]
    async fn render_missing_documents(&self) -> Result<u64, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self
            .orders_repository
            .completed_without_document(&mut tx)
            .await?;

        let mut rendered = 0;

        for order in orders {
            let lines = self.items_repository.order_lines(&mut tx, order.uuid).await?;

            match receipts::render_confirmation(&order, &lines) {
                Ok(document) => {
                    self.orders_repository
                        .store_document(&mut tx, order.uuid, &document)
                        .await?;

                    rendered += 1;
                }
                Err(error) => {
                    warn!(order_uuid = %order.uuid, %error, "confirmation document rendering failed");
                }
            }
        }

        tx.commit().await?;

        Ok(rendered)
    }

    #[tracing::instrument(skip(self))]
    async fn cancel_stale_orders(&self, now: Timestamp) -> Result<u64, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let canceled = self.orders_repository.cancel_stale(&mut tx, now).await?;

        tx.commit().await?;

        Ok(canceled)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Convert the user's basket into an order: validate the form, check
    /// the minimum total, snapshot the total price, copy the lines, and
    /// empty the basket — all in one transaction.
    async fn checkout(
        &self,
        user: Uuid,
        details: CheckoutDetails,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieve one of the user's orders.
    async fn get_order(&self, user: Uuid, order: Uuid) -> Result<Order, OrdersServiceError>;

    /// Retrieves the user's orders, newest first.
    async fn list_orders(&self, user: Uuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// Line items of one of the user's orders, joined with current product
    /// data.
    async fn order_lines(
        &self,
        user: Uuid,
        order: Uuid,
    ) -> Result<Vec<OrderLine>, OrdersServiceError>;

    /// Move an order along its status lifecycle.
    async fn update_status(
        &self,
        admin: &AdminCapability,
        order: Uuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Live total from current product prices. Display-only; the stored
    /// `total_price` snapshot is canonical.
    async fn estimated_total(&self, order: Uuid) -> Result<u64, OrdersServiceError>;

    /// The stored confirmation document, if one was rendered.
    async fn confirmation_document(
        &self,
        user: Uuid,
        order: Uuid,
    ) -> Result<Option<Vec<u8>>, OrdersServiceError>;

    /// Render and store documents for completed orders lacking one.
    /// Returns the number rendered.
    async fn render_missing_documents(&self) -> Result<u64, OrdersServiceError>;

    /// Cancel orders left in `new` for more than 7 days. Returns the
    /// number canceled.
    async fn cancel_stale_orders(&self, now: Timestamp) -> Result<u64, OrdersServiceError>;
}
