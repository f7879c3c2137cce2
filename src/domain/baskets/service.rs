//! Baskets service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::baskets::{
        errors::BasketsServiceError,
        models::{Basket, BasketItem},
        repositories::{PgBasketItemsRepository, PgBasketsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgBasketsService {
    db: Db,
    baskets_repository: PgBasketsRepository,
    items_repository: PgBasketItemsRepository,
}

impl PgBasketsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            baskets_repository: PgBasketsRepository::new(),
            items_repository: PgBasketItemsRepository::new(),
        }
    }
}

#[async_trait]
impl BasketsService for PgBasketsService {
    async fn get_basket(&self, user: Uuid) -> Result<Basket, BasketsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let row = self
            .baskets_repository
            .ensure_basket(&mut tx, Uuid::now_v7(), user)
            .await?;

        let items = self.items_repository.get_items(&mut tx, row.uuid).await?;
        let total = self.baskets_repository.basket_total(&mut tx, row.uuid).await?;

        tx.commit().await?;

        Ok(Basket {
            uuid: row.uuid,
            user_uuid: row.user_uuid,
            items,
            total,
            created_at: row.created_at,
        })
    }

    async fn add_item(
        &self,
        user: Uuid,
        product: Uuid,
        quantity: u32,
    ) -> Result<BasketItem, BasketsServiceError> {
        if quantity == 0 {
            return Err(BasketsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let basket = self
            .baskets_repository
            .ensure_basket(&mut tx, Uuid::now_v7(), user)
            .await?;

        let item_uuid = self
            .items_repository
            .upsert_item(&mut tx, Uuid::now_v7(), basket.uuid, product, quantity)
            .await?;

        let item = self.items_repository.get_item(&mut tx, item_uuid).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn update_item(
        &self,
        user: Uuid,
        item: Uuid,
        quantity: u32,
    ) -> Result<Option<BasketItem>, BasketsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        // Ownership check: the line must belong to the caller's basket.
        self.items_repository
            .get_item_for_user(&mut tx, item, user)
            .await?;

        let updated = if quantity == 0 {
            self.items_repository.delete_item(&mut tx, item).await?;
            None
        } else {
            self.items_repository
                .update_quantity(&mut tx, item, quantity)
                .await?;
            Some(self.items_repository.get_item(&mut tx, item).await?)
        };

        tx.commit().await?;

        Ok(updated)
    }

    async fn remove_item(&self, user: Uuid, item: Uuid) -> Result<(), BasketsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.items_repository
            .get_item_for_user(&mut tx, item, user)
            .await?;

        self.items_repository.delete_item(&mut tx, item).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait BasketsService: Send + Sync {
    /// Retrieve the user's basket, creating it lazily on first touch.
    async fn get_basket(&self, user: Uuid) -> Result<Basket, BasketsServiceError>;

    /// Add `quantity` of a product. An existing line for the same product
    /// is merged by adding quantities, never duplicated.
    async fn add_item(
        &self,
        user: Uuid,
        product: Uuid,
        quantity: u32,
    ) -> Result<BasketItem, BasketsServiceError>;

    /// Set a line's quantity; zero deletes the line (returns `None`).
    /// Fails with `NotFound` when the line is not in the caller's basket.
    async fn update_item(
        &self,
        user: Uuid,
        item: Uuid,
        quantity: u32,
    ) -> Result<Option<BasketItem>, BasketsServiceError>;

    /// Delete a line from the caller's basket.
    async fn remove_item(&self, user: Uuid, item: Uuid) -> Result<(), BasketsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::domain::catalog::service::CatalogService;
    use crate::test::{TestContext, helpers::new_product};

    use super::*;

    #[tokio::test]
    async fn get_basket_creates_lazily_and_is_stable() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.baskets.get_basket(ctx.user_uuid).await?;
        let second = ctx.baskets.get_basket(ctx.user_uuid).await?;

        assert_eq!(first.uuid, second.uuid);
        assert_eq!(first.user_uuid, ctx.user_uuid);
        assert!(first.items.is_empty());
        assert_eq!(first.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_product_twice_merges_into_one_line() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .catalog
            .create_product(&ctx.admin, new_product(Uuid::now_v7(), "Handset", 5_000))
            .await?;

        let first = ctx.baskets.add_item(ctx.user_uuid, product.uuid, 2).await?;
        let second = ctx.baskets.add_item(ctx.user_uuid, product.uuid, 3).await?;

        assert_eq!(first.uuid, second.uuid);
        assert_eq!(second.quantity, 5);

        let basket = ctx.baskets.get_basket(ctx.user_uuid).await?;

        assert_eq!(basket.items.len(), 1);
        assert_eq!(basket.items[0].quantity, 5);

        Ok(())
    }

    #[tokio::test]
    async fn basket_total_is_sum_of_quantity_times_price() -> TestResult {
        let ctx = TestContext::new().await;

        let handset = ctx
            .catalog
            .create_product(&ctx.admin, new_product(Uuid::now_v7(), "Handset", 5_000))
            .await?;
        let charger = ctx
            .catalog
            .create_product(&ctx.admin, new_product(Uuid::now_v7(), "Charger", 1_500))
            .await?;

        ctx.baskets.add_item(ctx.user_uuid, handset.uuid, 3).await?;
        ctx.baskets.add_item(ctx.user_uuid, charger.uuid, 2).await?;

        let basket = ctx.baskets.get_basket(ctx.user_uuid).await?;

        assert_eq!(basket.total, 3 * 5_000 + 2 * 1_500);
        assert_eq!(
            basket.total,
            basket.items.iter().map(|i| i.line_total).sum::<u64>()
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_with_zero_quantity_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .catalog
            .create_product(&ctx.admin, new_product(Uuid::now_v7(), "Handset", 5_000))
            .await?;

        let result = ctx.baskets.add_item(ctx.user_uuid, product.uuid, 0).await;

        assert!(
            matches!(result, Err(BasketsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_with_unknown_product_fails() {
        let ctx = TestContext::new().await;

        let result = ctx.baskets.add_item(ctx.user_uuid, Uuid::now_v7(), 1).await;

        assert!(
            matches!(result, Err(BasketsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_item_sets_quantity() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .catalog
            .create_product(&ctx.admin, new_product(Uuid::now_v7(), "Handset", 5_000))
            .await?;

        let item = ctx.baskets.add_item(ctx.user_uuid, product.uuid, 2).await?;

        let updated = ctx
            .baskets
            .update_item(ctx.user_uuid, item.uuid, 7)
            .await?
            .expect("line should remain");

        assert_eq!(updated.quantity, 7);
        assert_eq!(updated.line_total, 7 * 5_000);

        Ok(())
    }

    #[tokio::test]
    async fn update_item_to_zero_removes_line() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .catalog
            .create_product(&ctx.admin, new_product(Uuid::now_v7(), "Handset", 5_000))
            .await?;

        let item = ctx.baskets.add_item(ctx.user_uuid, product.uuid, 2).await?;

        let updated = ctx.baskets.update_item(ctx.user_uuid, item.uuid, 0).await?;
        assert!(updated.is_none());

        let basket = ctx.baskets.get_basket(ctx.user_uuid).await?;
        assert!(basket.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn update_item_of_other_users_basket_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .catalog
            .create_product(&ctx.admin, new_product(Uuid::now_v7(), "Handset", 5_000))
            .await?;

        let item = ctx.baskets.add_item(ctx.user_uuid, product.uuid, 2).await?;

        let stranger = ctx.create_user("stranger").await;

        let result = ctx.baskets.update_item(stranger, item.uuid, 1).await;

        assert!(
            matches!(result, Err(BasketsServiceError::NotFound)),
            "expected NotFound for foreign basket line, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_deletes_line() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .catalog
            .create_product(&ctx.admin, new_product(Uuid::now_v7(), "Handset", 5_000))
            .await?;

        let item = ctx.baskets.add_item(ctx.user_uuid, product.uuid, 2).await?;

        ctx.baskets.remove_item(ctx.user_uuid, item.uuid).await?;

        let basket = ctx.baskets.get_basket(ctx.user_uuid).await?;
        assert!(basket.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn remove_unknown_item_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.baskets.remove_item(ctx.user_uuid, Uuid::now_v7()).await;

        assert!(
            matches!(result, Err(BasketsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
