//! Catalog service.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        catalog::{
            errors::CatalogServiceError,
            models::{
                Category, CategorySummary, Discount, NewCategory, NewDiscount, NewProduct,
                Product, ProductFilter, ProductUpdate,
            },
            repositories::{PgCategoriesRepository, PgDiscountsRepository, PgProductsRepository},
        },
        users::models::AdminCapability,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    categories_repository: PgCategoriesRepository,
    products_repository: PgProductsRepository,
    discounts_repository: PgDiscountsRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            categories_repository: PgCategoriesRepository::new(),
            products_repository: PgProductsRepository::new(),
            discounts_repository: PgDiscountsRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn create_category(
        &self,
        _admin: &AdminCapability,
        category: NewCategory,
    ) -> Result<Category, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .categories_repository
            .create_category(&mut tx, category)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_categories(&self) -> Result<Vec<CategorySummary>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let categories = self.categories_repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_product(&self, product: Uuid) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.products_repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self
            .products_repository
            .list_products(&mut tx, &filter)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn create_product(
        &self,
        _admin: &AdminCapability,
        product: NewProduct,
    ) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .products_repository
            .create_product(&mut tx, product)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        _admin: &AdminCapability,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .products_repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        _admin: &AdminCapability,
        product: Uuid,
    ) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .products_repository
            .delete_product(&mut tx, product)
            .await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn create_discount(
        &self,
        _admin: &AdminCapability,
        discount: NewDiscount,
    ) -> Result<Discount, CatalogServiceError> {
        if discount.percent > 100 || discount.start_date > discount.end_date {
            return Err(CatalogServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .discounts_repository
            .create_discount(&mut tx, discount)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn active_discount(
        &self,
        product: Uuid,
        on: Date,
    ) -> Result<Option<Discount>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let discount = self
            .discounts_repository
            .active_discount(&mut tx, product, on)
            .await?;

        tx.commit().await?;

        Ok(discount)
    }

    async fn list_discounts(&self, product: Uuid) -> Result<Vec<Discount>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let discounts = self
            .discounts_repository
            .list_discounts(&mut tx, product)
            .await?;

        tx.commit().await?;

        Ok(discounts)
    }

    async fn discounted_price(&self, product: Uuid, on: Date) -> Result<u64, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.products_repository.get_product(&mut tx, product).await?;

        let discount = self
            .discounts_repository
            .active_discount(&mut tx, product, on)
            .await?;

        tx.commit().await?;

        let price = match discount {
            Some(discount) => record.price * u64::from(100 - discount.percent) / 100,
            None => record.price,
        };

        Ok(price)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Creates a new category.
    async fn create_category(
        &self,
        admin: &AdminCapability,
        category: NewCategory,
    ) -> Result<Category, CatalogServiceError>;

    /// Retrieves all categories with product count and mean price.
    async fn list_categories(&self) -> Result<Vec<CategorySummary>, CatalogServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: Uuid) -> Result<Product, CatalogServiceError>;

    /// Retrieves products matching the given filter.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, CatalogServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        admin: &AdminCapability,
        product: NewProduct,
    ) -> Result<Product, CatalogServiceError>;

    /// Replaces a product's details.
    async fn update_product(
        &self,
        admin: &AdminCapability,
        product: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, CatalogServiceError>;

    /// Deletes a product. Products referenced by an order are protected
    /// and deletion fails with [`CatalogServiceError::InvalidReference`].
    async fn delete_product(
        &self,
        admin: &AdminCapability,
        product: Uuid,
    ) -> Result<(), CatalogServiceError>;

    /// Creates a discount after validating the percent and date window.
    async fn create_discount(
        &self,
        admin: &AdminCapability,
        discount: NewDiscount,
    ) -> Result<Discount, CatalogServiceError>;

    /// The discount whose validity window contains `on`, if any. Ties are
    /// broken by highest percent, then earliest start date.
    async fn active_discount(
        &self,
        product: Uuid,
        on: Date,
    ) -> Result<Option<Discount>, CatalogServiceError>;

    /// All discounts ever defined for a product.
    async fn list_discounts(&self, product: Uuid) -> Result<Vec<Discount>, CatalogServiceError>;

    /// Display price for a product on the given date: the unit price
    /// reduced by the active discount percent. Totals never use this.
    async fn discounted_price(&self, product: Uuid, on: Date)
    -> Result<u64, CatalogServiceError>;
}
