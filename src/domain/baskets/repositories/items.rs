//! Basket Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{try_get_amount, try_get_quantity},
    domain::baskets::models::BasketItem,
};

const GET_ITEMS_SQL: &str = include_str!("../sql/get_items.sql");
const GET_ITEM_SQL: &str = include_str!("../sql/get_item.sql");
const GET_ITEM_FOR_USER_SQL: &str = include_str!("../sql/get_item_for_user.sql");
const UPSERT_ITEM_SQL: &str = include_str!("../sql/upsert_item.sql");
const UPDATE_ITEM_QUANTITY_SQL: &str = include_str!("../sql/update_item_quantity.sql");
const DELETE_ITEM_SQL: &str = include_str!("../sql/delete_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBasketItemsRepository;

impl PgBasketItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        basket: Uuid,
    ) -> Result<Vec<BasketItem>, sqlx::Error> {
        query_as::<Postgres, BasketItem>(GET_ITEMS_SQL)
            .bind(basket)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: Uuid,
    ) -> Result<BasketItem, sqlx::Error> {
        query_as::<Postgres, BasketItem>(GET_ITEM_SQL)
            .bind(item)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_item_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: Uuid,
        user: Uuid,
    ) -> Result<BasketItem, sqlx::Error> {
        query_as::<Postgres, BasketItem>(GET_ITEM_FOR_USER_SQL)
            .bind(item)
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert a line item, or merge the quantity into an existing line for
    /// the same `(basket, product)` pair. Returns the line's UUID.
    pub(crate) async fn upsert_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: Uuid,
        basket: Uuid,
        product: Uuid,
        quantity: u32,
    ) -> Result<Uuid, sqlx::Error> {
        let row = query(UPSERT_ITEM_SQL)
            .bind(item)
            .bind(basket)
            .bind(product)
            .bind(i32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?)
            .fetch_one(&mut **tx)
            .await?;

        row.try_get("uuid")
    }

    pub(crate) async fn update_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: Uuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ITEM_QUANTITY_SQL)
            .bind(item)
            .bind(i32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ITEM_SQL)
            .bind(item)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for BasketItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            title: row.try_get("title")?,
            unit_price: try_get_amount(row, "unit_price")?,
            quantity: try_get_quantity(row, "quantity")?,
            line_total: try_get_amount(row, "line_total")?,
        })
    }
}
