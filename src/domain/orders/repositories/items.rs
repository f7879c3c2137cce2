//! Order Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{try_get_amount, try_get_quantity},
    domain::orders::models::OrderLine,
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const BASKET_LINES_SQL: &str = include_str!("../sql/basket_lines.sql");
const ORDER_LINES_SQL: &str = include_str!("../sql/order_lines.sql");
const ESTIMATED_TOTAL_SQL: &str = include_str!("../sql/estimated_total.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
        order: Uuid,
        product: Uuid,
        quantity: u32,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_ITEM_SQL)
            .bind(uuid)
            .bind(order)
            .bind(product)
            .bind(i32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// The basket lines checkout will copy, joined with current prices.
    pub(crate) async fn basket_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        basket: Uuid,
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        query_as::<Postgres, OrderLine>(BASKET_LINES_SQL)
            .bind(basket)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        query_as::<Postgres, OrderLine>(ORDER_LINES_SQL)
            .bind(order)
            .fetch_all(&mut **tx)
            .await
    }

    /// Live recomputation from current product prices; display-only.
    pub(crate) async fn estimated_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let row = query_as::<Postgres, (i64,)>(ESTIMATED_TOTAL_SQL)
            .bind(order)
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(row.0).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total".to_string(),
            source: Box::new(e),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: row.try_get("product_uuid")?,
            title: row.try_get("title")?,
            unit_price: try_get_amount(row, "unit_price")?,
            quantity: try_get_quantity(row, "quantity")?,
            line_total: try_get_amount(row, "line_total")?,
        })
    }
}
