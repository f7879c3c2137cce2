//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::try_get_amount,
    domain::orders::models::{CheckoutDetails, Order, OrderStatus, PaymentMethod},
};

const LOCK_BASKET_SQL: &str = include_str!("../sql/lock_basket.sql");
const CLEAR_BASKET_SQL: &str = include_str!("../sql/clear_basket.sql");
const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const GET_ORDER_FOR_USER_SQL: &str = include_str!("../sql/get_order_for_user.sql");
const LIST_ORDERS_FOR_USER_SQL: &str = include_str!("../sql/list_orders_for_user.sql");
const UPDATE_STATUS_SQL: &str = include_str!("../sql/update_status.sql");
const CANCEL_STALE_SQL: &str = include_str!("../sql/cancel_stale.sql");
const STORE_DOCUMENT_SQL: &str = include_str!("../sql/store_document.sql");
const GET_DOCUMENT_SQL: &str = include_str!("../sql/get_document.sql");
const COMPLETED_WITHOUT_DOCUMENT_SQL: &str = include_str!("../sql/completed_without_document.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Row-lock the user's basket for the rest of the transaction,
    /// serializing concurrent checkouts for the same user.
    pub(crate) async fn lock_basket(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        let row = query(LOCK_BASKET_SQL)
            .bind(user)
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| row.try_get("uuid")).transpose()
    }

    pub(crate) async fn clear_basket(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        basket: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_BASKET_SQL)
            .bind(basket)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
        user: Uuid,
        details: &CheckoutDetails,
        total_price: u64,
    ) -> Result<Order, sqlx::Error> {
        let total_i64 = i64::try_from(total_price).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total_price".to_string(),
            source: Box::new(e),
        })?;

        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(uuid)
            .bind(user)
            .bind(&details.full_name)
            .bind(&details.email)
            .bind(&details.phone)
            .bind(&details.shipping_address)
            .bind(details.payment_method.as_str())
            .bind(&details.comments)
            .bind(total_i64)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        user: Uuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_FOR_USER_SQL)
            .bind(order)
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_FOR_USER_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        status: OrderStatus,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(UPDATE_STATUS_SQL)
            .bind(order)
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Cancel orders still `new` 7 days after `now`. Returns the number of
    /// canceled rows.
    pub(crate) async fn cancel_stale(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CANCEL_STALE_SQL)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn store_document(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        document: &[u8],
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(STORE_DOCUMENT_SQL)
            .bind(order)
            .bind(document)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_document(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        user: Uuid,
    ) -> Result<Option<Vec<u8>>, sqlx::Error> {
        let row = query(GET_DOCUMENT_SQL)
            .bind(order)
            .bind(user)
            .fetch_one(&mut **tx)
            .await?;

        row.try_get("confirmation_doc")
    }

    pub(crate) async fn completed_without_document(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(COMPLETED_WITHOUT_DOCUMENT_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status =
            OrderStatus::try_from(status.as_str()).map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        let payment_method: String = row.try_get("payment_method")?;
        let payment_method = PaymentMethod::try_from(payment_method.as_str()).map_err(|e| {
            sqlx::Error::ColumnDecode {
                index: "payment_method".to_string(),
                source: Box::new(e),
            }
        })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            status,
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            shipping_address: row.try_get("shipping_address")?,
            payment_method,
            comments: row.try_get("comments")?,
            total_price: try_get_amount(row, "total_price")?,
            has_document: row.try_get("has_document")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
