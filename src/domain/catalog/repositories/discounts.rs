//! Discounts Repository

use jiff::civil::Date;
use jiff_sqlx::Date as SqlxDate;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::catalog::models::{Discount, NewDiscount};

const CREATE_DISCOUNT_SQL: &str = include_str!("../sql/create_discount.sql");
const ACTIVE_DISCOUNT_SQL: &str = include_str!("../sql/active_discount.sql");
const LIST_DISCOUNTS_SQL: &str = include_str!("../sql/list_discounts.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgDiscountsRepository;

impl PgDiscountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_discount(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        discount: NewDiscount,
    ) -> Result<Discount, sqlx::Error> {
        query_as::<Postgres, Discount>(CREATE_DISCOUNT_SQL)
            .bind(discount.uuid)
            .bind(discount.product_uuid)
            .bind(i16::from(discount.percent))
            .bind(SqlxDate::from(discount.start_date))
            .bind(SqlxDate::from(discount.end_date))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn active_discount(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: Uuid,
        on: Date,
    ) -> Result<Option<Discount>, sqlx::Error> {
        query_as::<Postgres, Discount>(ACTIVE_DISCOUNT_SQL)
            .bind(product)
            .bind(SqlxDate::from(on))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_discounts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: Uuid,
    ) -> Result<Vec<Discount>, sqlx::Error> {
        query_as::<Postgres, Discount>(LIST_DISCOUNTS_SQL)
            .bind(product)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Discount {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let percent: i16 = row.try_get("percent")?;
        let percent = u8::try_from(percent).map_err(|e| sqlx::Error::ColumnDecode {
            index: "percent".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            percent,
            start_date: row.try_get::<SqlxDate, _>("start_date")?.to_jiff(),
            end_date: row.try_get::<SqlxDate, _>("end_date")?.to_jiff(),
        })
    }
}
