//! Baskets Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Postgres, Row, Transaction, query, query_as};
use uuid::Uuid;

const ENSURE_BASKET_SQL: &str = include_str!("../sql/ensure_basket.sql");
const BASKET_TOTAL_SQL: &str = include_str!("../sql/basket_total.sql");

/// Raw basket row, before items and total are attached.
#[derive(Debug, Clone)]
pub(crate) struct BasketRow {
    pub(crate) uuid: Uuid,
    pub(crate) user_uuid: Uuid,
    pub(crate) created_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBasketsRepository;

impl PgBasketsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Get or lazily create the user's basket in a single upsert.
    pub(crate) async fn ensure_basket(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
        user: Uuid,
    ) -> Result<BasketRow, sqlx::Error> {
        let row = query(ENSURE_BASKET_SQL)
            .bind(uuid)
            .bind(user)
            .fetch_one(&mut **tx)
            .await?;

        Ok(BasketRow {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }

    pub(crate) async fn basket_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        basket: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let row = query_as::<Postgres, (i64,)>(BASKET_TOTAL_SQL)
            .bind(basket)
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(row.0).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total".to_string(),
            source: Box::new(e),
        })
    }
}
