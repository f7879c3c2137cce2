//! Reports Repository

use sqlx::{Postgres, Transaction, query_as};

const COUNT_USERS_SQL: &str = include_str!("sql/count_users.sql");
const COUNT_ORDERS_SQL: &str = include_str!("sql/count_orders.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const COMPLETED_REVENUE_SQL: &str = include_str!("sql/completed_revenue.sql");
const ADMIN_EMAILS_SQL: &str = include_str!("sql/admin_emails.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReportsRepository;

impl PgReportsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn count_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        count(tx, COUNT_USERS_SQL).await
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        count(tx, COUNT_ORDERS_SQL).await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        count(tx, COUNT_PRODUCTS_SQL).await
    }

    pub(crate) async fn completed_revenue(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        count(tx, COMPLETED_REVENUE_SQL).await
    }

    pub(crate) async fn admin_emails(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows = query_as::<Postgres, (String,)>(ADMIN_EMAILS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|(email,)| email).collect())
    }
}

async fn count(tx: &mut Transaction<'_, Postgres>, sql: &str) -> Result<u64, sqlx::Error> {
    let row = query_as::<Postgres, (i64,)>(sql).fetch_one(&mut **tx).await?;

    u64::try_from(row.0).map_err(|e| sqlx::Error::ColumnDecode {
        index: "count".to_string(),
        source: Box::new(e),
    })
}
