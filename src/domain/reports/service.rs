//! Reports service.

use tracing::info;

use crate::{
    database::Db,
    domain::{
        reports::{
            errors::ReportsServiceError, mailer::Mailer, models::StoreStats,
            repository::PgReportsRepository,
        },
        users::models::AdminCapability,
    },
};

/// Subject line of the weekly digest mail.
pub const DIGEST_SUBJECT: &str = "Weekly store statistics";

#[derive(Debug, Clone)]
pub struct PgReportsService {
    db: Db,
    repository: PgReportsRepository,
}

impl PgReportsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReportsRepository::new(),
        }
    }

    /// Aggregate counts and completed-order revenue for the dashboard.
    ///
    /// Revenue sums the orders' stored `total_price` snapshots.
    ///
    /// # Errors
    ///
    /// Returns an error when a storage query fails.
    pub async fn store_stats(
        &self,
        _admin: &AdminCapability,
    ) -> Result<StoreStats, ReportsServiceError> {
        self.gather_stats().await
    }

    /// Send the stats digest to every active administrator.
    ///
    /// Returns the number of recipients. Runs in a system context (invoked
    /// by the external scheduler), so no capability is required.
    ///
    /// # Errors
    ///
    /// Returns an error when gathering stats or a send fails.
    #[tracing::instrument(skip_all)]
    pub async fn send_weekly_digest(
        &self,
        mailer: &dyn Mailer,
    ) -> Result<u64, ReportsServiceError> {
        let stats = self.gather_stats().await?;

        let mut tx = self.db.begin_transaction().await?;
        let recipients = self.repository.admin_emails(&mut tx).await?;
        tx.commit().await?;

        let body = stats.digest();

        for email in &recipients {
            mailer.send(email, DIGEST_SUBJECT, &body).await?;
        }

        info!(recipients = recipients.len(), "weekly digest sent");

        Ok(recipients.len() as u64)
    }

    async fn gather_stats(&self) -> Result<StoreStats, ReportsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let stats = StoreStats {
            user_count: self.repository.count_users(&mut tx).await?,
            order_count: self.repository.count_orders(&mut tx).await?,
            product_count: self.repository.count_products(&mut tx).await?,
            revenue: self.repository.completed_revenue(&mut tx).await?,
        };

        tx.commit().await?;

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        domain::{
            baskets::service::BasketsService,
            catalog::service::CatalogService,
            orders::models::OrderStatus,
            orders::service::OrdersService,
            reports::mailer::MockMailer,
            users::models::Role,
            users::service::UsersService,
        },
        test::{
            TestContext,
            helpers::{checkout_details, new_product, new_user},
        },
    };

    use super::*;

    #[tokio::test]
    async fn store_stats_counts_entities_and_completed_revenue() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .catalog
            .create_product(&ctx.admin, new_product(Uuid::now_v7(), "Handset", 5_000))
            .await?;

        // One completed order (counted in revenue) and one left new.
        ctx.baskets.add_item(ctx.user_uuid, product.uuid, 3).await?;
        let completed = ctx
            .orders
            .checkout(ctx.user_uuid, checkout_details())
            .await?;
        ctx.orders
            .update_status(&ctx.admin, completed.uuid, OrderStatus::Completed)
            .await?;

        ctx.baskets.add_item(ctx.user_uuid, product.uuid, 2).await?;
        ctx.orders
            .checkout(ctx.user_uuid, checkout_details())
            .await?;

        let stats = ctx.reports.store_stats(&ctx.admin).await?;

        // The context seeds one shopper and one admin.
        assert_eq!(stats.user_count, 2);
        assert_eq!(stats.order_count, 2);
        assert_eq!(stats.product_count, 1);
        assert_eq!(stats.revenue, 15_000);

        Ok(())
    }

    #[tokio::test]
    async fn digest_goes_to_each_active_admin() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .create_user(new_user(Uuid::now_v7(), "second-admin", Role::Admin))
            .await?;

        let blocked = Uuid::now_v7();
        ctx.users
            .create_user(new_user(blocked, "blocked-admin", Role::Admin))
            .await?;
        ctx.users.set_active(&ctx.admin, blocked, false).await?;

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|_, subject, body| {
                subject == DIGEST_SUBJECT && body.contains("Weekly store statistics")
            })
            .times(2)
            .returning(|_, _, _| Ok(()));

        let sent = ctx.reports.send_weekly_digest(&mailer).await?;

        assert_eq!(sent, 2);

        Ok(())
    }
}
