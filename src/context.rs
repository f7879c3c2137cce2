//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        articles::{ArticlesService, PgArticlesService},
        baskets::{BasketsService, PgBasketsService},
        catalog::{CatalogService, PgCatalogService},
        orders::{OrdersService, PgOrdersService},
        reports::PgReportsService,
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub catalog: Arc<dyn CatalogService>,
    pub baskets: Arc<dyn BasketsService>,
    pub orders: Arc<dyn OrdersService>,
    pub articles: Arc<dyn ArticlesService>,
    pub reports: PgReportsService,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self::from_db(db))
    }

    /// Build application context over an existing database handle.
    #[must_use]
    pub fn from_db(db: Db) -> Self {
        Self {
            users: Arc::new(PgUsersService::new(db.clone())),
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            baskets: Arc::new(PgBasketsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            articles: Arc::new(PgArticlesService::new(db.clone())),
            reports: PgReportsService::new(db),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{domain::catalog::models::ProductFilter, test::db::TestDb};

    use super::*;

    #[tokio::test]
    async fn context_wires_services_over_one_pool() {
        let test_db = TestDb::new().await;

        let context = AppContext::from_db(Db::new(test_db.pool().clone()));

        let products = context
            .catalog
            .list_products(ProductFilter::default())
            .await
            .expect("listing products should succeed");

        assert!(products.is_empty());
    }
}
