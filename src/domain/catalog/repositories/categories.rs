//! Categories Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::try_get_amount,
    domain::catalog::models::{Category, CategorySummary, NewCategory},
};

const CREATE_CATEGORY_SQL: &str = include_str!("../sql/create_category.sql");
const LIST_CATEGORIES_SQL: &str = include_str!("../sql/list_categories.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCategoriesRepository;

impl PgCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: NewCategory,
    ) -> Result<Category, sqlx::Error> {
        query_as::<Postgres, Category>(CREATE_CATEGORY_SQL)
            .bind(category.uuid)
            .bind(category.name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CategorySummary>, sqlx::Error> {
        query_as::<Postgres, CategorySummary>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Category {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CategorySummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let product_count: i64 = row.try_get("product_count")?;

        let avg_price = match row.try_get::<Option<i64>, _>("avg_price")? {
            Some(_) => Some(try_get_amount(row, "avg_price")?),
            None => None,
        };

        Ok(Self {
            category: Category::from_row(row)?,
            product_count: u64::try_from(product_count).unwrap_or_default(),
            avg_price,
        })
    }
}
