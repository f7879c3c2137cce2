//! Articles Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::articles::models::{Article, NewArticle};

const CREATE_ARTICLE_SQL: &str = include_str!("sql/create_article.sql");
const LIST_RECENT_SQL: &str = include_str!("sql/list_recent.sql");
const TAG_CATEGORY_SQL: &str = include_str!("sql/tag_category.sql");
const LIST_FOR_CATEGORY_SQL: &str = include_str!("sql/list_for_category.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgArticlesRepository;

impl PgArticlesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_article(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        article: NewArticle,
    ) -> Result<Article, sqlx::Error> {
        query_as::<Postgres, Article>(CREATE_ARTICLE_SQL)
            .bind(article.uuid)
            .bind(article.title)
            .bind(article.teaser)
            .bind(article.full_text)
            .bind(article.source_url)
            .bind(article.is_featured)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_recent(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: u32,
    ) -> Result<Vec<Article>, sqlx::Error> {
        query_as::<Postgres, Article>(LIST_RECENT_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn tag_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        article: Uuid,
        category: Uuid,
        weight: u16,
    ) -> Result<(), sqlx::Error> {
        query(TAG_CATEGORY_SQL)
            .bind(article)
            .bind(category)
            .bind(i16::try_from(weight).map_err(|e| sqlx::Error::ColumnDecode {
                index: "weight".to_string(),
                source: Box::new(e),
            })?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_for_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: Uuid,
    ) -> Result<Vec<Article>, sqlx::Error> {
        query_as::<Postgres, Article>(LIST_FOR_CATEGORY_SQL)
            .bind(category)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Article {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            title: row.try_get("title")?,
            teaser: row.try_get("teaser")?,
            full_text: row.try_get("full_text")?,
            source_url: row.try_get("source_url")?,
            is_featured: row.try_get("is_featured")?,
            published_at: row.try_get::<SqlxTimestamp, _>("published_at")?.to_jiff(),
        })
    }
}
