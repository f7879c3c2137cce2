//! Articles service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        articles::{
            errors::ArticlesServiceError,
            models::{Article, NewArticle},
            repository::PgArticlesRepository,
        },
        users::models::AdminCapability,
    },
};

#[derive(Debug, Clone)]
pub struct PgArticlesService {
    db: Db,
    repository: PgArticlesRepository,
}

impl PgArticlesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgArticlesRepository::new(),
        }
    }
}

#[async_trait]
impl ArticlesService for PgArticlesService {
    async fn create_article(
        &self,
        _admin: &AdminCapability,
        article: NewArticle,
    ) -> Result<Article, ArticlesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_article(&mut tx, article).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Article>, ArticlesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let articles = self.repository.list_recent(&mut tx, limit).await?;

        tx.commit().await?;

        Ok(articles)
    }

    async fn tag_category(
        &self,
        _admin: &AdminCapability,
        article: Uuid,
        category: Uuid,
        weight: u16,
    ) -> Result<(), ArticlesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository
            .tag_category(&mut tx, article, category, weight)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn list_for_category(
        &self,
        category: Uuid,
    ) -> Result<Vec<Article>, ArticlesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let articles = self.repository.list_for_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(articles)
    }
}

#[automock]
#[async_trait]
pub trait ArticlesService: Send + Sync {
    /// Publishes a new article.
    async fn create_article(
        &self,
        admin: &AdminCapability,
        article: NewArticle,
    ) -> Result<Article, ArticlesServiceError>;

    /// The most recently published articles, newest first.
    async fn list_recent(&self, limit: u32) -> Result<Vec<Article>, ArticlesServiceError>;

    /// Associate an article with a category; heavier weights list first.
    async fn tag_category(
        &self,
        admin: &AdminCapability,
        article: Uuid,
        category: Uuid,
        weight: u16,
    ) -> Result<(), ArticlesServiceError>;

    /// Articles tagged with a category, by descending weight.
    async fn list_for_category(
        &self,
        category: Uuid,
    ) -> Result<Vec<Article>, ArticlesServiceError>;
}
