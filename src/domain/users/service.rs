//! Users service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::users::{
        errors::UsersServiceError,
        models::{AdminCapability, NewUser, Role, User},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, uuid: Uuid) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self.repository.get_user(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .repository
            .get_user_by_username(&mut tx, username)
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn set_role(
        &self,
        _admin: &AdminCapability,
        uuid: Uuid,
        role: Role,
    ) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.set_role(&mut tx, uuid, role).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn set_active(
        &self,
        _admin: &AdminCapability,
        uuid: Uuid,
        is_active: bool,
    ) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.set_active(&mut tx, uuid, is_active).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_user(
        &self,
        _admin: &AdminCapability,
        uuid: Uuid,
    ) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_user(&mut tx, uuid).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn require_admin(&self, uuid: Uuid) -> Result<AdminCapability, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = match self.repository.get_user(&mut tx, uuid).await {
            Ok(user) => user,
            Err(sqlx::Error::RowNotFound) => return Err(UsersServiceError::Forbidden),
            Err(error) => return Err(error.into()),
        };

        tx.commit().await?;

        if user.role != Role::Admin || !user.is_active {
            return Err(UsersServiceError::Forbidden);
        }

        Ok(AdminCapability::new(user.uuid))
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Creates a new user account.
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, uuid: Uuid) -> Result<User, UsersServiceError>;

    /// Retrieve a single user by username.
    async fn get_user_by_username(&self, username: &str) -> Result<User, UsersServiceError>;

    /// Retrieves all users, newest first.
    async fn list_users(&self) -> Result<Vec<User>, UsersServiceError>;

    /// Changes a user's role.
    async fn set_role(
        &self,
        admin: &AdminCapability,
        uuid: Uuid,
        role: Role,
    ) -> Result<User, UsersServiceError>;

    /// Activates or blocks a user account.
    async fn set_active(
        &self,
        admin: &AdminCapability,
        uuid: Uuid,
        is_active: bool,
    ) -> Result<User, UsersServiceError>;

    /// Deletes a user account.
    async fn delete_user(
        &self,
        admin: &AdminCapability,
        uuid: Uuid,
    ) -> Result<(), UsersServiceError>;

    /// Grant an [`AdminCapability`] iff the account exists, is active, and
    /// has the admin role.
    async fn require_admin(&self, uuid: Uuid) -> Result<AdminCapability, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::test::{TestContext, helpers::new_user};

    use super::*;

    #[tokio::test]
    async fn create_user_returns_created_account() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = Uuid::now_v7();

        let user = ctx
            .users
            .create_user(new_user(uuid, "alice", Role::User))
            .await?;

        assert_eq!(user.uuid, uuid);
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::User);
        assert!(user.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn create_user_duplicate_username_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .create_user(new_user(Uuid::now_v7(), "bob", Role::User))
            .await?;

        let result = ctx
            .users
            .create_user(new_user(Uuid::now_v7(), "bob", Role::User))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_user_by_username_finds_account() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = Uuid::now_v7();

        ctx.users
            .create_user(new_user(uuid, "carol", Role::User))
            .await?;

        let user = ctx.users.get_user_by_username("carol").await?;

        assert_eq!(user.uuid, uuid);

        Ok(())
    }

    #[tokio::test]
    async fn get_user_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_user(Uuid::now_v7()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn require_admin_for_regular_user_is_forbidden() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.users.require_admin(ctx.user_uuid).await;

        assert!(
            matches!(result, Err(UsersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn require_admin_for_unknown_account_is_forbidden() {
        let ctx = TestContext::new().await;

        let result = ctx.users.require_admin(Uuid::now_v7()).await;

        assert!(
            matches!(result, Err(UsersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );
    }

    #[tokio::test]
    async fn require_admin_for_blocked_admin_is_forbidden() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = Uuid::now_v7();

        ctx.users
            .create_user(new_user(uuid, "blocked-admin", Role::Admin))
            .await?;

        ctx.users.set_active(&ctx.admin, uuid, false).await?;

        let result = ctx.users.require_admin(uuid).await;

        assert!(
            matches!(result, Err(UsersServiceError::Forbidden)),
            "expected Forbidden for blocked admin, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn set_role_promotes_user_to_admin() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = Uuid::now_v7();

        ctx.users
            .create_user(new_user(uuid, "dave", Role::User))
            .await?;

        let updated = ctx.users.set_role(&ctx.admin, uuid, Role::Admin).await?;

        assert_eq!(updated.role, Role::Admin);
        assert!(ctx.users.require_admin(uuid).await.is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn delete_user_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = Uuid::now_v7();

        ctx.users
            .create_user(new_user(uuid, "erin", Role::User))
            .await?;

        ctx.users.delete_user(&ctx.admin, uuid).await?;

        let result = ctx.users.get_user(uuid).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_user_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.delete_user(&ctx.admin, Uuid::now_v7()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
