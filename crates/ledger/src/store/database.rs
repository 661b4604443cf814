//! sea-orm backed stores.
//!
//! The connection handle is injected at construction; there is no ambient
//! database state. Cloning a store clones the handle, not the pool.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{LedgerError, Statement, User, statements, users};

use super::{StatementStore, UserStore};

#[derive(Clone, Debug)]
pub struct SqlUserStore {
    db: DatabaseConnection,
}

impl SqlUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for SqlUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, LedgerError> {
        users::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, LedgerError> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn create(&self, user: User) -> Result<User, LedgerError> {
        let model = users::ActiveModel::from(&user).insert(&self.db).await?;
        User::try_from(model)
    }
}

#[derive(Clone, Debug)]
pub struct SqlStatementStore {
    db: DatabaseConnection,
}

impl SqlStatementStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StatementStore for SqlStatementStore {
    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Statement>, LedgerError> {
        statements::Entity::find_by_id(id.to_string())
            .filter(statements::Column::UserId.eq(user_id.to_string()))
            .one(&self.db)
            .await?
            .map(Statement::try_from)
            .transpose()
    }

    async fn create(&self, statement: Statement) -> Result<Statement, LedgerError> {
        let model = statements::ActiveModel::from(&statement)
            .insert(&self.db)
            .await?;
        Statement::try_from(model)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Statement>, LedgerError> {
        statements::Entity::find()
            .filter(statements::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(statements::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Statement::try_from)
            .collect()
    }
}
