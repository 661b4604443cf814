//! The persistence boundary between the use cases and actual storage.
//!
//! Each store is a small capability set. Two variants exist for both
//! traits: a keyed in-memory container ([`memory`]) used by fast
//! deterministic tests, and a sea-orm variant ([`database`]) used in
//! production. The `Ledger` observes no difference between them.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{LedgerError, Statement, User};

pub mod database;
pub mod memory;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, LedgerError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, LedgerError>;

    /// Persists `user` and returns the stored record.
    async fn create(&self, user: User) -> Result<User, LedgerError>;
}

#[async_trait]
pub trait StatementStore: Send + Sync {
    /// Looks up one statement, scoped to its owner: a statement belonging
    /// to another user does not resolve.
    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Statement>, LedgerError>;

    /// Persists `statement` and returns the stored record.
    async fn create(&self, statement: Statement) -> Result<Statement, LedgerError>;

    /// All statements of a user, oldest first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Statement>, LedgerError>;
}
