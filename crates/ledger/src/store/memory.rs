//! Keyed in-memory stores.
//!
//! Nothing survives the process; intended for sequential test use. Each
//! call locks a plain map, so the variant makes no atomicity claims across
//! calls.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{LedgerError, Statement, User};

use super::{StatementStore, UserStore};

fn relock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, LedgerError> {
        Ok(relock(&self.users).get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, LedgerError> {
        Ok(relock(&self.users)
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, LedgerError> {
        relock(&self.users).insert(user.id, user.clone());
        Ok(user)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStatementStore {
    statements: Mutex<Vec<Statement>>,
}

impl MemoryStatementStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatementStore for MemoryStatementStore {
    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Statement>, LedgerError> {
        Ok(relock(&self.statements)
            .iter()
            .find(|statement| statement.id == id && statement.user_id == user_id)
            .cloned())
    }

    async fn create(&self, statement: Statement) -> Result<Statement, LedgerError> {
        relock(&self.statements).push(statement.clone());
        Ok(statement)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Statement>, LedgerError> {
        // Insertion order doubles as chronological order here.
        Ok(relock(&self.statements)
            .iter()
            .filter(|statement| statement.user_id == user_id)
            .cloned()
            .collect())
    }
}
