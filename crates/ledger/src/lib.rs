//! Core ledger: account holders, deposit/withdraw statements and derived
//! balances.
//!
//! The [`Ledger`] orchestrates every operation over two injected stores
//! (users and statements). It enforces the single domain rule of the
//! system: a withdrawal must not exceed the current balance, where the
//! balance is always the sum of deposits minus withdrawals recorded so
//! far.

use uuid::Uuid;

pub use error::LedgerError;
pub use statements::{Statement, StatementKind, balance_minor};
pub use store::database::{SqlStatementStore, SqlUserStore};
pub use store::memory::{MemoryStatementStore, MemoryUserStore};
pub use store::{StatementStore, UserStore};
pub use users::{User, password_digest};

mod error;
mod statements;
mod store;
mod users;

type ResultLedger<T> = Result<T, LedgerError>;

/// Request to record a new statement.
#[derive(Clone, Debug)]
pub struct NewStatement {
    pub user_id: Uuid,
    pub kind: StatementKind,
    pub amount_minor: i64,
    pub description: String,
}

/// Request to register a new account holder.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Plaintext; digested before it reaches a store.
    pub password: String,
}

/// A statement history together with the balance derived from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountBalance {
    pub statements: Vec<Statement>,
    pub balance_minor: i64,
}

#[derive(Debug)]
pub struct Ledger<U, S> {
    users: U,
    statements: S,
}

impl<U, S> Ledger<U, S>
where
    U: UserStore,
    S: StatementStore,
{
    pub fn new(users: U, statements: S) -> Self {
        Self { users, statements }
    }

    /// Registers a new account holder.
    ///
    /// The email must not be in use yet; the password is stored as a
    /// digest.
    pub async fn register_user(&self, new: NewUser) -> ResultLedger<User> {
        if self.users.find_by_email(&new.email).await?.is_some() {
            return Err(LedgerError::EmailTaken);
        }
        let user = User::new(new.name, new.email, password_digest(&new.password));
        self.users.create(user).await
    }

    /// Resolves credentials to a user.
    ///
    /// Unknown email and wrong password both report
    /// [`LedgerError::InvalidCredentials`]; callers cannot tell the two
    /// apart.
    pub async fn authenticate(&self, email: &str, password: &str) -> ResultLedger<User> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Err(LedgerError::InvalidCredentials);
        };
        if user.password != password_digest(password) {
            return Err(LedgerError::InvalidCredentials);
        }
        Ok(user)
    }

    /// Returns a user by id, or [`LedgerError::UserNotFound`].
    pub async fn user(&self, user_id: Uuid) -> ResultLedger<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(LedgerError::UserNotFound)
    }

    /// Records a deposit or withdraw statement.
    ///
    /// The user is looked up again even though the caller already
    /// authenticated one: the account may have been removed in between,
    /// and a statement must never be written for an absent user.
    ///
    /// For withdrawals the current balance is derived from the statement
    /// history; `amount_minor` may equal the balance (withdrawing down to
    /// exactly zero succeeds) but not exceed it. Deposits skip the check.
    ///
    /// On failure nothing is written. The balance read and the insert are
    /// not serialized against concurrent statements for the same user;
    /// hardening that window needs a per-user lock or a serializable
    /// transaction at the store level.
    pub async fn create_statement(&self, new: NewStatement) -> ResultLedger<Statement> {
        self.user(new.user_id).await?;

        let statement = Statement::new(new.user_id, new.kind, new.amount_minor, new.description)?;

        if statement.kind == StatementKind::Withdraw {
            let history = self.statements.list_by_user(statement.user_id).await?;
            if statement.amount_minor > balance_minor(&history) {
                return Err(LedgerError::InsufficientFunds);
            }
        }

        self.statements.create(statement).await
    }

    /// Returns a user's statement history and the balance derived from it.
    pub async fn balance(&self, user_id: Uuid) -> ResultLedger<AccountBalance> {
        self.user(user_id).await?;

        let statements = self.statements.list_by_user(user_id).await?;
        let balance_minor = balance_minor(&statements);
        Ok(AccountBalance {
            statements,
            balance_minor,
        })
    }

    /// Returns one statement operation, scoped to its owner.
    pub async fn statement(&self, user_id: Uuid, statement_id: Uuid) -> ResultLedger<Statement> {
        self.user(user_id).await?;

        self.statements
            .find_by_id(user_id, statement_id)
            .await?
            .ok_or(LedgerError::StatementNotFound)
    }
}
