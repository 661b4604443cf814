//! The module contains the errors the ledger can return.
//!
//! Business-rule failures and infrastructure failures are kept apart:
//!
//! - [`UserNotFound`] and [`InsufficientFunds`] are the two failures the
//!   create-statement use case can report.
//! - [`Database`] wraps any storage-level error untouched.
//!
//!  [`UserNotFound`]: LedgerError::UserNotFound
//!  [`InsufficientFunds`]: LedgerError::InsufficientFunds
//!  [`Database`]: LedgerError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("User not found")]
    UserNotFound,
    #[error("Statement not found")]
    StatementNotFound,
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Email already in use")]
    EmailTaken,
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for LedgerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::StatementNotFound, Self::StatementNotFound) => true,
            (Self::InsufficientFunds, Self::InsufficientFunds) => true,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::EmailTaken, Self::EmailTaken) => true,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
