//! Request and response bodies shared by the server and its clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    /// Request body for `POST /users`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    /// A user as returned by the API. Never carries the password digest.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub name: String,
        pub email: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod statement {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum StatementKind {
        Deposit,
        Withdraw,
    }

    /// Request body for `POST /statements/deposit` and
    /// `POST /statements/withdraw`. The kind comes from the route.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatementNew {
        pub amount_minor: i64,
        pub description: String,
    }

    /// A statement as returned by the API.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatementView {
        pub id: Uuid,
        pub user_id: Uuid,
        #[serde(rename = "type")]
        pub kind: StatementKind,
        pub amount_minor: i64,
        pub description: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    /// Response body for `GET /statements/balance`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceResponse {
        pub statements: Vec<StatementView>,
        pub balance_minor: i64,
    }
}
