//! Statement primitives.
//!
//! A `Statement` is an immutable record of a single deposit or withdraw
//! against an account. There is no stored balance column anywhere: the
//! current balance is always derived by summing the statement history (see
//! [`balance_minor`]).

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, ResultLedger};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Deposit,
    Withdraw,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
        }
    }
}

impl TryFrom<&str> for StatementKind {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "deposit" => Ok(Self::Deposit),
            "withdraw" => Ok(Self::Withdraw),
            other => Err(LedgerError::InvalidAmount(format!(
                "invalid statement kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: StatementKind,
    pub amount_minor: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Statement {
    pub fn new(
        user_id: Uuid,
        kind: StatementKind,
        amount_minor: i64,
        description: String,
    ) -> ResultLedger<Self> {
        if amount_minor <= 0 {
            return Err(LedgerError::InvalidAmount(
                "amount_minor must be > 0".to_string(),
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            amount_minor,
            description,
            created_at: now,
            updated_at: now,
        })
    }

    /// The amount with the sign its kind contributes to the balance.
    pub fn signed_minor(&self) -> i64 {
        match self.kind {
            StatementKind::Deposit => self.amount_minor,
            StatementKind::Withdraw => -self.amount_minor,
        }
    }
}

/// Derives the current balance from a statement history.
///
/// Sum of deposits minus sum of withdrawals, in minor units. An empty
/// history is balance zero.
pub fn balance_minor(statements: &[Statement]) -> i64 {
    statements.iter().map(Statement::signed_minor).sum()
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "statements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub amount_minor: i64,
    pub description: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Statement> for ActiveModel {
    fn from(statement: &Statement) -> Self {
        Self {
            id: ActiveValue::Set(statement.id.to_string()),
            user_id: ActiveValue::Set(statement.user_id.to_string()),
            kind: ActiveValue::Set(statement.kind.as_str().to_string()),
            amount_minor: ActiveValue::Set(statement.amount_minor),
            description: ActiveValue::Set(statement.description.clone()),
            created_at: ActiveValue::Set(statement.created_at),
            updated_at: ActiveValue::Set(statement.updated_at),
        }
    }
}

impl TryFrom<Model> for Statement {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id).map_err(|_| LedgerError::StatementNotFound)?,
            user_id: Uuid::parse_str(&model.user_id).map_err(|_| LedgerError::UserNotFound)?,
            kind: StatementKind::try_from(model.kind.as_str())?,
            amount_minor: model.amount_minor,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
