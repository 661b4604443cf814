//! Account holders: domain record, persistence model and password digests.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::LedgerError;

/// A registered account holder.
///
/// Users are created once by registration and never mutated afterwards
/// (except for `updated_at`). Statements reference a user by id; they are
/// not owned by it, so removing a user leaves its statements behind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Base64-encoded SHA-256 digest of the password.
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_digest: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password: password_digest,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Returns the base64-encoded SHA-256 digest of `password`.
///
/// The digest is what gets persisted; plaintext passwords never reach a
/// store.
pub fn password_digest(password: &str) -> String {
    BASE64.encode(Sha256::digest(password.as_bytes()))
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::statements::Entity")]
    Statements,
}

impl Related<super::statements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Statements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            id: ActiveValue::Set(user.id.to_string()),
            name: ActiveValue::Set(user.name.clone()),
            email: ActiveValue::Set(user.email.clone()),
            password: ActiveValue::Set(user.password.clone()),
            created_at: ActiveValue::Set(user.created_at),
            updated_at: ActiveValue::Set(user.updated_at),
        }
    }
}

impl TryFrom<Model> for User {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id).map_err(|_| LedgerError::UserNotFound)?,
            name: model.name,
            email: model.email,
            password: model.password,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable_and_not_plaintext() {
        let digest = password_digest("12345");
        assert_eq!(digest, password_digest("12345"));
        assert_ne!(digest, "12345");
        assert_ne!(digest, password_digest("12346"));
    }

    #[test]
    fn new_user_stamps_both_timestamps() {
        let user = User::new(
            "Lorenzo Marcelo".to_string(),
            "lorenzo@gmail.com".to_string(),
            password_digest("12345"),
        );
        assert_eq!(user.created_at, user.updated_at);
    }
}
