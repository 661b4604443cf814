//! Initial schema.
//!
//! - `users`: account holders, unique email.
//! - `statements`: append-only deposit/withdraw log.
//!
//! `statements.user_id` is indexed but carries no foreign key: a statement
//! references its user without owning it, and removing a user must not
//! cascade into the statement log. The create-statement use case re-checks
//! user existence before every write instead.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Password,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Statements {
    Table,
    Id,
    UserId,
    Kind,
    AmountMinor,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-email-unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Statements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Statements::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Statements::UserId).string().not_null())
                    .col(ColumnDef::new(Statements::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Statements::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Statements::Description).string().not_null())
                    .col(ColumnDef::new(Statements::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Statements::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Supports the balance sum and history listing per user.
        manager
            .create_index(
                Index::create()
                    .name("idx-statements-user_id")
                    .table(Statements::Table)
                    .col(Statements::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Statements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
