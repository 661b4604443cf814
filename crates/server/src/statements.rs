//! Statements API endpoints

use api_types::statement::{
    BalanceResponse, StatementKind as ApiKind, StatementNew, StatementView,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};
use ledger::{NewStatement, Statement, StatementKind, User};

fn map_kind(kind: StatementKind) -> ApiKind {
    match kind {
        StatementKind::Deposit => ApiKind::Deposit,
        StatementKind::Withdraw => ApiKind::Withdraw,
    }
}

fn view(statement: Statement) -> StatementView {
    StatementView {
        id: statement.id,
        user_id: statement.user_id,
        kind: map_kind(statement.kind),
        amount_minor: statement.amount_minor,
        description: statement.description,
        created_at: statement.created_at,
        updated_at: statement.updated_at,
    }
}

async fn create(
    state: ServerState,
    user: User,
    kind: StatementKind,
    payload: StatementNew,
) -> Result<(StatusCode, Json<StatementView>), ServerError> {
    let statement = state
        .ledger
        .create_statement(NewStatement {
            user_id: user.id,
            kind,
            amount_minor: payload.amount_minor,
            description: payload.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(view(statement))))
}

pub async fn deposit(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<StatementNew>,
) -> Result<(StatusCode, Json<StatementView>), ServerError> {
    create(state, user, StatementKind::Deposit, payload).await
}

pub async fn withdraw(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<StatementNew>,
) -> Result<(StatusCode, Json<StatementView>), ServerError> {
    create(state, user, StatementKind::Withdraw, payload).await
}

/// Handle requests for the statement history and the balance derived from
/// it.
pub async fn balance(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<BalanceResponse>, ServerError> {
    let account = state.ledger.balance(user.id).await?;

    Ok(Json(BalanceResponse {
        statements: account.statements.into_iter().map(view).collect(),
        balance_minor: account.balance_minor,
    }))
}

/// Handle requests for a single statement operation.
pub async fn operation(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatementView>, ServerError> {
    let statement = state.ledger.statement(user.id, id).await?;

    Ok(Json(view(statement)))
}
