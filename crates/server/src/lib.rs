use axum::{Json, http::StatusCode, response::IntoResponse};
use ledger::LedgerError;
use serde::Serialize;

pub use server::{router, run, run_with_listener, spawn_with_listener};

mod server;
mod statements;
mod user;

pub enum ServerError {
    Ledger(LedgerError),
    Generic(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

fn status_for_ledger_error(err: &LedgerError) -> StatusCode {
    match err {
        LedgerError::UserNotFound | LedgerError::StatementNotFound => StatusCode::NOT_FOUND,
        LedgerError::InsufficientFunds => StatusCode::BAD_REQUEST,
        LedgerError::InvalidAmount(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LedgerError::EmailTaken => StatusCode::CONFLICT,
        LedgerError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        LedgerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_ledger_error(err: LedgerError) -> String {
    match err {
        LedgerError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Ledger(err) => {
                (status_for_ledger_error(&err), message_for_ledger_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<LedgerError> for ServerError {
    fn from(value: LedgerError) -> Self {
        Self::Ledger(value)
    }
}
