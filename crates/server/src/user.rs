//! Users API endpoints

use api_types::user::{UserNew, UserView};
use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};
use ledger::{NewUser, User};

fn view(user: User) -> UserView {
    UserView {
        id: user.id,
        name: user.name,
        email: user.email,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

/// Registers a new account holder. The only route without authentication.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = state
        .ledger
        .register_user(NewUser {
            name: payload.name,
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(view(user))))
}

/// Returns the authenticated user's record.
pub async fn profile(Extension(user): Extension<User>) -> Json<UserView> {
    Json(view(user))
}
