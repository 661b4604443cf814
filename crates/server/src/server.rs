use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};

use std::sync::Arc;

use crate::{statements, user};
use ledger::{Ledger, SqlStatementStore, SqlUserStore};

/// The ledger variant the server runs against.
pub type SqlLedger = Ledger<SqlUserStore, SqlStatementStore>;

#[derive(Clone)]
pub struct ServerState {
    pub ledger: Arc<SqlLedger>,
}

/// Resolves Basic credentials (email and password) to a user and stores it
/// in the request extensions.
///
/// Every request re-reads the user from the store, so a deleted account
/// stops authenticating immediately.
async fn auth(
    auth_header: TypedHeader<Authorization<Basic>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user = state
        .ledger
        .authenticate(auth_header.username(), auth_header.password())
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Builds the application router. Registration is the only route outside
/// the authentication layer.
pub fn router(ledger: SqlLedger) -> Router {
    let state = ServerState {
        ledger: Arc::new(ledger),
    };

    let protected = Router::new()
        .route("/profile", get(user::profile))
        .route("/statements/deposit", post(statements::deposit))
        .route("/statements/withdraw", post(statements::withdraw))
        .route("/statements/balance", get(statements::balance))
        .route("/statements/{id}", get(statements::operation))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/users", post(user::register))
        .merge(protected)
        .with_state(state)
}

pub async fn run(ledger: SqlLedger) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(ledger, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    ledger: SqlLedger,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ledger)).await
}

pub fn spawn_with_listener(
    ledger: SqlLedger,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(ledger, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
