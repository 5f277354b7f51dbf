//! HTTP API endpoint handlers.
//!
//! Bodies are parsed by hand rather than through the `Json` extractor so
//! that every malformed body maps to a plain 400, matching the wire
//! contract. Failures are reported as status codes plus a short plaintext
//! body; no structured error codes exist on this surface.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::Username,
    infrastructure::dto::http::CredentialsDto,
    ui::state::AppState,
    usecase::{AuthError, AuthenticateUserUseCase, RegisterError, RegisterUserUseCase},
};

/// Health check endpoint
pub async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({"status": "ok"}))
}

/// `POST /register`: create a new user.
///
/// 201 on success, 409 if the username is taken, 400 on a malformed or
/// invalid body, 500 on a store failure.
pub async fn register_user(State(state): State<Arc<AppState>>, body: String) -> Response {
    let dto: CredentialsDto = match serde_json::from_str(&body) {
        Ok(dto) => dto,
        Err(e) => {
            tracing::warn!("malformed /register body: {}", e);
            return (StatusCode::BAD_REQUEST, "Malformed request body").into_response();
        }
    };

    let username = match Username::try_from(dto.username) {
        Ok(username) => username,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let usecase = RegisterUserUseCase::new(state.users.clone(), state.hasher.clone());
    match usecase.execute(username.clone(), &dto.password).await {
        Ok(()) => {
            tracing::info!("registered user '{}'", username);
            StatusCode::CREATED.into_response()
        }
        Err(RegisterError::UsernameTaken(_)) => {
            (StatusCode::CONFLICT, "Username already exists").into_response()
        }
        Err(RegisterError::Store(e)) => {
            tracing::error!("user store failure during registration: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `POST /login`: verify credentials.
///
/// 200 on success, 401 on bad credentials (unknown user and wrong password
/// are indistinguishable), 400 on a malformed body, 500 on a store failure.
pub async fn login_user(State(state): State<Arc<AppState>>, body: String) -> Response {
    let dto: CredentialsDto = match serde_json::from_str(&body) {
        Ok(dto) => dto,
        Err(e) => {
            tracing::warn!("malformed /login body: {}", e);
            return (StatusCode::BAD_REQUEST, "Malformed request body").into_response();
        }
    };

    // A name that fails domain validation cannot belong to any registered
    // user, so it falls into the same 401 as an unknown username.
    let username = match Username::try_from(dto.username) {
        Ok(username) => username,
        Err(_) => {
            return (StatusCode::UNAUTHORIZED, "Invalid username or password").into_response();
        }
    };

    let usecase = AuthenticateUserUseCase::new(state.users.clone(), state.hasher.clone());
    match usecase.execute(&username, &dto.password).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(AuthError::InvalidCredentials) => {
            (StatusCode::UNAUTHORIZED, "Invalid username or password").into_response()
        }
        Err(AuthError::Store(e)) => {
            tracing::error!("user store failure during login: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
