use axum::{
    Json,
    extract::{Query, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

use super::observability::RequestSpan;
use super::{
    ApiError, ApiResponse, AppState, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse,
};
use crate::constants::headers::{API_KEY, BEARER_PREFIX};
use crate::services::AuthError;

#[derive(Debug, Default, Deserialize)]
pub struct AuthQuery {
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
}

// ============================================================================
// Middleware
// ============================================================================

/// Resolves the bearer token into a [`Principal`](crate::domain::Principal)
/// and stores it in the request extensions. Token sources, in order:
/// 1. `X-Api-Key` header
/// 2. `Authorization: Bearer <token>` header
/// 3. `?apiKey=` query parameter, if enabled in config
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AuthQuery>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let allow_query = state.config.server.allow_api_key_in_query;

    let Some(token) = extract_api_key(&query, &headers, allow_query) else {
        return Err(AuthError::invalid_input("apiKey is required.").into());
    };

    let principal = state.auth_service.authenticate(&token).await?;

    RequestSpan::of(&request).record("user_id", principal.user_id.value());
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

fn extract_api_key(query: &AuthQuery, headers: &HeaderMap, allow_query: bool) -> Option<String> {
    if let Some(api_key) = headers.get(API_KEY)
        && let Ok(key_str) = api_key.to_str()
    {
        return Some(key_str.to_string());
    }

    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix(BEARER_PREFIX)
    {
        return Some(token.trim().to_string());
    }

    if allow_query {
        return query.api_key.clone().filter(|key| !key.is_empty());
    }

    None
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /users/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisterResponse>>, ApiError> {
    let user_id = state
        .auth_service
        .register(&payload.user_name, &payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(RegisterResponse {
        message: "User registered successfully.".to_string(),
        user_id,
    })))
}

/// POST /users/login
/// Authenticate with email and password, returns a fresh token on success
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let result = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(LoginResponse {
        api_key: result.api_key,
    })))
}
