use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    dto::auth::{IdentityResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    error::{AppResult, ErrorBody},
    extract::ValidJson,
    middleware::auth::AuthUser,
    response::ApiResponse,
    security::cookie::auth_cookie,
    services::auth_service::{login_user, register_user},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/validate", get(validate))
}

#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Register user", body = ApiResponse<RegisterResponse>),
        (status = 400, description = "Invalid input or email already registered", body = ErrorBody)
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<RegisterResponse>>)> {
    let resp = register_user(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user; token is also set as the `Authorization` cookie", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let data = login_user(&state, payload).await?;
    let cookie = auth_cookie(&state.cookie, &data.token, state.tokens.ttl());

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::success("Logged in", data, None)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/validate",
    responses(
        (status = 200, description = "Identity bound to the presented token", body = ApiResponse<IdentityResponse>),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody)
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Auth"
)]
pub async fn validate(user: AuthUser) -> Json<ApiResponse<IdentityResponse>> {
    Json(ApiResponse::success(
        "Authorized",
        IdentityResponse {
            id: user.user_id.to_hex(),
            role: user.role,
        },
        None,
    ))
}
