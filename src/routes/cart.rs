use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::cart::{CartCreated, CartList, SubmitCartRequest},
    error::{AppResult, ErrorBody},
    extract::ValidJson,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/cart", post(submit_cart).get(cart_list))
}

#[utoipa::path(
    post,
    path = "/api/v1/cart",
    request_body = SubmitCartRequest,
    responses(
        (status = 201, description = "Cart snapshot stored", body = ApiResponse<CartCreated>),
        (status = 400, description = "Invalid cart", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Cart"
)]
pub async fn submit_cart(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(payload): ValidJson<SubmitCartRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CartCreated>>)> {
    let resp = cart_service::submit_cart(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/v1/cart",
    responses(
        (status = 200, description = "Cart snapshots of the current user, newest first", body = ApiResponse<CartList>),
        (status = 401, description = "Unauthorized", body = ErrorBody),
    ),
    security(("bearer_auth" = []), ("cookie_auth" = [])),
    tag = "Cart"
)]
pub async fn cart_list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartList>>> {
    let resp = cart_service::list_carts(&state, &user).await?;
    Ok(Json(resp))
}
