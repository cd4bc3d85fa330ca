use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};

use crate::{
    dto::products::{
        CreateProductRequest, ProductCreated, ProductList, ProductsCreated, ProductsDeleted,
        UpdateProductRequest,
    },
    error::{AppResult, ErrorBody},
    extract::ValidJson,
    models::Product,
    response::ApiResponse,
    routes::params::ProductQuery,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/addProduct", post(create_product))
        .route("/addManyProducts", post(create_products))
        .route("/getProducts", get(list_products))
        .route("/getProduct/{id}", get(get_product))
        .route("/filterProducts", get(filter_products))
        .route("/updateProduct/{id}", put(update_product))
        .route("/deleteProduct/{id}", delete(delete_product))
        .route("/deleteProducts", delete(delete_all_products))
}

#[utoipa::path(
    post,
    path = "/api/v1/addProduct",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Create product", body = ApiResponse<ProductCreated>),
        (status = 400, description = "Invalid product", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductCreated>>)> {
    let resp = product_service::create_product(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/v1/addManyProducts",
    request_body = Vec<CreateProductRequest>,
    responses(
        (status = 201, description = "Create products in one batch", body = ApiResponse<ProductsCreated>),
        (status = 400, description = "At least one product is invalid", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn create_products(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<Vec<CreateProductRequest>>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductsCreated>>)> {
    let resp = product_service::create_products(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/v1/getProducts",
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/getProduct/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::get_product(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/filterProducts",
    params(ProductQuery),
    responses(
        (status = 200, description = "Filtered products sorted by price", body = ApiResponse<ProductList>),
        (status = 400, description = "Malformed filter value", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn filter_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::filter_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/updateProduct/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid or unknown field", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(payload): ValidJson<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::update_product(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/deleteProduct/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::delete_product(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/deleteProducts",
    responses(
        (status = 200, description = "Remove every product", body = ApiResponse<ProductsDeleted>)
    ),
    tag = "Products"
)]
pub async fn delete_all_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductsDeleted>>> {
    let resp = product_service::delete_all_products(&state).await?;
    Ok(Json(resp))
}
