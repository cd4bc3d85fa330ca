use mongodb::bson::{self, oid::ObjectId};

use crate::{
    dto::products::{
        CreateProductRequest, ProductCreated, ProductList, ProductsCreated, ProductsDeleted,
        UpdateProductRequest,
    },
    entity::{ProductDocument, ProductPatch, StoredTimeStamp},
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
    validation::{validate_new_product, validate_product_update},
};

const PRODUCT_NOT_FOUND: &str = "Product not found";

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<ProductCreated>> {
    validate_new_product(&payload)?;
    let product = product_from_request(payload, StoredTimeStamp::now());
    state.products.insert(&product).await?;
    tracing::info!(product_id = %product.id, "product created");

    Ok(ApiResponse::success(
        "Product added successfully",
        ProductCreated {
            product_id: product.id.to_hex(),
        },
        Some(Meta::empty()),
    ))
}

/// All-or-nothing: one invalid entry rejects the batch before anything is
/// written.
pub async fn create_products(
    state: &AppState,
    payload: Vec<CreateProductRequest>,
) -> AppResult<ApiResponse<ProductsCreated>> {
    if payload.is_empty() {
        return Err(AppError::validation("at least one product is required"));
    }
    for (idx, product) in payload.iter().enumerate() {
        validate_new_product(product).map_err(|err| match err {
            AppError::Validation(msg) => AppError::Validation(format!("products[{idx}]: {msg}")),
            other => other,
        })?;
    }

    let stamp = StoredTimeStamp::now();
    let products: Vec<ProductDocument> = payload
        .into_iter()
        .map(|p| product_from_request(p, stamp))
        .collect();
    state.products.insert_many(&products).await?;
    tracing::info!(count = products.len(), "products created");

    let product_ids = products.iter().map(|p| p.id.to_hex()).collect();
    Ok(ApiResponse::success(
        "Products added successfully",
        ProductsCreated { product_ids },
        Some(Meta::total(products.len())),
    ))
}

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items: Vec<Product> = state
        .products
        .find_all()
        .await?
        .into_iter()
        .map(Product::from)
        .collect();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn filter_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let filter = query.into_filter()?;
    tracing::debug!(?filter, "filtering products");

    let items: Vec<Product> = state
        .products
        .find(&filter)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: &str) -> AppResult<ApiResponse<Product>> {
    let id = parse_product_id(id)?;
    let product = match state.products.find_by_id(id).await? {
        Some(p) => p,
        None => return Err(AppError::not_found(PRODUCT_NOT_FOUND)),
    };
    Ok(ApiResponse::success("Product", product.into(), None))
}

pub async fn update_product(
    state: &AppState,
    id: &str,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let id = parse_product_id(id)?;
    validate_product_update(&payload)?;

    let patch = ProductPatch {
        title: payload.title.map(|t| t.trim().to_string()),
        description: payload.description,
        price: payload.price,
        images: payload.images,
        discount: payload.discount,
        details: payload.details,
        rating: payload.rating,
        color: payload.color,
        category: payload.category,
        comments: payload.comments,
        updated_at: bson::DateTime::now(),
    };

    let product = match state.products.update(id, &patch).await? {
        Some(p) => p,
        None => return Err(AppError::not_found(PRODUCT_NOT_FOUND)),
    };
    tracing::info!(product_id = %product.id, "product updated");

    Ok(ApiResponse::success(
        "Product updated successfully",
        product.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    id: &str,
) -> AppResult<ApiResponse<Product>> {
    let id = parse_product_id(id)?;
    let deleted = state
        .products
        .delete(id)
        .await?
        .ok_or_else(|| AppError::not_found(PRODUCT_NOT_FOUND))?;
    tracing::info!(product_id = %id, "product deleted");

    Ok(ApiResponse::success(
        "Product deleted successfully",
        Product::from(deleted),
        Some(Meta::empty()),
    ))
}

pub async fn delete_all_products(state: &AppState) -> AppResult<ApiResponse<ProductsDeleted>> {
    let deleted_count = state.products.delete_all().await?;
    tracing::warn!(deleted_count, "product catalog cleared");

    Ok(ApiResponse::success(
        "Products deleted successfully",
        ProductsDeleted { deleted_count },
        Some(Meta::empty()),
    ))
}

/// A malformed id cannot name a stored product, so it is reported as
/// not-found rather than as a bad request.
fn parse_product_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::not_found(PRODUCT_NOT_FOUND))
}

fn product_from_request(p: CreateProductRequest, time_stamp: StoredTimeStamp) -> ProductDocument {
    ProductDocument {
        id: ObjectId::new(),
        title: p.title.trim().to_string(),
        description: p.description,
        price: p.price,
        images: p.images,
        discount: p.discount,
        details: p.details,
        rating: p.rating,
        color: p.color,
        category: p.category,
        comments: p.comments,
        time_stamp,
    }
}
