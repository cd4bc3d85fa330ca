use mongodb::bson::oid::ObjectId;

use crate::{
    dto::cart::{CartCreated, CartList, SubmitCartRequest},
    entity::{CartDocument, StoredTimeStamp},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Cart,
    response::{ApiResponse, Meta},
    state::AppState,
    validation::validate_cart,
};

/// Appends a new cart snapshot to the caller's partition. Earlier snapshots
/// are left untouched.
pub async fn submit_cart(
    state: &AppState,
    user: &AuthUser,
    payload: SubmitCartRequest,
) -> AppResult<ApiResponse<CartCreated>> {
    validate_cart(&payload)?;

    let cart = CartDocument {
        id: ObjectId::new(),
        user: user.user_id,
        items: payload.items,
        subtotal: payload.subtotal,
        tax: payload.tax,
        shipping: payload.shipping,
        total: payload.total,
        currency: payload.currency.trim().to_uppercase(),
        discounts: payload.discounts,
        shipping_address: payload.shipping_address,
        payment_method: payload.payment_method,
        status: payload.status,
        time_stamp: StoredTimeStamp::now(),
    };
    state.carts.insert(&cart).await?;
    tracing::info!(user_id = %user.user_id, cart_id = %cart.id, "cart submitted");

    Ok(ApiResponse::success(
        "Cart updated successfully",
        CartCreated {
            cart_id: cart.id.to_hex(),
        },
        None,
    ))
}

pub async fn list_carts(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartList>> {
    let items: Vec<Cart> = state
        .carts
        .find_for_user(user.user_id)
        .await?
        .into_iter()
        .map(Cart::from)
        .collect();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("OK", CartList { items }, Some(meta)))
}
