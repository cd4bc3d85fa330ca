use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Cart, CartItem, CartStatus, Discount, ShippingAddress};

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SubmitCartRequest {
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub shipping: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub discounts: Vec<Discount>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub status: CartStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartCreated {
    pub cart_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CartList {
    #[schema(value_type = Vec<Cart>)]
    pub items: Vec<Cart>,
}
