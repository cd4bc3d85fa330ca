use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::{
    entity::StoredTimeStamp,
    models::{Cart, CartItem, CartStatus, Discount, ShippingAddress},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: ObjectId,
    pub items: Vec<CartItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: f64,
    pub total: f64,
    pub currency: String,
    #[serde(default)]
    pub discounts: Vec<Discount>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub status: CartStatus,
    pub time_stamp: StoredTimeStamp,
}

impl From<CartDocument> for Cart {
    fn from(doc: CartDocument) -> Self {
        Cart {
            id: doc.id.to_hex(),
            user: doc.user.to_hex(),
            items: doc.items,
            subtotal: doc.subtotal,
            tax: doc.tax,
            shipping: doc.shipping,
            total: doc.total,
            currency: doc.currency,
            discounts: doc.discounts,
            shipping_address: doc.shipping_address,
            payment_method: doc.payment_method,
            status: doc.status,
            time_stamp: doc.time_stamp.into(),
        }
    }
}
