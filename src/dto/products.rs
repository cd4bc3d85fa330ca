use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Product, ProductDetails};

/// Missing fields deserialize to their empty value so that validation, not
/// the JSON decoder, reports what is absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreateProductRequest {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub images: Vec<String>,
    pub discount: f64,
    pub details: ProductDetails,
    pub rating: f64,
    pub color: String,
    pub category: Vec<String>,
    pub comments: Vec<String>,
}

/// Fields a client may change after creation. Anything else in the body is
/// rejected.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub images: Option<Vec<String>>,
    pub discount: Option<f64>,
    pub details: Option<ProductDetails>,
    pub rating: Option<f64>,
    pub color: Option<String>,
    pub category: Option<Vec<String>>,
    pub comments: Option<Vec<String>>,
}

impl UpdateProductRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.images.is_none()
            && self.discount.is_none()
            && self.details.is_none()
            && self.rating.is_none()
            && self.color.is_none()
            && self.category.is_none()
            && self.comments.is_none()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductCreated {
    pub product_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductsCreated {
    pub product_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductsDeleted {
    pub deleted_count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
