use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::{
    entity::StoredTimeStamp,
    models::{Product, ProductDetails},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub images: Vec<String>,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub details: ProductDetails,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub comments: Vec<String>,
    pub time_stamp: StoredTimeStamp,
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Product {
            id: doc.id.to_hex(),
            title: doc.title,
            description: doc.description,
            price: doc.price,
            images: doc.images,
            discount: doc.discount,
            details: doc.details,
            rating: doc.rating,
            color: doc.color,
            category: doc.category,
            comments: doc.comments,
            time_stamp: doc.time_stamp.into(),
        }
    }
}

/// The mutable subset of a product. Serializes straight into a `$set`
/// document: absent fields are skipped and the update stamp targets the
/// nested `time_stamp.updated_at` path.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ProductDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<String>>,
    #[serde(rename = "time_stamp.updated_at")]
    pub updated_at: bson::DateTime,
}

impl ProductPatch {
    pub fn apply(&self, doc: &mut ProductDocument) {
        if let Some(title) = &self.title {
            doc.title = title.clone();
        }
        if let Some(description) = &self.description {
            doc.description = description.clone();
        }
        if let Some(price) = self.price {
            doc.price = price;
        }
        if let Some(images) = &self.images {
            doc.images = images.clone();
        }
        if let Some(discount) = self.discount {
            doc.discount = discount;
        }
        if let Some(details) = &self.details {
            doc.details = details.clone();
        }
        if let Some(rating) = self.rating {
            doc.rating = rating;
        }
        if let Some(color) = &self.color {
            doc.color = color.clone();
        }
        if let Some(category) = &self.category {
            doc.category = category.clone();
        }
        if let Some(comments) = &self.comments {
            doc.comments = comments.clone();
        }
        doc.time_stamp.updated_at = self.updated_at;
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{doc, spec::ElementType};

    use super::*;

    fn patch() -> ProductPatch {
        ProductPatch {
            title: None,
            description: None,
            price: Some(42.5),
            images: None,
            discount: None,
            details: None,
            rating: Some(4.0),
            color: None,
            category: None,
            comments: None,
            updated_at: bson::DateTime::now(),
        }
    }

    #[test]
    fn set_document_only_contains_provided_fields() {
        let doc = bson::to_document(&patch()).unwrap();
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["price", "rating", "time_stamp.updated_at"]);
    }

    #[test]
    fn apply_leaves_untouched_fields_alone() {
        let now = StoredTimeStamp {
            created_at: bson::DateTime::from_millis(1_000),
            updated_at: bson::DateTime::from_millis(1_000),
        };
        let mut doc = ProductDocument {
            id: ObjectId::new(),
            title: "Lamp".into(),
            description: "Desk lamp".into(),
            price: 10.0,
            images: vec!["lamp.png".into()],
            discount: 0.0,
            details: ProductDetails::default(),
            rating: 0.0,
            color: "black".into(),
            category: vec!["home".into()],
            comments: vec![],
            time_stamp: now,
        };
        let patch = patch();
        patch.apply(&mut doc);

        assert_eq!(doc.price, 42.5);
        assert_eq!(doc.rating, 4.0);
        assert_eq!(doc.title, "Lamp");
        assert_eq!(doc.time_stamp.created_at, now.created_at);
        assert_eq!(doc.time_stamp.updated_at, patch.updated_at);
    }

    #[test]
    fn update_stamp_is_a_native_date() {
        let doc = bson::to_document(&patch()).unwrap();
        assert_eq!(
            doc.get("time_stamp.updated_at").map(|v| v.element_type()),
            Some(ElementType::DateTime)
        );
    }

    #[test]
    fn decodes_products_written_with_native_dates() {
        let stored = doc! {
            "_id": ObjectId::new(),
            "title": "Clear Case",
            "description": "Slim case",
            "price": 19.99,
            "images": ["case.png"],
            "time_stamp": {
                "created_at": bson::DateTime::from_millis(1_700_000_000_000),
                "updated_at": bson::DateTime::from_millis(1_700_000_000_000),
            },
        };
        let product: ProductDocument = bson::from_document(stored).unwrap();
        assert_eq!(product.title, "Clear Case");
        assert_eq!(product.discount, 0.0);

        let view = Product::from(product);
        assert_eq!(view.time_stamp.created_at.timestamp_millis(), 1_700_000_000_000);
    }
}
