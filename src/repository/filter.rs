use std::cmp::Ordering;

use mongodb::bson::{Document, doc};

use crate::{entity::ProductDocument, routes::params::SortOrder};

/// Catalog search criteria. All criteria must hold; the category list is
/// satisfied by any one of its entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the title.
    pub name: Option<String>,
    /// Upper bound for ascending sort, lower bound for descending sort.
    pub price: Option<f64>,
    /// Case-insensitive substrings matched against category tags.
    pub categories: Vec<String>,
    pub min_rating: Option<f64>,
    pub min_discount: Option<f64>,
    pub sort: SortOrder,
}

impl ProductFilter {
    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();

        if let Some(name) = &self.name {
            filter.insert("title", contains_ignore_case(name));
        }
        if let Some(price) = self.price {
            let op = match self.sort {
                SortOrder::Asc => "$lte",
                SortOrder::Desc => "$gte",
            };
            let mut bound = Document::new();
            bound.insert(op, price);
            filter.insert("price", bound);
        }
        if !self.categories.is_empty() {
            let any_of: Vec<Document> = self
                .categories
                .iter()
                .map(|c| doc! { "category": contains_ignore_case(c) })
                .collect();
            filter.insert("$or", any_of);
        }
        if let Some(rating) = self.min_rating {
            filter.insert("rating", doc! { "$gte": rating });
        }
        if let Some(discount) = self.min_discount {
            filter.insert("discount", doc! { "$gte": discount });
        }

        filter
    }

    pub fn sort_document(&self) -> Document {
        doc! { "price": self.sort.direction() }
    }

    /// Evaluates the same predicate as [`Self::to_document`] in process.
    pub fn matches(&self, product: &ProductDocument) -> bool {
        if let Some(name) = &self.name {
            if !contains_lowercase(&product.title, name) {
                return false;
            }
        }
        if let Some(price) = self.price {
            let within = match self.sort {
                SortOrder::Asc => product.price <= price,
                SortOrder::Desc => product.price >= price,
            };
            if !within {
                return false;
            }
        }
        if !self.categories.is_empty()
            && !self.categories.iter().any(|wanted| {
                product
                    .category
                    .iter()
                    .any(|tag| contains_lowercase(tag, wanted))
            })
        {
            return false;
        }
        if self.min_rating.is_some_and(|min| product.rating < min) {
            return false;
        }
        if self.min_discount.is_some_and(|min| product.discount < min) {
            return false;
        }
        true
    }

    pub fn compare(&self, a: &ProductDocument, b: &ProductDocument) -> Ordering {
        let ord = a.price.total_cmp(&b.price);
        match self.sort {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

fn contains_ignore_case(needle: &str) -> Document {
    doc! { "$regex": regex::escape(needle), "$options": "i" }
}

fn contains_lowercase(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
