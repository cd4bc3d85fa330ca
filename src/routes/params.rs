use std::str::FromStr;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    repository::ProductFilter,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// MongoDB sort direction.
    pub fn direction(&self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(AppError::validation("sort must be `asc` or `desc`")),
        }
    }
}

/// Raw `filterProducts` query string. Values stay strings so malformed
/// numbers are reported through the normal error envelope.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Case-insensitive substring of the product title.
    pub name: Option<String>,
    /// Price threshold: upper bound with `sort=asc`, lower bound with `sort=desc`.
    pub price: Option<String>,
    /// Comma-separated category tags; a product matches any of them.
    pub category: Option<String>,
    /// Minimum rating.
    pub rating: Option<String>,
    /// Minimum discount.
    pub discount: Option<String>,
    /// `asc` (default) or `desc`, by price.
    pub sort: Option<String>,
}

impl ProductQuery {
    pub fn into_filter(self) -> AppResult<ProductFilter> {
        let sort = match non_blank(self.sort) {
            Some(raw) => raw.parse()?,
            None => SortOrder::default(),
        };

        let categories = self
            .category
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(ProductFilter {
            name: non_blank(self.name),
            price: parse_number(self.price, "price")?,
            categories,
            min_rating: parse_number(self.rating, "rating")?,
            min_discount: parse_number(self.discount, "discount")?,
            sort,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number(value: Option<String>, field: &str) -> AppResult<Option<f64>> {
    let Some(raw) = non_blank(value) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(AppError::validation(format!("Invalid {field} format"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_is_unfiltered_ascending() {
        let filter = ProductQuery::default().into_filter().unwrap();
        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn parses_every_field() {
        let query = ProductQuery {
            name: Some(" sneaker ".into()),
            price: Some("99.5".into()),
            category: Some("shoes, bags,,".into()),
            rating: Some("4".into()),
            discount: Some("10".into()),
            sort: Some("DESC".into()),
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.name.as_deref(), Some("sneaker"));
        assert_eq!(filter.price, Some(99.5));
        assert_eq!(filter.categories, vec!["shoes", "bags"]);
        assert_eq!(filter.min_rating, Some(4.0));
        assert_eq!(filter.min_discount, Some(10.0));
        assert_eq!(filter.sort, SortOrder::Desc);
    }

    #[test]
    fn malformed_numbers_are_validation_errors() {
        for (price, rating, discount, field) in [
            (Some("cheap"), None, None, "price"),
            (None, Some("five"), None, "rating"),
            (None, None, Some("NaN"), "discount"),
        ] {
            let query = ProductQuery {
                price: price.map(Into::into),
                rating: rating.map(Into::into),
                discount: discount.map(Into::into),
                ..Default::default()
            };
            match query.into_filter() {
                Err(AppError::Validation(msg)) => assert_eq!(msg, format!("Invalid {field} format")),
                other => panic!("expected validation error for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_sort_is_rejected() {
        let query = ProductQuery {
            sort: Some("sideways".into()),
            ..Default::default()
        };
        assert!(query.into_filter().is_err());
    }
}
