//! Shape and range checks for incoming records.
//!
//! Everything here is pure: no store access, no clock. Failures are reported
//! as [`AppError::Validation`] carrying a message fit for the client.

use crate::{
    dto::{
        auth::RegisterRequest, cart::SubmitCartRequest, products::CreateProductRequest,
        products::UpdateProductRequest,
    },
    error::{AppError, AppResult},
    models::ProductDetails,
};

const EMAIL_MAX_LENGTH: usize = 254;
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const RATING_MAX: f64 = 5.0;

/// Lowercases and trims an email so lookups and the unique index agree.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> AppResult<()> {
    if email.is_empty() {
        return Err(AppError::validation("email is required"));
    }
    if email.len() > EMAIL_MAX_LENGTH || !is_valid_email_format(email) {
        return Err(AppError::validation("email is not a valid address"));
    }
    Ok(())
}

fn is_valid_email_format(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }
    if local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.is_empty() || !domain.contains('.') {
        return false;
    }
    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }
    !(domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) || domain.contains(".."))
}

pub fn validate_registration(payload: &RegisterRequest) -> AppResult<()> {
    validate_email(&normalize_email(&payload.email))?;
    if payload.password.is_empty() {
        return Err(AppError::validation("password is required"));
    }
    if payload.password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(AppError::validation(format!(
            "password must be at least {PASSWORD_MIN_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_new_product(p: &CreateProductRequest) -> AppResult<()> {
    require_text(&p.title, "title")?;
    require_text(&p.description, "description")?;
    if p.price == 0.0 {
        return Err(AppError::validation("price is required"));
    }
    if p.images.is_empty() {
        return Err(AppError::validation("images is required"));
    }
    if p.details.details.is_empty() {
        return Err(AppError::validation("details is required"));
    }
    require_text(&p.color, "color")?;

    check_price(p.price)?;
    check_discount(p.discount)?;
    check_rating(p.rating)?;

    validate_string_list(&p.images, "images")?;
    validate_details(&p.details)?;
    validate_string_list(&p.category, "category")?;
    validate_string_list(&p.comments, "comments")?;
    Ok(())
}

/// Provided fields obey the same rules as on creation.
pub fn validate_product_update(p: &UpdateProductRequest) -> AppResult<()> {
    if p.is_empty() {
        return Err(AppError::validation("no updatable fields provided"));
    }
    if let Some(title) = &p.title {
        require_text(title, "title")?;
    }
    if let Some(description) = &p.description {
        require_text(description, "description")?;
    }
    if let Some(color) = &p.color {
        require_text(color, "color")?;
    }
    if let Some(price) = p.price {
        check_price(price)?;
    }
    if let Some(discount) = p.discount {
        check_discount(discount)?;
    }
    if let Some(rating) = p.rating {
        check_rating(rating)?;
    }
    if let Some(images) = &p.images {
        if images.is_empty() {
            return Err(AppError::validation("images cannot be empty"));
        }
        validate_string_list(images, "images")?;
    }
    if let Some(details) = &p.details {
        if details.details.is_empty() {
            return Err(AppError::validation("details cannot be empty"));
        }
        validate_details(details)?;
    }
    if let Some(category) = &p.category {
        validate_string_list(category, "category")?;
    }
    if let Some(comments) = &p.comments {
        validate_string_list(comments, "comments")?;
    }
    Ok(())
}

pub fn validate_cart(cart: &SubmitCartRequest) -> AppResult<()> {
    if cart.items.is_empty() {
        return Err(AppError::validation("cart must contain at least one item"));
    }
    for (idx, item) in cart.items.iter().enumerate() {
        if item.product_id.trim().is_empty() {
            return Err(AppError::validation(format!(
                "items[{idx}].product_id is required"
            )));
        }
        if item.quantity == 0 {
            return Err(AppError::validation(format!(
                "items[{idx}].quantity must be at least 1"
            )));
        }
        if !is_non_negative(item.price) {
            return Err(AppError::validation(format!(
                "items[{idx}].price must be non-negative"
            )));
        }
    }
    for (name, amount) in [
        ("subtotal", cart.subtotal),
        ("tax", cart.tax),
        ("shipping", cart.shipping),
        ("total", cart.total),
    ] {
        if !is_non_negative(amount) {
            return Err(AppError::validation(format!("{name} must be non-negative")));
        }
    }
    if cart.discounts.iter().any(|d| !is_non_negative(d.amount)) {
        return Err(AppError::validation("discount amounts must be non-negative"));
    }
    require_text(&cart.currency, "currency")?;
    Ok(())
}

fn require_text(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn check_price(price: f64) -> AppResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::validation("price must be greater than 0"));
    }
    Ok(())
}

fn check_discount(discount: f64) -> AppResult<()> {
    if !is_non_negative(discount) {
        return Err(AppError::validation("discount must be non-negative"));
    }
    Ok(())
}

fn check_rating(rating: f64) -> AppResult<()> {
    if !(0.0..=RATING_MAX).contains(&rating) {
        return Err(AppError::validation("rating must be between 0 and 5"));
    }
    Ok(())
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn validate_details(details: &ProductDetails) -> AppResult<()> {
    validate_string_list(&details.details, "details")?;
    validate_string_list(&details.features, "features")
}

fn validate_string_list(items: &[String], field: &str) -> AppResult<()> {
    if items.iter().any(|item| item.trim().is_empty()) {
        return Err(AppError::validation(format!(
            "{field} cannot contain empty strings"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CartItem;

    fn product() -> CreateProductRequest {
        CreateProductRequest {
            title: "Canvas sneaker".into(),
            description: "Low-top canvas sneaker".into(),
            price: 59.9,
            images: vec!["sneaker-front.jpg".into()],
            discount: 0.0,
            details: ProductDetails {
                details: vec!["Rubber sole".into()],
                features: vec![],
            },
            rating: 0.0,
            color: "white".into(),
            category: vec!["shoes".into()],
            comments: vec![],
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_complete_product() {
        assert!(validate_new_product(&product()).is_ok());
    }

    #[test]
    fn rejects_every_bad_price_image_rating_combination() {
        let prices = [59.9, 0.0, -1.0];
        let images: [Vec<String>; 3] = [vec!["a.jpg".into()], vec![], vec!["".into()]];
        let ratings = [3.5, -0.1, 5.1];

        for price in prices {
            for image_set in &images {
                for rating in ratings {
                    let mut p = product();
                    p.price = price;
                    p.images = image_set.clone();
                    p.rating = rating;
                    let all_good = price > 0.0
                        && !image_set.is_empty()
                        && image_set.iter().all(|i| !i.is_empty())
                        && (0.0..=5.0).contains(&rating);
                    assert_eq!(
                        validate_new_product(&p).is_ok(),
                        all_good,
                        "price={price} images={image_set:?} rating={rating}"
                    );
                }
            }
        }
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        for rating in [0.0, 5.0] {
            let mut p = product();
            p.rating = rating;
            assert!(validate_new_product(&p).is_ok());
        }
    }

    #[test]
    fn negative_discount_is_rejected() {
        let mut p = product();
        p.discount = -5.0;
        assert_eq!(
            message(validate_new_product(&p).unwrap_err()),
            "discount must be non-negative"
        );
    }

    #[test]
    fn missing_required_fields_are_named() {
        let mut p = product();
        p.color = String::new();
        assert_eq!(message(validate_new_product(&p).unwrap_err()), "color is required");

        let mut p = product();
        p.details.details.clear();
        assert_eq!(message(validate_new_product(&p).unwrap_err()), "details is required");
    }

    #[test]
    fn empty_strings_inside_lists_are_rejected() {
        let mut p = product();
        p.comments = vec!["nice".into(), " ".into()];
        assert_eq!(
            message(validate_new_product(&p).unwrap_err()),
            "comments cannot contain empty strings"
        );

        let mut p = product();
        p.category = vec!["".into()];
        assert!(validate_new_product(&p).is_err());
    }

    #[test]
    fn update_requires_at_least_one_field() {
        let err = validate_product_update(&UpdateProductRequest::default()).unwrap_err();
        assert_eq!(message(err), "no updatable fields provided");
    }

    #[test]
    fn update_applies_creation_rules_to_present_fields() {
        let update = UpdateProductRequest {
            rating: Some(7.0),
            ..Default::default()
        };
        assert!(validate_product_update(&update).is_err());

        let update = UpdateProductRequest {
            images: Some(vec![]),
            ..Default::default()
        };
        assert!(validate_product_update(&update).is_err());

        let update = UpdateProductRequest {
            price: Some(12.0),
            title: Some("Renamed".into()),
            ..Default::default()
        };
        assert!(validate_product_update(&update).is_ok());
    }

    #[test]
    fn email_format() {
        for ok in ["a@b.co", "first.last@shop.example.com", "x+tag@mail-host.io"] {
            assert!(validate_email(ok).is_ok(), "{ok}");
        }
        for bad in [
            "",
            "plain",
            "@no-local.com",
            "no-domain@",
            "two@@at.com",
            "dotless@domain",
            "lead@.dot.com",
            "trail@dot.com.",
            "sp ace@x.com",
            "under@score_domain.com",
        ] {
            assert!(validate_email(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn registration_normalizes_before_checking_email() {
        let payload = RegisterRequest {
            email: "  Shopper@Example.COM ".into(),
            password: "longenough".into(),
            ..Default::default()
        };
        assert!(validate_registration(&payload).is_ok());
        assert_eq!(normalize_email(&payload.email), "shopper@example.com");
    }

    #[test]
    fn registration_rejects_short_password() {
        let payload = RegisterRequest {
            email: "shopper@example.com".into(),
            password: "short".into(),
            ..Default::default()
        };
        assert!(validate_registration(&payload).is_err());
    }

    #[test]
    fn cart_rules() {
        let item = CartItem {
            product_id: "66f1c0ffee0000000000abcd".into(),
            title: "Canvas sneaker".into(),
            quantity: 2,
            price: 59.9,
            image: None,
        };
        let mut cart = SubmitCartRequest {
            items: vec![item.clone()],
            subtotal: 119.8,
            tax: 0.0,
            shipping: 5.0,
            total: 124.8,
            currency: "USD".into(),
            discounts: vec![],
            shipping_address: None,
            payment_method: None,
            status: Default::default(),
        };
        assert!(validate_cart(&cart).is_ok());

        cart.items[0].quantity = 0;
        assert!(validate_cart(&cart).is_err());

        cart.items = vec![];
        assert!(validate_cart(&cart).is_err());

        cart.items = vec![item];
        cart.tax = -1.0;
        assert!(validate_cart(&cart).is_err());
    }
}
