use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{IdentityResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
        cart::{CartCreated, CartList, SubmitCartRequest},
        products::{
            CreateProductRequest, ProductCreated, ProductList, ProductsCreated, ProductsDeleted,
            UpdateProductRequest,
        },
    },
    error::ErrorBody,
    models::{Cart, CartItem, CartStatus, Discount, Product, ProductDetails, ShippingAddress, TimeStamp, UserRole},
    response::{ApiResponse, Meta},
    routes::{auth, cart, health, products},
    security::AUTH_COOKIE,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        components.add_security_scheme(
            "cookie_auth",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(AUTH_COOKIE))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::validate,
        products::create_product,
        products::create_products,
        products::list_products,
        products::get_product,
        products::filter_products,
        products::update_product,
        products::delete_product,
        products::delete_all_products,
        cart::submit_cart,
        cart::cart_list
    ),
    components(
        schemas(
            UserRole,
            TimeStamp,
            Product,
            ProductDetails,
            Cart,
            CartItem,
            CartStatus,
            Discount,
            ShippingAddress,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            IdentityResponse,
            CreateProductRequest,
            UpdateProductRequest,
            ProductCreated,
            ProductsCreated,
            ProductsDeleted,
            ProductList,
            SubmitCartRequest,
            CartCreated,
            CartList,
            ErrorBody,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and token validation"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Cart", description = "Per-user cart snapshots"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
