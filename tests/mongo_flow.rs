mod common;

use casify_api::{
    config::AppConfig,
    db,
    dto::auth::LoginRequest,
    middleware::auth::AuthUser,
    routes::params::ProductQuery,
    services::{auth_service, cart_service, product_service},
    state::AppState,
};
use mongodb::bson::{Document, doc, oid::ObjectId, spec::ElementType};
use serde_json::json;

// Integration flow against a real deployment: register -> login -> catalog -> cart.
#[tokio::test]
async fn register_catalog_and_cart_flow() -> anyhow::Result<()> {
    // Allow skipping when no database is configured in the environment.
    let uri = match std::env::var("TEST_MONGODB_URI") {
        Ok(uri) => uri,
        Err(_) => {
            eprintln!("Skipping test: set TEST_MONGODB_URI to run the MongoDB flow test.");
            return Ok(());
        }
    };

    // Throwaway database per run so reruns start clean.
    let database_name = format!("casify_test_{}", ObjectId::new().to_hex());
    let config = AppConfig::from_lookup(|key| match key {
        "MONGODB_URI" => Some(uri.clone()),
        "DATABASE_NAME" => Some(database_name.clone()),
        "JWT_SECRET" => Some("mongo-flow-secret".to_string()),
        _ => None,
    })?;

    let database = db::connect(&uri, &config.database_name).await?;
    db::ensure_indexes(&database).await?;
    let state = AppState::mongo(&database, &config);

    let email = "flow@example.com";
    let registered = auth_service::register_user(&state, common::registration(email))
        .await?
        .data
        .expect("registered id");
    assert!(
        auth_service::register_user(&state, common::registration(email))
            .await
            .is_err(),
        "duplicate registration must fail"
    );

    let collections = database.list_collection_names().await?;
    assert!(collections.contains(&registered.id));

    let login = auth_service::login_user(
        &state,
        LoginRequest {
            email: email.into(),
            password: common::PASSWORD.into(),
        },
    )
    .await?;
    let user: AuthUser = auth_service::resolve_identity(&state, &login.token).await?;
    assert_eq!(user.user_id.to_hex(), registered.id);

    product_service::create_products(
        &state,
        vec![
            common::product("Red Sneaker", 80.0, &["Shoes"]),
            common::product("Leather Tote", 120.0, &["BAGS"]),
            common::product("Wool Hat", 25.0, &["hats"]),
        ],
    )
    .await?;
    let raw = database
        .collection::<Document>(db::PRODUCTS_COLLECTION)
        .find_one(doc! {})
        .await?
        .expect("stored product");
    let created_at = raw.get_document("time_stamp")?.get("created_at");
    assert_eq!(created_at.map(|v| v.element_type()), Some(ElementType::DateTime));

    let filtered = product_service::filter_products(
        &state,
        ProductQuery {
            category: Some("shoes,bags".into()),
            sort: Some("desc".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("filtered");
    let titles: Vec<_> = filtered.items.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Leather Tote", "Red Sneaker"]);

    let target = filtered.items[0].id.clone();
    product_service::delete_product(&state, &target).await?;
    assert!(product_service::delete_product(&state, &target).await.is_err());

    let cart = serde_json::from_value(json!({
        "items": [{ "product_id": target, "title": "Leather Tote", "quantity": 1, "price": 120.0 }],
        "subtotal": 120.0,
        "total": 120.0
    }))?;
    cart_service::submit_cart(&state, &user, cart).await?;
    let carts = cart_service::list_carts(&state, &user).await?.data.expect("carts");
    assert_eq!(carts.items.len(), 1);

    database.drop().await?;
    Ok(())
}
