use casify_api::{
    config::AppConfig,
    db::{self, PRODUCTS_COLLECTION},
    entity::{ProductDocument, StoredTimeStamp, UserDocument},
    models::{ProductDetails, UserRole},
    repository::{
        CartRepository, MongoCartRepository, MongoUserRepository, UserRepository,
    },
    security::hash_password,
};
use mongodb::{
    Database,
    bson::{doc, oid::ObjectId},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let uri = config
        .mongodb_uri
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("MONGODB_URI is not set"))?;

    let database = db::connect(uri, &config.database_name).await?;
    db::ensure_indexes(&database).await?;

    let admin_id = ensure_user(&database, "admin@example.com", "admin12345", UserRole::Admin).await?;
    let user_id = ensure_user(&database, "user@example.com", "user12345", UserRole::User).await?;
    seed_products(&database).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    database: &Database,
    email: &str,
    password: &str,
    role: UserRole,
) -> anyhow::Result<ObjectId> {
    let users = MongoUserRepository::new(database);
    let carts = MongoCartRepository::new(database);

    let user_id = match users.find_by_email(email).await? {
        Some(existing) => existing.id,
        None => {
            let user = UserDocument {
                id: ObjectId::new(),
                first_name: String::new(),
                last_name: String::new(),
                email: email.to_string(),
                password: hash_password(password)?,
                role,
                time_stamp: StoredTimeStamp::now(),
            };
            users.insert(&user).await?;
            user.id
        }
    };
    carts.ensure_partition(user_id).await?;

    println!("Ensured user {email} (role={role:?})");
    Ok(user_id)
}

async fn seed_products(database: &Database) -> anyhow::Result<()> {
    let products = vec![
        ("Clear Case", "Slim transparent phone case", 19.99, 0.0, 4.5, "clear", vec!["cases", "accessories"]),
        ("Leather Wallet Case", "Folio case with card slots", 39.99, 10.0, 4.2, "brown", vec!["cases", "wallets"]),
        ("Rugged Armor", "Drop-tested dual layer case", 29.99, 5.0, 4.8, "black", vec!["cases"]),
        ("MagSafe Charger", "15W magnetic wireless charger", 49.99, 15.0, 4.0, "white", vec!["chargers", "accessories"]),
    ];

    let collection = database.collection::<ProductDocument>(PRODUCTS_COLLECTION);
    for (title, description, price, discount, rating, color, category) in products {
        if collection.find_one(doc! { "title": title }).await?.is_some() {
            continue;
        }

        let product = ProductDocument {
            id: ObjectId::new(),
            title: title.to_string(),
            description: description.to_string(),
            price,
            images: vec![format!("https://cdn.example.com/{}.png", title.to_lowercase().replace(' ', "-"))],
            discount,
            details: ProductDetails {
                details: vec![description.to_string()],
                features: Vec::new(),
            },
            rating,
            color: color.to_string(),
            category: category.into_iter().map(str::to_string).collect(),
            comments: Vec::new(),
            time_stamp: StoredTimeStamp::now(),
        };
        collection.insert_one(&product).await?;
    }

    println!("Seeded products");
    Ok(())
}
