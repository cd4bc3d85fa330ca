use std::time::Duration;

use anyhow::{Context, Result};
use mongodb::{
    Client, Database, IndexModel,
    bson::doc,
    options::{ClientOptions, IndexOptions},
};

use crate::entity::UserDocument;

pub const USERS_COLLECTION: &str = "usersAuth";
pub const PRODUCTS_COLLECTION: &str = "products";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connects to MongoDB and verifies the deployment answers a ping.
pub async fn connect(uri: &str, database_name: &str) -> Result<Database> {
    let mut options = ClientOptions::parse(uri)
        .await
        .context("invalid MongoDB connection string")?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.connect_timeout = Some(CONNECT_TIMEOUT);
    options.server_selection_timeout = Some(CONNECT_TIMEOUT);

    let client = Client::with_options(options)?;
    let db = client.database(database_name);
    db.run_command(doc! { "ping": 1 })
        .await
        .context("failed to ping MongoDB")?;

    tracing::info!(database = database_name, "connected to MongoDB");
    Ok(db)
}

/// Backs the email uniqueness check with a unique index so concurrent
/// registrations cannot both succeed.
pub async fn ensure_indexes(db: &Database) -> Result<()> {
    let index = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(
            IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build(),
        )
        .build();

    db.collection::<UserDocument>(USERS_COLLECTION)
        .create_index(index)
        .await
        .context("failed to create users email index")?;
    Ok(())
}
