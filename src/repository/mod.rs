//! Persistence ports and their MongoDB and in-memory implementations.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::{
    entity::{CartDocument, ProductDocument, ProductPatch, UserDocument},
    error::AppResult,
};

pub mod filter;
pub mod memory;
pub mod mongo;

pub use filter::ProductFilter;
pub use memory::{MemoryCartRepository, MemoryProductRepository, MemoryUserRepository};
pub use mongo::{MongoCartRepository, MongoProductRepository, MongoUserRepository};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Matches regardless of letter case.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserDocument>>;
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<UserDocument>>;
    /// Fails with a validation error when the email is already taken.
    async fn insert(&self, user: &UserDocument) -> AppResult<()>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: &ProductDocument) -> AppResult<()>;
    async fn insert_many(&self, products: &[ProductDocument]) -> AppResult<()>;
    async fn find_all(&self) -> AppResult<Vec<ProductDocument>>;
    async fn find(&self, filter: &ProductFilter) -> AppResult<Vec<ProductDocument>>;
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<ProductDocument>>;
    /// Returns the document after the update, `None` when `id` is unknown.
    async fn update(&self, id: ObjectId, patch: &ProductPatch)
    -> AppResult<Option<ProductDocument>>;
    /// Returns the removed document, `None` when `id` is unknown.
    async fn delete(&self, id: ObjectId) -> AppResult<Option<ProductDocument>>;
    async fn delete_all(&self) -> AppResult<u64>;
}

/// Carts live in one partition per user.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Creates the user's partition if missing. Returns `true` when it was
    /// created by this call.
    async fn ensure_partition(&self, user_id: ObjectId) -> AppResult<bool>;
    async fn insert(&self, cart: &CartDocument) -> AppResult<()>;
    /// Newest first.
    async fn find_for_user(&self, user_id: ObjectId) -> AppResult<Vec<CartDocument>>;
}

pub fn partition_name(user_id: ObjectId) -> String {
    user_id.to_hex()
}
