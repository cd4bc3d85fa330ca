//! Process-local store. Used by the test suites and by `STORE_BACKEND=memory`
//! for running the API without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::{
    entity::{CartDocument, ProductDocument, ProductPatch, UserDocument},
    error::{AppError, AppResult},
    repository::{CartRepository, ProductFilter, ProductRepository, UserRepository},
};

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<UserDocument>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserDocument>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<UserDocument>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: &UserDocument) -> AppResult<()> {
        let mut users = self.users.write().await;
        // Mirrors the unique index on `email`.
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(AppError::validation("User already exists"));
        }
        users.push(user.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryProductRepository {
    products: RwLock<Vec<ProductDocument>>,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn insert(&self, product: &ProductDocument) -> AppResult<()> {
        self.products.write().await.push(product.clone());
        Ok(())
    }

    async fn insert_many(&self, products: &[ProductDocument]) -> AppResult<()> {
        self.products.write().await.extend_from_slice(products);
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<ProductDocument>> {
        Ok(self.products.read().await.clone())
    }

    async fn find(&self, filter: &ProductFilter) -> AppResult<Vec<ProductDocument>> {
        let products = self.products.read().await;
        let mut found: Vec<ProductDocument> = products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        found.sort_by(|a, b| filter.compare(a, b));
        Ok(found)
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<ProductDocument>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn update(
        &self,
        id: ObjectId,
        patch: &ProductPatch,
    ) -> AppResult<Option<ProductDocument>> {
        let mut products = self.products.write().await;
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        patch.apply(product);
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: ObjectId) -> AppResult<Option<ProductDocument>> {
        let mut products = self.products.write().await;
        let position = products.iter().position(|p| p.id == id);
        Ok(position.map(|idx| products.remove(idx)))
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let mut products = self.products.write().await;
        let count = products.len() as u64;
        products.clear();
        Ok(count)
    }
}

#[derive(Default)]
pub struct MemoryCartRepository {
    partitions: RwLock<HashMap<ObjectId, Vec<CartDocument>>>,
}

impl MemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn has_partition(&self, user_id: ObjectId) -> bool {
        self.partitions.read().await.contains_key(&user_id)
    }
}

#[async_trait]
impl CartRepository for MemoryCartRepository {
    async fn ensure_partition(&self, user_id: ObjectId) -> AppResult<bool> {
        let mut partitions = self.partitions.write().await;
        if partitions.contains_key(&user_id) {
            return Ok(false);
        }
        partitions.insert(user_id, Vec::new());
        Ok(true)
    }

    async fn insert(&self, cart: &CartDocument) -> AppResult<()> {
        let mut partitions = self.partitions.write().await;
        partitions.entry(cart.user).or_default().push(cart.clone());
        Ok(())
    }

    async fn find_for_user(&self, user_id: ObjectId) -> AppResult<Vec<CartDocument>> {
        let partitions = self.partitions.read().await;
        let mut carts = partitions.get(&user_id).cloned().unwrap_or_default();
        carts.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(carts)
    }
}
