use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{self, Document, doc, oid::ObjectId},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{Collation, CollationStrength, ReturnDocument},
};

use crate::{
    db::{PRODUCTS_COLLECTION, USERS_COLLECTION},
    entity::{CartDocument, ProductDocument, ProductPatch, UserDocument},
    error::{AppError, AppResult},
    repository::{
        CartRepository, ProductFilter, ProductRepository, UserRepository, partition_name,
    },
};

const DUPLICATE_KEY: i32 = 11000;
const NAMESPACE_EXISTS: i32 = 48;

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

fn is_namespace_exists(err: &MongoError) -> bool {
    matches!(err.kind.as_ref(), ErrorKind::Command(e) if e.code == NAMESPACE_EXISTS)
}

/// Case-insensitive string comparison; accounts written before emails were
/// lowercased may hold mixed-case addresses.
fn ignore_case() -> Collation {
    Collation::builder()
        .locale("en".to_string())
        .strength(CollationStrength::Secondary)
        .build()
}

fn by_id(id: ObjectId) -> Document {
    doc! { "_id": id }
}

#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserDocument>> {
        Ok(self
            .collection
            .find_one(doc! { "email": email })
            .collation(ignore_case())
            .await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<UserDocument>> {
        Ok(self.collection.find_one(by_id(id)).await?)
    }

    async fn insert(&self, user: &UserDocument) -> AppResult<()> {
        match self.collection.insert_one(user).await {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => {
                Err(AppError::validation("User already exists"))
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(PRODUCTS_COLLECTION),
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn insert(&self, product: &ProductDocument) -> AppResult<()> {
        self.collection.insert_one(product).await?;
        Ok(())
    }

    async fn insert_many(&self, products: &[ProductDocument]) -> AppResult<()> {
        if products.is_empty() {
            return Ok(());
        }
        self.collection.insert_many(products).await?;
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<ProductDocument>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find(&self, filter: &ProductFilter) -> AppResult<Vec<ProductDocument>> {
        let cursor = self
            .collection
            .find(filter.to_document())
            .sort(filter.sort_document())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<ProductDocument>> {
        Ok(self.collection.find_one(by_id(id)).await?)
    }

    async fn update(
        &self,
        id: ObjectId,
        patch: &ProductPatch,
    ) -> AppResult<Option<ProductDocument>> {
        let set = bson::to_document(patch)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to encode update: {e}")))?;
        let updated = self
            .collection
            .find_one_and_update(by_id(id), doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: ObjectId) -> AppResult<Option<ProductDocument>> {
        Ok(self.collection.find_one_and_delete(by_id(id)).await?)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = self.collection.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }
}

/// One collection per user, named after the user's hex id.
#[derive(Clone)]
pub struct MongoCartRepository {
    db: Database,
}

impl MongoCartRepository {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    fn partition(&self, user_id: ObjectId) -> Collection<CartDocument> {
        self.db.collection(&partition_name(user_id))
    }
}

#[async_trait]
impl CartRepository for MongoCartRepository {
    async fn ensure_partition(&self, user_id: ObjectId) -> AppResult<bool> {
        let name = partition_name(user_id);
        let existing = self
            .db
            .list_collection_names()
            .filter(doc! { "name": name.as_str() })
            .await?;
        if !existing.is_empty() {
            return Ok(false);
        }

        match self.db.create_collection(&name).await {
            Ok(()) => Ok(true),
            // Lost a race with a concurrent create; the partition exists.
            Err(err) if is_namespace_exists(&err) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn insert(&self, cart: &CartDocument) -> AppResult<()> {
        self.partition(cart.user).insert_one(cart).await?;
        Ok(())
    }

    async fn find_for_user(&self, user_id: ObjectId) -> AppResult<Vec<CartDocument>> {
        let cursor = self
            .partition(user_id)
            .find(doc! {})
            .sort(doc! { "_id": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
