use std::sync::Arc;

use mongodb::Database;

use crate::{
    config::AppConfig,
    repository::{
        CartRepository, MemoryCartRepository, MemoryProductRepository, MemoryUserRepository,
        MongoCartRepository, MongoProductRepository, MongoUserRepository, ProductRepository,
        UserRepository,
    },
    security::{CookieSettings, TokenKeys},
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub tokens: Arc<TokenKeys>,
    pub cookie: Arc<CookieSettings>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        products: Arc<dyn ProductRepository>,
        carts: Arc<dyn CartRepository>,
        tokens: TokenKeys,
        cookie: CookieSettings,
    ) -> Self {
        Self {
            users,
            products,
            carts,
            tokens: Arc::new(tokens),
            cookie: Arc::new(cookie),
        }
    }

    pub fn mongo(db: &Database, config: &AppConfig) -> Self {
        Self::new(
            Arc::new(MongoUserRepository::new(db)),
            Arc::new(MongoProductRepository::new(db)),
            Arc::new(MongoCartRepository::new(db)),
            TokenKeys::new(config.jwt_secret.as_bytes()),
            cookie_settings(config),
        )
    }

    pub fn in_memory(tokens: TokenKeys, cookie: CookieSettings) -> Self {
        Self::new(
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryProductRepository::new()),
            Arc::new(MemoryCartRepository::new()),
            tokens,
            cookie,
        )
    }
}

pub fn cookie_settings(config: &AppConfig) -> CookieSettings {
    CookieSettings {
        domain: config.cookie_domain.clone(),
        secure: config.cookie_secure,
    }
}
