use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const TOKEN_TTL_DAYS: i64 = 30;
const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// HMAC keys for issuing and verifying bearer tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::days(TOKEN_TTL_DAYS),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: ObjectId) -> anyhow::Result<(String, DateTime<Utc>)> {
        self.issue_at(user_id, Utc::now())
    }

    /// Signs a claim for `user_id` as if issued at `issued_at`; returns the
    /// token and its expiry.
    pub fn issue_at(
        &self,
        user_id: ObjectId,
        issued_at: DateTime<Utc>,
    ) -> anyhow::Result<(String, DateTime<Utc>)> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| anyhow::anyhow!("Failed to set expiration"))?;
        let claims = Claims {
            sub: user_id.to_hex(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding)
            .map_err(|e| anyhow::anyhow!("failed to sign token: {e}"))?;
        Ok((token, expires_at))
    }

    /// Checks signature, algorithm and expiry. Only HS256 is accepted.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        decode::<Claims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}
