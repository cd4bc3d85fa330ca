use std::sync::OnceLock;

use mongodb::bson::oid::ObjectId;

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    entity::{StoredTimeStamp, UserDocument},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::UserRole,
    response::ApiResponse,
    security::{hash_password, verify_password},
    state::AppState,
    validation::{normalize_email, validate_registration},
};

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<RegisterResponse>> {
    validate_registration(&payload)?;
    let email = normalize_email(&payload.email);

    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::validation("User already exists"));
    }

    let password = hash_password(&payload.password)?;
    let user = UserDocument {
        id: ObjectId::new(),
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        email,
        password,
        role: UserRole::User,
        time_stamp: StoredTimeStamp::now(),
    };
    state.users.insert(&user).await?;
    tracing::info!(user_id = %user.id, "user registered");

    // Not atomic with the insert: on failure the account stays without a
    // cart partition and the client sees a 500.
    if let Err(err) = state.carts.ensure_partition(user.id).await {
        tracing::error!(user_id = %user.id, error = %err, "cart partition provisioning failed");
        return Err(err);
    }

    Ok(ApiResponse::success(
        "User created",
        RegisterResponse {
            id: user.id.to_hex(),
        },
        None,
    ))
}

pub async fn login_user(state: &AppState, payload: LoginRequest) -> AppResult<LoginResponse> {
    let LoginRequest { email, password } = payload;
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }

    let user = match state.users.find_by_email(&normalize_email(&email)).await? {
        Some(u) => u,
        None => {
            // Unknown email costs one verification, same as a wrong password.
            if let Some(digest) = dummy_digest() {
                verify_password(digest, &password);
            }
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(&user.password, &password) {
        return Err(AppError::InvalidCredentials);
    }

    let (token, expires_at) = state.tokens.issue(user.id)?;
    tracing::info!(user_id = %user.id, "user logged in");

    Ok(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_at,
    })
}

/// Verifies a bearer token and resolves its subject to a stored user. Every
/// rejection collapses into `Unauthorized`; the cause is only logged.
pub async fn resolve_identity(state: &AppState, token: &str) -> AppResult<AuthUser> {
    let claims = state.tokens.verify(token).map_err(|err| {
        tracing::debug!(error = %err, "token rejected");
        AppError::Unauthorized
    })?;

    let user_id = ObjectId::parse_str(&claims.sub).map_err(|_| {
        tracing::debug!(sub = %claims.sub, "token subject is not an object id");
        AppError::Unauthorized
    })?;

    let Some(user) = state.users.find_by_id(user_id).await? else {
        tracing::debug!(%user_id, "token subject does not exist");
        return Err(AppError::Unauthorized);
    };

    Ok(AuthUser {
        user_id: user.id,
        role: user.role,
    })
}

fn dummy_digest() -> Option<&'static str> {
    static DIGEST: OnceLock<Option<String>> = OnceLock::new();
    DIGEST
        .get_or_init(|| hash_password("timing-equalizer").ok())
        .as_deref()
}
