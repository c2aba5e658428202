use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use rand_core::OsRng;
use tracing::info;
use uuid::Uuid;

use invitr_types::api::{
    Claims, LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse,
    UpdateProfileRequest,
};

use crate::error::{ApiError, ApiResult};
use crate::extract::{CurrentUser, Json};
use crate::{AppState, blocking};

const MIN_PASSWORD_LEN: usize = 8;

fn normalize_email(email: &str) -> ApiResult<String> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(ApiError::bad_request("A valid email address is required")),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = normalize_email(&req.email)?;
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    let phone = non_blank(req.phone);

    let user_id = Uuid::new_v4();
    let token = create_token(&state.jwt_secret, user_id, &email)?;

    blocking(&state, move |state| {
        if state.db.get_user_by_email(&email)?.is_some() {
            return Err(ApiError::Conflict("Email already registered".into()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?
            .to_string();

        state
            .db
            .create_user(&user_id.to_string(), &email, &password_hash, &name, phone.as_deref())
            .map_err(|e| email_conflict(e, "Email already registered"))?;
        info!("Registered user {}", user_id);
        Ok(())
    })
    .await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id, token })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let email = req.email.trim().to_lowercase();

    let user = blocking(&state, move |state| {
        let user = state
            .db
            .get_user_by_email(&email)?
            .ok_or_else(invalid_credentials)?;

        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|e| anyhow::anyhow!("stored hash for {} is corrupt: {}", user.id, e))?;
        Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed_hash)
            .map_err(|_| invalid_credentials())?;
        Ok(user)
    })
    .await?;

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|e| anyhow::anyhow!("corrupt user id '{}': {}", user.id, e))?;
    let token = create_token(&state.jwt_secret, user_id, &user.email)?;

    Ok(Json(LoginResponse {
        user_id,
        name: user.name,
        token,
    }))
}

/// A concurrent request can claim the email after the existence check.
fn email_conflict(err: anyhow::Error, msg: &str) -> ApiError {
    if invitr_db::is_unique_violation(&err) {
        ApiError::Conflict(msg.into())
    } else {
        ApiError::Internal(err)
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid email or password")
}

pub async fn me(State(state): State<AppState>, user: CurrentUser) -> ApiResult<Json<ProfileResponse>> {
    let profile = blocking(&state, move |state| {
        state
            .db
            .get_user_by_id(&user.id)?
            .map(ProfileResponse::from)
            .ok_or(ApiError::NotFound("User not found"))
    })
    .await?;
    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let email = normalize_email(&req.email)?;
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }
    let phone = non_blank(req.phone);

    let profile = blocking(&state, move |state| {
        if let Some(other) = state.db.get_user_by_email(&email)? {
            if other.id != user.id {
                return Err(ApiError::Conflict("Email already in use".into()));
            }
        }
        let updated = state
            .db
            .update_user_profile(&user.id, &name, &email, phone.as_deref())
            .map_err(|e| email_conflict(e, "Email already in use"))?;
        if !updated {
            return Err(ApiError::NotFound("User not found"));
        }
        state
            .db
            .get_user_by_id(&user.id)?
            .map(ProfileResponse::from)
            .ok_or(ApiError::NotFound("User not found"))
    })
    .await?;

    Ok(Json(profile))
}

pub fn create_token(secret: &str, user_id: Uuid, email: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
