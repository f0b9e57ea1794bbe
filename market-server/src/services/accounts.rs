//! Registration and login

use shared::error::{AppError, ErrorCode};
use shared::models::{
    LoginRequest, LoginResponse, RegisterCustomerRequest, RegisterResponse,
    RegisterRetailerRequest, Role, UserStatus,
};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::auth::password::{hash_password, verify_password};
use crate::db;
use crate::error::{ServiceResult, map_unique_violation};

pub const MIN_PASSWORD_LEN: usize = 8;

fn validate_credentials(username: &str, email: &str, password: &str) -> Result<(), AppError> {
    if username.trim().is_empty() {
        return Err(AppError::with_message(ErrorCode::RequiredField, "username is required"));
    }
    if !email.contains('@') {
        return Err(AppError::validation("Invalid email address").with_detail("field", "email"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }
    Ok(())
}

fn conflict(message: &str) -> AppError {
    if message.contains("users.email") {
        AppError::new(ErrorCode::EmailExists)
    } else if message.contains("users.username") {
        AppError::new(ErrorCode::UsernameExists)
    } else {
        AppError::new(ErrorCode::AlreadyExists)
    }
}

/// Username taken wins over email taken when both collide
async fn ensure_username_free(pool: &SqlitePool, username: &str) -> ServiceResult<()> {
    if db::users::find_credentials(pool, username).await?.is_some() {
        return Err(AppError::new(ErrorCode::UsernameExists)
            .with_detail("username", username)
            .into());
    }
    Ok(())
}

fn hash(password: &str) -> Result<String, AppError> {
    hash_password(password).map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

pub async fn register_customer(
    pool: &SqlitePool,
    req: RegisterCustomerRequest,
) -> ServiceResult<RegisterResponse> {
    let username = req.username.trim();
    let email = req.email.trim();
    validate_credentials(username, email, &req.password)?;
    ensure_username_free(pool, username).await?;

    let password_hash = hash(&req.password)?;
    let user_id = db::users::create(
        pool,
        username,
        email,
        &password_hash,
        Role::Customer,
        UserStatus::Active,
        now_millis(),
    )
    .await
    .map_err(|e| map_unique_violation(e, conflict))?;

    tracing::info!(user_id = user_id, username = %username, "Customer registered");
    Ok(RegisterResponse {
        message: "Customer registered successfully".to_string(),
        user_id,
        retailer_id: None,
    })
}

/// Creates a pending retailer account and its store in one transaction
pub async fn register_retailer(
    pool: &SqlitePool,
    req: RegisterRetailerRequest,
) -> ServiceResult<RegisterResponse> {
    let username = req.username.trim();
    let email = req.email.trim();
    validate_credentials(username, email, &req.password)?;
    if req.name.trim().is_empty() || req.location.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "Store name and location are required",
        )
        .into());
    }
    ensure_username_free(pool, username).await?;

    let password_hash = hash(&req.password)?;

    let mut tx = pool.begin().await?;
    let user_id = db::users::create(
        &mut *tx,
        username,
        email,
        &password_hash,
        Role::Retailer,
        UserStatus::Pending,
        now_millis(),
    )
    .await
    .map_err(|e| map_unique_violation(e, conflict))?;
    let retailer_id = db::retailers::create(
        &mut *tx,
        user_id,
        req.name.trim(),
        req.location.trim(),
        req.deliverable,
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        user_id = user_id,
        retailer_id = retailer_id,
        username = %username,
        "Retailer registered, awaiting approval"
    );
    Ok(RegisterResponse {
        message: "Registration submitted. Await admin approval.".to_string(),
        user_id,
        retailer_id: Some(retailer_id),
    })
}

/// Verify credentials for one of the three login endpoints.
///
/// Unknown user and wrong password produce the same error.
pub async fn login(
    pool: &SqlitePool,
    jwt: &JwtService,
    req: LoginRequest,
    expected_role: Role,
) -> ServiceResult<LoginResponse> {
    let username = req.username.trim();
    let Some(user) = db::users::find_credentials(pool, username).await? else {
        tracing::warn!(username = %username, "Login failed - user not found");
        return Err(AppError::invalid_credentials().into());
    };

    if !verify_password(&req.password, &user.password_hash) {
        tracing::warn!(username = %username, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials().into());
    }

    if user.role != expected_role {
        tracing::warn!(
            username = %username,
            role = %user.role,
            expected = %expected_role,
            "Login rejected - wrong role"
        );
        return Err(AppError::permission_denied(format!(
            "This account cannot sign in as {expected_role}"
        ))
        .into());
    }

    if user.status != UserStatus::Active {
        return Err(AppError::with_message(
            ErrorCode::AccountDisabled,
            format!("Account is {}", user.status.as_str()),
        )
        .into());
    }

    let retailer_id = if user.role == Role::Retailer {
        let retailer = db::retailers::find_by_user_id(pool, user.id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::RetailerNotFound))?;
        if retailer.is_blocked {
            return Err(AppError::with_message(ErrorCode::AccountDisabled, "Retailer is blocked").into());
        }
        Some(retailer.id)
    } else {
        None
    };

    let token = jwt
        .generate_token(user.id, &user.username, user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "User logged in");

    Ok(LoginResponse {
        token,
        user_id: user.id,
        username: user.username,
        role: user.role,
        retailer_id,
    })
}
