//! Authentication Middleware
//!
//! `require_auth` validates the bearer token and stores the [`CurrentUser`] in
//! request extensions. The role gateways run after it and only check the role.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderMap;
use shared::error::{AppError, ErrorCode};
use shared::models::Role;

use super::{CurrentUser, JwtError, JwtService};
use crate::state::AppState;

/// Decode the caller from the `Authorization: Bearer` header
pub fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<CurrentUser, AppError> {
    let header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(AppError::not_authenticated)?;

    let token = JwtService::extract_from_header(header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    let claims = state.jwt.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "auth_failed");
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    CurrentUser::try_from(claims).map_err(|_| AppError::invalid_token("Invalid token"))
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let user = authenticate(&state, req.headers()).inspect_err(|_| {
        tracing::warn!(uri = ?req.uri(), "auth_missing_or_invalid");
    })?;

    tracing::debug!(user_id = user.id, role = %user.role, "User authenticated");

    req.extensions_mut().insert(user.clone());
    let mut response = next.run(req).await;
    // Lets the request logger report the caller
    response.extensions_mut().insert(user);
    Ok(response)
}

fn check_role(req: &Request, role: Role) -> Result<(), AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::not_authenticated)?;

    if user.role == role || user.is_admin() {
        return Ok(());
    }

    tracing::warn!(
        user_id = user.id,
        user_role = %user.role,
        required_role = %role,
        "role_required"
    );
    Err(AppError::with_message(
        ErrorCode::RoleRequired,
        format!("{} access required", role),
    ))
}

/// Customer gateway: customers (and admins)
pub async fn require_customer(req: Request, next: Next) -> Result<Response, AppError> {
    check_role(&req, Role::Customer)?;
    Ok(next.run(req).await)
}

/// Retailer gateway: retailers (and admins)
pub async fn require_retailer(req: Request, next: Next) -> Result<Response, AppError> {
    check_role(&req, Role::Retailer)?;
    Ok(next.run(req).await)
}

/// Admin gateway
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::not_authenticated)?;
    if !user.is_admin() {
        tracing::warn!(user_id = user.id, user_role = %user.role, "admin_required");
        return Err(AppError::new(ErrorCode::AdminRequired));
    }
    Ok(next.run(req).await)
}
