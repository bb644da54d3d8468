use crate::config::get_config;
use crate::error::{Error, Result};
use crate::models::user::{Role, User};
use crate::utils::time::now;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
}

pub fn issue_token(user: &User) -> Result<String> {
    let config = get_config();
    let expires_at = now() + chrono::Duration::hours(config.token_ttl_hours);
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role.as_str().to_string(),
        exp: expires_at.timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

/// Requires a valid bearer token and resolves the full user record, inserting
/// it as a request extension for handlers to pick up.
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return unauthorized("No token provided");
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return unauthorized("No token provided");
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return unauthorized("No token provided");
    };

    let config = get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let claims = match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => data.claims,
        Err(_) => return unauthorized("Invalid token"),
    };

    let Ok(user_id) = claims.sub.parse::<i64>() else {
        return unauthorized("Invalid token");
    };
    let user = match state.user_service.get(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return unauthorized("User not found"),
        Err(err) => return err.into_response(),
    };

    req.extensions_mut().insert(user);
    next.run(req).await
}

/// Role gate consulted per handler; paths differ per method, so this cannot
/// live on the router layer.
pub fn authorize(user: &User, allowed: &[Role]) -> Result<()> {
    if !allowed.contains(&user.role) {
        return Err(Error::Forbidden("Insufficient permissions".to_string()));
    }
    Ok(())
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": message })),
    )
        .into_response()
}
