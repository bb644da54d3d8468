use axum::{extract::State, response::IntoResponse, Extension, Json};
use validator::Validate;

use crate::{
    dto::auth_dto::{AuthResponse, LoginPayload, RegisterPayload, UserSummary},
    error::Result,
    middleware::auth::issue_token,
    models::user::{Role, User},
    AppState,
};

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let role = payload.role.unwrap_or(Role::Applicant);
    let user = state
        .user_service
        .register(payload.email, &payload.password, payload.name, role)
        .await?;
    let token = issue_token(&user)?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .login(&payload.email, &payload.password)
        .await?;
    let token = issue_token(&user)?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

pub async fn me(Extension(user): Extension<User>) -> Result<impl IntoResponse> {
    Ok(Json(UserSummary::from(user)))
}
