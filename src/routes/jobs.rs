use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use validator::Validate;

use crate::{
    dto::job_dto::CreateJobPayload,
    error::Result,
    middleware::auth::authorize,
    models::user::{Role, User},
    AppState,
};

pub async fn create_job(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    authorize(&user, &[Role::Admin])?;
    payload.validate()?;
    let job = state.job_service.create(payload.into(), user.id).await?;
    Ok(Json(job))
}

pub async fn list_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list().await?;
    Ok(Json(jobs))
}

pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get(id).await?;
    Ok(Json(job))
}
