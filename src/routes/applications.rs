use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use validator::Validate;

use crate::{
    dto::application_dto::{
        ActivityEntry, ApplicationDetails, ApplicationWithJob, CreateApplicationPayload,
        CreateDetailedApplicationPayload, UpdateStatusPayload,
    },
    dto::auth_dto::UserSummary,
    error::{Error, Result},
    middleware::auth::authorize,
    models::application::NewApplication,
    models::user::{Role, User},
    AppState,
};

pub async fn create_application(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    authorize(&user, &[Role::Applicant])?;
    payload.validate()?;
    let application = state
        .application_service
        .create(NewApplication::for_job(payload.job_id), &user)
        .await?;
    Ok(Json(application))
}

pub async fn create_detailed_application(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateDetailedApplicationPayload>,
) -> Result<impl IntoResponse> {
    authorize(&user, &[Role::Applicant])?;

    let has_name = payload.name.as_deref().is_some_and(|s| !s.is_empty());
    let has_email = payload.email.as_deref().is_some_and(|s| !s.is_empty());
    let job_id = match payload.job_id {
        Some(id) if has_name && has_email => id,
        _ => {
            return Err(Error::BadRequest(
                "Job ID, name, and email are required".to_string(),
            ))
        }
    };

    let application = state
        .application_service
        .create(payload.into_new_application(job_id), &user)
        .await?;
    Ok(Json(application))
}

pub async fn my_applications(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse> {
    authorize(&user, &[Role::Applicant])?;
    let applications = state.application_service.list_by_applicant(user.id).await?;

    let mut items = Vec::with_capacity(applications.len());
    for application in applications {
        let job = state.job_service.find(application.job_id).await?;
        items.push(ApplicationWithJob { application, job });
    }
    Ok(Json(items))
}

pub async fn list_applications(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse> {
    authorize(&user, &[Role::Admin, Role::BotMimic])?;
    let applications = state.application_service.list_all().await?;

    let mut items = Vec::with_capacity(applications.len());
    for application in applications {
        let job = state.job_service.find(application.job_id).await?;
        let applicant = state
            .user_service
            .get(application.applicant_id)
            .await?
            .map(UserSummary::from);
        items.push(ApplicationDetails {
            application,
            job,
            applicant,
        });
    }
    Ok(Json(items))
}

pub async fn get_application(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .get(id)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

    if user.role == Role::Applicant && application.applicant_id != user.id {
        return Err(Error::Forbidden("Access denied".to_string()));
    }

    let job = state.job_service.find(application.job_id).await?;
    let applicant = state
        .user_service
        .get(application.applicant_id)
        .await?
        .map(UserSummary::from);
    Ok(Json(ApplicationDetails {
        application,
        job,
        applicant,
    }))
}

pub async fn update_application_status(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse> {
    authorize(&user, &[Role::Admin, Role::BotMimic])?;
    let is_automated = user.role == Role::BotMimic;
    let updated = state
        .application_service
        .transition(id, &payload.status, &user, payload.comment, is_automated)
        .await?;
    Ok(Json(updated))
}

pub async fn get_application_activities(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .get(id)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

    if user.role == Role::Applicant && application.applicant_id != user.id {
        return Err(Error::Forbidden("Access denied".to_string()));
    }

    let activities = state.application_service.activities(id).await?;
    let mut items = Vec::with_capacity(activities.len());
    for activity in activities {
        let updated_by = state
            .user_service
            .get(activity.updated_by_id)
            .await?
            .map(UserSummary::from);
        items.push(ActivityEntry {
            activity,
            updated_by,
        });
    }
    Ok(Json(items))
}
